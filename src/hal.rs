//! Collaborators the badge core drives: display, mesh, sensors and LEDs.
//!
//! The core never talks to hardware directly. The embedded binary implements
//! these traits on top of the nRF52840 peripherals; tests use recording mocks.

use crate::error::Error;
use crate::ui::layout::Font;

/// Monochrome text surface (frame buffer + panel).
pub trait Surface {
    /// Blank the frame buffer.
    fn clear(&mut self) -> Result<(), Error>;

    /// Make `font` the font used by subsequent `draw_text` calls.
    fn select_font(&mut self, font: Font) -> Result<(), Error>;

    /// Glyph cell `(width, height)` of `font` in pixels.
    fn glyph_size(&self, font: Font) -> (u16, u16);

    /// Draw `text` with its top-left corner at pixel `(x, y)`.
    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), Error>;

    /// Push the frame buffer to the panel.
    fn finalize(&mut self) -> Result<(), Error>;
}

/// The slice of the mesh stack the badge needs.
pub trait Network {
    /// This node's unicast address (`0` until provisioned).
    fn own_address(&self) -> u16;

    /// Whether the mesh is up and messages can be sent.
    fn is_ready(&self) -> bool;

    /// Broadcast a hello carrying this node's name.
    fn send_announce(&mut self) -> Result<(), Error>;
}

/// Temperature (°C) and relative humidity (%).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Environment {
    pub temperature: f32,
    pub humidity: f32,
}

/// Acceleration per axis (m/s²).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Ambient light (raw clear channel) and proximity (raw count).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Proximity {
    pub light: u16,
    pub proximity: u8,
}

/// On-board sensors. Each source can fail independently.
pub trait Sensors {
    fn sample_environment(&mut self) -> Result<Environment, Error>;
    fn sample_motion(&mut self) -> Result<Motion, Error>;
    fn sample_proximity(&mut self) -> Result<Proximity, Error>;
}

/// The LED chase bank.
pub trait LedBank {
    /// Switch LED `index` on or off. Polarity is the driver's concern.
    fn set_level(&mut self, index: usize, on: bool);
}

/// Everything the cooperative loop hands to the badge when running work.
pub struct Board<D, N, S, L> {
    pub display: D,
    pub network: N,
    pub sensors: S,
    pub leds: L,
}
