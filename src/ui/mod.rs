//! User interface - three screens on a monochrome panel, one button.
//!
//! ## Components
//!
//! - **Layout**: word-wrapping text placement in three font sizes
//! - **Screens**: the main (name), sensors and statistics views
//! - **Gesture**: short/long press classification of the single button

pub mod gesture;
pub mod layout;
pub mod screens;

use crate::config::{Millis, SENSOR_REFRESH_MS};

/// Screens (views) the badge can show. A long press steps through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Device name, big and centred.
    Main,
    /// Live sensor readings, refreshed periodically.
    Sensors,
    /// Own address, node count and top senders.
    Stats,
}

impl Screen {
    /// Next screen in the cycle Main → Sensors → Stats → Main.
    pub const fn next(self) -> Self {
        match self {
            Screen::Main => Screen::Sensors,
            Screen::Sensors => Screen::Stats,
            Screen::Stats => Screen::Main,
        }
    }

    /// Whether a short press does anything on this screen.
    pub const fn accepts_short_press(self) -> bool {
        matches!(self, Screen::Main)
    }

    /// Redraw period while this screen is shown, if it refreshes on its own.
    pub const fn refresh_interval(self) -> Option<Millis> {
        match self {
            Screen::Sensors => Some(SENSOR_REFRESH_MS),
            Screen::Main | Screen::Stats => None,
        }
    }
}
