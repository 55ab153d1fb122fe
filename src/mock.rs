//! Recording collaborators for unit tests.

use std::string::{String, ToString};
use std::vec::Vec;

use crate::config::LED_COUNT;
use crate::error::{Error, SensorError};
use crate::hal::{Board, Environment, LedBank, Motion, Network, Proximity, Sensors, Surface};
use crate::ui::layout::Font;

/// One finished (flushed) frame: the lines drawn since the last clear.
pub type Frame = Vec<String>;

#[derive(Default)]
pub struct Panel {
    pub current: Vec<String>,
    pub frames: Vec<Frame>,
    pub clears: usize,
    pub fail_clear: bool,
}

impl Panel {
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Surface for Panel {
    fn clear(&mut self) -> Result<(), Error> {
        self.clears += 1;
        self.current.clear();
        if self.fail_clear {
            return Err(Error::Display);
        }
        Ok(())
    }

    fn select_font(&mut self, _font: Font) -> Result<(), Error> {
        Ok(())
    }

    fn glyph_size(&self, font: Font) -> (u16, u16) {
        match font {
            Font::Big => (10, 20),
            Font::Medium => (8, 13),
            Font::Small => (5, 8),
        }
    }

    fn draw_text(&mut self, text: &str, _x: u16, _y: u16) -> Result<(), Error> {
        self.current.push(text.to_string());
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Error> {
        self.frames.push(core::mem::take(&mut self.current));
        Ok(())
    }
}

pub struct Mesh {
    pub address: u16,
    pub ready: bool,
    pub announces: usize,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            address: 0x0001,
            ready: true,
            announces: 0,
        }
    }
}

impl Network for Mesh {
    fn own_address(&self) -> u16 {
        self.address
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn send_announce(&mut self) -> Result<(), Error> {
        self.announces += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct Probe {
    pub fail: Option<SensorError>,
    pub samples: usize,
}

impl Probe {
    fn check(&mut self, source: SensorError) -> Result<(), Error> {
        self.samples += 1;
        match self.fail {
            Some(failing) if failing == source => Err(source.into()),
            _ => Ok(()),
        }
    }
}

impl Sensors for Probe {
    fn sample_environment(&mut self) -> Result<Environment, Error> {
        self.check(SensorError::Environment)?;
        Ok(Environment {
            temperature: 21.5,
            humidity: 40.0,
        })
    }

    fn sample_motion(&mut self) -> Result<Motion, Error> {
        self.check(SensorError::Motion)?;
        Ok(Motion {
            x: 0.125,
            y: -0.5,
            z: 9.81,
        })
    }

    fn sample_proximity(&mut self) -> Result<Proximity, Error> {
        self.check(SensorError::Proximity)?;
        Ok(Proximity {
            light: 120,
            proximity: 3,
        })
    }
}

#[derive(Default)]
pub struct Lamps {
    pub on: [bool; LED_COUNT],
    pub lit: Vec<usize>,
}

impl LedBank for Lamps {
    fn set_level(&mut self, index: usize, on: bool) {
        self.on[index] = on;
        if on {
            self.lit.push(index);
        }
    }
}

pub type TestBoard = Board<Panel, Mesh, Probe, Lamps>;

pub fn board() -> TestBoard {
    Board {
        display: Panel::default(),
        network: Mesh::default(),
        sensors: Probe::default(),
        leds: Lamps::default(),
    }
}
