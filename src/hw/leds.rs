//! The four chase LEDs (active-low).

use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};
use mesh_badge::config::LED_COUNT;
use mesh_badge::hal::LedBank;

pub struct Leds {
    pins: [Output<'static>; LED_COUNT],
}

impl Leds {
    /// Configure the pins as outputs, all LEDs off.
    pub fn new(pins: [AnyPin; LED_COUNT]) -> Self {
        Self {
            pins: pins.map(|pin| Output::new(pin, Level::High, OutputDrive::Standard)),
        }
    }
}

impl LedBank for Leds {
    fn set_level(&mut self, index: usize, on: bool) {
        if let Some(pin) = self.pins.get_mut(index) {
            if on {
                pin.set_low();
            } else {
                pin.set_high();
            }
        }
    }
}
