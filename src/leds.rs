//! LED chase animation.
//!
//! One LED of the bank is lit per tick, walking the bank in order. After
//! `LED_CYCLES` full passes the next tick switches everything off, rewinds
//! the counter and asks not to be rescheduled.

use crate::config::{LED_COUNT, LED_CYCLES};
use crate::hal::LedBank;

/// Ticks that light an LED before the chase stops.
pub const CHASE_TICKS: usize = LED_COUNT * LED_CYCLES;

/// Position of the chase.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedSequencer {
    counter: usize,
}

impl LedSequencer {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Ticks taken since the chase was last rewound.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Advance one step. Returns `true` while the chase wants another tick.
    pub fn tick<L: LedBank>(&mut self, leds: &mut L) -> bool {
        all_off(leds);

        if self.counter >= CHASE_TICKS {
            debug!("leds: chase done");
            self.counter = 0;
            return false;
        }

        leds.set_level(self.counter % LED_COUNT, true);
        self.counter += 1;
        true
    }
}

/// Switch the whole bank off.
pub fn all_off<L: LedBank>(leds: &mut L) {
    for index in 0..LED_COUNT {
        leds.set_level(index, false);
    }
}
