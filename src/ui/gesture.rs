//! Single-button gesture classification.
//!
//! The button is active-low: an electrically low pin means pressed. Edges
//! are delivered as the sampled pin level; an edge that does not change the
//! recorded state is noise and is dropped. A fired long press forces the
//! recorded state back to released, so the physical release that follows is
//! seen as a duplicate and produces nothing.

use super::Screen;

/// Outcome of an accepted edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Button went down. The long-press timer must be armed.
    Pressed,
    /// Released before the long press fired on a screen that takes short
    /// presses. The long-press timer must be cancelled.
    ShortPress,
    /// Released before the long press fired on a screen that ignores short
    /// presses. The long-press timer must be cancelled.
    Released,
}

/// Debounced logical button state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonClassifier {
    pressed: bool,
}

impl ButtonClassifier {
    /// Start from a known state, usually the level sampled at boot.
    pub const fn new(pressed: bool) -> Self {
        Self { pressed }
    }

    /// Logical state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed a sampled pin level (`true` = electrically low).
    pub fn on_level(&mut self, level_low: bool, screen: Screen) -> Option<Gesture> {
        if level_low == self.pressed {
            return None;
        }

        self.pressed = level_low;
        debug!("button {}", if self.pressed { "pressed" } else { "released" });

        if self.pressed {
            Some(Gesture::Pressed)
        } else if screen.accepts_short_press() {
            Some(Gesture::ShortPress)
        } else {
            Some(Gesture::Released)
        }
    }

    /// The long-press timer fired: treat the button as released.
    pub fn long_press(&mut self) {
        self.pressed = false;
    }
}
