//! The badge: all mutable interaction state in one place.
//!
//! `Badge` is owned by the cooperative loop. The loop feeds it button edges
//! (as sampled pin levels handed over from the edge task), mesh events and
//! the current time, and calls [`Badge::run_due`] whenever the next deadline
//! passes. Nothing here blocks; every call runs to completion.

#[cfg(test)]
mod tests;

use core::fmt::Write;

use crate::config::{
    Millis, DEVICE_NAME_MAX, HELLO_BANNER_MS, LED_TICK_MS, LONG_PRESS_MS, PEER_NAME_LEN,
    RESET_BANNER_MS, SENSOR_REFRESH_AFTER_ERROR,
};
use crate::error::Error;
use crate::hal::{Board, LedBank, Network, Sensors, Surface};
use crate::leds::LedSequencer;
use crate::scheduler::{Scheduler, WorkId};
use crate::stats::PeerTable;
use crate::text::truncated;
use crate::ui::gesture::{ButtonClassifier, Gesture};
use crate::ui::{screens, Screen};
use heapless::String;

/// Inbound notifications from the mesh side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A peer announced itself.
    Hello {
        address: u16,
        name: String<PEER_NAME_LEN>,
    },
    /// A peer heartbeat arrived after `hops` hops.
    Heartbeat { address: u16, hops: u8 },
    /// This node relayed a message.
    Relay { src: u16, dst: u16, ttl: u8 },
    /// The mesh finished coming up.
    MeshReady,
    /// The device was given a new name.
    NameChanged(String<DEVICE_NAME_MAX>),
}

/// What the binary has to do after [`Badge::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    Normal,
    /// The button was held at power-up: erase persistent storage.
    FactoryReset,
}

/// Interaction state of the badge.
pub struct Badge {
    peers: PeerTable,
    screen: Screen,
    button: ButtonClassifier,
    chase: LedSequencer,
    scheduler: Scheduler,
    name: String<DEVICE_NAME_MAX>,
}

impl Badge {
    /// Create a badge showing the main screen with `name`.
    pub fn new(name: &str) -> Self {
        let mut badge = Self {
            peers: PeerTable::new(),
            screen: Screen::Main,
            button: ButtonClassifier::new(false),
            chase: LedSequencer::new(),
            scheduler: Scheduler::new(),
            name: String::new(),
        };
        badge.set_name(name);
        badge
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn peers(&self) -> &PeerTable {
        &self.peers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// When the loop next has to call [`Badge::run_due`].
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    /// Boot: record the button level sampled at power-up.
    ///
    /// A held button asks for a factory reset and keeps a banner up for
    /// `RESET_BANNER_MS`; otherwise the first redraw is requested.
    pub fn start<D: Surface>(&mut self, now: Millis, level_low: bool, display: &mut D) -> BootMode {
        self.button = ButtonClassifier::new(level_low);

        if level_low {
            info!("boot: button held, resetting device");
            self.show_text(now, "Resetting Device", false, Some(RESET_BANNER_MS), display);
            return BootMode::FactoryReset;
        }

        self.refresh_display(now);
        BootMode::Normal
    }

    /// Handle a button edge. `level_low` is the pin level sampled at the edge.
    ///
    /// Work already due runs first: a long press whose deadline passed
    /// before the release was seen still counts as a long press.
    pub fn on_button_edge<D, N, S, L>(
        &mut self,
        now: Millis,
        level_low: bool,
        board: &mut Board<D, N, S, L>,
    ) -> Option<Gesture>
    where
        D: Surface,
        N: Network,
        S: Sensors,
        L: LedBank,
    {
        self.run_due(now, board);

        let gesture = self.button.on_level(level_low, self.screen)?;

        match gesture {
            Gesture::Pressed => {
                self.scheduler.schedule(WorkId::LongPress, now, LONG_PRESS_MS);
            }
            Gesture::Released => {
                self.scheduler.cancel(WorkId::LongPress);
            }
            Gesture::ShortPress => {
                self.scheduler.cancel(WorkId::LongPress);
                self.announce(&mut board.network);
            }
        }

        Some(gesture)
    }

    /// Handle a notification from the mesh side.
    pub fn on_event<D, N, S, L>(&mut self, now: Millis, event: Event, board: &mut Board<D, N, S, L>)
    where
        D: Surface,
        N: Network,
    {
        match event {
            Event::Hello { address, name } => {
                if address == board.network.own_address() {
                    debug!("mesh: ignoring hello from self");
                    return;
                }
                self.peers.record_hello(address, &name);

                let mut banner: String<{ PEER_NAME_LEN + 16 }> = String::new();
                let _ = write!(banner, "{} says hi!", name.as_str());
                self.show_text(now, &banner, false, Some(HELLO_BANNER_MS), &mut board.display);
                self.blink_leds(now);
            }
            Event::Heartbeat { address, hops } => {
                self.peers.record_heartbeat(address, hops);
            }
            Event::Relay { src, dst, ttl } => {
                trace!("mesh: relayed {:#x} -> {:#x} ttl {}", src, dst, ttl);
                self.blink_leds(now);
            }
            Event::MeshReady => {
                info!("mesh: ready, own address {:#x}", board.network.own_address());
                self.refresh_display(now);
            }
            Event::NameChanged(name) => {
                self.set_name(&name);
                self.refresh_display(now);
            }
        }
    }

    /// Ask for a redraw of the current screen on the next loop pass.
    pub fn refresh_display(&mut self, now: Millis) {
        self.scheduler.schedule(WorkId::Redraw, now, 0);
    }

    /// Start the LED chase unless it is already running.
    pub fn blink_leds(&mut self, now: Millis) {
        if !self.scheduler.is_pending(WorkId::LedTick) {
            self.scheduler.schedule(WorkId::LedTick, now, LED_TICK_MS);
        }
    }

    /// Show `text` right away. With a `duration` the current screen comes
    /// back after it, replacing any pending redraw.
    pub fn show_text<D: Surface>(
        &mut self,
        now: Millis,
        text: &str,
        center: bool,
        duration: Option<Millis>,
        display: &mut D,
    ) {
        if let Err(e) = screens::show_text(display, text, center) {
            warn!("display: text not shown: {}", e);
        }

        if let Some(duration) = duration {
            self.scheduler.schedule(WorkId::Redraw, now, duration);
        }
    }

    /// Run every unit of work whose deadline is `<= now`, one at a time.
    ///
    /// Returns how many units ran.
    pub fn run_due<D, N, S, L>(&mut self, now: Millis, board: &mut Board<D, N, S, L>) -> usize
    where
        D: Surface,
        N: Network,
        S: Sensors,
        L: LedBank,
    {
        let mut ran = 0;
        while let Some(id) = self.scheduler.take_due(now) {
            match id {
                WorkId::Redraw => self.redraw(now, board),
                WorkId::LongPress => self.long_press(now),
                WorkId::LedTick => {
                    if self.chase.tick(&mut board.leds) {
                        self.scheduler.schedule(WorkId::LedTick, now, LED_TICK_MS);
                    }
                }
            }
            ran += 1;
        }
        ran
    }

    fn long_press(&mut self, now: Millis) {
        self.button.long_press();
        self.screen = self.screen.next();
        info!("ui: screen -> {}", self.screen);
        self.refresh_display(now);
    }

    fn redraw<D, N, S, L>(&mut self, now: Millis, board: &mut Board<D, N, S, L>)
    where
        D: Surface,
        N: Network,
        S: Sensors,
    {
        let drawn = match self.screen {
            Screen::Main => screens::show_main(&mut board.display, &self.name),
            Screen::Sensors => screens::show_sensors(&mut board.display, &mut board.sensors),
            Screen::Stats => screens::show_statistics(
                &mut board.display,
                board.network.own_address(),
                &self.peers,
            ),
        };

        if let Err(e) = drawn {
            warn!("display: {} redraw failed: {}", self.screen, e);
        }

        // A failed sensor sample ends the periodic refresh; display errors
        // do not.
        let sample_failed = matches!(drawn, Err(Error::Sensor(_)));
        if let Some(interval) = self.screen.refresh_interval() {
            if !sample_failed || SENSOR_REFRESH_AFTER_ERROR {
                self.scheduler.schedule(WorkId::Redraw, now, interval);
            }
        }
    }

    fn announce<N: Network>(&mut self, network: &mut N) {
        if !network.is_ready() {
            debug!("mesh: not ready, short press ignored");
            return;
        }
        if let Err(e) = network.send_announce() {
            warn!("mesh: announce failed: {}", e);
        }
    }

    fn set_name(&mut self, name: &str) {
        self.name = truncated(name.chars());
    }
}
