//! Handoff between the mesh stack and the badge loop.
//!
//! The mesh stack runs in its own tasks. Its model callbacks push
//! [`Event`]s into [`MESH_EVENTS`] and never touch badge state; the badge
//! loop drains the channel. Announces go the other way through
//! [`MESH_COMMANDS`].

use crate::badge::Event;
use crate::error::Error;
use crate::hal::Network;
use crate::text::truncated;
use core::sync::atomic::{AtomicU16, Ordering};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Mesh → badge notifications.
pub static MESH_EVENTS: Channel<CriticalSectionRawMutex, Event, 8> = Channel::new();

/// Badge → mesh requests.
pub static MESH_COMMANDS: Channel<CriticalSectionRawMutex, MeshCommand, 4> = Channel::new();

/// Primary unicast address, `0` until the node is provisioned.
static OWN_ADDRESS: AtomicU16 = AtomicU16::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeshCommand {
    /// Broadcast a hello with the current device name.
    Announce,
}

fn post(event: Event) {
    if MESH_EVENTS.try_send(event).is_err() {
        warn!("mesh: event queue full, dropping");
    }
}

/// Provisioning finished: record the address and wake the badge.
pub fn on_ready(address: u16) {
    OWN_ADDRESS.store(address, Ordering::Relaxed);
    post(Event::MeshReady);
}

/// A hello message arrived. `name` is cut to the peer name length.
pub fn on_hello(address: u16, name: &str) {
    post(Event::Hello {
        address,
        name: truncated(name.chars()),
    });
}

/// A heartbeat arrived after `hops` hops.
pub fn on_heartbeat(address: u16, hops: u8) {
    post(Event::Heartbeat { address, hops });
}

/// The relay bearer forwarded a message.
pub fn on_relay(src: u16, dst: u16, ttl: u8) {
    post(Event::Relay { src, dst, ttl });
}

/// The device name was changed remotely.
pub fn on_name_changed(name: &str) {
    post(Event::NameChanged(truncated(name.chars())));
}

/// Badge-side view of the mesh.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshLink;

impl Network for MeshLink {
    fn own_address(&self) -> u16 {
        OWN_ADDRESS.load(Ordering::Relaxed)
    }

    fn is_ready(&self) -> bool {
        self.own_address() != 0
    }

    fn send_announce(&mut self) -> Result<(), Error> {
        MESH_COMMANDS
            .try_send(MeshCommand::Announce)
            .map_err(|_| Error::Network)
    }
}
