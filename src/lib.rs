//! Interaction and display engine of the mesh badge.
//!
//! Everything here is pure logic that runs on the host as well as on the
//! nRF52840: the peer statistics table, the top-sender ranking, text layout,
//! the button gesture classifier, the LED chase and the deferred-work
//! scheduler, tied together by [`badge::Badge`]. The hello beacon codec and,
//! with the `embedded` feature, the mesh handoff channels live here too.
//!
//! Usage: `cargo test` (host) - the embedded binary is built with
//! `--features embedded` for `thumbv7em-none-eabihf`.
//!
//! Note: The embedded binary (main.rs, `#![no_std]` + `#![no_main]`) adds the
//! hardware glue in `hw/` and drives this crate from a single cooperative
//! Embassy task.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Core
// ═══════════════════════════════════════════════════════════════════════════

pub mod badge;
pub mod beacon;
pub mod config;
pub mod error;
pub mod hal;
pub mod leds;
#[cfg(feature = "embedded")]
pub mod mesh;
pub mod ranking;
pub mod scheduler;
pub mod stats;
pub mod text;
pub mod ui;

#[cfg(test)]
pub(crate) mod mock;

pub use badge::{Badge, BootMode, Event};
pub use error::{Error, SensorError};
pub use hal::Board;
