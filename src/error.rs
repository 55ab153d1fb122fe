//! Unified error type for the badge.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// Clearing, drawing to or flushing the display failed.
    Display,

    // Sensors
    /// A sensor sample could not be taken.
    Sensor(SensorError),

    // Mesh
    /// The mesh stack did not accept an outgoing message.
    Network,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Bring-up
    /// A driver or device could not be bound during initialisation.
    DeviceNotFound,
}

/// Which sensor source failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Temperature / humidity.
    Environment,
    /// Accelerometer.
    Motion,
    /// Ambient light / proximity.
    Proximity,
}

// Convenience conversions

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}
