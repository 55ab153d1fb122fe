//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, capacities and storage layout live here so they
//! can be tuned in one place.

/// Milliseconds since boot. The cooperative loop feeds this from the RTC.
pub type Millis = u64;

// Peer statistics

/// Number of peer slots in the statistics table. Never grows.
pub const STAT_COUNT: usize = 128;

/// Maximum stored length of a peer name (bytes).
pub const PEER_NAME_LEN: usize = 8;

/// Largest TTL a mesh message can carry; initial `min_hops` of a peer.
pub const TTL_MAX: u8 = 0x7f;

/// Entries shown in the "Most messages from" leaderboard.
pub const TOP_SENDERS: usize = 4;

// Display

/// Name shown on the main screen until the network renames the device.
/// Commas render as line breaks.
pub const DEVICE_NAME: &str = "Mesh Badge";

/// Maximum device name length (bytes).
pub const DEVICE_NAME_MAX: usize = 32;

/// Lines of big-font body text that fit on the panel.
pub const TEXT_MAX_LINES: usize = 3;

/// Refresh interval of the sensors screen.
pub const SENSOR_REFRESH_MS: Millis = 2_000;

/// Keep refreshing the sensors screen after a failed sample.
///
/// Off: a failed sample ends the periodic refresh until the screen is
/// re-entered or another redraw is requested.
pub const SENSOR_REFRESH_AFTER_ERROR: bool = false;

/// How long a "<name> says hi!" banner stays up.
pub const HELLO_BANNER_MS: Millis = 3_000;

/// How long the factory-reset banner stays up at boot.
pub const RESET_BANNER_MS: Millis = 4_000;

// Button
//
//   SW0 (active-low, internal pull-up) → P1.06

/// Hold time after which a press becomes a long press.
pub const LONG_PRESS_MS: Millis = 1_000;

// LEDs
//
//   LED0 → P0.11, LED1 → P0.12, LED2 → P1.09, LED3 → P0.13 (all active-low)

/// LEDs in the chase bank.
pub const LED_COUNT: usize = 4;

/// Period of one chase step.
pub const LED_TICK_MS: Millis = 100;

/// Full passes over the bank before the chase stops on its own.
pub const LED_CYCLES: usize = 5;

// I²C
//
//   Display (SSD1306)  SDA → P0.26, SCL → P0.27  (TWISPI0)
//   Sensors            SDA → P0.07, SCL → P0.08  (TWISPI1)

// Storage

/// Flash page index where the badge storage region starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages erased by a boot-time factory reset.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;

// Cooperative loop

/// Longest sleep of the cooperative loop when no work is scheduled.
pub const IDLE_WAKE_SECS: u64 = 60;

// Hello bearer

/// How long one hello announce is advertised.
pub const ANNOUNCE_ADV_MS: u64 = 1000;

/// Senders whose announce bursts are tracked at once.
pub const HELLO_SENDERS_TRACKED: usize = 8;

/// Advertising interval of a hello announce (units of 0.625 ms, i.e. 100 ms).
pub const ANNOUNCE_ADV_INTERVAL: u32 = 160;
