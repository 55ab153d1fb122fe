//! Board glue for the nRF52840 badge - the concrete collaborators the
//! badge core drives.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C (TWISPI0)
//! - **Buttons**: one tactile switch, edges handed to the cooperative loop
//! - **LEDs**: four active-low GPIOs
//! - **Sensors**: HDC1010, MMA8652 and APDS9960 on I²C (TWISPI1)
//! - **Bearer**: hello exchange over BLE advertising (SoftDevice)
//! - **Storage**: factory-reset eraser over the SoftDevice flash

pub mod bearer;
pub mod buttons;
pub mod display;
pub mod leds;
pub mod sensors;
pub mod storage;
