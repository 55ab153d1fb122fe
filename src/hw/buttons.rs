//! Button edge watcher.
//!
//! Stands in for the GPIO interrupt handler: waits for any edge on the
//! active-low button, samples the pin and hands the level to the cooperative
//! loop through a single-slot signal (latest level wins). Debounce, timers
//! and screen logic all happen on the loop.

use embassy_nrf::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Pin level at the last edge, `true` = electrically low (pressed).
pub static EDGE: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Run the edge loop for the badge button.
pub async fn edge_task(mut btn: Input<'static>) -> ! {
    loop {
        btn.wait_for_any_edge().await;
        EDGE.signal(btn.is_low());
    }
}
