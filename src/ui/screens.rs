//! Screen renderers.
//!
//! Every renderer runs a full cycle: clear, draw, finalize. A failure that
//! ends the cycle early is returned to the caller; individual line failures
//! are logged by `print_line` and do not.

use core::fmt::Write;

use super::layout::{print_line, render_wrapped_body, Font};
use crate::config::DEVICE_NAME_MAX;
use crate::error::Error;
use crate::hal::{Sensors, Surface};
use crate::ranking::top_senders;
use crate::stats::PeerTable;
use crate::text::truncated;
use heapless::String;

type Line = String<32>;

/// Clear the panel and show `text` in the big font, wrapped.
pub fn show_text<D: Surface>(display: &mut D, text: &str, center: bool) -> Result<(), Error> {
    display.clear()?;
    render_wrapped_body(display, text, center);
    display.finalize()
}

/// Main screen: the device name, centred, commas breaking lines.
pub fn show_main<D: Surface>(display: &mut D, name: &str) -> Result<(), Error> {
    let text: String<DEVICE_NAME_MAX> =
        truncated(name.chars().map(|c| if c == ',' { '\n' } else { c }));

    show_text(display, &text, true)
}

/// Statistics screen: own address, node count and the top senders.
///
/// The node count includes this device.
pub fn show_statistics<D: Surface>(
    display: &mut D,
    own_address: u16,
    peers: &PeerTable,
) -> Result<(), Error> {
    display.clear()?;

    let mut row = 0;
    let mut line = Line::new();

    let _ = write!(line, "Own Address: 0x{:04x}", own_address);
    small_line(display, &mut row, &line);

    line.clear();
    let _ = write!(line, "Node Count:  {}", peers.len() + 1);
    small_line(display, &mut row, &line);

    if !peers.is_empty() {
        small_line(display, &mut row, "Most messages from:");

        for index in top_senders(peers) {
            let Some(stat) = peers.get(index) else {
                continue;
            };
            line.clear();
            let _ = write!(
                line,
                "{:<3} 0x{:04x} {}",
                stat.hello_count,
                stat.address,
                stat.name.as_str()
            );
            small_line(display, &mut row, &line);
        }
    }

    display.finalize()
}

/// Sensors screen: environment, motion and proximity readings.
///
/// A failed sample ends the cycle before the panel is flushed.
pub fn show_sensors<D: Surface, S: Sensors>(display: &mut D, sensors: &mut S) -> Result<(), Error> {
    display.clear()?;

    let mut row = 0;
    let mut line = Line::new();

    let env = sensors.sample_environment()?;
    let _ = write!(line, "Temperature:{:.1} C", env.temperature);
    small_line(display, &mut row, &line);

    line.clear();
    let _ = write!(line, "Humidity:{}%", env.humidity as i32);
    small_line(display, &mut row, &line);

    let motion = sensors.sample_motion()?;
    for (label, value) in [("AX", motion.x), ("AY", motion.y), ("AZ", motion.z)] {
        line.clear();
        let _ = write!(line, "{} :{:10.3}", label, value);
        small_line(display, &mut row, &line);
    }

    let prox = sensors.sample_proximity()?;
    line.clear();
    let _ = write!(line, "Light :{}", prox.light);
    small_line(display, &mut row, &line);

    line.clear();
    let _ = write!(line, "Proximity:{}", prox.proximity);
    small_line(display, &mut row, &line);

    display.finalize()
}

fn small_line<D: Surface>(display: &mut D, row: &mut u16, text: &str) {
    print_line(display, Font::Small, *row, text, text.len(), false);
    *row += 1;
}
