//! Scenario tests for the badge state machine.
//!
//! Time is simulated: `settle` jumps from deadline to deadline the way the
//! cooperative loop would wake up.

use super::*;
use crate::config::{Millis, SENSOR_REFRESH_MS};
use crate::error::SensorError;
use crate::leds::CHASE_TICKS;
use crate::mock::{board, TestBoard};

fn settle(badge: &mut Badge, board: &mut TestBoard, until: Millis) {
    while let Some(at) = badge.next_deadline() {
        if at > until {
            break;
        }
        badge.run_due(at, board);
    }
}

fn started() -> (Badge, TestBoard) {
    let mut badge = Badge::new("Mesh Badge");
    let mut board = board();
    assert_eq!(badge.start(0, false, &mut board.display), BootMode::Normal);
    badge.run_due(0, &mut board);
    (badge, board)
}

fn long_press(badge: &mut Badge, board: &mut TestBoard, at: Millis) {
    badge.on_button_edge(at, true, board);
    settle(badge, board, at + LONG_PRESS_MS);
    badge.on_button_edge(at + LONG_PRESS_MS + 200, false, board);
}

fn hello(address: u16, name: &str) -> Event {
    Event::Hello {
        address,
        name: String::try_from(name).unwrap(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Boot
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn boot_draws_the_main_screen() {
    let (badge, board) = started();
    assert_eq!(badge.screen(), Screen::Main);
    assert_eq!(board.display.frames.len(), 1);
    assert_eq!(board.display.last_frame().unwrap(), &["Mesh Badge"]);
    assert_eq!(badge.next_deadline(), None);
}

#[test]
fn held_button_at_boot_requests_factory_reset() {
    let mut badge = Badge::new("Mesh Badge");
    let mut board = board();

    assert_eq!(badge.start(0, true, &mut board.display), BootMode::FactoryReset);
    assert_eq!(board.display.last_frame().unwrap(), &["Resetting", "Device"]);
    assert_eq!(badge.scheduler().deadline(WorkId::Redraw), Some(RESET_BANNER_MS));

    settle(&mut badge, &mut board, RESET_BANNER_MS);
    assert_eq!(board.display.last_frame().unwrap(), &["Mesh Badge"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Button
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn short_press_on_main_announces_once() {
    let (mut badge, mut board) = started();

    assert_eq!(badge.on_button_edge(0, true, &mut board), Some(Gesture::Pressed));
    assert_eq!(
        badge.on_button_edge(400, false, &mut board),
        Some(Gesture::ShortPress)
    );
    settle(&mut badge, &mut board, 10_000);

    assert_eq!(board.network.announces, 1);
    assert_eq!(badge.screen(), Screen::Main);
}

#[test]
fn long_press_advances_once_and_swallows_release() {
    let (mut badge, mut board) = started();

    badge.on_button_edge(0, true, &mut board);
    settle(&mut badge, &mut board, LONG_PRESS_MS - 1);
    assert_eq!(badge.screen(), Screen::Main);

    settle(&mut badge, &mut board, LONG_PRESS_MS);
    assert_eq!(badge.screen(), Screen::Sensors);

    assert_eq!(badge.on_button_edge(1_500, false, &mut board), None);
    assert_eq!(board.network.announces, 0);
    assert_eq!(badge.screen(), Screen::Sensors);
}

#[test]
fn late_release_after_an_overdue_long_press_is_still_a_long_press() {
    let (mut badge, mut board) = started();

    // The loop was busy past the deadline and sees the release first.
    badge.on_button_edge(0, true, &mut board);
    assert_eq!(badge.on_button_edge(LONG_PRESS_MS + 50, false, &mut board), None);

    assert_eq!(badge.screen(), Screen::Sensors);
    assert_eq!(board.network.announces, 0);
    assert!(!badge.scheduler().is_pending(WorkId::LongPress));
}

#[test]
fn three_long_presses_return_to_main() {
    let (mut badge, mut board) = started();

    long_press(&mut badge, &mut board, 0);
    assert_eq!(badge.screen(), Screen::Sensors);
    long_press(&mut badge, &mut board, 5_000);
    assert_eq!(badge.screen(), Screen::Stats);
    long_press(&mut badge, &mut board, 10_000);
    assert_eq!(badge.screen(), Screen::Main);
    assert_eq!(board.network.announces, 0);
}

#[test]
fn short_press_is_ignored_off_main() {
    let (mut badge, mut board) = started();
    long_press(&mut badge, &mut board, 0);

    badge.on_button_edge(3_000, true, &mut board);
    assert_eq!(
        badge.on_button_edge(3_100, false, &mut board),
        Some(Gesture::Released)
    );
    assert_eq!(board.network.announces, 0);
    assert!(!badge.scheduler().is_pending(WorkId::LongPress));
}

#[test]
fn short_press_waits_for_the_mesh() {
    let (mut badge, mut board) = started();
    board.network.ready = false;

    badge.on_button_edge(0, true, &mut board);
    badge.on_button_edge(100, false, &mut board);
    assert_eq!(board.network.announces, 0);
}

#[test]
fn noise_edges_do_nothing() {
    let (mut badge, mut board) = started();
    assert_eq!(badge.on_button_edge(0, false, &mut board), None);
    assert!(!badge.scheduler().is_pending(WorkId::LongPress));
}

// ═══════════════════════════════════════════════════════════════════════════
// Screens
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sensors_screen_refreshes_periodically() {
    let (mut badge, mut board) = started();
    long_press(&mut badge, &mut board, 0);
    let frames = board.display.frames.len();

    settle(&mut badge, &mut board, LONG_PRESS_MS + 3 * SENSOR_REFRESH_MS);
    assert_eq!(board.display.frames.len(), frames + 3);
    assert_eq!(
        badge.scheduler().deadline(WorkId::Redraw),
        Some(LONG_PRESS_MS + 4 * SENSOR_REFRESH_MS)
    );
    assert_eq!(
        board.display.last_frame().unwrap()[0].as_str(),
        "Temperature:21.5 C"
    );
}

#[test]
fn failed_sample_stops_the_refresh() {
    let (mut badge, mut board) = started();
    board.sensors.fail = Some(SensorError::Motion);
    let frames = board.display.frames.len();

    long_press(&mut badge, &mut board, 0);

    // Partial frame never flushed, no further refresh pending.
    assert_eq!(board.display.frames.len(), frames);
    assert_eq!(board.display.current.len(), 2);
    assert!(!badge.scheduler().is_pending(WorkId::Redraw));

    // A later redraw request retries on its own.
    board.sensors.fail = None;
    badge.refresh_display(5_000);
    badge.run_due(5_000, &mut board);
    assert_eq!(board.display.frames.len(), frames + 1);
    assert!(badge.scheduler().is_pending(WorkId::Redraw));
}

#[test]
fn display_failure_keeps_the_sensor_refresh_alive() {
    let (mut badge, mut board) = started();
    board.display.fail_clear = true;
    long_press(&mut badge, &mut board, 0);
    assert!(badge.scheduler().is_pending(WorkId::Redraw));
}

#[test]
fn leaving_sensors_ends_the_refresh() {
    let (mut badge, mut board) = started();
    long_press(&mut badge, &mut board, 0);
    long_press(&mut badge, &mut board, 1_500);
    assert_eq!(badge.screen(), Screen::Stats);

    settle(&mut badge, &mut board, 60_000);
    assert_eq!(badge.next_deadline(), None);
}

#[test]
fn stats_screen_lists_top_senders() {
    let (mut badge, mut board) = started();
    for (address, name, count) in [(0x10, "ann", 2), (0x11, "bo", 5), (0x12, "cy", 2)] {
        for _ in 0..count {
            badge.on_event(0, hello(address, name), &mut board);
        }
    }
    badge.on_event(0, Event::Heartbeat { address: 0x13, hops: 2 }, &mut board);

    long_press(&mut badge, &mut board, 0);
    long_press(&mut badge, &mut board, 2_000);
    settle(&mut badge, &mut board, 60_000);
    assert_eq!(badge.screen(), Screen::Stats);

    let frame = board.display.last_frame().unwrap();
    assert_eq!(
        frame,
        &[
            "Own Address: 0x0001",
            "Node Count:  5",
            "Most messages from:",
            "5   0x0011 bo",
            "2   0x0010 ann",
            "2   0x0012 cy",
        ]
    );
}

#[test]
fn name_change_redraws_with_commas_as_breaks() {
    let (mut badge, mut board) = started();
    badge.on_event(
        100,
        Event::NameChanged(String::try_from("Jane Doe,ACME").unwrap()),
        &mut board,
    );
    badge.run_due(100, &mut board);

    assert_eq!(badge.name(), "Jane Doe,ACME");
    assert_eq!(board.display.last_frame().unwrap(), &["Jane Doe", "ACME"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mesh events
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn hello_shows_a_banner_and_starts_the_chase() {
    let (mut badge, mut board) = started();

    badge.on_event(1_000, hello(0x42, "bob"), &mut board);

    assert_eq!(badge.peers().find(0x42).unwrap().hello_count, 1);
    assert_eq!(board.display.last_frame().unwrap(), &["bob says hi!"]);
    assert_eq!(
        badge.scheduler().deadline(WorkId::Redraw),
        Some(1_000 + HELLO_BANNER_MS)
    );
    assert!(badge.scheduler().is_pending(WorkId::LedTick));

    settle(&mut badge, &mut board, 1_000 + HELLO_BANNER_MS);
    assert_eq!(board.display.last_frame().unwrap(), &["Mesh Badge"]);
}

#[test]
fn own_hello_is_ignored() {
    let (mut badge, mut board) = started();
    let frames = board.display.frames.len();

    badge.on_event(0, hello(0x0001, "me"), &mut board);

    assert!(badge.peers().is_empty());
    assert_eq!(board.display.frames.len(), frames);
    assert!(!badge.scheduler().is_pending(WorkId::LedTick));
}

#[test]
fn heartbeat_only_updates_stats() {
    let (mut badge, mut board) = started();
    badge.on_event(0, Event::Heartbeat { address: 7, hops: 3 }, &mut board);
    assert_eq!(badge.peers().len(), 1);
    assert_eq!(badge.next_deadline(), None);
}

#[test]
fn mesh_ready_requests_a_redraw() {
    let (mut badge, mut board) = started();
    badge.on_event(50, Event::MeshReady, &mut board);
    assert_eq!(badge.scheduler().deadline(WorkId::Redraw), Some(50));
}

// ═══════════════════════════════════════════════════════════════════════════
// LEDs
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chase_runs_five_cycles_then_stops() {
    let (mut badge, mut board) = started();

    badge.on_event(0, Event::Relay { src: 2, dst: 3, ttl: 5 }, &mut board);
    settle(&mut badge, &mut board, 60_000);

    assert_eq!(board.leds.lit.len(), CHASE_TICKS);
    assert_eq!(&board.leds.lit[..4], &[0, 1, 2, 3]);
    assert_eq!(board.leds.on, [false; crate::config::LED_COUNT]);
    assert_eq!(badge.next_deadline(), None);
}

#[test]
fn retrigger_while_running_keeps_one_chain() {
    let (mut badge, mut board) = started();

    badge.blink_leds(0);
    settle(&mut badge, &mut board, 250);
    assert_eq!(badge.scheduler().deadline(WorkId::LedTick), Some(300));

    badge.blink_leds(250);
    assert_eq!(badge.scheduler().deadline(WorkId::LedTick), Some(300));

    settle(&mut badge, &mut board, 60_000);
    assert_eq!(board.leds.lit.len(), CHASE_TICKS);
}

#[test]
fn chase_can_run_again_after_halting() {
    let (mut badge, mut board) = started();
    badge.blink_leds(0);
    settle(&mut badge, &mut board, 10_000);
    badge.blink_leds(20_000);
    settle(&mut badge, &mut board, 30_000);
    assert_eq!(board.leds.lit.len(), 2 * CHASE_TICKS);
}
