//! Mesh badge firmware for the nRF52840.
//!
//! Brings up the board, enables the SoftDevice and hands control to one
//! cooperative task that owns all badge state. Button edges, mesh events
//! and scheduler deadlines all wake that task; every wake runs the due work
//! to completion before sleeping again.
//!
//! Flash with: `cargo run --release --features embedded`

#![no_std]
#![no_main]

mod hw;

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_nrf::gpio::{Input, Pin, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Timer};
use mesh_badge::config::{self, Millis};
use mesh_badge::mesh::{MeshLink, MESH_EVENTS};
use mesh_badge::{Badge, Board, BootMode, Error};
use nrf_softdevice::{raw, Softdevice};
use panic_probe as _;
use static_cell::StaticCell;

use crate::hw::bearer;
use crate::hw::buttons::{self, EDGE};
use crate::hw::display::{self, Oled};
use crate::hw::leds::Leds;
use crate::hw::sensors::SensorBus;
use crate::hw::storage;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    TWISPI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

type DisplayBus = Twim<'static, peripherals::TWISPI0>;
type SensorI2c = Twim<'static, peripherals::TWISPI1>;
type BadgeBoard = Board<Oled<DisplayBus>, MeshLink, SensorBus<SensorI2c>, Leds>;

fn now_ms() -> Millis {
    Instant::now().as_millis()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn button_task(btn: Input<'static>) -> ! {
    buttons::edge_task(btn).await
}

#[embassy_executor::task]
async fn bearer_task(sd: &'static Softdevice, address: u16) -> ! {
    bearer::bearer_task(sd, address, config::DEVICE_NAME).await
}

/// The cooperative loop. Sole owner of the badge state.
#[embassy_executor::task]
async fn badge_task(badge: &'static mut Badge, board: &'static mut BadgeBoard) -> ! {
    info!("Badge loop started");

    loop {
        let wake = match badge.next_deadline() {
            Some(at) => Timer::at(Instant::from_millis(at)),
            None => Timer::after(Duration::from_secs(config::IDLE_WAKE_SECS)),
        };

        let woke_by = select3(EDGE.wait(), MESH_EVENTS.receive(), wake).await;

        // Overdue work goes before whatever woke us.
        let now = now_ms();
        badge.run_due(now, board);

        match woke_by {
            Either3::First(level_low) => {
                badge.on_button_edge(now, level_low, board);
            }
            Either3::Second(event) => badge.on_event(now, event, board),
            Either3::Third(()) => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Bring-up
// ═══════════════════════════════════════════════════════════════════════════

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 1,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::DEVICE_NAME.as_ptr() as _,
            current_len: config::DEVICE_NAME.len() as u16,
            max_len: config::DEVICE_NAME_MAX as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Park the core after a fatal bring-up error.
async fn halt(e: Error) -> ! {
    error!("Bring-up failed: {}", e);
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("mesh-badge starting");

    // SoftDevice reserves priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    let display_bus = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let oled = match display::init(display_bus) {
        Ok(oled) => oled,
        Err(e) => halt(e).await,
    };

    let sensor_bus = Twim::new(p.TWISPI1, Irqs, p.P0_07, p.P0_08, twim::Config::default());
    let sensors = SensorBus::new(sensor_bus);

    let leds = Leds::new([
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P1_09.degrade(),
        p.P0_13.degrade(),
    ]);

    let button = Input::new(p.P1_06, Pull::Up);
    let held = button.is_low();

    let sd: &'static Softdevice = Softdevice::enable(&softdevice_config());
    spawner.must_spawn(softdevice_task(sd));

    static BADGE: StaticCell<Badge> = StaticCell::new();
    static BOARD: StaticCell<BadgeBoard> = StaticCell::new();
    let badge = BADGE.init(Badge::new(config::DEVICE_NAME));
    let board = BOARD.init(Board {
        display: oled,
        network: MeshLink,
        sensors,
        leds,
    });

    if badge.start(now_ms(), held, &mut board.display) == BootMode::FactoryReset {
        let mut flash = nrf_softdevice::Flash::take(sd);
        if let Err(e) = storage::erase_settings(&mut flash).await {
            error!("Factory reset incomplete: {}", e);
        }
    }

    spawner.must_spawn(button_task(button));
    spawner.must_spawn(bearer_task(sd, bearer::own_address()));
    spawner.must_spawn(badge_task(badge, board));
}
