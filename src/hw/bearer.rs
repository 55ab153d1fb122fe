//! Hello bearer over BLE advertising.
//!
//! Gives the badge a working hello exchange with its neighbours: announces
//! go out as short non-connectable advertising bursts, and a passive scan
//! picks up the bursts of other badges. Everything it hears is handed to
//! the badge loop through the mesh handoff channels.

use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use mesh_badge::beacon::{self, RepeatFilter, BEACON_MAX};
use mesh_badge::config::{ANNOUNCE_ADV_INTERVAL, ANNOUNCE_ADV_MS, HELLO_SENDERS_TRACKED};
use mesh_badge::mesh::{self, MeshCommand, MESH_COMMANDS};
use nrf_softdevice::ble::{central, peripheral};
use nrf_softdevice::Softdevice;

/// Unicast address of this badge, from the factory device ID.
pub fn own_address() -> u16 {
    let id = embassy_nrf::pac::FICR.deviceid(0).read();
    (id as u16 & 0x7fff).max(1)
}

/// Run the bearer forever: listen, and advertise whenever an announce is
/// requested.
pub async fn bearer_task(sd: &'static Softdevice, address: u16, name: &'static str) -> ! {
    info!("Hello bearer up as {:#x}", address);
    mesh::on_ready(address);
    let mut recent = RepeatFilter::new(ANNOUNCE_ADV_MS);

    loop {
        match select(MESH_COMMANDS.receive(), listen(sd, address, &mut recent)).await {
            Either::First(MeshCommand::Announce) => announce(sd, address, name).await,
            Either::Second(()) => Timer::after(Duration::from_secs(1)).await,
        }
    }
}

async fn announce(sd: &Softdevice, address: u16, name: &str) {
    let mut adv_data = [0u8; BEACON_MAX];
    let len = beacon::encode_hello(address, name, &mut adv_data);

    let config = peripheral::Config {
        interval: ANNOUNCE_ADV_INTERVAL,
        timeout: Some((ANNOUNCE_ADV_MS / 10) as u16),
        ..Default::default()
    };
    let adv = peripheral::NonconnectableAdvertisement::NonscannableUndirected {
        adv_data: &adv_data[..len],
    };

    match peripheral::advertise(sd, adv, &config).await {
        Ok(()) | Err(peripheral::AdvertiseError::Timeout) => debug!("Hello sent"),
        Err(e) => warn!("Hello advertising failed: {:?}", e),
    }
}

/// Scan until the SoftDevice stops us. Repeats of a burst are dropped.
async fn listen(sd: &Softdevice, own: u16, recent: &mut RepeatFilter<HELLO_SENDERS_TRACKED>) {
    let config = central::ScanConfig {
        active: false,
        ..Default::default()
    };

    let result = central::scan(sd, &config, |params| {
        let data =
            unsafe { core::slice::from_raw_parts(params.data.p_data, params.data.len as usize) };

        if let Some((address, name)) = beacon::parse_hello(data) {
            if address != own && recent.is_new(address, Instant::now().as_millis()) {
                mesh::on_hello(address, &name);
            }
        }
        None::<()>
    })
    .await;

    if let Err(e) = result {
        warn!("Hello scan stopped: {:?}", e);
    }
}
