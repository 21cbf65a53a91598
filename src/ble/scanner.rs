//! BLE GAP scanner - discovers the camera.
//!
//! Runs as its own task because SoftDevice scanning is an async call that
//! lives until a peer is picked.  The controller drives it through
//! [`SCAN_CONTROL`]; the first peer whose advertised name contains
//! `CAMERA_NAME_FILTER` ends the scan and is queued on [`DISCOVERIES`].

use camremote::ble::adv_parser::{extract_device_name, name_matches};
use camremote::config::CAMERA_NAME_FILTER;
use camremote::traits::Candidate;
use defmt::{info, warn, Format};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::{central, Address};
use nrf_softdevice::Softdevice;

/// Start / stop requests from the transport.
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub enum ScanControl {
    Start,
    Stop,
}

/// Latest scan request; only the most recent one matters.
pub static SCAN_CONTROL: Signal<CriticalSectionRawMutex, ScanControl> = Signal::new();

/// Matched peers waiting to be picked up by the transport.
pub static DISCOVERIES: Channel<CriticalSectionRawMutex, Candidate<Address>, 2> = Channel::new();

/// Scan loop.  Idles until a `Start` request, then scans until a match,
/// a `Stop`, or a scan error.
pub async fn scan_task(sd: &'static Softdevice) -> ! {
    let mut request = SCAN_CONTROL.wait().await;

    loop {
        if request != ScanControl::Start {
            request = SCAN_CONTROL.wait().await;
            continue;
        }

        info!("BLE scan starting, filter '{}'", CAMERA_NAME_FILTER);

        let config = central::ScanConfig {
            // Active scan to retrieve scan-response data (device names).
            active: true,
            ..Default::default()
        };

        let scan = central::scan(sd, &config, |params| {
            let data = unsafe {
                core::slice::from_raw_parts(params.data.p_data, params.data.len as usize)
            };

            // Unnamed peers never qualify; returning None keeps scanning.
            let name = extract_device_name(data)?;
            if !name_matches(name.as_str(), CAMERA_NAME_FILTER) {
                return None;
            }

            Some(Candidate {
                peer: Address::from_raw(params.peer_addr),
                name,
            })
        });

        match select(scan, SCAN_CONTROL.wait()).await {
            Either::First(Ok(candidate)) => {
                info!("Found: {}", candidate.name.as_str());
                if DISCOVERIES.try_send(candidate).is_err() {
                    warn!("discovery queue full - dropping match");
                }
            }
            Either::First(Err(_)) => {
                warn!("BLE scan ended with error");
            }
            Either::Second(next) => {
                // Dropping the scan future stops the SoftDevice scan.
                info!("BLE scan interrupted: {}", next);
                request = next;
                continue;
            }
        }

        request = SCAN_CONTROL.wait().await;
    }
}
