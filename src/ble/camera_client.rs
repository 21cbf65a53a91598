//! SoftDevice implementation of the camera transport.
//!
//! After GAP connection is established, this module:
//! 1. Discovers the camera control service by its 128-bit UUID.
//! 2. Finds the command characteristic and keeps its value handle.
//! 3. Writes START / STOP payloads to it without response.
//!
//! Discovery itself runs in the scanner task; this adapter only signals it
//! and drains its results.

use camremote::config::{
    BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT,
    CONNECT_TIMEOUT_10MS,
};
use camremote::error::TransportError;
use camremote::traits::{Transport, TransportEvent};
use defmt::{info, warn};
use nrf_softdevice::ble::gatt_client::{self, DiscoverError};
use nrf_softdevice::ble::{central, Address, Connection};
use nrf_softdevice::raw;
use nrf_softdevice::Softdevice;

use crate::ble::scanner::{ScanControl, DISCOVERIES, SCAN_CONTROL};

/// nrf-softdevice GATT client for the camera control service.
///
/// The `#[nrf_softdevice::gatt_client]` macro generates discovery and
/// records the value handle of each listed characteristic.  The UUID
/// literals must stay equal to `CAMERA_SERVICE_UUID_STR` and
/// `CAMERA_COMMAND_CHAR_UUID_STR` in `config.rs`; a host test checks them.
#[nrf_softdevice::gatt_client(uuid = "4fafc201-1fb5-459e-8fcc-c5c9c331914b")]
pub struct CameraServiceClient {
    /// Command input - receives the literal "START" / "STOP".
    #[characteristic(uuid = "beb5483e-36e1-4688-b7f5-ea07361b26a8", write, write_without_response)]
    pub command: [u8; 8],
}

/// Resolved command endpoint: the characteristic's value handle.
#[derive(Clone, Copy)]
pub struct CommandChannel {
    value_handle: u16,
}

pub struct SoftdeviceTransport {
    sd: &'static Softdevice,
    conn: Option<Connection>,
    /// Set once `ConnectionLost` has been reported for `conn`.
    loss_reported: bool,
}

impl SoftdeviceTransport {
    pub fn new(sd: &'static Softdevice) -> Self {
        Self {
            sd,
            conn: None,
            loss_reported: false,
        }
    }
}

impl Transport for SoftdeviceTransport {
    type Peer = Address;
    type Channel = CommandChannel;

    fn start_discovery(&mut self) {
        DISCOVERIES.clear();
        SCAN_CONTROL.signal(ScanControl::Start);
    }

    fn stop_discovery(&mut self) {
        SCAN_CONTROL.signal(ScanControl::Stop);
        DISCOVERIES.clear();
    }

    async fn connect(&mut self, peer: &Address) -> Result<(), TransportError> {
        self.disconnect();

        let whitelist = [peer];
        let conn_cfg = central::ConnectConfig {
            scan_config: central::ScanConfig {
                whitelist: Some(&whitelist),
                timeout: CONNECT_TIMEOUT_10MS,
                ..Default::default()
            },
            conn_params: raw::ble_gap_conn_params_t {
                min_conn_interval: BLE_CONN_INTERVAL_MIN,
                max_conn_interval: BLE_CONN_INTERVAL_MAX,
                slave_latency: BLE_SLAVE_LATENCY,
                conn_sup_timeout: BLE_SUP_TIMEOUT,
            },
            ..Default::default()
        };

        let conn = central::connect(self.sd, &conn_cfg).await.map_err(|_| {
            warn!("GAP connect failed");
            TransportError::ConnectFailed
        })?;

        info!("Connected to camera");
        self.conn = Some(conn);
        self.loss_reported = false;
        Ok(())
    }

    async fn resolve_command_channel(&mut self) -> Result<CommandChannel, TransportError> {
        let conn = self.conn.as_ref().ok_or(TransportError::NotConnected)?;

        let client: CameraServiceClient =
            gatt_client::discover(conn).await.map_err(|e| match e {
                DiscoverError::ServiceNotFound => TransportError::ServiceNotFound,
                DiscoverError::ServiceIncomplete => TransportError::CharacteristicNotFound,
                _ => TransportError::ServiceNotFound,
            })?;

        info!("Camera service discovered");
        Ok(CommandChannel {
            value_handle: client.command_value_handle,
        })
    }

    async fn write(
        &mut self,
        channel: &CommandChannel,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        let conn = self.conn.as_ref().ok_or(TransportError::NotConnected)?;
        gatt_client::write_without_response(conn, channel.value_handle, payload)
            .await
            .map_err(|_| TransportError::WriteFailed)
    }

    fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.disconnect();
        }
    }

    fn is_connected(&self) -> bool {
        self.conn.as_ref().is_some_and(|c| c.handle().is_some())
    }

    fn poll_event(&mut self) -> Option<TransportEvent<Address>> {
        if let Ok(candidate) = DISCOVERIES.try_receive() {
            return Some(TransportEvent::DeviceFound(candidate));
        }

        if self.conn.is_some() && !self.is_connected() && !self.loss_reported {
            self.loss_reported = true;
            return Some(TransportEvent::ConnectionLost);
        }

        None
    }
}
