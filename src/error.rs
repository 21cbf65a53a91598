//! Error types for the remote.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use heapless::String;

/// Why the last attempt ended in the `Failed` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureReason {
    /// Discovery timed out without a qualifying peer.
    DeviceNotFound,
    /// The transport rejected the connect call.
    ConnectFailed,
    /// Command service or characteristic absent on the connected peer.
    ChannelNotFound,
    /// A command was issued without a live session.
    NotConnected,
}

/// Failure tag plus the text shown on the display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastError {
    pub reason: FailureReason,
    pub detail: String<32>,
}

impl LastError {
    pub fn new(reason: FailureReason, detail: &str) -> Self {
        let mut text = String::new();
        for c in detail.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Self {
            reason,
            detail: text,
        }
    }
}

/// Errors reported by a [`Transport`](crate::traits::Transport) adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Connection attempt failed.
    ConnectFailed,
    /// The camera control service was not found.
    ServiceNotFound,
    /// The command characteristic was not found on the service.
    CharacteristicNotFound,
    /// No live link to the peer.
    NotConnected,
    /// GATT write was rejected.
    WriteFailed,
}

impl TransportError {
    /// Human-readable text for the status display.
    pub fn detail(self) -> &'static str {
        match self {
            TransportError::ConnectFailed => "Connection failed",
            TransportError::ServiceNotFound => "Service not found",
            TransportError::CharacteristicNotFound => "Characteristic not found",
            TransportError::NotConnected => "Not connected",
            TransportError::WriteFailed => "Write failed",
        }
    }
}

/// I²C / driver failure while drawing a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction to the panel failed.
    Bus,
}
