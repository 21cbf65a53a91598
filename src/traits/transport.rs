//! BLE transport trait for the camera link

use core::future::Future;

use heapless::String;

use crate::error::TransportError;

/// A peer reported by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate<P> {
    /// Opaque handle the transport needs to connect to this peer.
    pub peer: P,
    /// Advertised local name (truncated to 32 bytes).
    pub name: String<32>,
}

/// Asynchronous notifications from the transport.
///
/// Queued by the adapter and drained by the controller at the start of
/// every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent<P> {
    /// A peer was seen during discovery.
    DeviceFound(Candidate<P>),
    /// The established link dropped.
    ConnectionLost,
}

/// Wireless discovery and connection transport.
///
/// `start_discovery`, `stop_discovery`, `disconnect` and `is_connected`
/// must not block.  The async operations may take as long as the radio
/// needs but must be bounded by the adapter.
///
/// Adapters guarantee that a stopped discovery cycle produces no further
/// [`TransportEvent::DeviceFound`] events and that each link produces at
/// most one [`TransportEvent::ConnectionLost`].
pub trait Transport {
    /// Peer identity captured during discovery.
    type Peer: Clone;
    /// Resolved write endpoint on the connected peer.
    type Channel;

    /// Begin a discovery cycle.
    fn start_discovery(&mut self);

    /// End the current discovery cycle (no-op when idle).
    fn stop_discovery(&mut self);

    /// Establish a link to `peer`.
    fn connect(&mut self, peer: &Self::Peer) -> impl Future<Output = Result<(), TransportError>>;

    /// Look up the command service and characteristic on the linked peer.
    fn resolve_command_channel(
        &mut self,
    ) -> impl Future<Output = Result<Self::Channel, TransportError>>;

    /// Write `payload` to `channel` without response.
    fn write(
        &mut self,
        channel: &Self::Channel,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), TransportError>>;

    /// Tear down the link (no-op when not connected).
    fn disconnect(&mut self);

    /// Whether the link is currently up.
    fn is_connected(&self) -> bool;

    /// Pop the next pending event, if any.
    fn poll_event(&mut self) -> Option<TransportEvent<Self::Peer>>;
}
