//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic and
//! the concrete radio, display and button implementations.  The firmware
//! binary implements them on top of the SoftDevice, the SSD1306 driver
//! and an nRF GPIO pin; host tests implement them with scripted mocks.

pub mod display;
pub mod input;
pub mod transport;

pub use display::StatusDisplay;
pub use input::InputSource;
pub use transport::{Candidate, Transport, TransportEvent};
