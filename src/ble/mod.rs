//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Central** role:
//!
//! 1. **Scanner** - discovers the camera by its advertised name.
//! 2. **Camera client** - connects, resolves the command characteristic
//!    on the camera control service, and writes START / STOP to it.
//!
//! The scanner runs as its own task and talks to the client through the
//! statics in [`scanner`]; the client is the `Transport` the controller
//! owns.  Advertisement parsing lives in the library
//! (`camremote::ble::adv_parser`) so it can be tested on the host.

pub mod camera_client;
pub mod scanner;
