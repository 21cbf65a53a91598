//! Host-testable library interface for camremote.
//!
//! This crate holds everything that does not touch the radio, the OLED or
//! the GPIO directly: the controller state machine, button debouncing,
//! the discovery timeout monitor, advertisement name matching, status
//! text, configuration and error types, and the adapter traits the
//! firmware implements.
//!
//! Usage: `cargo test` (host) or
//! `cargo build --release --features embedded --target thumbv7em-none-eabihf`
//! for the firmware.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! It links against this library for all control logic.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod error;
pub mod traits;

/// Milliseconds since boot - the controller's only notion of time.
pub type Millis = u64;

// ═══════════════════════════════════════════════════════════════════════════
// BLE / UI Module Re-exports
// ═══════════════════════════════════════════════════════════════════════════

// Internal module paths for the actual implementations.  The firmware's own
// `ble` and `ui` module trees hold the hardware drivers; only the pure logic
// lives here.
#[path = "ble/adv_parser.rs"]
mod ble_adv_parser_impl;

#[path = "ui/input_logic.rs"]
mod ui_input_logic_impl;
#[path = "ui/status.rs"]
mod ui_status_impl;

pub mod ble {
    pub mod adv_parser {
        pub use crate::ble_adv_parser_impl::{
            advertisement_matches, extract_device_name, name_matches,
        };
    }
}

pub mod ui {
    pub mod input_logic {
        pub use crate::ui_input_logic_impl::Debouncer;
    }

    pub mod status {
        pub use crate::ui_status_impl::{status_lines, ERROR_TITLE, SPLASH};
    }
}

pub use controller::{Controller, ControllerState};
pub use error::{FailureReason, LastError, TransportError};
