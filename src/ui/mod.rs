//! User interface subsystem - OLED display + record button.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, one status message at a time
//! - **Button**: 1 tactile switch, active-low, polled every tick
//!
//! Debouncing and the state → text mapping live in the library
//! (`camremote::ui`) so they can be tested on the host.

pub mod buttons;
pub mod display;
