//! Status text shown for each controller state.

use crate::controller::ControllerState;

/// Shown while the firmware boots, before the controller takes over.
pub const SPLASH: [&str; 2] = ["Camera Controller", "Initializing..."];

/// First line of the `Failed` screen; the second is the error detail.
pub const ERROR_TITLE: &str = "Error:";

/// Fixed two-line message for `state`.
///
/// `Failed` normally renders [`ERROR_TITLE`] plus the stored error detail;
/// the text here is only used when no detail is available.
pub fn status_lines(state: ControllerState) -> [&'static str; 2] {
    match state {
        ControllerState::Idle => ["Ready", "Press button to scan"],
        ControllerState::Scanning => ["Scanning...", "Looking for camera"],
        ControllerState::Connecting => ["Connecting...", "Please wait"],
        ControllerState::Connected => ["Connected!", "Press to record"],
        ControllerState::Recording => ["Recording...", "Press to stop"],
        ControllerState::Stopping => ["Stopping...", "Please wait"],
        ControllerState::Saving => ["Saving...", "Processing file"],
        ControllerState::Disconnected => ["Disconnected", "Press to reconnect"],
        ControllerState::Failed => [ERROR_TITLE, "Unknown"],
    }
}
