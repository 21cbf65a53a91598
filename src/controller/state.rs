//! Controller states

/// Where the remote is in its scan / connect / record cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Waiting for the user to start a scan.
    Idle,
    /// Discovery cycle running.
    Scanning,
    /// Camera found; connect attempt pending or in progress.
    Connecting,
    /// Link up and command channel resolved.
    Connected,
    /// START sent.
    Recording,
    /// STOP sent; giving the camera time to settle.
    Stopping,
    /// Camera is writing the file.
    Saving,
    /// Link dropped outside of a command.
    Disconnected,
    /// Last attempt failed; see `LastError`.
    Failed,
}

impl ControllerState {
    /// States in which a connection handle is held.
    pub fn has_session(self) -> bool {
        matches!(
            self,
            ControllerState::Connected
                | ControllerState::Recording
                | ControllerState::Stopping
                | ControllerState::Saving
        )
    }

    /// States from which a button press starts a new discovery cycle.
    pub fn can_start_discovery(self) -> bool {
        matches!(
            self,
            ControllerState::Idle | ControllerState::Disconnected | ControllerState::Failed
        )
    }

    /// States whose link is polled every tick.
    pub fn monitors_link(self) -> bool {
        matches!(self, ControllerState::Connected | ControllerState::Recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ControllerState; 9] = [
        ControllerState::Idle,
        ControllerState::Scanning,
        ControllerState::Connecting,
        ControllerState::Connected,
        ControllerState::Recording,
        ControllerState::Stopping,
        ControllerState::Saving,
        ControllerState::Disconnected,
        ControllerState::Failed,
    ];

    #[test]
    fn session_states() {
        let with_session: heapless::Vec<_, 9> =
            ALL.iter().copied().filter(|s| s.has_session()).collect();
        assert_eq!(
            with_session.as_slice(),
            &[
                ControllerState::Connected,
                ControllerState::Recording,
                ControllerState::Stopping,
                ControllerState::Saving,
            ]
        );
    }

    #[test]
    fn discovery_start_states() {
        for state in ALL {
            let expected = matches!(
                state,
                ControllerState::Idle | ControllerState::Disconnected | ControllerState::Failed
            );
            assert_eq!(state.can_start_discovery(), expected);
        }
    }

    #[test]
    fn monitored_states_hold_a_session() {
        for state in ALL.into_iter().filter(|s| s.monitors_link()) {
            assert!(state.has_session());
        }
    }
}
