//! Controller state machine.
//!
//! Sequences scanning, connecting, command dispatch, disconnect detection
//! and error recovery.  The controller owns all mutable state and the
//! three adapters; the main loop calls [`Controller::tick`] with the
//! current time every `TICK_INTERVAL_MS`.
//!
//! ## Tick order
//!
//! 1. Sample the button through the debouncer (every tick, so the
//!    debounce clock keeps running).
//! 2. Drain queued transport events.  A discovery match moves
//!    `Scanning` to `Connecting` here, before the timeout check, so a
//!    match and an expiring deadline in the same tick resolve as success.
//! 3. Poll link liveness in `Connected` / `Recording`.
//! 4. Act on an accepted press.
//! 5. Timed work: discovery deadline, the connect sequence, and the
//!    settle / save delays after STOP.
//!
//! At most one state transition happens per tick; once a step
//! transitions, the remaining steps are skipped.  Every transition
//! renders exactly one status message.

mod discovery;
mod state;

pub use discovery::DiscoveryMonitor;
pub use state::ControllerState;

use crate::ble::adv_parser::name_matches;
use crate::config::{ControllerConfig, CMD_START, CMD_STOP};
use crate::error::{FailureReason, LastError, TransportError};
use crate::traits::{Candidate, InputSource, StatusDisplay, Transport, TransportEvent};
use crate::ui::input_logic::Debouncer;
use crate::ui::status::{status_lines, ERROR_TITLE};
use crate::Millis;

/// Live session with the camera: link up, command channel resolved.
#[derive(Debug)]
pub struct ConnectionHandle<C> {
    pub channel: C,
}

pub struct Controller<T: Transport, D, I> {
    config: ControllerConfig,
    transport: T,
    display: D,
    input: I,
    state: ControllerState,
    device: Option<Candidate<T::Peer>>,
    session: Option<ConnectionHandle<T::Channel>>,
    last_error: Option<LastError>,
    debouncer: Debouncer,
    discovery: DiscoveryMonitor,
    /// Time the current state was entered.
    entered_at: Millis,
}

impl<T, D, I> Controller<T, D, I>
where
    T: Transport,
    D: StatusDisplay,
    I: InputSource,
{
    pub fn new(config: ControllerConfig, transport: T, display: D, input: I) -> Self {
        Self {
            debouncer: Debouncer::new(config.debounce_ms),
            config,
            transport,
            display,
            input,
            state: ControllerState::Idle,
            device: None,
            session: None,
            last_error: None,
            discovery: DiscoveryMonitor::new(),
            entered_at: 0,
        }
    }

    /// Enter `Idle` and show the ready screen.  Call once after boot.
    pub fn start(&mut self, now: Millis) {
        self.enter(ControllerState::Idle, now);
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The failure that put the controller in `Failed`; `None` in any other state.
    pub fn last_error(&self) -> Option<&LastError> {
        match self.state {
            ControllerState::Failed => self.last_error.as_ref(),
            _ => None,
        }
    }

    /// Peer selected by the current discovery cycle, held until the
    /// connect attempt runs.
    pub fn discovered_device(&self) -> Option<&Candidate<T::Peer>> {
        self.device.as_ref()
    }

    pub fn session(&self) -> Option<&ConnectionHandle<T::Channel>> {
        self.session.as_ref()
    }

    pub fn discovery_deadline(&self) -> Option<Millis> {
        self.discovery.deadline()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Run one iteration of the control loop at time `now`.
    pub async fn tick(&mut self, now: Millis) {
        let raw = self.input.is_pressed();
        let pressed = self.debouncer.sample(raw, now);

        if self.drain_events(now) {
            return;
        }
        if self.check_link(now) {
            return;
        }
        if pressed && self.on_press(now).await {
            return;
        }
        self.on_timers(now).await;
    }

    /// Polls until the inbox is empty or an event transitions.
    /// Returns `true` in the latter case.
    fn drain_events(&mut self, now: Millis) -> bool {
        while let Some(event) = self.transport.poll_event() {
            let transitioned = match event {
                TransportEvent::DeviceFound(candidate) => self.on_device_found(candidate, now),
                TransportEvent::ConnectionLost => self.on_connection_lost(now),
            };
            if transitioned {
                return true;
            }
        }
        false
    }

    fn on_device_found(&mut self, candidate: Candidate<T::Peer>, now: Millis) -> bool {
        if self.state != ControllerState::Scanning || self.device.is_some() {
            debug!("ignoring discovery of {} in {}", candidate.name.as_str(), self.state);
            return false;
        }
        if !name_matches(candidate.name.as_str(), self.config.target_name) {
            debug!("skipping non-matching peer {}", candidate.name.as_str());
            return false;
        }

        info!("camera found: {}", candidate.name.as_str());
        self.device = Some(candidate);
        self.discovery.finish();
        self.transport.stop_discovery();
        self.enter(ControllerState::Connecting, now);
        true
    }

    fn on_connection_lost(&mut self, now: Millis) -> bool {
        if !self.state.has_session() {
            debug!("ignoring connection loss in {}", self.state);
            return false;
        }
        warn!("camera link lost in {}", self.state);
        self.session = None;
        self.enter(ControllerState::Disconnected, now);
        true
    }

    fn check_link(&mut self, now: Millis) -> bool {
        if !self.state.monitors_link() || self.transport.is_connected() {
            return false;
        }
        warn!("camera link down in {}", self.state);
        self.session = None;
        self.enter(ControllerState::Disconnected, now);
        true
    }

    /// Returns `true` if the press caused a transition.
    async fn on_press(&mut self, now: Millis) -> bool {
        match self.state {
            state if state.can_start_discovery() => {
                self.begin_discovery(now);
                true
            }
            ControllerState::Scanning => {
                info!("discovery cancelled");
                self.discovery.finish();
                self.transport.stop_discovery();
                self.enter(ControllerState::Idle, now);
                true
            }
            ControllerState::Connected => {
                self.send_command(CMD_START, ControllerState::Recording, now)
                    .await;
                true
            }
            ControllerState::Recording => {
                self.send_command(CMD_STOP, ControllerState::Stopping, now)
                    .await;
                true
            }
            _ => {
                debug!("press ignored in {}", self.state);
                false
            }
        }
    }

    fn begin_discovery(&mut self, now: Millis) {
        self.device = None;
        self.discovery.start(now, self.config.discovery_timeout_ms);
        info!(
            "discovery started, looking for '{}' until {}",
            self.config.target_name,
            now.saturating_add(self.config.discovery_timeout_ms)
        );
        self.transport.start_discovery();
        self.enter(ControllerState::Scanning, now);
    }

    async fn send_command(&mut self, payload: &[u8], next: ControllerState, now: Millis) {
        let connected = self.transport.is_connected();
        let result = match &self.session {
            Some(session) if connected => self.transport.write(&session.channel, payload).await,
            _ => Err(TransportError::NotConnected),
        };

        match result {
            Ok(()) => {
                info!("sent {=[u8]:a}", payload);
                self.enter(next, now);
            }
            Err(e) => {
                warn!("command not sent: {}", e);
                self.session = None;
                if connected {
                    self.transport.disconnect();
                }
                self.fail(FailureReason::NotConnected, e.detail(), now);
            }
        }
    }

    async fn on_timers(&mut self, now: Millis) {
        let elapsed = now.saturating_sub(self.entered_at);
        match self.state {
            ControllerState::Scanning => {
                if self.device.is_none() && self.discovery.expired(now) {
                    warn!("discovery timed out");
                    self.discovery.finish();
                    self.transport.stop_discovery();
                    self.fail(FailureReason::DeviceNotFound, "Camera not found", now);
                }
            }
            ControllerState::Connecting => self.connect(now).await,
            ControllerState::Stopping => {
                if elapsed >= self.config.settle_ms {
                    self.enter(ControllerState::Saving, now);
                }
            }
            ControllerState::Saving => {
                if elapsed >= self.config.save_ms {
                    self.enter(ControllerState::Connected, now);
                }
            }
            _ => {}
        }
    }

    /// Connect to the discovered peer and resolve the command channel.
    ///
    /// Runs to completion once started; there is no cancellation path.
    async fn connect(&mut self, now: Millis) {
        let Some(device) = self.device.take() else {
            self.fail(FailureReason::DeviceNotFound, "Camera not found", now);
            return;
        };

        info!("connecting to {}", device.name.as_str());
        if let Err(e) = self.transport.connect(&device.peer).await {
            warn!("connect failed: {}", e);
            self.fail(FailureReason::ConnectFailed, "Connection failed", now);
            return;
        }

        match self.transport.resolve_command_channel().await {
            Ok(channel) => {
                self.session = Some(ConnectionHandle { channel });
                self.enter(ControllerState::Connected, now);
            }
            Err(e) => {
                warn!("command channel lookup failed: {}", e);
                self.transport.disconnect();
                self.fail(FailureReason::ChannelNotFound, e.detail(), now);
            }
        }
    }

    fn fail(&mut self, reason: FailureReason, detail: &str, now: Millis) {
        self.last_error = Some(LastError::new(reason, detail));
        self.enter(ControllerState::Failed, now);
    }

    fn enter(&mut self, next: ControllerState, now: Millis) {
        debug!("{} -> {}", self.state, next);
        self.state = next;
        self.entered_at = now;
        self.render();
    }

    fn render(&mut self) {
        let result = match (self.state, &self.last_error) {
            (ControllerState::Failed, Some(err)) => {
                self.display.render(&[ERROR_TITLE, err.detail.as_str()])
            }
            (state, _) => self.display.render(&status_lines(state)),
        };
        if let Err(e) = result {
            warn!("status render failed: {}", e);
        }
    }
}
