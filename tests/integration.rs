//! Integration tests for camremote host-testable logic.
//!
//! Drives the public controller API through a whole session with scripted
//! adapters: discover from raw advertising data, connect, record, stop,
//! lose the link, and recover.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use camremote::ble::adv_parser::{advertisement_matches, extract_device_name};
use camremote::config::{ControllerConfig, CAMERA_NAME_FILTER, TICK_INTERVAL_MS};
use camremote::error::{DisplayError, TransportError};
use camremote::traits::{Candidate, InputSource, StatusDisplay, Transport, TransportEvent};
use camremote::{Controller, ControllerState, FailureReason, Millis};
use embassy_futures::block_on;

/// What the fake radio has seen, shared with the test body.
#[derive(Default)]
struct Radio {
    advertisements: VecDeque<(u32, Vec<u8>)>,
    scanning: bool,
    link_up: bool,
    lose_link: bool,
    sent: Vec<Vec<u8>>,
}

struct FakeTransport {
    radio: Rc<RefCell<Radio>>,
}

impl Transport for FakeTransport {
    type Peer = u32;
    type Channel = ();

    fn start_discovery(&mut self) {
        self.radio.borrow_mut().scanning = true;
    }

    fn stop_discovery(&mut self) {
        self.radio.borrow_mut().scanning = false;
    }

    async fn connect(&mut self, peer: &u32) -> Result<(), TransportError> {
        if *peer == 0 {
            return Err(TransportError::ConnectFailed);
        }
        self.radio.borrow_mut().link_up = true;
        Ok(())
    }

    async fn resolve_command_channel(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn write(&mut self, _channel: &(), payload: &[u8]) -> Result<(), TransportError> {
        self.radio.borrow_mut().sent.push(payload.to_vec());
        Ok(())
    }

    fn disconnect(&mut self) {
        self.radio.borrow_mut().link_up = false;
    }

    fn is_connected(&self) -> bool {
        let radio = self.radio.borrow();
        radio.link_up && !radio.lose_link
    }

    fn poll_event(&mut self) -> Option<TransportEvent<u32>> {
        let mut radio = self.radio.borrow_mut();
        if !radio.scanning {
            return None;
        }
        let (peer, data) = radio.advertisements.pop_front()?;
        let name = extract_device_name(&data)?;
        Some(TransportEvent::DeviceFound(Candidate { peer, name }))
    }
}

struct Screen {
    frames: Rc<RefCell<Vec<String>>>,
}

impl StatusDisplay for Screen {
    fn render(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        self.frames.borrow_mut().push(lines.join("\n"));
        Ok(())
    }
}

struct Button {
    held: Rc<RefCell<bool>>,
}

impl InputSource for Button {
    fn is_pressed(&mut self) -> bool {
        *self.held.borrow()
    }
}

struct Rig {
    controller: Controller<FakeTransport, Screen, Button>,
    radio: Rc<RefCell<Radio>>,
    frames: Rc<RefCell<Vec<String>>>,
    held: Rc<RefCell<bool>>,
    now: Millis,
}

impl Rig {
    fn new() -> Self {
        let radio = Rc::new(RefCell::new(Radio::default()));
        let frames = Rc::new(RefCell::new(Vec::new()));
        let held = Rc::new(RefCell::new(false));
        let mut controller = Controller::new(
            ControllerConfig::default(),
            FakeTransport {
                radio: radio.clone(),
            },
            Screen {
                frames: frames.clone(),
            },
            Button { held: held.clone() },
        );
        controller.start(0);
        Self {
            controller,
            radio,
            frames,
            held,
            now: 0,
        }
    }

    /// Advance the simulated clock by `ms`, one tick interval at a time.
    fn run_for(&mut self, ms: Millis) {
        let end = self.now + ms;
        while self.now < end {
            self.now += TICK_INTERVAL_MS;
            block_on(self.controller.tick(self.now));
        }
    }

    /// Hold the button for one tick, then release and let it settle.
    fn click(&mut self) {
        *self.held.borrow_mut() = true;
        self.run_for(TICK_INTERVAL_MS);
        *self.held.borrow_mut() = false;
        self.run_for(300);
    }

    fn state(&self) -> ControllerState {
        self.controller.state()
    }

    fn last_frame(&self) -> String {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }
}

fn advert(name: &str) -> Vec<u8> {
    let mut data = vec![0x02, 0x01, 0x06];
    data.push(name.len() as u8 + 1);
    data.push(0x09);
    data.extend_from_slice(name.as_bytes());
    data
}

#[test]
fn advertisement_filter_matches_camera_name() {
    assert!(advertisement_matches(&advert("ESP32-CAM-BLE"), CAMERA_NAME_FILTER));
    assert!(!advertisement_matches(&advert("Fitness band"), CAMERA_NAME_FILTER));
    assert!(!advertisement_matches(&[0x02, 0x01, 0x06], CAMERA_NAME_FILTER));
}

#[test]
fn full_session_with_reconnect() {
    let mut rig = Rig::new();
    assert_eq!(rig.last_frame(), "Ready\nPress button to scan");

    rig.radio
        .borrow_mut()
        .advertisements
        .extend([(7, advert("Speaker")), (42, advert("ESP32-CAM-BLE"))]);
    rig.click();
    assert_eq!(rig.state(), ControllerState::Connected);
    assert!(!rig.radio.borrow().scanning);
    assert_eq!(rig.last_frame(), "Connected!\nPress to record");

    rig.click();
    assert_eq!(rig.state(), ControllerState::Recording);
    rig.click();
    assert_eq!(rig.state(), ControllerState::Stopping);

    rig.run_for(500);
    assert_eq!(rig.state(), ControllerState::Saving);
    rig.run_for(1_000);
    assert_eq!(rig.state(), ControllerState::Connected);
    assert_eq!(
        rig.radio.borrow().sent,
        vec![b"START".to_vec(), b"STOP".to_vec()]
    );

    rig.radio.borrow_mut().lose_link = true;
    rig.run_for(TICK_INTERVAL_MS);
    assert_eq!(rig.state(), ControllerState::Disconnected);
    assert_eq!(rig.last_frame(), "Disconnected\nPress to reconnect");

    rig.radio.borrow_mut().lose_link = false;
    rig.radio
        .borrow_mut()
        .advertisements
        .push_back((42, advert("ESP32-CAM-BLE")));
    rig.click();
    assert_eq!(rig.state(), ControllerState::Connected);
}

#[test]
fn empty_air_times_out() {
    let mut rig = Rig::new();
    rig.click();
    assert_eq!(rig.state(), ControllerState::Scanning);

    rig.run_for(10_000);
    assert_eq!(rig.state(), ControllerState::Failed);
    assert_eq!(
        rig.controller.last_error().map(|e| e.reason),
        Some(FailureReason::DeviceNotFound)
    );
    assert!(!rig.radio.borrow().scanning);
    assert_eq!(rig.last_frame(), "Error:\nCamera not found");
}

#[test]
fn refused_connection_needs_new_press() {
    let mut rig = Rig::new();
    rig.radio
        .borrow_mut()
        .advertisements
        .push_back((0, advert("ESP32-CAM-BLE")));
    rig.click();
    assert_eq!(rig.state(), ControllerState::Failed);
    assert_eq!(rig.last_frame(), "Error:\nConnection failed");

    rig.run_for(5_000);
    assert_eq!(rig.state(), ControllerState::Failed);
    assert!(rig.radio.borrow().sent.is_empty());
}
