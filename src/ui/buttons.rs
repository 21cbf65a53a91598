//! GPIO record button.
//!
//! One physical button, active-low with internal pull-up.  The controller
//! samples the level once per tick and debounces in software, so there is
//! no edge interrupt here.

use camremote::traits::InputSource;
use embassy_nrf::gpio::{AnyPin, Input, Pull};

pub struct RecordButton {
    pin: Input<'static>,
}

impl RecordButton {
    pub fn new(pin: AnyPin) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl InputSource for RecordButton {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low()
    }
}
