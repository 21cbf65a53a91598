//! SSD1306 OLED display wrapper.

use camremote::config::{LINE_PITCH_PX, SCREEN_HEIGHT};
use camremote::error::DisplayError;
use camremote::traits::StatusDisplay;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::{BufferedGraphicsMode, DisplayConfig};
use ssd1306::prelude::{DisplayRotation, DisplaySize128x64, I2CInterface};
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Glyph height of `FONT_6X10`.
const GLYPH_HEIGHT_PX: i32 = 10;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Status panel: clears the frame and draws each line left-aligned,
/// one `LINE_PITCH_PX` below the previous.
pub struct OledStatus<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn new(i2c: I2C) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate180)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| DisplayError::Bus)?;
        display.clear_buffer();
        display.flush().map_err(|_| DisplayError::Bus)?;
        Ok(Self { display })
    }
}

impl<I2C> StatusDisplay for OledStatus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, lines: &[&str]) -> Result<(), DisplayError> {
        self.display.clear_buffer();

        let style = text_style();
        for (row, line) in lines.iter().enumerate() {
            let y = row as i32 * LINE_PITCH_PX;
            if y + GLYPH_HEIGHT_PX > SCREEN_HEIGHT as i32 {
                break;
            }
            Text::with_baseline(line, Point::new(0, y), style, Baseline::Top)
                .draw(&mut self.display)
                .map_err(|_| DisplayError::Bus)?;
        }

        self.display.flush().map_err(|_| DisplayError::Bus)
    }
}
