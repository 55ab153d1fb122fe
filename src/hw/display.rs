//! SSD1306 OLED display wrapper.
//!
//! The three badge fonts map onto embedded-graphics mono fonts that divide
//! the 128 px panel into 12, 16 and 25 columns.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use mesh_badge::hal::Surface;
use mesh_badge::ui::layout::Font;
use mesh_badge::Error;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Oled<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::DeviceNotFound)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;

    Ok(Oled {
        display,
        font: Font::Big,
    })
}

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Big => &FONT_10X20,
        Font::Medium => &FONT_8X13,
        Font::Small => &FONT_5X8,
    }
}

/// The panel as a badge text surface.
pub struct Oled<I2C> {
    display: Display<I2C>,
    font: Font,
}

impl<I2C> Surface for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), Error> {
        self.display.clear_buffer();
        Ok(())
    }

    fn select_font(&mut self, font: Font) -> Result<(), Error> {
        self.font = font;
        Ok(())
    }

    fn glyph_size(&self, font: Font) -> (u16, u16) {
        let size = mono_font(font).character_size;
        (size.width as u16, size.height as u16)
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), Error> {
        let style = MonoTextStyleBuilder::new()
            .font(mono_font(self.font))
            .text_color(BinaryColor::On)
            .build();

        Text::with_baseline(text, Point::new(x.into(), y.into()), style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Error> {
        self.display.flush().map_err(|_| Error::Display)
    }
}
