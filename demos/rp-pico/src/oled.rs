use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use imu_datalogger::Flush;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

/// Buffered 128x64 SSD1306 panel usable by `TextPanel`.
pub struct Oled<DI>(Ssd1306<DI, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>);

impl<DI: WriteOnlyDataCommand> Oled<DI> {
    /// Initializes the controller and blanks the panel.
    pub fn new(interface: DI) -> Self {
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();
        let _ = display.flush();
        Self(display)
    }
}

impl<DI: WriteOnlyDataCommand> OriginDimensions for Oled<DI> {
    fn size(&self) -> Size {
        self.0.size()
    }
}

impl<DI: WriteOnlyDataCommand> DrawTarget for Oled<DI> {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }
}

impl<DI: WriteOnlyDataCommand> Flush for Oled<DI> {
    fn flush_frame(&mut self) {
        let _ = self.0.flush();
    }
}
