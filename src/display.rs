//! Status display abstraction and an `embedded-graphics` text panel.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

/// Height of one text row in pixels.
pub const ROW_HEIGHT: u32 = 10;

/// Screen position of the title line.
pub const TITLE_POS: (i32, i32) = (4, 4);

/// Screen position of the status row written by `show_text`.
pub const STATUS_POS: (i32, i32) = (8, 20);

/// Screen positions of the two session summary rows.
pub const SUMMARY_POS: [(i32, i32); 2] = [(8, 30), (8, 40)];

/// Trait for abstracting a small text display.
///
/// Drawing calls may be buffered by the implementation; nothing has to reach
/// the panel before [`flush`](StatusDisplay::flush). Handle any hardware
/// errors internally - these methods cannot fail.
pub trait StatusDisplay {
    /// Fills the whole frame with one pixel state.
    fn clear(&mut self, on: bool);

    /// Blanks the text row whose top edge is at `y`.
    fn clear_row(&mut self, y: i32);

    /// Draws `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Pushes the frame to the panel.
    fn flush(&mut self);
}

/// A draw target that keeps a frame buffer and can push it to the panel.
pub trait Flush {
    /// Sends the buffered frame to the device.
    fn flush_frame(&mut self);
}

/// [`StatusDisplay`] over any monochrome `embedded-graphics` draw target.
///
/// Text is rendered with the 6x10 ASCII font, one row per [`ROW_HEIGHT`].
pub struct TextPanel<D> {
    target: D,
}

impl<D> TextPanel<D>
where
    D: DrawTarget<Color = BinaryColor> + Flush,
{
    /// Wraps a draw target.
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Returns a reference to the wrapped draw target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Releases the wrapped draw target.
    pub fn release(self) -> D {
        self.target
    }
}

impl<D> StatusDisplay for TextPanel<D>
where
    D: DrawTarget<Color = BinaryColor> + Flush,
{
    fn clear(&mut self, on: bool) {
        let color = if on { BinaryColor::On } else { BinaryColor::Off };
        let _ = self.target.clear(color);
    }

    fn clear_row(&mut self, y: i32) {
        let width = self.target.bounding_box().size.width;
        let _ = Rectangle::new(Point::new(0, y), Size::new(width, ROW_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.target);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target);
    }

    fn flush(&mut self) {
        self.target.flush_frame();
    }
}
