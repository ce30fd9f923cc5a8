//! Integration tests for TextPanel

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use imu_datalogger::display::{ROW_HEIGHT, STATUS_POS, TITLE_POS};
use imu_datalogger::{Flush, StatusDisplay, TextPanel};

const WIDTH: usize = 128;
const HEIGHT: usize = 64;

/// 128x64 monochrome frame buffer that counts flushes
struct Frame {
    pixels: Vec<bool>,
    flushes: usize,
}

impl Frame {
    fn new() -> Self {
        Self {
            pixels: vec![false; WIDTH * HEIGHT],
            flushes: 0,
        }
    }

    fn lit_in_rows(&self, top: i32, height: u32) -> usize {
        let top = top as usize;
        let bottom = (top + height as usize).min(HEIGHT);
        self.pixels[top * WIDTH..bottom * WIDTH]
            .iter()
            .filter(|on| **on)
            .count()
    }

    fn lit_right_of(&self, top: i32, height: u32, x: usize) -> usize {
        let top = top as usize;
        (top..top + height as usize)
            .flat_map(|y| (x..WIDTH).map(move |x| (x, y)))
            .filter(|(x, y)| self.pixels[y * WIDTH + x])
            .count()
    }

    fn lit(&self) -> usize {
        self.pixels.iter().filter(|on| **on).count()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (x, y) = (point.x as usize, point.y as usize);
            if point.x >= 0 && point.y >= 0 && x < WIDTH && y < HEIGHT {
                self.pixels[y * WIDTH + x] = color.is_on();
            }
        }
        Ok(())
    }
}

impl Flush for Frame {
    fn flush_frame(&mut self) {
        self.flushes += 1;
    }
}

#[test]
fn draw_text_lights_pixels_in_its_row() {
    let mut panel = TextPanel::new(Frame::new());
    let (x, y) = STATUS_POS;

    panel.draw_text("Waiting...", x, y);

    let frame = panel.target();
    assert!(frame.lit_in_rows(y, ROW_HEIGHT) > 0);
    assert_eq!(frame.lit(), frame.lit_in_rows(y, ROW_HEIGHT));
}

#[test]
fn clear_row_blanks_only_that_row() {
    let mut panel = TextPanel::new(Frame::new());
    let (tx, ty) = TITLE_POS;
    let (sx, sy) = STATUS_POS;

    panel.draw_text("Datalogger", tx, ty);
    panel.draw_text("Recording...", sx, sy);
    let title_pixels = panel.target().lit_in_rows(ty, ROW_HEIGHT);

    panel.clear_row(sy);

    assert_eq!(panel.target().lit_in_rows(sy, ROW_HEIGHT), 0);
    assert_eq!(panel.target().lit_in_rows(ty, ROW_HEIGHT), title_pixels);
}

#[test]
fn shorter_text_leaves_no_trailing_pixels_after_row_clear() {
    let mut panel = TextPanel::new(Frame::new());
    let (x, y) = STATUS_POS;

    panel.draw_text("SD mount error", x, y);
    panel.clear_row(y);
    panel.draw_text("OK", x, y);

    // Two 6-pixel glyphs end at x + 12
    assert_eq!(panel.target().lit_right_of(y, ROW_HEIGHT, x as usize + 12), 0);
    assert!(panel.target().lit_in_rows(y, ROW_HEIGHT) > 0);
}

#[test]
fn clear_fills_whole_frame() {
    let mut panel = TextPanel::new(Frame::new());

    panel.clear(true);
    assert_eq!(panel.target().lit(), WIDTH * HEIGHT);

    panel.clear(false);
    assert_eq!(panel.target().lit(), 0);
}

#[test]
fn flush_reaches_the_target() {
    let mut panel = TextPanel::new(Frame::new());

    panel.flush();
    panel.flush();

    assert_eq!(panel.release().flushes, 2);
}
