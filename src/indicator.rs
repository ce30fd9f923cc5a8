//! Status indicator: RGB LED color plus status text.
//!
//! Colors come from a closed set and are composed from three on/off lines
//! (yellow is red+green, purple is red+blue). The status text occupies one
//! fixed row of the display and is fully redrawn on every call.

use crate::display::{STATUS_POS, SUMMARY_POS, StatusDisplay, TITLE_POS};
use embedded_hal::digital::OutputPin;
use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, etc.) to allow the
/// indicator to control it. Color components are in the range 0.0-1.0.
/// Handle any hardware errors internally - this method cannot fail.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    fn set_color(&mut self, color: Srgb);
}

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// The colors the indicator can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusColor {
    Red,
    Green,
    Blue,
    /// Red and green lines together.
    Yellow,
    /// Red and blue lines together.
    Purple,
}

impl StatusColor {
    /// Parses a color name, case-insensitively.
    ///
    /// Accepts English and Portuguese names (`vermelho`, `verde`, `azul`,
    /// `amarelo`, `roxo`).
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, StatusColor); 10] = [
            ("red", StatusColor::Red),
            ("green", StatusColor::Green),
            ("blue", StatusColor::Blue),
            ("yellow", StatusColor::Yellow),
            ("purple", StatusColor::Purple),
            ("vermelho", StatusColor::Red),
            ("verde", StatusColor::Green),
            ("azul", StatusColor::Blue),
            ("amarelo", StatusColor::Yellow),
            ("roxo", StatusColor::Purple),
        ];

        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }

    /// Returns the color as full-intensity RGB.
    pub const fn to_srgb(self) -> Srgb {
        match self {
            StatusColor::Red => Srgb::new(1.0, 0.0, 0.0),
            StatusColor::Green => Srgb::new(0.0, 1.0, 0.0),
            StatusColor::Blue => Srgb::new(0.0, 0.0, 1.0),
            StatusColor::Yellow => Srgb::new(1.0, 1.0, 0.0),
            StatusColor::Purple => Srgb::new(1.0, 0.0, 1.0),
        }
    }
}

/// Meaning of each indicator color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Mounting the card.
    Initializing,
    /// Ready to record.
    Ready,
    /// Accessing the card.
    Busy,
    /// Capture in progress.
    Capturing,
    /// Mount or unmount failed.
    Error,
}

impl Status {
    /// Returns the color shown for this status.
    pub const fn color(self) -> StatusColor {
        match self {
            Status::Initializing => StatusColor::Yellow,
            Status::Ready => StatusColor::Green,
            Status::Busy => StatusColor::Blue,
            Status::Capturing => StatusColor::Red,
            Status::Error => StatusColor::Purple,
        }
    }
}

/// [`RgbLed`] on three digital output lines.
///
/// A line is driven high when its channel is at least half intensity.
/// All lines are cleared before the new ones are set.
pub struct IndicatorLines<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> IndicatorLines<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Creates the indicator with all lines low.
    pub fn new(mut red: R, mut green: G, mut blue: B) -> Self {
        let _ = red.set_low();
        let _ = green.set_low();
        let _ = blue.set_low();

        Self { red, green, blue }
    }

    /// Releases the three pins.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R, G, B> RgbLed for IndicatorLines<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set_color(&mut self, color: Srgb) {
        let _ = self.red.set_low();
        let _ = self.green.set_low();
        let _ = self.blue.set_low();

        if color.red >= 0.5 {
            let _ = self.red.set_high();
        }
        if color.green >= 0.5 {
            let _ = self.green.set_high();
        }
        if color.blue >= 0.5 {
            let _ = self.blue.set_high();
        }
    }
}

/// Drives the status LED and the status rows of the display.
pub struct StatusIndicator<L: RgbLed, D: StatusDisplay> {
    led: L,
    display: D,
    color: Option<StatusColor>,
}

impl<L: RgbLed, D: StatusDisplay> StatusIndicator<L, D> {
    /// Creates an indicator with the LED turned off.
    pub fn new(mut led: L, display: D) -> Self {
        led.set_color(COLOR_OFF);

        Self {
            led,
            display,
            color: None,
        }
    }

    /// Shows `color` on the LED.
    pub fn set_color(&mut self, color: StatusColor) {
        self.led.set_color(color.to_srgb());
        self.color = Some(color);
    }

    /// Shows the color for `status` on the LED.
    pub fn set_status(&mut self, status: Status) {
        self.set_color(status.color());
    }

    /// Shows a color given by name. Unknown names turn the LED off.
    pub fn set_color_name(&mut self, name: &str) {
        match StatusColor::from_name(name) {
            Some(color) => self.set_color(color),
            None => self.off(),
        }
    }

    /// Turns the LED off.
    pub fn off(&mut self) {
        self.led.set_color(COLOR_OFF);
        self.color = None;
    }

    /// Returns the color currently shown, if any.
    pub fn color(&self) -> Option<StatusColor> {
        self.color
    }

    /// Replaces the status row with `line` and flushes.
    pub fn show_text(&mut self, line: &str) {
        let (x, y) = STATUS_POS;
        self.display.clear_row(y);
        self.display.draw_text(line, x, y);
        self.display.flush();
    }

    /// Replaces both summary rows and flushes.
    pub fn show_summary(&mut self, first: &str, second: &str) {
        for ((x, y), line) in SUMMARY_POS.into_iter().zip([first, second]) {
            self.display.clear_row(y);
            self.display.draw_text(line, x, y);
        }
        self.display.flush();
    }

    /// Clears the screen and draws the title line.
    pub fn show_banner(&mut self, title: &str) {
        let (x, y) = TITLE_POS;
        self.display.clear(false);
        self.display.draw_text(title, x, y);
        self.display.flush();
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_in_both_languages() {
        assert_eq!(StatusColor::from_name("yellow"), Some(StatusColor::Yellow));
        assert_eq!(StatusColor::from_name("amarelo"), Some(StatusColor::Yellow));
        assert_eq!(StatusColor::from_name("ROXO"), Some(StatusColor::Purple));
        assert_eq!(StatusColor::from_name("Vermelho"), Some(StatusColor::Red));
        assert_eq!(StatusColor::from_name("magenta"), None);
    }

    #[test]
    fn composite_colors_mix_two_channels() {
        assert_eq!(StatusColor::Yellow.to_srgb(), Srgb::new(1.0, 1.0, 0.0));
        assert_eq!(StatusColor::Purple.to_srgb(), Srgb::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn statuses_map_to_documented_colors() {
        assert_eq!(Status::Initializing.color(), StatusColor::Yellow);
        assert_eq!(Status::Ready.color(), StatusColor::Green);
        assert_eq!(Status::Busy.color(), StatusColor::Blue);
        assert_eq!(Status::Capturing.color(), StatusColor::Red);
        assert_eq!(Status::Error.color(), StatusColor::Purple);
    }
}
