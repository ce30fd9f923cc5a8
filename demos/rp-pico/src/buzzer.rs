use embedded_hal::pwm::SetDutyCycle;
use imu_datalogger::Buzzer;
use rp_pico::hal::pwm::{FreeRunning, Pwm2, Slice};

/// PWM slice clock after the integer divider (125 MHz / 125).
const TICK_HZ: u32 = 1_000_000;

/// Passive buzzer on channel B of PWM slice 2 (GPIO21).
pub struct PwmBuzzer {
    slice: Slice<Pwm2, FreeRunning>,
}

impl PwmBuzzer {
    /// Takes a slice whose channel B is already routed to the buzzer pin.
    pub fn new(mut slice: Slice<Pwm2, FreeRunning>) -> Self {
        slice.set_div_int(125);
        let _ = slice.channel_b.set_duty_cycle(0);
        slice.enable();
        Self { slice }
    }
}

impl Buzzer for PwmBuzzer {
    fn play(&mut self, frequency_hz: u32) {
        if frequency_hz == 0 {
            self.stop();
            return;
        }

        let top = (TICK_HZ / frequency_hz).clamp(2, u16::MAX as u32 + 1) - 1;
        self.slice.set_top(top as u16);
        let _ = self.slice.channel_b.set_duty_cycle(top as u16 / 2);
    }

    fn stop(&mut self) {
        let _ = self.slice.channel_b.set_duty_cycle(0);
    }
}
