//! IMU datalogger on a Raspberry Pi Pico.
//!
//! Wiring:
//! - MPU6050 on I2C0 (GPIO0 SDA, GPIO1 SCL)
//! - SSD1306 128x64 on I2C1 (GPIO14 SDA, GPIO15 SCL)
//! - SD card on SPI0 (GPIO16 MISO, GPIO17 CS, GPIO18 SCK, GPIO19 MOSI)
//! - RGB LED on GPIO13 (red), GPIO11 (green), GPIO12 (blue)
//! - Passive buzzer on GPIO21
//! - Buttons to ground on GPIO5 (record), GPIO6 (mount), GPIO22 (mode switch)

#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal_bus::spi::ExclusiveDevice;
use fugit::RateExtU32;
use imu_datalogger::config::{PIN_BUTTON_A, PIN_BUTTON_B, PIN_JOYSTICK_SW};
use imu_datalogger::{
    Board, Datalogger, IndicatorLines, LoggerConfig, Mpu6050, StatusIndicator, Terminal, TextPanel,
};
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::gpio::bank0::{Gpio22, Gpio5, Gpio6};
use rp_pico::hal::gpio::{FunctionI2C, FunctionSioInput, FunctionSpi, Interrupt, Pin, PullUp};
use rp_pico::hal::pac::{self, interrupt};
use rp_pico::hal::clocks::init_clocks_and_plls;
use rp_pico::hal::pwm::Slices;
use rp_pico::hal::watchdog::Watchdog;
use rp_pico::hal::{rom_data, Clock, Sio, Spi, Timer, I2C};
use rp_pico_demos::buzzer::PwmBuzzer;
use rp_pico_demos::edges::{self, IrqEdges};
use rp_pico_demos::oled::Oled;
use rp_pico_demos::sdcard::SdStorage;
use rp_pico_demos::time::HardwareTimer;
use rtt_target::{rprintln, rtt_init_print};
use ssd1306::I2CDisplayInterface;

/// Button pins and the edge clock, shared with the GPIO interrupt.
struct Buttons {
    record: Pin<Gpio5, FunctionSioInput, PullUp>,
    mount: Pin<Gpio6, FunctionSioInput, PullUp>,
    mode_switch: Pin<Gpio22, FunctionSioInput, PullUp>,
    clock: HardwareTimer,
}

static BUTTONS: Mutex<RefCell<Option<Buttons>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = rp_pico::Pins::new(pac.IO_BANK0, pac.PADS_BANK0, sio.gpio_bank0, &mut pac.RESETS);
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Buttons: falling edges raise IO_IRQ_BANK0
    let record = pins.gpio5.into_pull_up_input();
    let mount = pins.gpio6.into_pull_up_input();
    let mode_switch = pins.gpio22.into_pull_up_input();
    record.set_interrupt_enabled(Interrupt::EdgeLow, true);
    mount.set_interrupt_enabled(Interrupt::EdgeLow, true);
    mode_switch.set_interrupt_enabled(Interrupt::EdgeLow, true);
    critical_section::with(|cs| {
        BUTTONS.borrow(cs).replace(Some(Buttons {
            record,
            mount,
            mode_switch,
            clock: HardwareTimer::new(timer),
        }));
    });

    // MPU6050
    let sensor_i2c = I2C::i2c0(
        pac.I2C0,
        pins.gpio0.reconfigure::<FunctionI2C, PullUp>(),
        pins.gpio1.reconfigure::<FunctionI2C, PullUp>(),
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let sensor = Mpu6050::new(sensor_i2c, timer);

    // SSD1306
    let display_i2c = I2C::i2c1(
        pac.I2C1,
        pins.gpio14.reconfigure::<FunctionI2C, PullUp>(),
        pins.gpio15.reconfigure::<FunctionI2C, PullUp>(),
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let display = TextPanel::new(Oled::new(I2CDisplayInterface::new(display_i2c)));

    // SD card
    let spi = Spi::<_, _, _, 8>::new(
        pac.SPI0,
        (
            pins.gpio19.into_function::<FunctionSpi>(),
            pins.gpio16.into_function::<FunctionSpi>(),
            pins.gpio18.into_function::<FunctionSpi>(),
        ),
    )
    .init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        400.kHz(),
        embedded_hal::spi::MODE_0,
    );
    let card = ExclusiveDevice::new(spi, pins.gpio17.into_push_pull_output(), timer).unwrap();
    let storage = SdStorage::new(card, timer);

    // RGB LED
    let led = IndicatorLines::new(
        pins.gpio13.into_push_pull_output(),
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
    );

    // Buzzer
    let mut slices = Slices::new(pac.PWM, &mut pac.RESETS);
    slices.pwm2.channel_b.output_to(pins.gpio21);
    let buzzer = PwmBuzzer::new(slices.pwm2);

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    let board = Board {
        sensor,
        storage,
        indicator: StatusIndicator::new(led, display),
        buzzer,
    };
    // FAT without long file names
    let config = LoggerConfig::new().filename("IMUDATA1.CSV");
    let mut logger = Datalogger::new(board, timer, config);

    rprintln!("datalogger ready");
    match logger.run(&mut IrqEdges) {
        Terminal::RebootToUpdate => {
            rprintln!("rebooting into USB boot");
            rom_data::reset_to_usb_boot(0, 0);
        }
    }

    loop {
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        if let Some(buttons) = BUTTONS.borrow_ref_mut(cs).as_mut() {
            let clock = buttons.clock;

            if buttons.record.interrupt_status(Interrupt::EdgeLow) {
                edges::record(PIN_BUTTON_A, &clock);
                buttons.record.clear_interrupt(Interrupt::EdgeLow);
            }
            if buttons.mount.interrupt_status(Interrupt::EdgeLow) {
                edges::record(PIN_BUTTON_B, &clock);
                buttons.mount.clear_interrupt(Interrupt::EdgeLow);
            }
            if buttons.mode_switch.interrupt_status(Interrupt::EdgeLow) {
                edges::record(PIN_JOYSTICK_SW, &clock);
                buttons.mode_switch.clear_interrupt(Interrupt::EdgeLow);
            }
        }
    });
}
