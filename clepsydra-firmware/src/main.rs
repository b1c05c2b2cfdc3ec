//! Clepsydra - Countdown Timer / Stopwatch / Alarm Firmware
//!
//! Main firmware binary for RP2040-based kitchen-timer style boards:
//! a 16x1 character LCD, a buzzer and three buttons (Start, Sec, Min).
//! Pin assignment comes from `board.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Input;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use clepsydra_core::config::PinConfig;
use clepsydra_core::input::{ButtonLines, InputDispatcher};
use clepsydra_core::state::{Button, TimeKeeper};
use clepsydra_drivers::alarm::GpioAlarm;
use clepsydra_drivers::lcd::{Hd44780, Hd44780Pins};
use clepsydra_hal_rp2040::{bank_pins, LatchedButton, PinBank, RpOutput};

use crate::channels::{MIN_LATCH, SEC_LATCH, START_LATCH};
use crate::config::BOARD;

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Clepsydra firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    if let Err(e) = BOARD.validate() {
        defmt::panic!("Invalid board configuration: {}", e);
    }
    info!("Board: {}", BOARD);

    let mut bank = PinBank::new(bank_pins!(p));

    // Display
    let display = BOARD.display;
    let lcd_pins = Hd44780Pins {
        rs: take_output(&mut bank, display.rs),
        enable: take_output(&mut bank, display.enable),
        d4: take_output(&mut bank, display.d4),
        d5: take_output(&mut bank, display.d5),
        d6: take_output(&mut bank, display.d6),
        d7: take_output(&mut bank, display.d7),
    };
    let mut lcd = Hd44780::new(lcd_pins, Delay);
    lcd.initialize();
    info!("Display initialized");

    // Alarm starts silent
    let alarm = GpioAlarm::new(take_output(&mut bank, BOARD.alarm), BOARD.alarm.inverted);

    let mut keeper = TimeKeeper::new(lcd, alarm);
    keeper.render();

    // Buttons
    let buttons = BOARD.buttons;
    let start = take_input(&mut bank, buttons.start);
    let sec = take_input(&mut bank, buttons.sec);
    let min = take_input(&mut bank, buttons.min);

    let dispatcher = InputDispatcher::new(
        ButtonLines {
            start: LatchedButton::new(&START_LATCH),
            sec: LatchedButton::new(&SEC_LATCH),
            min: LatchedButton::new(&MIN_LATCH),
        },
        Delay,
    );

    spawner
        .spawn(tasks::button_task(Button::Start, start, buttons.start, &START_LATCH))
        .unwrap();
    spawner
        .spawn(tasks::button_task(Button::Sec, sec, buttons.sec, &SEC_LATCH))
        .unwrap();
    spawner
        .spawn(tasks::button_task(Button::Min, min, buttons.min, &MIN_LATCH))
        .unwrap();
    spawner
        .spawn(tasks::dispatch_task(dispatcher, keeper))
        .unwrap();

    info!("Clepsydra ready");
}

fn take_output(bank: &mut PinBank, cfg: PinConfig) -> RpOutput {
    match bank.take_output(cfg) {
        Ok(pin) => pin,
        Err(e) => defmt::panic!("gpio{} unavailable: {}", cfg.pin, e),
    }
}

fn take_input(bank: &mut PinBank, cfg: PinConfig) -> Input<'static> {
    match bank.take_input(cfg) {
        Ok(pin) => pin,
        Err(e) => defmt::panic!("gpio{} unavailable: {}", cfg.pin, e),
    }
}
