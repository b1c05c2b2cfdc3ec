//! Config-driven pin allocation
//!
//! Pin numbers come from `board.toml` rather than being hardcoded, so the
//! bank hands pins out by number and refuses to give the same one twice.

use clepsydra_core::config::{PinConfig, GPIO_COUNT};
use embassy_rp::gpio::{AnyPin, Flex, Input, Pull};
use embassy_rp::Peri;

use crate::gpio::RpOutput;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
}

/// Pin bank that holds the GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

/// GPIO pins moved out of `embassy_rp::Peripherals`
pub struct BankPins {
    pub pin0: Peri<'static, embassy_rp::peripherals::PIN_0>,
    pub pin1: Peri<'static, embassy_rp::peripherals::PIN_1>,
    pub pin2: Peri<'static, embassy_rp::peripherals::PIN_2>,
    pub pin3: Peri<'static, embassy_rp::peripherals::PIN_3>,
    pub pin4: Peri<'static, embassy_rp::peripherals::PIN_4>,
    pub pin5: Peri<'static, embassy_rp::peripherals::PIN_5>,
    pub pin6: Peri<'static, embassy_rp::peripherals::PIN_6>,
    pub pin7: Peri<'static, embassy_rp::peripherals::PIN_7>,
    pub pin8: Peri<'static, embassy_rp::peripherals::PIN_8>,
    pub pin9: Peri<'static, embassy_rp::peripherals::PIN_9>,
    pub pin10: Peri<'static, embassy_rp::peripherals::PIN_10>,
    pub pin11: Peri<'static, embassy_rp::peripherals::PIN_11>,
    pub pin12: Peri<'static, embassy_rp::peripherals::PIN_12>,
    pub pin13: Peri<'static, embassy_rp::peripherals::PIN_13>,
    pub pin14: Peri<'static, embassy_rp::peripherals::PIN_14>,
    pub pin15: Peri<'static, embassy_rp::peripherals::PIN_15>,
    pub pin16: Peri<'static, embassy_rp::peripherals::PIN_16>,
    pub pin17: Peri<'static, embassy_rp::peripherals::PIN_17>,
    pub pin18: Peri<'static, embassy_rp::peripherals::PIN_18>,
    pub pin19: Peri<'static, embassy_rp::peripherals::PIN_19>,
    pub pin20: Peri<'static, embassy_rp::peripherals::PIN_20>,
    pub pin21: Peri<'static, embassy_rp::peripherals::PIN_21>,
    pub pin22: Peri<'static, embassy_rp::peripherals::PIN_22>,
    pub pin23: Peri<'static, embassy_rp::peripherals::PIN_23>,
    pub pin24: Peri<'static, embassy_rp::peripherals::PIN_24>,
    pub pin25: Peri<'static, embassy_rp::peripherals::PIN_25>,
    pub pin26: Peri<'static, embassy_rp::peripherals::PIN_26>,
    pub pin27: Peri<'static, embassy_rp::peripherals::PIN_27>,
    pub pin28: Peri<'static, embassy_rp::peripherals::PIN_28>,
    pub pin29: Peri<'static, embassy_rp::peripherals::PIN_29>,
}

/// Move the GPIO pins out of the peripherals struct
#[macro_export]
macro_rules! bank_pins {
    ($p:expr) => {
        $crate::pins::BankPins {
            pin0: $p.PIN_0,
            pin1: $p.PIN_1,
            pin2: $p.PIN_2,
            pin3: $p.PIN_3,
            pin4: $p.PIN_4,
            pin5: $p.PIN_5,
            pin6: $p.PIN_6,
            pin7: $p.PIN_7,
            pin8: $p.PIN_8,
            pin9: $p.PIN_9,
            pin10: $p.PIN_10,
            pin11: $p.PIN_11,
            pin12: $p.PIN_12,
            pin13: $p.PIN_13,
            pin14: $p.PIN_14,
            pin15: $p.PIN_15,
            pin16: $p.PIN_16,
            pin17: $p.PIN_17,
            pin18: $p.PIN_18,
            pin19: $p.PIN_19,
            pin20: $p.PIN_20,
            pin21: $p.PIN_21,
            pin22: $p.PIN_22,
            pin23: $p.PIN_23,
            pin24: $p.PIN_24,
            pin25: $p.PIN_25,
            pin26: $p.PIN_26,
            pin27: $p.PIN_27,
            pin28: $p.PIN_28,
            pin29: $p.PIN_29,
        }
    };
}

impl PinBank {
    /// Create a pin bank owning every GPIO
    pub fn new(p: BankPins) -> Self {
        Self {
            pins: [
                Some(p.pin0.into()),
                Some(p.pin1.into()),
                Some(p.pin2.into()),
                Some(p.pin3.into()),
                Some(p.pin4.into()),
                Some(p.pin5.into()),
                Some(p.pin6.into()),
                Some(p.pin7.into()),
                Some(p.pin8.into()),
                Some(p.pin9.into()),
                Some(p.pin10.into()),
                Some(p.pin11.into()),
                Some(p.pin12.into()),
                Some(p.pin13.into()),
                Some(p.pin14.into()),
                Some(p.pin15.into()),
                Some(p.pin16.into()),
                Some(p.pin17.into()),
                Some(p.pin18.into()),
                Some(p.pin19.into()),
                Some(p.pin20.into()),
                Some(p.pin21.into()),
                Some(p.pin22.into()),
                Some(p.pin23.into()),
                Some(p.pin24.into()),
                Some(p.pin25.into()),
                Some(p.pin26.into()),
                Some(p.pin27.into()),
                Some(p.pin28.into()),
                Some(p.pin29.into()),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        if pin_num >= GPIO_COUNT {
            return false;
        }
        self.pins[pin_num as usize].is_some()
    }

    /// Take a pin as an output, driven low
    ///
    /// Direction is left to the driver that owns it.
    pub fn take_output(&mut self, cfg: PinConfig) -> Result<RpOutput, PinError> {
        let mut flex = Flex::new(self.take(cfg.pin)?);
        flex.set_low();
        Ok(RpOutput::new(flex))
    }

    /// Take a pin as an input with the configured pull
    pub fn take_input(&mut self, cfg: PinConfig) -> Result<Input<'static>, PinError> {
        // Active-low buttons idle high
        let pull = if cfg.pull_up || cfg.inverted {
            Pull::Up
        } else {
            Pull::Down
        };
        Ok(Input::new(self.take(cfg.pin)?, pull))
    }
}
