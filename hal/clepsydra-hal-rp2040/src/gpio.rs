//! GPIO outputs on RP2040

use clepsydra_hal::{ConfigurablePin, OutputPin, PinDirection};
use embassy_rp::gpio::Flex;

/// Push-pull output on an RP2040 GPIO
///
/// Levels are physical; polarity is handled by the driver using the pin.
pub struct RpOutput {
    pin: Flex<'static>,
}

impl RpOutput {
    pub fn new(pin: Flex<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl ConfigurablePin for RpOutput {
    fn set_direction(&mut self, direction: PinDirection) {
        match direction {
            PinDirection::Output => self.pin.set_as_output(),
            PinDirection::Input => self.pin.set_as_input(),
        }
    }
}
