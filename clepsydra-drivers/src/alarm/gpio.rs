//! GPIO alarm output
//!
//! Drives a buzzer or lamp directly from a GPIO pin (or via a transistor).

use clepsydra_core::traits::AlarmOutput;
use clepsydra_hal::{ConfigurablePin, OutputPin, PinDirection};

/// GPIO alarm output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioAlarm<P> {
    pin: P,
    /// If true, alarm ON = pin LOW
    inverted: bool,
    /// Current logical state (true = alarm sounding)
    on: bool,
}

impl<P: OutputPin + ConfigurablePin> GpioAlarm<P> {
    /// Create a new GPIO alarm output
    ///
    /// The pin is switched to output and the alarm starts silent.
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, alarm is ON when pin is LOW
    pub fn new(mut pin: P, inverted: bool) -> Self {
        pin.set_direction(PinDirection::Output);
        let mut alarm = Self {
            pin,
            inverted,
            on: false,
        };
        alarm.set_active(false);
        alarm
    }

    /// Create a new GPIO alarm with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO alarm with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Get access to the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin + ConfigurablePin> AlarmOutput for GpioAlarm<P> {
    fn set_active(&mut self, active: bool) {
        self.on = active;
        self.pin.set_state(active != self.inverted);
    }

    fn is_active(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        direction: PinDirection,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                direction: PinDirection::Input,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn toggle(&mut self) {
            self.high = !self.high;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl ConfigurablePin for MockPin {
        fn set_direction(&mut self, direction: PinDirection) {
            self.direction = direction;
        }
    }

    #[test]
    fn test_active_high_alarm() {
        let mut alarm = GpioAlarm::new_active_high(MockPin::new());

        // Initially off, pin configured as output
        assert!(!alarm.is_active());
        assert!(!alarm.pin().is_set_high());
        assert_eq!(alarm.pin().direction, PinDirection::Output);

        alarm.set_active(true);
        assert!(alarm.is_active());
        assert!(alarm.pin().is_set_high());

        alarm.set_active(false);
        assert!(!alarm.is_active());
        assert!(!alarm.pin().is_set_high());
    }

    #[test]
    fn test_active_low_alarm() {
        let mut alarm = GpioAlarm::new_active_low(MockPin::new());

        // Initially off (pin is high for active-low)
        assert!(!alarm.is_active());
        assert!(alarm.pin().is_set_high());

        // Turn on (pin goes low for active-low)
        alarm.set_active(true);
        assert!(alarm.is_active());
        assert!(!alarm.pin().is_set_high());
    }

    #[test]
    fn test_alarm_trait() {
        let mut alarm = GpioAlarm::new_active_high(MockPin::new());

        fn check_alarm<A: AlarmOutput>(a: &mut A) {
            assert!(!a.is_active());
            a.set_active(true);
            assert!(a.is_active());
        }

        check_alarm(&mut alarm);
    }
}
