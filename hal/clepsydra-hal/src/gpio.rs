//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// High-impedance input
    Input,
    /// Push-pull output
    Output,
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can be changed at runtime
pub trait ConfigurablePin {
    /// Switch the pin between input and output
    fn set_direction(&mut self, direction: PinDirection);
}

/// Input line with a latched edge flag
///
/// The flag is set by hardware (or an equivalent latch) on every press edge
/// and stays set until explicitly cleared, so a press that arrives while
/// the handler is busy is never lost.
pub trait EdgeLatchedInput: InputPin {
    /// Check whether an edge has been latched since the last clear
    fn edge_pending(&self) -> bool;

    /// Clear the latched edge flag
    fn clear_edge(&mut self);
}
