//! Board wiring configuration
//!
//! These types describe which GPIO drives which signal. The firmware
//! generates a [`BoardPins`] constant from `board.toml` at build time.

/// Number of usable GPIO pins
pub const GPIO_COUNT: u8 = 30;

/// Number of signals on the board
pub const SIGNAL_COUNT: usize = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number outside 0..GPIO_COUNT
    PinOutOfRange(u8),
    /// Same pin assigned to two signals
    DuplicatePin(u8),
    /// Display bus lines cannot be inverted
    InvertedDisplayLine(u8),
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }

    /// Logical level for a physical level, honouring inversion
    pub const fn logical(&self, physical_high: bool) -> bool {
        physical_high != self.inverted
    }

    /// Parse a pin string from config
    ///
    /// Supports formats:
    /// - "gpio11" -> pin 11
    /// - "!gpio12" -> pin 12, inverted (active-low)
    /// - "^gpio4" -> pin 4 with pull-up
    /// - "!^gpio4" / "^!gpio4" -> both
    ///
    /// The pin number is not range-checked here; see [`BoardPins::validate`].
    pub fn parse(s: &str) -> Option<Self> {
        let mut s = s.trim();
        let mut cfg = Self::default();

        loop {
            if let Some(rest) = s.strip_prefix('!') {
                cfg.inverted = true;
                s = rest;
            } else if let Some(rest) = s.strip_prefix('^') {
                cfg.pull_up = true;
                s = rest;
            } else {
                break;
            }
        }

        let num_str = s.strip_prefix("gpio")?;
        if num_str.is_empty() || !num_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        cfg.pin = num_str.parse().ok()?;

        Some(cfg)
    }
}

/// Character display bus: register select, enable, data lines D4-D7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPins {
    pub rs: PinConfig,
    pub enable: PinConfig,
    pub d4: PinConfig,
    pub d5: PinConfig,
    pub d6: PinConfig,
    pub d7: PinConfig,
}

/// Front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPins {
    pub start: PinConfig,
    pub sec: PinConfig,
    pub min: PinConfig,
}

/// Complete board wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    pub display: DisplayPins,
    pub alarm: PinConfig,
    pub buttons: ButtonPins,
}

impl BoardPins {
    /// Every assigned pin
    pub fn all(&self) -> [PinConfig; SIGNAL_COUNT] {
        let d = &self.display;
        let b = &self.buttons;
        [
            d.rs, d.enable, d.d4, d.d5, d.d6, d.d7, self.alarm, b.start, b.sec, b.min,
        ]
    }

    /// Check ranges, uniqueness and display polarity
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut used: u32 = 0;

        for cfg in self.all() {
            if cfg.pin >= GPIO_COUNT {
                return Err(ConfigError::PinOutOfRange(cfg.pin));
            }
            let bit = 1u32 << cfg.pin;
            if used & bit != 0 {
                return Err(ConfigError::DuplicatePin(cfg.pin));
            }
            used |= bit;
        }

        let d = &self.display;
        for cfg in [d.rs, d.enable, d.d4, d.d5, d.d6, d.d7] {
            if cfg.inverted {
                return Err(ConfigError::InvertedDisplayLine(cfg.pin));
            }
        }

        Ok(())
    }
}
