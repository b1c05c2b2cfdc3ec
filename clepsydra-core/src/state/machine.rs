//! Timer state definition
//!
//! Display content and alarm level are a function of the current state.
//! Transitions here are pure data updates; [`TimeKeeper`](super::TimeKeeper)
//! applies their side effects.

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle, showing the configured duration
    #[default]
    Stopped,
    /// Counting suspended, colon blinking
    Paused,
    /// Counting down (countdown) or up (stopwatch)
    Running,
    /// Countdown reached zero, alarm toggling once per second
    Alarm,
}

/// Alarm output change requested by a transition
///
/// `None` leaves the output as it is.
pub type AlarmDrive = Option<bool>;

/// Complete timer state
///
/// `configured_seconds == 0` selects stopwatch semantics (count up), any
/// other value selects countdown semantics. `current_seconds` is only
/// meaningful outside [`Mode::Stopped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    /// Duration entered while stopped
    pub configured_seconds: u32,
    /// Running value while counting, paused or alarming
    pub current_seconds: u32,
    /// Seconds since the last transition, wraps at 256
    pub second_counter: u8,
    /// Current mode
    pub mode: Mode,
}

impl TimerState {
    /// Power-on state: stopped, nothing configured
    pub const fn new() -> Self {
        Self {
            configured_seconds: 0,
            current_seconds: 0,
            second_counter: 0,
            mode: Mode::Stopped,
        }
    }

    /// True when counting up from zero
    pub fn is_stopwatch(&self) -> bool {
        self.configured_seconds == 0
    }

    /// Start button
    pub fn start(&mut self) -> AlarmDrive {
        let drive = match self.mode {
            Mode::Stopped => {
                self.mode = Mode::Running;
                self.current_seconds = self.configured_seconds;
                None
            }
            Mode::Paused => {
                self.mode = Mode::Running;
                None
            }
            Mode::Running => {
                self.mode = Mode::Paused;
                None
            }
            Mode::Alarm => {
                self.mode = Mode::Stopped;
                Some(false)
            }
        };

        self.second_counter = 0;
        drive
    }

    /// Sec/Min buttons
    ///
    /// Stopped: extends the configured duration. Running or paused
    /// countdown: extends the remaining time. Stopwatch and alarm: no-op.
    pub fn add_seconds(&mut self, amount: u32) {
        match self.mode {
            Mode::Stopped => {
                self.configured_seconds = self.configured_seconds.saturating_add(amount);
            }
            Mode::Running | Mode::Paused if !self.is_stopwatch() => {
                self.current_seconds = self.current_seconds.saturating_add(amount);
            }
            _ => {}
        }
    }

    /// Reset gesture: back to power-on state from any mode
    pub fn reset(&mut self) -> AlarmDrive {
        *self = Self::new();
        Some(false)
    }

    /// One second elapsed
    pub fn tick(&mut self) -> AlarmDrive {
        self.second_counter = self.second_counter.wrapping_add(1);

        if self.mode == Mode::Running {
            if self.is_stopwatch() {
                self.current_seconds = self.current_seconds.saturating_add(1);
            } else {
                self.current_seconds = self.current_seconds.saturating_sub(1);
            }

            if self.current_seconds == 0 {
                self.mode = Mode::Alarm;
                self.second_counter = 0;
            }
        }

        if self.mode == Mode::Alarm {
            Some(self.second_counter % 2 == 0)
        } else {
            None
        }
    }

    /// Value shown on the display
    pub fn display_seconds(&self) -> u32 {
        match self.mode {
            Mode::Stopped => self.configured_seconds,
            Mode::Paused | Mode::Running | Mode::Alarm => self.current_seconds,
        }
    }

    /// Whether the colon separators are lit
    ///
    /// Steady while stopped or running, blinking with the second counter
    /// while paused or alarming.
    pub fn colon_visible(&self) -> bool {
        match self.mode {
            Mode::Stopped | Mode::Running => true,
            Mode::Paused | Mode::Alarm => self.second_counter % 2 == 1,
        }
    }
}
