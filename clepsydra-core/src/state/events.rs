//! Events that drive the timer state machine

/// The three front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Start / pause / resume / acknowledge alarm
    Start,
    /// Add one second
    Sec,
    /// Add one minute
    Min,
}

impl Button {
    /// Service order when several buttons are pending at once
    pub const PRIORITY: [Button; 3] = [Button::Start, Button::Sec, Button::Min];

    /// Seconds added by an adjustment button (zero for Start)
    pub fn increment(self) -> u32 {
        match self {
            Button::Start => 0,
            Button::Sec => 1,
            Button::Min => 60,
        }
    }
}

/// Events that can change the timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// One second elapsed
    Tick,
    /// A button press was accepted
    Button(Button),
    /// Sec and Min held together
    ResetGesture,
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::Button(_) | Event::ResetGesture)
    }

    /// Check if this event comes from the time base
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick)
    }
}
