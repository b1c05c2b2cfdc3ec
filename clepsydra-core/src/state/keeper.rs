//! Time keeper
//!
//! Owns the timer state together with the display and alarm it drives.
//! Every event handler ends by rendering, so the display always reflects
//! the state after the most recent event.

use super::events::{Button, Event};
use super::machine::{AlarmDrive, Mode, TimerState};
use crate::clock::TimeText;
use crate::input::EventHandler;
use crate::traits::{AlarmOutput, CharDisplay};

/// Column where the `HH:MM:SS` field starts
pub const TIME_COLUMN: u8 = 0;

/// Timer state machine bound to its outputs
pub struct TimeKeeper<D, A> {
    state: TimerState,
    display: D,
    alarm: A,
}

impl<D: CharDisplay, A: AlarmOutput> TimeKeeper<D, A> {
    /// Create a keeper in the power-on state
    ///
    /// Nothing is written to the outputs until the first event or an explicit
    /// [`render`](Self::render).
    pub fn new(display: D, alarm: A) -> Self {
        Self {
            state: TimerState::new(),
            display,
            alarm,
        }
    }

    /// Current timer state
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Get access to the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get access to the alarm output
    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    /// Dispatch an event to its handler
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Button(Button::Start) => self.on_start(),
            Event::Button(Button::Sec) => self.on_sec(),
            Event::Button(Button::Min) => self.on_min(),
            Event::ResetGesture => self.on_reset(),
        }
    }

    /// Start/pause/resume, or acknowledge the alarm
    pub fn on_start(&mut self) {
        let drive = self.state.start();
        self.finish(drive);
    }

    /// Add one second
    pub fn on_sec(&mut self) {
        self.state.add_seconds(Button::Sec.increment());
        self.finish(None);
    }

    /// Add one minute
    pub fn on_min(&mut self) {
        self.state.add_seconds(Button::Min.increment());
        self.finish(None);
    }

    /// Return to the power-on state from any mode
    pub fn on_reset(&mut self) {
        let drive = self.state.reset();
        self.finish(drive);
    }

    /// One second elapsed
    pub fn on_tick(&mut self) {
        let drive = self.state.tick();
        self.finish(drive);
    }

    /// Draw the current state
    pub fn render(&mut self) {
        let text = TimeText::new(self.state.display_seconds(), self.state.colon_visible());
        self.display.set_cursor(TIME_COLUMN);
        self.display.add_text(text.as_str());
    }

    fn finish(&mut self, drive: AlarmDrive) {
        if let Some(active) = drive {
            self.alarm.set_active(active);
        }
        self.render();
    }
}

impl<D: CharDisplay, A: AlarmOutput> EventHandler for TimeKeeper<D, A> {
    fn handle(&mut self, event: Event) {
        TimeKeeper::handle(self, event);
    }
}
