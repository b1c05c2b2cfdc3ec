//! Interrupt-time input dispatcher
//!
//! [`InputDispatcher::service`] is the body of the device's only interrupt
//! handler. Each invocation, in order:
//!
//! 1. Advances the tick counter if the hardware timer fired, emitting
//!    [`Event::Tick`] every [`TICKS_PER_SECOND`] ticks.
//! 2. If Sec and Min are both held, waits [`COMBO_SETTLE_MS`], clears both
//!    edge flags and emits [`Event::ResetGesture`]. No single button is
//!    serviced in that invocation.
//! 3. Otherwise services at most one latched button, in the order of
//!    [`Button::PRIORITY`], then waits [`DEBOUNCE_MS`] before clearing that
//!    button's flag.
//!
//! Flags that lose on priority stay latched and are serviced on a later
//! invocation. Delays block; that is what bounds button latency to one
//! debounce interval.

use clepsydra_hal::{DelayNs, EdgeLatchedInput};
use heapless::Vec;

use super::EventHandler;
use crate::state::{Button, Event};

/// Hardware timer ticks per logical second (25 Hz time base)
pub const TICKS_PER_SECOND: u8 = 25;

/// Settle time before accepting the Sec+Min reset gesture
pub const COMBO_SETTLE_MS: u32 = 50;

/// Debounce time after servicing a button
pub const DEBOUNCE_MS: u32 = 150;

/// The three button lines
pub struct ButtonLines<B> {
    pub start: B,
    pub sec: B,
    pub min: B,
}

impl<B> ButtonLines<B> {
    /// Get the line for a button
    pub fn line(&self, button: Button) -> &B {
        match button {
            Button::Start => &self.start,
            Button::Sec => &self.sec,
            Button::Min => &self.min,
        }
    }

    /// Get mutable access to the line for a button
    pub fn line_mut(&mut self, button: Button) -> &mut B {
        match button {
            Button::Start => &mut self.start,
            Button::Sec => &mut self.sec,
            Button::Min => &mut self.min,
        }
    }
}

/// What one invocation of the dispatcher did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// A full second elapsed and [`Event::Tick`] was emitted
    pub second_elapsed: bool,
    /// User event serviced in this invocation, if any
    pub serviced: Option<Event>,
    /// Buttons still latched afterwards, in priority order
    pub deferred: Vec<Button, 3>,
}

/// Tick scaler, gesture detector and button arbiter
pub struct InputDispatcher<B, D> {
    lines: ButtonLines<B>,
    delay: D,
    tick_counter: u8,
}

impl<B: EdgeLatchedInput, D: DelayNs> InputDispatcher<B, D> {
    /// Create a dispatcher over the button lines and a blocking delay
    pub fn new(lines: ButtonLines<B>, delay: D) -> Self {
        Self {
            lines,
            delay,
            tick_counter: 0,
        }
    }

    /// Ticks counted towards the next second
    pub fn tick_counter(&self) -> u8 {
        self.tick_counter
    }

    /// Get access to the button lines
    pub fn lines(&self) -> &ButtonLines<B> {
        &self.lines
    }

    /// Run one interrupt invocation
    ///
    /// `timer_elapsed` is true when the invocation was caused by the
    /// hardware timer; button-only invocations leave the tick counter alone.
    pub fn service<H: EventHandler>(&mut self, timer_elapsed: bool, handler: &mut H) -> Dispatch {
        let mut report = Dispatch::default();

        if timer_elapsed {
            self.tick_counter += 1;
            if self.tick_counter >= TICKS_PER_SECOND {
                self.tick_counter = 0;
                handler.handle(Event::Tick);
                report.second_elapsed = true;
            }
        }

        if self.lines.sec.is_high() && self.lines.min.is_high() {
            self.delay.delay_ms(COMBO_SETTLE_MS);
            self.lines.sec.clear_edge();
            self.lines.min.clear_edge();

            handler.handle(Event::ResetGesture);
            report.serviced = Some(Event::ResetGesture);
        } else if let Some(button) = self.next_pending() {
            handler.handle(Event::Button(button));
            self.delay.delay_ms(DEBOUNCE_MS);
            self.lines.line_mut(button).clear_edge();

            report.serviced = Some(Event::Button(button));
        }

        for button in Button::PRIORITY {
            if self.lines.line(button).edge_pending() {
                // Capacity matches the number of buttons
                let _ = report.deferred.push(button);
            }
        }

        report
    }

    fn next_pending(&self) -> Option<Button> {
        Button::PRIORITY
            .into_iter()
            .find(|&button| self.lines.line(button).edge_pending())
    }
}
