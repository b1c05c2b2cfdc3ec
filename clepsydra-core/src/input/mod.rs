//! Input dispatch
//!
//! Turns the raw time base and button lines into timer events.

pub mod dispatcher;

pub use dispatcher::{
    ButtonLines, Dispatch, InputDispatcher, COMBO_SETTLE_MS, DEBOUNCE_MS, TICKS_PER_SECOND,
};

use crate::state::Event;

/// Consumer of dispatched events
pub trait EventHandler {
    /// Handle one event to completion
    fn handle(&mut self, event: Event);
}
