//! Software edge latches for button inputs
//!
//! Each button has a watcher task that awaits pin edges and records the
//! logical level into a [`ButtonLatch`]. A press (logical low to high)
//! also latches an edge flag that stays set until the dispatcher clears
//! it, so presses shorter than a dispatch cycle are not lost.

use clepsydra_hal::{EdgeLatchedInput, InputPin};
use portable_atomic::{AtomicBool, Ordering};

/// Shared level and edge state of one button
pub struct ButtonLatch {
    level: AtomicBool,
    edge: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            level: AtomicBool::new(false),
            edge: AtomicBool::new(false),
        }
    }

    /// Record the current logical level
    ///
    /// Returns true if this was a press.
    pub fn record(&self, pressed: bool) -> bool {
        let was = self.level.swap(pressed, Ordering::AcqRel);
        let press = pressed && !was;
        if press {
            self.edge.store(true, Ordering::Release);
        }
        press
    }

    pub fn is_pressed(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    pub fn edge_pending(&self) -> bool {
        self.edge.load(Ordering::Acquire)
    }

    pub fn clear_edge(&self) {
        self.edge.store(false, Ordering::Release);
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatcher-side view of a [`ButtonLatch`]
#[derive(Clone, Copy)]
pub struct LatchedButton {
    latch: &'static ButtonLatch,
}

impl LatchedButton {
    pub const fn new(latch: &'static ButtonLatch) -> Self {
        Self { latch }
    }
}

impl InputPin for LatchedButton {
    fn is_high(&self) -> bool {
        self.latch.is_pressed()
    }
}

impl EdgeLatchedInput for LatchedButton {
    fn edge_pending(&self) -> bool {
        self.latch.edge_pending()
    }

    fn clear_edge(&mut self) {
        self.latch.clear_edge();
    }
}
