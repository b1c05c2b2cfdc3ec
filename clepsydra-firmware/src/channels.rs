//! Inter-task communication
//!
//! Button watcher tasks record into the latches and raise `BUTTON_EDGE`;
//! the dispatch task waits on it alongside the time base.

use clepsydra_hal_rp2040::ButtonLatch;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Start button level and edge
pub static START_LATCH: ButtonLatch = ButtonLatch::new();

/// Sec button level and edge
pub static SEC_LATCH: ButtonLatch = ButtonLatch::new();

/// Min button level and edge
pub static MIN_LATCH: ButtonLatch = ButtonLatch::new();

/// Raised on every button press
pub static BUTTON_EDGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
