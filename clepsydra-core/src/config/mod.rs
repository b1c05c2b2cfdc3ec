//! Configuration types
//!
//! Only the board wiring is configurable. Timing margins, debounce and the
//! tick rate are fixed constants next to the code that uses them.

pub mod board;

pub use board::*;
