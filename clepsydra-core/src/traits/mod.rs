//! Hardware abstraction traits
//!
//! These traits define the interface between the timer logic
//! and the output devices it drives.

pub mod alarm;
pub mod display;

pub use alarm::AlarmOutput;
pub use display::CharDisplay;
