//! Timer state machine
//!
//! Defines the authoritative runtime behavior of the device.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod keeper;
pub mod machine;

pub use events::{Button, Event};
pub use keeper::TimeKeeper;
pub use machine::{AlarmDrive, Mode, TimerState};
