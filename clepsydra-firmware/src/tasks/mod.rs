//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod dispatch;

pub use buttons::button_task;
pub use dispatch::dispatch_task;
