//! Alarm outputs

pub mod gpio;

pub use gpio::GpioAlarm;
