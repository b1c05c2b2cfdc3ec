//! RP2040-specific HAL for the timer firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `clepsydra-hal` traits:
//!
//! - Pin bank for config-driven pin assignment
//! - Output wrapper over `embassy_rp::gpio::Flex`
//! - Software edge latches for the buttons

#![no_std]

pub mod buttons;
pub mod gpio;
pub mod pins;

pub use buttons::{ButtonLatch, LatchedButton};
pub use gpio::RpOutput;
pub use pins::{PinBank, PinError};
