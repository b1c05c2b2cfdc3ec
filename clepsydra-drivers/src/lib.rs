//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in clepsydra-core, written against the clepsydra-hal pin traits:
//!
//! - Character LCD (HD44780-compatible controller, 4-bit bus)
//! - Alarm actuator on a GPIO pin

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alarm;
pub mod lcd;
