//! Board-agnostic core logic for the timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Output traits the timer renders through (character display, alarm)
//! - Timer/stopwatch/alarm state machine and its render policy
//! - Clock decomposition and two-digit formatting
//! - Input dispatch: tick scaling, reset gesture, button priority, debounce
//! - Board pin configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod input;
pub mod state;
pub mod traits;
