//! Clepsydra Hardware Abstraction Layer
//!
//! This crate defines the minimal hardware capability the timer core needs:
//! digital pins that can be driven, read and switched between input and
//! output, button lines with a latched edge flag, and blocking delays.
//! Chip-specific crates implement these traits; the core and drivers only
//! ever see the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  clepsydra-core / clepsydra-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  clepsydra-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ clepsydra-hal-│       │  sim (host,   │
//! │    rp2040     │       │  feature std) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::ConfigurablePin`] - Direction control
//! - [`gpio::EdgeLatchedInput`] - Button lines with a pending-edge flag
//! - [`DelayNs`] - Blocking delays (re-exported from `embedded-hal`)

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

pub mod gpio;

#[cfg(feature = "std")]
pub mod sim;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use gpio::{ConfigurablePin, EdgeLatchedInput, InputPin, OutputPin, PinDirection};
