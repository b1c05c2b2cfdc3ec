//! Board wiring
//!
//! `BOARD` is generated from `board.toml` by the build script, which has
//! already rejected malformed or conflicting wiring.

use clepsydra_core::config::{BoardPins, ButtonPins, DisplayPins, PinConfig};

include!(concat!(env!("OUT_DIR"), "/board.rs"));
