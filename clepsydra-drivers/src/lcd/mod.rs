//! Character LCD drivers

pub mod hd44780;

pub use hd44780::{ddram_address, Hd44780, Hd44780Pins};
