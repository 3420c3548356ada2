//! Utilities shared by the Parley crates: logging setup and time helpers.

pub mod logger;
pub mod time;
