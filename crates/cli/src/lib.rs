//! trprune CLI library
//!
//! Command implementations shared by the `trprune` binary and its tests.

pub mod cmd;
pub mod config;
pub mod prompt;
