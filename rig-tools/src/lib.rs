//! Rig tools library
//!
//! Command definitions and presentation helpers behind the `rig` binary.

pub mod cli;
pub mod commands;
pub mod utils;
