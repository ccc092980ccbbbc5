//! Command implementations for each archive type

pub mod skeleton;
