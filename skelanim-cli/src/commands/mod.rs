//! Command implementations

pub mod clip;
pub mod skin;
