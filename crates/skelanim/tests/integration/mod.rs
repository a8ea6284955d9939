//! Level 2: Feature Integration Tests
//!
//! These tests exercise the public API across module boundaries.

pub mod player;
pub mod sampling;
pub mod skinning;
