//! Domain models for the Crop Advisory Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
