//! Shared types and core logic for the Crop Advisory Platform
//!
//! This crate contains the crop-scoring engine and the types shared between
//! the backend, frontend (via WASM), and other components of the system.
//! Everything here is pure: no I/O, no clock, no global mutable state.

pub mod advisor;
pub mod alerts;
pub mod climate;
pub mod knowledge_base;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use advisor::generate_advisory;
pub use alerts::{detect_harsh_weather, harsh_weather_warnings, HarshWeather, HarshWeatherWarning};
pub use climate::summarize;
pub use knowledge_base::{find_crop, CROP_KNOWLEDGE_BASE};
pub use models::*;
pub use scoring::{
    round_to_tenth, score, score_crop, water_match_score, ComponentScores, SeasonFit,
    ALTERNATE_COUNT, TOP_COUNT,
};
pub use types::*;
pub use validation::*;
