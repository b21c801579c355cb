//! Business logic services for the Crop Advisory Platform

pub mod advisory;
pub mod alerts;
pub mod auth;
pub mod history;

pub use advisory::AdvisoryService;
pub use alerts::AlertService;
pub use auth::AuthService;
pub use history::HistoryService;
