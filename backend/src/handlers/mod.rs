//! HTTP request handlers

pub mod advisory;
pub mod alerts;
pub mod auth;
pub mod health;
pub mod history;

pub use advisory::generate_advisory;
pub use alerts::{list_alert_subscriptions, subscribe_alerts, unsubscribe_alerts};
pub use auth::{login, me, register};
pub use health::health_check;
pub use history::list_history;
