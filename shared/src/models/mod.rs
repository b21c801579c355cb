//! Domain models for the Crop Advisory Platform

mod advisory;
mod alert;
mod crop;
mod farmer;
mod forecast;
mod history;

pub use advisory::*;
pub use alert::*;
pub use crop::*;
pub use farmer::*;
pub use forecast::*;
pub use history::*;
