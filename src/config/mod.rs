//! Configuration module for the cash flow tracker
//!
//! Resolves where settings and exports live and persists user preferences
//! such as the CSV header names and the log filter.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::Settings;
