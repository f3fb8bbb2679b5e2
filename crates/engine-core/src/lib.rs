pub mod error;
pub mod loader;
pub mod metrics;
pub mod report;
pub mod settings;
