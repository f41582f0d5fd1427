//! Configuration and dependency wiring for the service.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
