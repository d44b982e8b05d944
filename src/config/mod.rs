//! Configuration module — `.sentinel.toml` settings.

pub mod settings;

pub use settings::Settings;
