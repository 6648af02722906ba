//! Configuration loaded from `.conjure.toml`.

pub mod settings;

pub use settings::Settings;
