//! Configuration for appviewer

pub mod settings;

pub use settings::Settings;
