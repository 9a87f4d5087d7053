//! Shared building blocks: numeric coercion, display formatting and configuration.

pub mod config;
pub mod format;
pub mod numeric;

pub use config::PresentationConfig;
