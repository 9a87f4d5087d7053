//! Carbon footprint dashboard core for Jejak. Turns the reporting backend's
//! dashboard and footprint snapshots into one presentation model that the
//! rendering and share layers consume.

pub mod core;
pub mod error;
pub mod footprint;
pub mod i18n;
pub mod results;

pub use error::Error;
pub use results::{present, PresentationModel};

#[cfg(test)]
mod tests;
