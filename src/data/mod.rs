//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cleaner::{IncidentCleaner, UNKNOWN};
pub use loader::IncidentLoader;
