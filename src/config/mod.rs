//! Configuration model for pydelta.
//!
//! This module defines the Config struct that represents `pydelta.yaml`.
//! Unknown fields are ignored, every field has a default, and values are
//! validated after parsing.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::{Config, DEFAULT_CONFIG_FILE};
