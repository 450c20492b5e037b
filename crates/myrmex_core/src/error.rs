//! Error types for the simulation core.
//!
//! Stepping the simulation never fails; these cover the fallible edges:
//! loading configuration and the interactive editing commands.

use thiserror::Error;

/// Main error type for myrmex_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration values failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// A command targeted a point outside the world
    #[error("Point ({x}, {y}) is outside the world")]
    OutOfBounds { x: f64, y: f64 },

    /// A food command carried an unusable quantity
    #[error("Invalid food quantity: {0}")]
    InvalidQuantity(f64),
}

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
