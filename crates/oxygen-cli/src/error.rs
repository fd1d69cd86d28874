//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fixture data could not be loaded
    #[error("Store error: {0}")]
    Store(#[from] oxygen_store::StoreError),

    /// Navigation rejected an action
    #[error("{0}")]
    Navigation(#[from] oxygen_navigator::NavigationError),

    /// Navigator configuration file is invalid
    #[error("Navigator configuration error: {0}")]
    NavigatorConfig(#[from] oxygen_navigator::ConfigError),

    /// Marketplace query failed
    #[error("Marketplace error: {0}")]
    Gatekeeper(#[from] oxygen_gatekeeper::GatekeeperError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The user's trust score or cluster count does not allow the action
    #[error("Not permitted: {0}")]
    NotPermitted(String),
}
