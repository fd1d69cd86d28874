//! Navigator error types

use oxygen_domain::Screen;
use thiserror::Error;

/// Errors returned when an action cannot be applied
///
/// A view layer that only offers available actions never sees
/// [`NavigationError::Unavailable`]; it exists so scripted callers get a
/// reason instead of a silent no-op.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The action's precondition does not hold on the current screen
    #[error("'{action}' is not available on {screen}")]
    Unavailable {
        /// Action name
        action: &'static str,
        /// Screen the session was on
        screen: Screen,
    },

    /// A payment confirmation is already being detected
    #[error("Payment detection already in progress")]
    PaymentPending,

    /// The payment was already detected
    #[error("Payment already detected")]
    PaymentAlreadyDetected,

    /// The trust source failed to supply a score
    #[error("Trust source error: {0}")]
    TrustSource(String),
}

/// Navigator configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
