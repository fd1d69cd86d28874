//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
///
/// Ineligibility is never an error; only failures to read the data needed
/// to decide are.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Repository error while loading clusters or memberships
    #[error("Repository error: {0}")]
    Repository(String),

    /// Unknown marketplace filter or sort key
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}
