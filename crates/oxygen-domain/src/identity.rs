//! Registered identity of the person using the app

/// Alias and contact route captured at registration
///
/// Created once when registration completes and replaced wholesale by a
/// profile update. Both fields are always replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Public alias shown on the badge and in clusters
    pub alias: String,

    /// Phone number or other route used for payment signals
    pub contact_route: String,
}

impl Identity {
    /// Create a new identity
    ///
    /// Returns `None` when the alias is blank; the form that collects it is
    /// never submittable in that state.
    pub fn new(alias: impl Into<String>, contact_route: impl Into<String>) -> Option<Self> {
        let alias = alias.into();
        if !Self::is_valid_alias(&alias) {
            return None;
        }

        Some(Self {
            alias,
            contact_route: contact_route.into(),
        })
    }

    /// An alias is valid when it has at least one non-whitespace character
    pub fn is_valid_alias(alias: &str) -> bool {
        !alias.trim().is_empty()
    }
}
