//! Trait definitions for data sourcing
//!
//! These traits define the boundary between the rules in this crate and
//! wherever the data comes from. The fixture store implements all of them;
//! a real backend can replace it without touching navigation or eligibility.

use crate::{
    ActivityEntry, Cluster, ClusterId, FeatureUnlock, Membership, TrustScore, VaultGoal,
    VaultSummary,
};

/// Read access to clusters and the user's memberships
///
/// Implemented by the infrastructure layer (oxygen-store)
pub trait ClusterRepository {
    /// Error type for repository operations
    type Error;

    /// Clusters listed in the marketplace, in listing order
    fn marketplace_clusters(&self) -> Result<Vec<Cluster>, Self::Error>;

    /// Get a cluster by ID
    fn get_cluster(&self, id: &ClusterId) -> Result<Option<Cluster>, Self::Error>;

    /// Clusters the user actively contributes to
    fn memberships(&self) -> Result<Vec<Membership>, Self::Error>;

    /// Number of active memberships
    fn active_cluster_count(&self) -> Result<usize, Self::Error> {
        Ok(self.memberships()?.len())
    }
}

/// Read access to contribution history
pub trait ActivityRepository {
    /// Error type for repository operations
    type Error;

    /// Activity log of one cluster, newest first
    fn cluster_activity(&self, id: &ClusterId) -> Result<Vec<ActivityEntry>, Self::Error>;
}

/// Read access to the Auto-Invest vault
pub trait VaultRepository {
    /// Error type for repository operations
    type Error;

    /// Current vault snapshot
    fn vault_summary(&self) -> Result<VaultSummary, Self::Error>;

    /// Savings goals, active ones first
    fn vault_goals(&self) -> Result<Vec<VaultGoal>, Self::Error>;
}

/// Supplier of the user's trust score and the features it unlocks
///
/// The application never computes the score itself; it only reads it.
pub trait TrustSource {
    /// Error type for trust lookups
    type Error;

    /// The user's current trust score
    fn trust_score(&self) -> Result<TrustScore, Self::Error>;

    /// Feature unlock table, in ascending score order
    fn feature_unlocks(&self) -> Result<Vec<FeatureUnlock>, Self::Error>;
}
