//! Oxygen Storage Layer
//!
//! Implements the repository traits over fixture data held in memory.
//!
//! # Architecture
//!
//! - A JSON fixture file describes the marketplace, memberships, activity,
//!   vault and trust data
//! - The bundled seed fixture reproduces the demo data set
//! - Records are validated and converted to domain types once, at load
//!
//! # Examples
//!
//! ```no_run
//! use oxygen_store::FixtureStore;
//! use oxygen_domain::traits::ClusterRepository;
//!
//! let store = FixtureStore::seeded().unwrap();
//! let clusters = store.marketplace_clusters().unwrap();
//! ```

#![warn(missing_docs)]

mod fixture;

use fixture::FixtureFile;
use oxygen_domain::traits::{
    ActivityRepository, ClusterRepository, TrustSource, VaultRepository,
};
use oxygen_domain::{
    ActivityEntry, Cluster, ClusterId, FeatureUnlock, Membership, TrustScore, VaultGoal,
    VaultSummary,
};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Fixture file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture file is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture parsed but holds a value the domain rejects
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Cluster not found
    #[error("Cluster not found: {0}")]
    NotFound(String),
}

/// Demo data set shipped with the crate
const SEED_FIXTURE: &str = include_str!("../fixtures/seed.json");

/// In-memory implementation of every repository trait
///
/// Data is read-only once loaded; the application never writes back.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    trust_score: TrustScore,
    marketplace: Vec<Cluster>,
    memberships: Vec<Membership>,
    activity: HashMap<ClusterId, Vec<ActivityEntry>>,
    vault: VaultSummary,
    goals: Vec<VaultGoal>,
    feature_unlocks: Vec<FeatureUnlock>,
}

impl FixtureStore {
    /// Load the bundled demo data
    pub fn seeded() -> Result<Self, StoreError> {
        Self::from_json(SEED_FIXTURE)
    }

    /// Load a fixture from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let file: FixtureFile = serde_json::from_str(json)?;
        Self::from_fixture(file)
    }

    /// Load a fixture from a JSON file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use oxygen_store::FixtureStore;
    ///
    /// let store = FixtureStore::from_file("fixtures/seed.json").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn from_fixture(file: FixtureFile) -> Result<Self, StoreError> {
        if file.trust_score > TrustScore::MAX.value() {
            return Err(StoreError::InvalidData(format!(
                "trust_score {} is outside 0..=100",
                file.trust_score
            )));
        }

        let marketplace = file
            .marketplace
            .into_iter()
            .map(Cluster::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let memberships: Vec<Membership> =
            file.memberships.into_iter().map(Membership::from).collect();

        let mut activity = HashMap::new();
        for (id, records) in file.activity {
            let entries = records
                .into_iter()
                .map(ActivityEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            activity.insert(ClusterId::new(id), entries);
        }

        let mut goals: Vec<VaultGoal> = file.goals.into_iter().map(VaultGoal::from).collect();
        // Active goals first; sort is stable so file order holds within each group
        goals.sort_by_key(|g| !g.is_active);

        let mut feature_unlocks = file
            .feature_unlocks
            .into_iter()
            .map(FeatureUnlock::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        feature_unlocks.sort_by_key(|f| f.required_score);

        Ok(Self {
            trust_score: TrustScore::new(file.trust_score),
            marketplace,
            memberships,
            activity,
            vault: file.vault.try_into()?,
            goals,
            feature_unlocks,
        })
    }

    /// Replace the supplied trust score
    ///
    /// Used by the CLI's `--trust-score` override and by tests.
    pub fn with_trust_score(mut self, score: TrustScore) -> Self {
        self.trust_score = score;
        self
    }

    /// Keep only the first `count` memberships
    pub fn with_membership_limit(mut self, count: usize) -> Self {
        self.memberships.truncate(count);
        self
    }

    fn knows_cluster(&self, id: &ClusterId) -> bool {
        self.activity.contains_key(id)
            || self.memberships.iter().any(|m| &m.cluster_id == id)
            || self.marketplace.iter().any(|c| &c.id == id)
    }
}

impl ClusterRepository for FixtureStore {
    type Error = StoreError;

    fn marketplace_clusters(&self) -> Result<Vec<Cluster>, Self::Error> {
        Ok(self.marketplace.clone())
    }

    fn get_cluster(&self, id: &ClusterId) -> Result<Option<Cluster>, Self::Error> {
        Ok(self.marketplace.iter().find(|c| &c.id == id).cloned())
    }

    fn memberships(&self) -> Result<Vec<Membership>, Self::Error> {
        Ok(self.memberships.clone())
    }

    fn active_cluster_count(&self) -> Result<usize, Self::Error> {
        Ok(self.memberships.len())
    }
}

impl ActivityRepository for FixtureStore {
    type Error = StoreError;

    fn cluster_activity(&self, id: &ClusterId) -> Result<Vec<ActivityEntry>, Self::Error> {
        if !self.knows_cluster(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.activity.get(id).cloned().unwrap_or_default())
    }
}

impl VaultRepository for FixtureStore {
    type Error = StoreError;

    fn vault_summary(&self) -> Result<VaultSummary, Self::Error> {
        Ok(self.vault.clone())
    }

    fn vault_goals(&self) -> Result<Vec<VaultGoal>, Self::Error> {
        Ok(self.goals.clone())
    }
}

impl TrustSource for FixtureStore {
    type Error = StoreError;

    fn trust_score(&self) -> Result<TrustScore, Self::Error> {
        Ok(self.trust_score)
    }

    fn feature_unlocks(&self) -> Result<Vec<FeatureUnlock>, Self::Error> {
        Ok(self.feature_unlocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "trust_score": 60,
        "vault": {
            "balance": 0, "roi_earned": 0, "lock": "unlocked", "unlock_days": 0,
            "total_saved": 0, "average_roi_bps": 0, "streak_days": 0
        }
    }"#;

    #[test]
    fn test_seeded_store_loads() {
        let store = FixtureStore::seeded().unwrap();
        assert_eq!(store.trust_score().unwrap().value(), 45);
        assert_eq!(store.marketplace_clusters().unwrap().len(), 5);
        assert_eq!(store.active_cluster_count().unwrap(), 3);
        assert_eq!(store.feature_unlocks().unwrap().len(), 6);
    }

    #[test]
    fn test_minimal_fixture() {
        let store = FixtureStore::from_json(MINIMAL).unwrap();
        assert_eq!(store.trust_score().unwrap().value(), 60);
        assert!(store.marketplace_clusters().unwrap().is_empty());
        assert!(store.vault_summary().unwrap().can_withdraw());
    }

    #[test]
    fn test_unknown_lock_is_invalid_data() {
        let json = MINIMAL.replace("\"unlocked\"", "\"sealed\"");
        match FixtureStore::from_json(&json) {
            Err(StoreError::InvalidData(msg)) => assert!(msg.contains("sealed")),
            other => panic!("Expected InvalidData, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_score_is_invalid_data() {
        let json = MINIMAL.replace("\"trust_score\": 60", "\"trust_score\": 120");
        assert!(matches!(
            FixtureStore::from_json(&json),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FixtureStore::from_json("{ not json"),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn test_trust_override() {
        let store = FixtureStore::seeded()
            .unwrap()
            .with_trust_score(TrustScore::new(15))
            .with_membership_limit(1);
        assert_eq!(store.trust_score().unwrap().value(), 15);
        assert_eq!(store.memberships().unwrap().len(), 1);
    }
}
