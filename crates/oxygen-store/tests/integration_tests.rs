//! Integration tests for oxygen-store
//!
//! These tests load fixtures from disk and read them back through the
//! repository traits.

use oxygen_domain::metrics::{commit_success_rate, nearest_payout, total_projected_payout};
use oxygen_domain::traits::{ActivityRepository, ClusterRepository, TrustSource, VaultRepository};
use oxygen_domain::{ActivityKind, ClusterId, PayoutOrdering, VaultLock};
use oxygen_store::{FixtureStore, StoreError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_seed_marketplace_matches_demo_data() {
    let store = FixtureStore::seeded().unwrap();
    let clusters = store.marketplace_clusters().unwrap();

    let ids: Vec<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["0xF4D2", "0xB8A1", "0xC6E9", "0xD3A7", "0xE8B4"]);

    let warri = &clusters[4];
    assert_eq!(warri.alias, "Warri Oil Money");
    assert!(warri.is_full());
    assert_eq!(clusters[1].payout_ordering, PayoutOrdering::FirstJoin);
    assert_eq!(clusters[2].payout_ordering, PayoutOrdering::Manual);
    assert!(clusters[1].is_almost_full());
}

#[test]
fn test_get_cluster() {
    let store = FixtureStore::seeded().unwrap();
    let found = store.get_cluster(&ClusterId::new("0xC6E9")).unwrap();
    assert_eq!(found.unwrap().coordinator, "BuilderKing");
    assert!(store.get_cluster(&ClusterId::new("0x0000")).unwrap().is_none());
}

#[test]
fn test_seed_dashboard_metrics() {
    let store = FixtureStore::seeded().unwrap();
    let memberships = store.memberships().unwrap();

    assert_eq!(total_projected_payout(&memberships), 78_000);
    assert_eq!(nearest_payout(&memberships).unwrap().cluster_id.as_str(), "0xE2C8");
}

#[test]
fn test_seed_activity_log() {
    let store = FixtureStore::seeded().unwrap();
    let log = store.cluster_activity(&ClusterId::new("0xA43F")).unwrap();

    assert_eq!(log.len(), 14);
    assert_eq!(log[0].date, "2025-01-22");
    assert_eq!(log.iter().filter(|e| e.kind == ActivityKind::Missed).count(), 1);
    assert_eq!(commit_success_rate(&log), 92);

    // Known cluster without history
    assert!(store.cluster_activity(&ClusterId::new("0x7B91")).unwrap().is_empty());
}

#[test]
fn test_unknown_cluster_activity_is_not_found() {
    let store = FixtureStore::seeded().unwrap();
    match store.cluster_activity(&ClusterId::new("0xFFFF")) {
        Err(StoreError::NotFound(id)) => assert_eq!(id, "0xFFFF"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_seed_vault() {
    let store = FixtureStore::seeded().unwrap();
    let vault = store.vault_summary().unwrap();
    assert_eq!(vault.balance, 134_200);
    assert_eq!(vault.lock, VaultLock::Active);
    assert!(!vault.can_withdraw());

    let goals = store.vault_goals().unwrap();
    assert_eq!(goals[0].id, "rent-fund");
    assert!(goals[0].is_active);
    assert!(!goals[1].is_active);
}

#[test]
fn test_feature_unlocks_sorted_by_score() {
    let json = r#"{
        "trust_score": 10,
        "vault": { "balance": 0, "roi_earned": 0, "lock": "frozen", "unlock_days": 0,
                   "total_saved": 0, "average_roi_bps": 0, "streak_days": 0 },
        "feature_unlocks": [
            { "name": "Late", "description": "", "required_score": 90, "category": "rewards" },
            { "name": "Early", "description": "", "required_score": 5, "category": "access" }
        ]
    }"#;
    let store = FixtureStore::from_json(json).unwrap();
    let names: Vec<String> = store
        .feature_unlocks()
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["Early", "Late"]);
}

#[test]
fn test_load_from_file() {
    let file = write_fixture(
        r#"{
            "trust_score": 72,
            "marketplace": [{
                "id": "0x1234", "alias": "Ibadan Thrift", "coordinator": "Mama T",
                "coordinator_trust_score": 88, "contribution_amount": 200,
                "cycle_duration_days": 10, "current_members": 3, "max_members": 8,
                "next_payout": "Tomorrow", "minimum_trust_score": 50,
                "payout_ordering": "first_join", "visibility": "invite"
            }],
            "vault": { "balance": 5, "roi_earned": 0, "lock": "unlocked", "unlock_days": 0,
                       "total_saved": 5, "average_roi_bps": 0, "streak_days": 1 }
        }"#,
    );

    let store = FixtureStore::from_file(file.path()).unwrap();
    assert_eq!(store.trust_score().unwrap().value(), 72);
    let clusters = store.marketplace_clusters().unwrap();
    assert_eq!(clusters[0].payout_ordering, PayoutOrdering::FirstJoin);
    assert_eq!(clusters[0].spots_left(), 5);
    assert_eq!(store.active_cluster_count().unwrap(), 0);
}

#[test]
fn test_bad_payout_ordering_in_file() {
    let file = write_fixture(
        r#"{
            "trust_score": 50,
            "marketplace": [{
                "id": "0x1", "alias": "A", "coordinator": "B",
                "coordinator_trust_score": 50, "contribution_amount": 100,
                "cycle_duration_days": 7, "current_members": 1, "max_members": 5,
                "next_payout": "7 days", "minimum_trust_score": 20,
                "payout_ordering": "lottery"
            }],
            "vault": { "balance": 0, "roi_earned": 0, "lock": "active", "unlock_days": 3,
                       "total_saved": 0, "average_roi_bps": 0, "streak_days": 0 }
        }"#,
    );

    match FixtureStore::from_file(file.path()) {
        Err(StoreError::InvalidData(msg)) => assert!(msg.contains("lottery")),
        other => panic!("Expected InvalidData, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = FixtureStore::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(StoreError::Io(_))));
}
