//! Marketplace and gating checks against the bundled demo data

use oxygen_domain::traits::ClusterRepository;
use oxygen_domain::{JoinBlockReason, TrustScore};
use oxygen_gatekeeper::{
    Gatekeeper, JoinContext, MarketplaceFilter, MarketplaceQuery, MarketplaceSort,
};
use oxygen_store::FixtureStore;

fn ids(entries: &[oxygen_gatekeeper::ListingEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.cluster.id.as_str()).collect()
}

#[test]
fn test_every_join_blocked_at_cluster_limit() {
    let store = FixtureStore::seeded().unwrap();
    let gatekeeper = Gatekeeper::default();
    let ctx = JoinContext::new(TrustScore::new(45), store.active_cluster_count().unwrap());

    let entries = gatekeeper
        .marketplace(&store, &MarketplaceQuery::default(), &ctx)
        .unwrap();

    assert_eq!(entries.len(), 5);
    for entry in &entries {
        assert_eq!(entry.decision.reason, Some(JoinBlockReason::AtClusterLimit));
        assert_eq!(entry.decision.label(), "At cluster limit");
    }
}

#[test]
fn test_reasons_with_free_slots() {
    let store = FixtureStore::seeded().unwrap();
    let gatekeeper = Gatekeeper::default();
    let ctx = JoinContext::new(TrustScore::new(35), 0);

    let entries = gatekeeper
        .marketplace(&store, &MarketplaceQuery::default(), &ctx)
        .unwrap();
    let labels: Vec<String> = entries.iter().map(|e| e.decision.label()).collect();

    assert_eq!(
        labels,
        vec![
            "Join Circle",
            "Join Circle",
            "Join Circle",
            "Join Circle",
            "Need 40% Trust Score",
        ]
    );
}

#[test]
fn test_full_circle_reason() {
    let store = FixtureStore::seeded().unwrap();
    let gatekeeper = Gatekeeper::default();
    let ctx = JoinContext::new(TrustScore::new(45), 0);

    let entries = gatekeeper
        .marketplace(&store, &MarketplaceQuery::default(), &ctx)
        .unwrap();
    assert_eq!(entries[4].decision.label(), "Circle full");
}

#[test]
fn test_filter_and_sort_demo_data() {
    let store = FixtureStore::seeded().unwrap();
    let gatekeeper = Gatekeeper::default();
    let ctx = JoinContext::new(TrustScore::new(45), 0);

    let query = MarketplaceQuery {
        filter: MarketplaceFilter::HighTrust,
        sort: MarketplaceSort::Trust,
        ..MarketplaceQuery::default()
    };
    let entries = gatekeeper.marketplace(&store, &query, &ctx).unwrap();
    assert_eq!(ids(&entries), vec!["0xC6E9", "0xF4D2", "0xE8B4"]);

    let query = MarketplaceQuery {
        filter: MarketplaceFilter::LowRisk,
        sort: MarketplaceSort::Heat,
        ..MarketplaceQuery::default()
    };
    let entries = gatekeeper.marketplace(&store, &query, &ctx).unwrap();
    assert_eq!(ids(&entries), vec!["0xE8B4", "0xF4D2"]);

    let query = MarketplaceQuery {
        filter: MarketplaceFilter::Available,
        sort: MarketplaceSort::AmountHigh,
        ..MarketplaceQuery::default()
    };
    let entries = gatekeeper.marketplace(&store, &query, &ctx).unwrap();
    assert_eq!(ids(&entries), vec!["0xF4D2", "0xB8A1", "0xC6E9", "0xD3A7"]);
}

#[test]
fn test_search_matches_slogan() {
    let store = FixtureStore::seeded().unwrap();
    let gatekeeper = Gatekeeper::default();
    let ctx = JoinContext::new(TrustScore::new(45), 0);

    let query = MarketplaceQuery {
        search: Some("BRICK".to_string()),
        ..MarketplaceQuery::default()
    };
    let entries = gatekeeper.marketplace(&store, &query, &ctx).unwrap();
    assert_eq!(ids(&entries), vec!["0xC6E9"]);
}
