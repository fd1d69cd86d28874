//! Eligibility rules
//!
//! Pure, total functions over a [`TrustScore`] and read-only inputs. Every
//! affordance that can be disabled in the app is decided here.
//!
//! Bracket boundaries are inclusive upper bounds: a score sitting exactly on
//! a boundary belongs to the lower bracket.

use crate::{Cluster, TrustScore};
use std::fmt;

/// Minimum score to open the Auto-Invest vault
pub const VAULT_MIN_TRUST: u8 = 25;

/// Minimum score to create (coordinate) a circle
pub const COORDINATOR_MIN_TRUST: u8 = 40;

/// Minimum score to let a coordinator order payouts by hand
pub const MANUAL_PAYOUT_MIN_TRUST: u8 = 60;

/// Join-limit brackets as (inclusive upper bound, clusters allowed)
const JOIN_LIMIT_BRACKETS: [(u8, usize); 4] = [(20, 0), (40, 1), (60, 3), (80, 5)];

/// Join limit above the last bracket
const TOP_JOIN_LIMIT: usize = 7;

/// Cycle-length unlocks as (minimum score, max days); highest match wins
const CYCLE_DURATION_UNLOCKS: [(u8, u32); 3] = [(80, 100), (60, 30), (50, 21)];

/// Longest cycle available to everyone
const DEFAULT_MAX_CYCLE_DAYS: u32 = 14;

/// Contribution amounts (naira per day) offered to every coordinator
const BASE_CONTRIBUTION_AMOUNTS: [u64; 4] = [50, 100, 500, 1000];

/// Maximum number of clusters the user may belong to at once
///
/// # Examples
///
/// ```
/// use oxygen_domain::TrustScore;
/// use oxygen_domain::eligibility::cluster_join_limit;
///
/// assert_eq!(cluster_join_limit(TrustScore::new(40)), 1);
/// assert_eq!(cluster_join_limit(TrustScore::new(41)), 3);
/// ```
pub fn cluster_join_limit(score: TrustScore) -> usize {
    JOIN_LIMIT_BRACKETS
        .iter()
        .find(|(upper, _)| score.value() <= *upper)
        .map(|(_, limit)| *limit)
        .unwrap_or(TOP_JOIN_LIMIT)
}

/// Whether another cluster may be joined given the current active count
pub fn can_join_more_clusters(active_count: usize, score: TrustScore) -> bool {
    active_count < cluster_join_limit(score)
}

/// Why a join is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinBlockReason {
    /// The user already holds as many clusters as their score allows
    AtClusterLimit,

    /// The cluster demands a higher trust score
    TrustTooLow {
        /// The cluster's minimum trust score
        required: TrustScore,
    },

    /// No free slots
    CircleFull,
}

impl fmt::Display for JoinBlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinBlockReason::AtClusterLimit => f.write_str("At cluster limit"),
            JoinBlockReason::TrustTooLow { required } => {
                write!(f, "Need {}% Trust Score", required.value())
            }
            JoinBlockReason::CircleFull => f.write_str("Circle full"),
        }
    }
}

/// First unmet join condition, checked as limit, then trust, then capacity
pub fn join_block_reason(
    score: TrustScore,
    active_count: usize,
    cluster: &Cluster,
) -> Option<JoinBlockReason> {
    if !can_join_more_clusters(active_count, score) {
        return Some(JoinBlockReason::AtClusterLimit);
    }

    if score < cluster.minimum_trust_score {
        return Some(JoinBlockReason::TrustTooLow {
            required: cluster.minimum_trust_score,
        });
    }

    if cluster.is_full() {
        return Some(JoinBlockReason::CircleFull);
    }

    None
}

/// Whether a specific cluster can be joined right now
pub fn can_join_specific_cluster(score: TrustScore, active_count: usize, cluster: &Cluster) -> bool {
    score >= cluster.minimum_trust_score
        && cluster.current_members < cluster.max_members
        && can_join_more_clusters(active_count, score)
}

/// Whether the Auto-Invest vault is unlocked
pub fn vault_eligible(score: TrustScore) -> bool {
    score.value() >= VAULT_MIN_TRUST
}

/// Points missing before the vault unlocks
pub fn vault_trust_shortfall(score: TrustScore) -> Option<u8> {
    score.shortfall_to(VAULT_MIN_TRUST)
}

/// Whether the user may start a new circle
pub fn coordinator_eligible(score: TrustScore) -> bool {
    score.value() >= COORDINATOR_MIN_TRUST
}

/// Points missing before circle creation unlocks
pub fn coordinator_trust_shortfall(score: TrustScore) -> Option<u8> {
    score.shortfall_to(COORDINATOR_MIN_TRUST)
}

/// Longest cycle a coordinator with this score may configure, in days
pub fn max_cycle_duration_days(score: TrustScore) -> u32 {
    CYCLE_DURATION_UNLOCKS
        .iter()
        .find(|(min, _)| score.value() >= *min)
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_MAX_CYCLE_DAYS)
}

/// Whether manual payout ordering may be chosen
pub fn can_use_manual_payout_ordering(score: TrustScore) -> bool {
    score.value() >= MANUAL_PAYOUT_MIN_TRUST
}

/// Daily contribution amounts a coordinator may pick, ascending
///
/// High scores unlock micro amounts (10, 25) and premium amounts (2000, 5000).
pub fn available_contribution_amounts(score: TrustScore) -> Vec<u64> {
    let mut amounts = Vec::with_capacity(8);
    if score.value() >= 60 {
        amounts.extend_from_slice(&[10, 25]);
    }
    amounts.extend_from_slice(&BASE_CONTRIBUTION_AMOUNTS);
    if score.value() >= 80 {
        amounts.extend_from_slice(&[2000, 5000]);
    }
    amounts
}

/// Risk tier of a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatTier {
    /// Heat ≤ 30
    Cool,
    /// Heat ≤ 60
    Warm,
    /// Heat ≤ 85
    Hot,
    /// Heat > 85
    Critical,
}

impl HeatTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatTier::Cool => "cool",
            HeatTier::Warm => "warm",
            HeatTier::Hot => "hot",
            HeatTier::Critical => "critical",
        }
    }
}

/// Heat tier together with its user-facing label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatStatus {
    /// Tier
    pub tier: HeatTier,
    /// Label shown on the heat badge
    pub label: &'static str,
}

/// Classify a heat score in [0, 100]
pub fn heat_status(heat_score: u8) -> HeatStatus {
    let (tier, label) = match heat_score {
        0..=30 => (HeatTier::Cool, "Low-Risk Circle"),
        31..=60 => (HeatTier::Warm, "Monitor Closely"),
        61..=85 => (HeatTier::Hot, "Under Pressure"),
        _ => (HeatTier::Critical, "May Break Down!"),
    };
    HeatStatus { tier, label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CircleVisibility, ClusterId, PayoutOrdering};

    fn score(v: u8) -> TrustScore {
        TrustScore::new(v)
    }

    fn cluster(min_trust: u8, current: u32, max: u32) -> Cluster {
        Cluster {
            id: ClusterId::new("0xC0DE"),
            alias: "Circle".to_string(),
            slogan: String::new(),
            coordinator: "Coord".to_string(),
            coordinator_trust_score: score(60),
            contribution_amount: 100,
            cycle_duration_days: 14,
            current_members: current,
            max_members: max,
            cycle_progress: 0,
            pool_amount: 0,
            next_payout: "14 days".to_string(),
            heat_score: 20,
            visibility: CircleVisibility::Public,
            tags: vec![],
            minimum_trust_score: score(min_trust),
            payout_ordering: PayoutOrdering::Random,
            rotation_position: None,
        }
    }

    #[test]
    fn test_join_limit_breakpoints() {
        let expected = [
            (0, 0),
            (20, 0),
            (21, 1),
            (40, 1),
            (41, 3),
            (60, 3),
            (61, 5),
            (80, 5),
            (81, 7),
            (100, 7),
        ];
        for (s, limit) in expected {
            assert_eq!(cluster_join_limit(score(s)), limit, "score {}", s);
        }
    }

    #[test]
    fn test_can_join_more() {
        assert!(!can_join_more_clusters(3, score(45)));
        assert!(can_join_more_clusters(2, score(45)));
        assert!(!can_join_more_clusters(0, score(20)));
    }

    #[test]
    fn test_block_reason_priority() {
        // Every condition failing: the limit wins
        let full_and_strict = cluster(90, 10, 10);
        assert_eq!(
            join_block_reason(score(45), 3, &full_and_strict),
            Some(JoinBlockReason::AtClusterLimit)
        );
        // Limit fine, trust and capacity failing: trust wins
        assert_eq!(
            join_block_reason(score(45), 0, &full_and_strict),
            Some(JoinBlockReason::TrustTooLow { required: score(90) })
        );
        // Only capacity failing
        assert_eq!(
            join_block_reason(score(45), 0, &cluster(30, 10, 10)),
            Some(JoinBlockReason::CircleFull)
        );
        assert_eq!(join_block_reason(score(45), 0, &cluster(30, 5, 10)), None);
    }

    #[test]
    fn test_block_reason_strings() {
        assert_eq!(JoinBlockReason::AtClusterLimit.to_string(), "At cluster limit");
        assert_eq!(
            JoinBlockReason::TrustTooLow { required: score(35) }.to_string(),
            "Need 35% Trust Score"
        );
        assert_eq!(JoinBlockReason::CircleFull.to_string(), "Circle full");
    }

    #[test]
    fn test_vault_and_coordinator_gates() {
        assert!(!vault_eligible(score(24)));
        assert!(vault_eligible(score(25)));
        assert_eq!(vault_trust_shortfall(score(15)), Some(10));
        assert!(!coordinator_eligible(score(39)));
        assert!(coordinator_eligible(score(40)));
        assert_eq!(coordinator_trust_shortfall(score(45)), None);
    }

    #[test]
    fn test_max_cycle_duration_highest_threshold_wins() {
        assert_eq!(max_cycle_duration_days(score(0)), 14);
        assert_eq!(max_cycle_duration_days(score(49)), 14);
        assert_eq!(max_cycle_duration_days(score(50)), 21);
        assert_eq!(max_cycle_duration_days(score(60)), 30);
        assert_eq!(max_cycle_duration_days(score(79)), 30);
        assert_eq!(max_cycle_duration_days(score(80)), 100);
    }

    #[test]
    fn test_manual_payout_gate() {
        assert!(!can_use_manual_payout_ordering(score(59)));
        assert!(can_use_manual_payout_ordering(score(60)));
    }

    #[test]
    fn test_available_amounts() {
        assert_eq!(available_contribution_amounts(score(45)), vec![50, 100, 500, 1000]);
        assert_eq!(
            available_contribution_amounts(score(60)),
            vec![10, 25, 50, 100, 500, 1000]
        );
        assert_eq!(
            available_contribution_amounts(score(85)),
            vec![10, 25, 50, 100, 500, 1000, 2000, 5000]
        );
    }

    #[test]
    fn test_heat_status_boundaries() {
        assert_eq!(heat_status(30).tier, HeatTier::Cool);
        assert_eq!(heat_status(31).tier, HeatTier::Warm);
        assert_eq!(heat_status(60).tier, HeatTier::Warm);
        assert_eq!(heat_status(61).tier, HeatTier::Hot);
        assert_eq!(heat_status(85).tier, HeatTier::Hot);
        assert_eq!(heat_status(86).tier, HeatTier::Critical);
        assert_eq!(heat_status(90).label, "May Break Down!");
    }
}
