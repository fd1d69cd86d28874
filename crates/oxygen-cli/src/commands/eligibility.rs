//! Eligibility command implementation.

use crate::cli::EligibilityArgs;
use crate::error::Result;
use crate::output::Formatter;
use oxygen_domain::eligibility::{
    available_contribution_amounts, can_join_more_clusters, can_use_manual_payout_ordering,
    cluster_join_limit, max_cycle_duration_days,
};
use oxygen_domain::pledge::member_trust_requirement;
use oxygen_domain::traits::{ClusterRepository, TrustSource};
use oxygen_domain::TrustScore;
use oxygen_gatekeeper::{AccessDecision, Gatekeeper};
use oxygen_store::FixtureStore;

/// Every eligibility rule evaluated for one score
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityReport {
    /// Score the rules were evaluated at
    pub score: TrustScore,
    /// Clusters the user belongs to
    pub active_clusters: usize,
    /// Clusters the user may belong to at once
    pub join_limit: usize,
    /// Whether another cluster may be joined
    pub can_join_more: bool,
    /// Auto-Invest vault access
    pub vault: AccessDecision,
    /// Circle creation access
    pub coordinator: AccessDecision,
    /// Longest cycle a created circle may run
    pub max_cycle_days: u32,
    /// Whether manual payout ordering may be chosen
    pub manual_payout: bool,
    /// Daily amounts a created circle may use
    pub contribution_amounts: Vec<u64>,
    /// Trust score members of a created circle need
    pub member_requirement: TrustScore,
}

impl EligibilityReport {
    /// Evaluate every rule at `score` with `active_clusters` memberships
    pub fn evaluate(gatekeeper: &Gatekeeper, score: TrustScore, active_clusters: usize) -> Self {
        Self {
            score,
            active_clusters,
            join_limit: cluster_join_limit(score),
            can_join_more: can_join_more_clusters(active_clusters, score),
            vault: gatekeeper.vault_access(score),
            coordinator: gatekeeper.coordinator_access(score),
            max_cycle_days: max_cycle_duration_days(score),
            manual_payout: can_use_manual_payout_ordering(score),
            contribution_amounts: available_contribution_amounts(score),
            member_requirement: member_trust_requirement(score),
        }
    }
}

/// Execute the eligibility command.
pub fn execute_eligibility(
    args: EligibilityArgs,
    store: &FixtureStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let score = store.trust_score()?;
    let active = match args.active {
        Some(active) => active,
        None => store.active_cluster_count()?,
    };

    let report = EligibilityReport::evaluate(gatekeeper, score, active);
    println!("{}", formatter.format_eligibility(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_at_seed_score() {
        let report = EligibilityReport::evaluate(&Gatekeeper::default(), TrustScore::new(45), 3);
        assert_eq!(report.join_limit, 3);
        assert!(!report.can_join_more);
        assert!(report.vault.is_unlocked());
        assert!(report.coordinator.is_unlocked());
        assert_eq!(report.max_cycle_days, 14);
        assert!(!report.manual_payout);
        assert_eq!(report.contribution_amounts, vec![50, 100, 500, 1000]);
        assert_eq!(report.member_requirement.value(), 20);
    }

    #[test]
    fn test_report_at_low_score() {
        let report = EligibilityReport::evaluate(&Gatekeeper::default(), TrustScore::new(15), 0);
        assert_eq!(report.join_limit, 0);
        assert!(!report.can_join_more);
        assert_eq!(report.vault, AccessDecision::Locked { shortfall: 10 });
        assert_eq!(report.coordinator, AccessDecision::Locked { shortfall: 25 });
    }

    #[test]
    fn test_report_at_top_score() {
        let report = EligibilityReport::evaluate(&Gatekeeper::default(), TrustScore::new(85), 2);
        assert_eq!(report.join_limit, 7);
        assert!(report.can_join_more);
        assert!(report.manual_payout);
        assert_eq!(report.max_cycle_days, 100);
        assert_eq!(report.contribution_amounts.first(), Some(&10));
        assert_eq!(report.contribution_amounts.last(), Some(&5000));
        assert_eq!(report.member_requirement.value(), 30);
    }
}
