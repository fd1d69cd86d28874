//! Derived metrics
//!
//! Aggregates recomputed from read-only inputs on every render. Nothing here
//! caches, and every function is defined for degenerate input.

use crate::{ActivityEntry, ActivityKind, FeatureUnlock, Membership, TrustScore, VaultGoal};

/// Default vault capacity used for the fill meter, in naira
pub const VAULT_CAPACITY: u64 = 200_000;

/// Rounded percentage of `current` over `target`, clamped to [0, 100]
///
/// A zero target yields 0 rather than dividing by zero.
///
/// # Examples
///
/// ```
/// use oxygen_domain::metrics::percent;
///
/// assert_eq!(percent(0, 0), 0);
/// assert_eq!(percent(50, 100), 50);
/// assert_eq!(percent(7_500, 10_000), 75);
/// ```
pub fn percent(current: u64, target: u64) -> u8 {
    if target == 0 {
        return 0;
    }
    let current = current as u128;
    let target = target as u128;
    // Round half up, as the UI does
    let rounded = (current * 100 + target / 2) / target;
    rounded.min(100) as u8
}

/// Sum of expected payouts across the user's memberships
pub fn total_projected_payout(memberships: &[Membership]) -> u64 {
    memberships.iter().map(|m| m.expected_payout).sum()
}

/// Parse a "time until unlock" label into whole days
///
/// "Tomorrow" and "1 day" both mean one day. Otherwise the leading integer is
/// used ("8 days" is 8, "2 days 14 hours" is 2). Labels without a leading
/// number return `None`.
pub fn parse_unlock_days(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("tomorrow") || label.eq_ignore_ascii_case("1 day") {
        return Some(1);
    }

    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// The membership whose unlock comes soonest
///
/// Ties go to the earliest entry. Memberships whose label cannot be parsed
/// rank after every parseable one.
pub fn nearest_payout(memberships: &[Membership]) -> Option<&Membership> {
    let mut nearest: Option<(&Membership, u32)> = None;

    for membership in memberships {
        let days = parse_unlock_days(&membership.next_unlock).unwrap_or(u32::MAX);
        match nearest {
            Some((_, best)) if days >= best => {}
            _ => nearest = Some((membership, days)),
        }
    }

    nearest.map(|(membership, _)| membership)
}

/// Whether any membership still owes today's contribution
pub fn has_pending_commit(memberships: &[Membership]) -> bool {
    memberships.iter().any(|m| !m.committed_today)
}

/// First membership still owing today's contribution
pub fn first_pending_commit(memberships: &[Membership]) -> Option<&Membership> {
    memberships.iter().find(|m| !m.committed_today)
}

/// Share of due commits that were made, in percent
///
/// Milestones and payouts are ignored. An empty log counts as 0%.
pub fn commit_success_rate(entries: &[ActivityEntry]) -> u8 {
    let commits = entries
        .iter()
        .filter(|e| e.kind == ActivityKind::Commit)
        .count() as u64;
    let missed = entries
        .iter()
        .filter(|e| e.kind == ActivityKind::Missed)
        .count() as u64;
    percent(commits, commits + missed)
}

/// Total committed across a log
pub fn total_committed(entries: &[ActivityEntry]) -> u64 {
    entries
        .iter()
        .filter(|e| e.kind == ActivityKind::Commit)
        .filter_map(|e| e.amount)
        .sum()
}

/// Vault fill meter, in percent of `capacity`
pub fn vault_fill_level(balance: u64, capacity: u64) -> u8 {
    percent(balance, capacity)
}

/// Progress of a savings goal, in percent
pub fn goal_progress(goal: &VaultGoal) -> u8 {
    percent(goal.current_amount, goal.target_amount)
}

/// The first feature (in table order) not yet unlocked at `score`
pub fn next_feature_unlock(score: TrustScore, features: &[FeatureUnlock]) -> Option<&FeatureUnlock> {
    features.iter().find(|f| !f.is_unlocked_at(score))
}

/// Progress toward the next feature unlock, in percent
///
/// 100 once everything is unlocked.
pub fn progress_to_next_unlock(score: TrustScore, features: &[FeatureUnlock]) -> u8 {
    match next_feature_unlock(score, features) {
        Some(next) => percent(score.value() as u64, next.required_score.value() as u64),
        None => 100,
    }
}
