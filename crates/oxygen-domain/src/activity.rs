//! Activity logs, vault records and trust feature unlocks
//!
//! All of these are immutable fixtures for a session.

use crate::TrustScore;

/// Kind of entry in a cluster's activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// Daily contribution received
    Commit,
    /// Daily contribution missed
    Missed,
    /// Cycle milestone reached
    Milestone,
    /// Payout received
    Payout,
}

impl ActivityKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Commit => "commit",
            ActivityKind::Missed => "missed",
            ActivityKind::Milestone => "milestone",
            ActivityKind::Payout => "payout",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "commit" => Some(ActivityKind::Commit),
            "missed" => Some(ActivityKind::Missed),
            "milestone" => Some(ActivityKind::Milestone),
            "payout" => Some(ActivityKind::Payout),
            _ => None,
        }
    }
}

/// One row of a cluster's activity log
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// Calendar date (ISO-8601)
    pub date: String,

    /// What happened
    pub kind: ActivityKind,

    /// Amount involved, if any
    pub amount: Option<u64>,

    /// Free-text description
    pub description: String,

    /// Day of the cycle the entry belongs to
    pub day_number: u32,
}

/// Lock state of the vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultLock {
    /// Withdrawals locked while the user sits in active clusters
    Active,
    /// Locked by an administrative hold
    Frozen,
    /// Withdrawals allowed
    Unlocked,
}

impl VaultLock {
    /// Get the lock name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultLock::Active => "active",
            VaultLock::Frozen => "frozen",
            VaultLock::Unlocked => "unlocked",
        }
    }

    /// Parse a lock state from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(VaultLock::Active),
            "frozen" => Some(VaultLock::Frozen),
            "unlocked" => Some(VaultLock::Unlocked),
            _ => None,
        }
    }
}

/// Snapshot of the Auto-Invest vault
#[derive(Debug, Clone, PartialEq)]
pub struct VaultSummary {
    /// Current balance, in naira
    pub balance: u64,

    /// Returns earned to date, in naira
    pub roi_earned: u64,

    /// Lock state
    pub lock: VaultLock,

    /// Days until an active lock lifts
    pub unlock_days: u32,

    /// Lifetime amount saved, in naira
    pub total_saved: u64,

    /// Average return, in basis points (930 = 9.3%)
    pub average_roi_bps: u32,

    /// Consecutive days with an auto-save
    pub streak_days: u32,
}

impl VaultSummary {
    /// Withdrawals are only possible when the lock is not active
    pub fn can_withdraw(&self) -> bool {
        self.lock != VaultLock::Active
    }
}

/// A savings goal inside the vault
#[derive(Debug, Clone, PartialEq)]
pub struct VaultGoal {
    /// Goal identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Target amount, in naira
    pub target_amount: u64,

    /// Amount saved so far, in naira
    pub current_amount: u64,

    /// Optional target date (ISO-8601)
    pub target_date: Option<String>,

    /// Whether the goal is still being filled
    pub is_active: bool,
}

/// A feature unlocked by reaching a trust score
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureUnlock {
    /// Feature name
    pub name: String,

    /// What the feature does
    pub description: String,

    /// Score at which it unlocks
    pub required_score: TrustScore,

    /// Grouping shown in the trust hub (automation, access, rewards, leadership)
    pub category: String,
}

impl FeatureUnlock {
    /// Whether `score` has unlocked this feature
    pub fn is_unlocked_at(&self, score: TrustScore) -> bool {
        score >= self.required_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_only_when_not_actively_locked() {
        let mut vault = VaultSummary {
            balance: 134_200,
            roi_earned: 12_500,
            lock: VaultLock::Active,
            unlock_days: 9,
            total_saved: 256_700,
            average_roi_bps: 930,
            streak_days: 23,
        };
        assert!(!vault.can_withdraw());
        vault.lock = VaultLock::Frozen;
        assert!(vault.can_withdraw());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ActivityKind::parse("Missed"), Some(ActivityKind::Missed));
        assert_eq!(ActivityKind::parse("refund"), None);
        assert_eq!(VaultLock::parse("UNLOCKED"), Some(VaultLock::Unlocked));
    }
}
