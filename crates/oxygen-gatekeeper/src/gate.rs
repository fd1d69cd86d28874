//! Action gating
//!
//! Turns the pure eligibility rules into decisions the view layer can render:
//! allowed or blocked, and if blocked, the reason to show on the control.

use crate::GatekeeperConfig;
use oxygen_domain::eligibility::{
    available_contribution_amounts, can_use_manual_payout_ordering,
    coordinator_trust_shortfall, join_block_reason, max_cycle_duration_days,
    vault_trust_shortfall, MANUAL_PAYOUT_MIN_TRUST,
};
use oxygen_domain::pledge::{MAX_MOOD_TAGS, MEMBER_RANGE, MIN_CYCLE_DAYS};
use oxygen_domain::{Cluster, JoinBlockReason, PayoutOrdering, PledgeDraft, TrustScore};
use std::fmt;

/// What the gatekeeper needs to know about the user to decide a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinContext {
    /// The user's trust score
    pub score: TrustScore,

    /// Clusters the user already contributes to
    pub active_clusters: usize,
}

impl JoinContext {
    /// Create a new join context
    pub fn new(score: TrustScore, active_clusters: usize) -> Self {
        Self {
            score,
            active_clusters,
        }
    }
}

/// Whether a join may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStatus {
    /// The join button is enabled
    Allowed,

    /// The join button is disabled
    Blocked,
}

/// Result of evaluating a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinDecision {
    /// Allowed or blocked
    pub status: JoinStatus,

    /// First unmet condition, when blocked
    pub reason: Option<JoinBlockReason>,
}

impl JoinDecision {
    /// Whether the join may proceed
    pub fn is_allowed(&self) -> bool {
        self.status == JoinStatus::Allowed
    }

    /// Label for the join control
    pub fn label(&self) -> String {
        match &self.reason {
            Some(reason) => reason.to_string(),
            None => "Join Circle".to_string(),
        }
    }
}

/// Access to a trust-gated area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The area may be opened
    Unlocked,

    /// The area stays locked until the score rises
    Locked {
        /// Points still missing
        shortfall: u8,
    },
}

impl AccessDecision {
    fn from_shortfall(shortfall: Option<u8>) -> Self {
        match shortfall {
            Some(shortfall) => AccessDecision::Locked { shortfall },
            None => AccessDecision::Unlocked,
        }
    }

    /// Whether the area may be opened
    pub fn is_unlocked(&self) -> bool {
        matches!(self, AccessDecision::Unlocked)
    }
}

/// Status of a pledge draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PledgeStatus {
    /// The circle can be launched
    Ready,

    /// At least one rule is broken
    Rejected,
}

/// A broken pledge rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PledgeIssue {
    /// The coordinator's score is below the coordinator threshold
    CoordinatorLocked {
        /// Points still missing
        shortfall: u8,
    },

    /// Circle name is blank
    MissingAlias,

    /// Slogan is blank
    MissingSlogan,

    /// Daily amount not offered at this score
    AmountUnavailable {
        /// The requested amount
        amount: u64,
        /// Amounts the coordinator may choose from
        allowed: Vec<u64>,
    },

    /// Cycle length outside the unlocked range
    CycleOutOfRange {
        /// Requested days
        days: u32,
        /// Longest cycle allowed at this score
        max: u32,
    },

    /// Member capacity outside the allowed range
    MembersOutOfRange {
        /// Requested capacity
        members: u32,
    },

    /// Manual payout ordering needs a higher score
    ManualPayoutLocked,

    /// No mood tags, or more than allowed
    MoodTagCount {
        /// Tags selected
        count: usize,
    },
}

impl fmt::Display for PledgeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PledgeIssue::CoordinatorLocked { shortfall } => {
                write!(f, "Need {} more trust points to coordinate", shortfall)
            }
            PledgeIssue::MissingAlias => f.write_str("Circle name is required"),
            PledgeIssue::MissingSlogan => f.write_str("Slogan is required"),
            PledgeIssue::AmountUnavailable { amount, allowed } => {
                let allowed: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
                write!(
                    f,
                    "Daily amount {} not available (choose from {})",
                    amount,
                    allowed.join(", ")
                )
            }
            PledgeIssue::CycleOutOfRange { days, max } => write!(
                f,
                "Cycle of {} days outside {}..={} days",
                days, MIN_CYCLE_DAYS, max
            ),
            PledgeIssue::MembersOutOfRange { members } => write!(
                f,
                "{} members outside {}..={}",
                members,
                MEMBER_RANGE.start(),
                MEMBER_RANGE.end()
            ),
            PledgeIssue::ManualPayoutLocked => write!(
                f,
                "Manual payout ordering needs {}% Trust Score",
                MANUAL_PAYOUT_MIN_TRUST
            ),
            PledgeIssue::MoodTagCount { count } => {
                write!(f, "Pick 1 to {} mood tags (have {})", MAX_MOOD_TAGS, count)
            }
        }
    }
}

/// Result of validating a pledge draft
#[derive(Debug, Clone)]
pub struct PledgeValidation {
    /// Ready or rejected
    pub status: PledgeStatus,

    /// Every broken rule, in check order
    pub reasons: Vec<PledgeIssue>,
}

impl PledgeValidation {
    /// Whether the draft can be launched
    pub fn is_ready(&self) -> bool {
        self.status == PledgeStatus::Ready
    }
}

/// Decides eligibility-dependent actions
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: GatekeeperConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: GatekeeperConfig) -> Self {
        Self { config }
    }

    /// Marketplace thresholds in use
    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    /// Evaluate whether the user may join `cluster`
    ///
    /// Conditions are checked as cluster limit, then trust, then capacity,
    /// and only the first failure is reported.
    pub fn evaluate_join(&self, cluster: &Cluster, ctx: &JoinContext) -> JoinDecision {
        match join_block_reason(ctx.score, ctx.active_clusters, cluster) {
            Some(reason) => JoinDecision {
                status: JoinStatus::Blocked,
                reason: Some(reason),
            },
            None => JoinDecision {
                status: JoinStatus::Allowed,
                reason: None,
            },
        }
    }

    /// Access to the Auto-Invest vault
    pub fn vault_access(&self, score: TrustScore) -> AccessDecision {
        AccessDecision::from_shortfall(vault_trust_shortfall(score))
    }

    /// Access to the circle-creation wizard
    pub fn coordinator_access(&self, score: TrustScore) -> AccessDecision {
        AccessDecision::from_shortfall(coordinator_trust_shortfall(score))
    }

    /// Validate a pledge draft against the coordinator's score
    ///
    /// All broken rules are collected, not just the first.
    pub fn validate_pledge(&self, draft: &PledgeDraft, score: TrustScore) -> PledgeValidation {
        let mut reasons = Vec::new();

        // 1. Coordinator gate
        if let Some(shortfall) = coordinator_trust_shortfall(score) {
            reasons.push(PledgeIssue::CoordinatorLocked { shortfall });
        }

        // 2. Identity
        if draft.alias.trim().is_empty() {
            reasons.push(PledgeIssue::MissingAlias);
        }
        if draft.slogan.trim().is_empty() {
            reasons.push(PledgeIssue::MissingSlogan);
        }

        // 3. Rules
        let allowed = available_contribution_amounts(score);
        if !allowed.contains(&draft.daily_amount) {
            reasons.push(PledgeIssue::AmountUnavailable {
                amount: draft.daily_amount,
                allowed,
            });
        }

        let max = max_cycle_duration_days(score);
        if !(MIN_CYCLE_DAYS..=max).contains(&draft.cycle_duration_days) {
            reasons.push(PledgeIssue::CycleOutOfRange {
                days: draft.cycle_duration_days,
                max,
            });
        }

        if !MEMBER_RANGE.contains(&draft.max_members) {
            reasons.push(PledgeIssue::MembersOutOfRange {
                members: draft.max_members,
            });
        }

        if draft.payout_ordering == PayoutOrdering::Manual && !can_use_manual_payout_ordering(score)
        {
            reasons.push(PledgeIssue::ManualPayoutLocked);
        }

        // 4. Mood
        let count = draft.mood_tags.len();
        if count == 0 || count > MAX_MOOD_TAGS {
            reasons.push(PledgeIssue::MoodTagCount { count });
        }

        let status = if reasons.is_empty() {
            PledgeStatus::Ready
        } else {
            tracing::debug!(issues = reasons.len(), "pledge draft rejected");
            PledgeStatus::Rejected
        };

        PledgeValidation { status, reasons }
    }
}
