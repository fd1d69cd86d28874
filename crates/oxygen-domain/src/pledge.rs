//! Pledge module - the circle-creation wizard
//!
//! A coordinator walks through a fixed sequence of steps, filling in a
//! [`PledgeDraft`]. Steps are ordered and move one at a time, like claim
//! tiers do in a promotion ladder.

use crate::eligibility::coordinator_eligible;
use crate::{CircleVisibility, PayoutOrdering, TrustScore};

/// Most mood tags a circle may carry
pub const MAX_MOOD_TAGS: usize = 3;

/// Allowed member capacity range
pub const MEMBER_RANGE: std::ops::RangeInclusive<u32> = 5..=50;

/// Shortest cycle a coordinator may pick, in days
pub const MIN_CYCLE_DAYS: u32 = 7;

/// Allowed grace period range, in hours
pub const GRACE_PERIOD_RANGE: std::ops::RangeInclusive<u32> = 1..=48;

/// Smallest penalty a coordinator may set, in naira
pub const MIN_PENALTY: u64 = 500;

/// Largest penalty a coordinator may set, whatever the recommendation
pub const PENALTY_CEILING: u64 = 10_000;

/// Step of the circle-creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PledgeStep {
    /// Trust check before anything else
    #[default]
    Eligibility,
    /// Name, emoji and slogan
    Identity,
    /// Amount, cycle, capacity and payout ordering
    Rules,
    /// Mood tags
    Mood,
    /// Grace period and penalties
    Trust,
    /// Who can discover the circle
    Visibility,
    /// Summary before committing
    Preview,
    /// Final confirmation
    Commitment,
    /// Launch animation; the wizard ends here
    Celebration,
}

impl PledgeStep {
    /// Steps that show the "Step N of M" indicator
    pub const INDICATED: [PledgeStep; 8] = [
        PledgeStep::Eligibility,
        PledgeStep::Identity,
        PledgeStep::Rules,
        PledgeStep::Mood,
        PledgeStep::Trust,
        PledgeStep::Visibility,
        PledgeStep::Preview,
        PledgeStep::Commitment,
    ];

    /// Get the step name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PledgeStep::Eligibility => "eligibility",
            PledgeStep::Identity => "identity",
            PledgeStep::Rules => "rules",
            PledgeStep::Mood => "mood",
            PledgeStep::Trust => "trust",
            PledgeStep::Visibility => "visibility",
            PledgeStep::Preview => "preview",
            PledgeStep::Commitment => "commitment",
            PledgeStep::Celebration => "celebration",
        }
    }

    /// Get the next step in the wizard
    pub fn next(&self) -> Option<Self> {
        match self {
            PledgeStep::Eligibility => Some(PledgeStep::Identity),
            PledgeStep::Identity => Some(PledgeStep::Rules),
            PledgeStep::Rules => Some(PledgeStep::Mood),
            PledgeStep::Mood => Some(PledgeStep::Trust),
            PledgeStep::Trust => Some(PledgeStep::Visibility),
            PledgeStep::Visibility => Some(PledgeStep::Preview),
            PledgeStep::Preview => Some(PledgeStep::Commitment),
            PledgeStep::Commitment => Some(PledgeStep::Celebration),
            PledgeStep::Celebration => None, // Already at the end
        }
    }

    /// Get the previous step in the wizard
    pub fn previous(&self) -> Option<Self> {
        match self {
            PledgeStep::Eligibility => None, // Already at the start
            PledgeStep::Identity => Some(PledgeStep::Eligibility),
            PledgeStep::Rules => Some(PledgeStep::Identity),
            PledgeStep::Mood => Some(PledgeStep::Rules),
            PledgeStep::Trust => Some(PledgeStep::Mood),
            PledgeStep::Visibility => Some(PledgeStep::Trust),
            PledgeStep::Preview => Some(PledgeStep::Visibility),
            PledgeStep::Commitment => Some(PledgeStep::Preview),
            PledgeStep::Celebration => Some(PledgeStep::Commitment),
        }
    }

    /// "Step N of 8" progress, in percent; `None` on the celebration step
    pub fn progress_percent(&self) -> Option<u8> {
        let index = Self::INDICATED.iter().position(|s| s == self)?;
        let total = Self::INDICATED.len() as u64;
        Some(crate::metrics::percent(index as u64 + 1, total))
    }
}

/// A circle being configured in the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct PledgeDraft {
    /// Circle name
    pub alias: String,

    /// Emoji shown next to the name
    pub emoji: String,

    /// Motto
    pub slogan: String,

    /// Naira per member per day
    pub daily_amount: u64,

    /// Days in one cycle
    pub cycle_duration_days: u32,

    /// Member capacity
    pub max_members: u32,

    /// Payout ordering policy
    pub payout_ordering: PayoutOrdering,

    /// Up to three mood tags
    pub mood_tags: Vec<String>,

    /// Send daily reminders
    pub auto_reminder: bool,

    /// Hours a late payment is tolerated
    pub grace_period_hours: u32,

    /// Charge for a missed payment, in naira
    pub penalty_amount: u64,

    /// Whether the coordinator also contributes and sits in the rotation
    pub coordinator_participates: bool,

    /// Who can discover the circle
    pub visibility: CircleVisibility,
}

impl Default for PledgeDraft {
    fn default() -> Self {
        Self {
            alias: String::new(),
            emoji: "💸".to_string(),
            slogan: String::new(),
            daily_amount: 50,
            cycle_duration_days: 7,
            max_members: 10,
            payout_ordering: PayoutOrdering::Random,
            mood_tags: Vec::new(),
            auto_reminder: true,
            grace_period_hours: 12,
            penalty_amount: 1000,
            coordinator_participates: true,
            visibility: CircleVisibility::Public,
        }
    }
}

impl PledgeDraft {
    /// Suggested penalty: 10% of a day's pool, scaled by cycle length (capped
    /// at 3x) and rounded to the nearest ₦50
    pub fn recommended_penalty(&self) -> u64 {
        let base = self.daily_amount as f64 * self.max_members as f64 * 0.1;
        let cycle_factor = (self.cycle_duration_days as f64 / 7.0).min(3.0);
        ((base * cycle_factor / 50.0).round() * 50.0) as u64
    }

    /// Highest penalty the slider allows
    pub fn max_penalty(&self) -> u64 {
        self.recommended_penalty()
            .saturating_mul(2)
            .min(PENALTY_CEILING)
    }

    /// Total paid out if every member completes the cycle
    ///
    /// Saturates at `u64::MAX` for drafts too large to represent.
    pub fn projected_pool(&self) -> u64 {
        self.daily_amount
            .saturating_mul(self.max_members as u64)
            .saturating_mul(self.cycle_duration_days as u64)
    }

    /// Add or remove a mood tag
    ///
    /// Adding is refused once [`MAX_MOOD_TAGS`] are selected. Returns whether
    /// the tag set changed.
    pub fn toggle_mood_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.mood_tags.iter().position(|t| t == tag) {
            self.mood_tags.remove(pos);
            return true;
        }
        if self.mood_tags.len() >= MAX_MOOD_TAGS {
            return false;
        }
        self.mood_tags.push(tag.to_string());
        true
    }

    /// Whether the "continue" control is enabled on `step`
    pub fn can_advance(&self, step: PledgeStep, score: TrustScore) -> bool {
        match step {
            PledgeStep::Eligibility => coordinator_eligible(score),
            PledgeStep::Identity => {
                !self.alias.trim().is_empty() && !self.slogan.trim().is_empty()
            }
            PledgeStep::Mood => !self.mood_tags.is_empty(),
            PledgeStep::Celebration => false,
            _ => true,
        }
    }
}

/// Minimum trust a coordinator's members need, by coordinator score
pub fn member_trust_requirement(coordinator_score: TrustScore) -> TrustScore {
    if coordinator_score.value() >= 60 {
        TrustScore::new(30)
    } else {
        TrustScore::new(20)
    }
}
