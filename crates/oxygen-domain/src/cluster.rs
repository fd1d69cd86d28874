//! Cluster module - savings circles and the user's memberships in them

use crate::TrustScore;
use std::fmt;

/// Identifier of a cluster, displayed as a short hex tag (e.g. `0xF4D2`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClusterId(String);

impl ClusterId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a fresh 16-bit hex tag from any seed (e.g. a timestamp)
    ///
    /// # Examples
    ///
    /// ```
    /// use oxygen_domain::ClusterId;
    ///
    /// assert_eq!(ClusterId::from_seed(0xABCD).as_str(), "0xABCD");
    /// assert_eq!(ClusterId::from_seed(0x1_0042).as_str(), "0x0042");
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self(format!("0x{:04X}", seed & 0xFFFF))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no cluster is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How the payout rotation order is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoutOrdering {
    /// Order drawn at random
    Random,

    /// First to join collects first
    FirstJoin,

    /// Coordinator sets the order (high trust only)
    Manual,
}

impl PayoutOrdering {
    /// Get the ordering name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutOrdering::Random => "random",
            PayoutOrdering::FirstJoin => "first-join",
            PayoutOrdering::Manual => "manual",
        }
    }

    /// Parse an ordering from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" => Some(PayoutOrdering::Random),
            "first-join" | "first_join" | "firstjoin" => Some(PayoutOrdering::FirstJoin),
            "manual" => Some(PayoutOrdering::Manual),
            _ => None,
        }
    }
}

impl std::str::FromStr for PayoutOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid payout ordering: {}", s))
    }
}

/// Who can discover a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CircleVisibility {
    /// Listed in the marketplace
    #[default]
    Public,

    /// Joinable through an invite link only
    Invite,

    /// Not listed and not shareable
    Hidden,
}

impl CircleVisibility {
    /// Get the visibility name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CircleVisibility::Public => "public",
            CircleVisibility::Invite => "invite",
            CircleVisibility::Hidden => "hidden",
        }
    }

    /// Parse a visibility from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(CircleVisibility::Public),
            "invite" => Some(CircleVisibility::Invite),
            "hidden" => Some(CircleVisibility::Hidden),
            _ => None,
        }
    }
}

/// A savings circle as listed in the marketplace
///
/// Read-only reference data for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Unique identifier
    pub id: ClusterId,

    /// Display name
    pub alias: String,

    /// Motto shown under the name
    pub slogan: String,

    /// Alias of the member running the circle
    pub coordinator: String,

    /// Coordinator's own trust score
    pub coordinator_trust_score: TrustScore,

    /// Amount each member contributes per day, in naira
    pub contribution_amount: u64,

    /// Days in one cycle
    pub cycle_duration_days: u32,

    /// Members currently in the circle
    pub current_members: u32,

    /// Member capacity
    pub max_members: u32,

    /// Cycle completion, in percent
    pub cycle_progress: u8,

    /// Total pooled amount per cycle, in naira
    pub pool_amount: u64,

    /// Human-readable time until the next payout (e.g. "15 days")
    pub next_payout: String,

    /// Risk score in [0, 100]; higher means more likely to break down
    pub heat_score: u8,

    /// Who can discover the circle
    pub visibility: CircleVisibility,

    /// Mood tags (e.g. "hustle", "family")
    pub tags: Vec<String>,

    /// Minimum trust score required to join
    pub minimum_trust_score: TrustScore,

    /// Payout ordering policy
    pub payout_ordering: PayoutOrdering,

    /// The user's slot in the rotation, if they hold one
    pub rotation_position: Option<u32>,
}

impl Cluster {
    /// Whether the circle has no free slots
    pub fn is_full(&self) -> bool {
        self.current_members >= self.max_members
    }

    /// Number of free slots
    pub fn spots_left(&self) -> u32 {
        self.max_members.saturating_sub(self.current_members)
    }

    /// Whether the circle is close to capacity (two or fewer free slots)
    pub fn is_almost_full(&self) -> bool {
        !self.is_full() && self.spots_left() <= 2
    }
}

/// A cluster the user actively contributes to
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    /// Cluster identifier
    pub cluster_id: ClusterId,

    /// The user's slot in the payout rotation
    pub position: u32,

    /// Members in the circle
    pub total_members: u32,

    /// Cycle completion, in percent
    pub cycle_progress: u8,

    /// Human-readable time until the user's unlock (e.g. "3 days", "Tomorrow")
    pub next_unlock: String,

    /// Pool amount, in naira
    pub pool_amount: u64,

    /// Whether today's contribution has been made
    pub committed_today: bool,

    /// Current cycle number
    pub cycle_number: u32,

    /// Total cycles planned
    pub total_cycles: u32,

    /// What the user will receive at their payout, in naira
    pub expected_payout: u64,

    /// Risk score in [0, 100]
    pub heat_score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(current: u32, max: u32) -> Cluster {
        Cluster {
            id: ClusterId::new("0xTEST"),
            alias: "Test Circle".to_string(),
            slogan: String::new(),
            coordinator: "Coord".to_string(),
            coordinator_trust_score: TrustScore::new(70),
            contribution_amount: 500,
            cycle_duration_days: 7,
            current_members: current,
            max_members: max,
            cycle_progress: 0,
            pool_amount: 0,
            next_payout: "7 days".to_string(),
            heat_score: 10,
            visibility: CircleVisibility::Public,
            tags: vec![],
            minimum_trust_score: TrustScore::new(20),
            payout_ordering: PayoutOrdering::Random,
            rotation_position: None,
        }
    }

    #[test]
    fn test_capacity_helpers() {
        assert!(cluster(25, 25).is_full());
        assert!(!cluster(25, 25).is_almost_full());
        assert!(cluster(18, 20).is_almost_full());
        assert!(!cluster(15, 20).is_almost_full());
        assert_eq!(cluster(12, 15).spots_left(), 3);
        assert_eq!(cluster(30, 25).spots_left(), 0);
    }

    #[test]
    fn test_payout_ordering_parse() {
        assert_eq!(PayoutOrdering::parse("Random"), Some(PayoutOrdering::Random));
        assert_eq!(PayoutOrdering::parse("First-Join"), Some(PayoutOrdering::FirstJoin));
        assert_eq!(PayoutOrdering::parse("first_join"), Some(PayoutOrdering::FirstJoin));
        assert_eq!(PayoutOrdering::parse("MANUAL"), Some(PayoutOrdering::Manual));
        assert!("lottery".parse::<PayoutOrdering>().is_err());
    }

    #[test]
    fn test_cluster_id() {
        assert!(ClusterId::default().is_empty());
        assert_eq!(ClusterId::from("0xF4D2").to_string(), "0xF4D2");
    }
}
