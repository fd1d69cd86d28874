//! Fixture file format
//!
//! Plain serde records mirroring the domain types. Enum-like fields are kept
//! as strings on disk and parsed on conversion so a typo surfaces as
//! [`StoreError::InvalidData`] naming the bad value.

use crate::StoreError;
use oxygen_domain::{
    ActivityEntry, ActivityKind, CircleVisibility, Cluster, ClusterId, FeatureUnlock, Membership,
    PayoutOrdering, TrustScore, VaultGoal, VaultLock, VaultSummary,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FixtureFile {
    pub trust_score: u8,
    #[serde(default)]
    pub marketplace: Vec<ClusterRecord>,
    #[serde(default)]
    pub memberships: Vec<MembershipRecord>,
    #[serde(default)]
    pub activity: BTreeMap<String, Vec<ActivityRecord>>,
    pub vault: VaultRecord,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub feature_unlocks: Vec<FeatureRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ClusterRecord {
    pub id: String,
    pub alias: String,
    #[serde(default)]
    pub slogan: String,
    pub coordinator: String,
    pub coordinator_trust_score: u8,
    pub contribution_amount: u64,
    pub cycle_duration_days: u32,
    pub current_members: u32,
    pub max_members: u32,
    #[serde(default)]
    pub cycle_progress: u8,
    #[serde(default)]
    pub pool_amount: u64,
    pub next_payout: String,
    #[serde(default)]
    pub heat_score: u8,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub minimum_trust_score: u8,
    pub payout_ordering: String,
    #[serde(default)]
    pub rotation_position: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MembershipRecord {
    pub cluster_id: String,
    pub position: u32,
    pub total_members: u32,
    pub cycle_progress: u8,
    pub next_unlock: String,
    pub pool_amount: u64,
    pub committed_today: bool,
    pub cycle_number: u32,
    pub total_cycles: u32,
    pub expected_payout: u64,
    pub heat_score: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ActivityRecord {
    pub date: String,
    pub kind: String,
    #[serde(default)]
    pub amount: Option<u64>,
    pub description: String,
    pub day_number: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct VaultRecord {
    pub balance: u64,
    pub roi_earned: u64,
    pub lock: String,
    pub unlock_days: u32,
    pub total_saved: u64,
    pub average_roi_bps: u32,
    pub streak_days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GoalRecord {
    pub id: String,
    pub name: String,
    pub target_amount: u64,
    pub current_amount: u64,
    #[serde(default)]
    pub target_date: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FeatureRecord {
    pub name: String,
    pub description: String,
    pub required_score: u8,
    pub category: String,
}

fn score(value: u8, field: &str) -> Result<TrustScore, StoreError> {
    if value > TrustScore::MAX.value() {
        return Err(StoreError::InvalidData(format!(
            "{} {} is outside 0..=100",
            field, value
        )));
    }
    Ok(TrustScore::new(value))
}

impl TryFrom<ClusterRecord> for Cluster {
    type Error = StoreError;

    fn try_from(r: ClusterRecord) -> Result<Self, Self::Error> {
        if r.id.trim().is_empty() {
            return Err(StoreError::InvalidData("cluster with empty id".to_string()));
        }

        let payout_ordering = PayoutOrdering::parse(&r.payout_ordering).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "Unknown payout ordering '{}' on cluster {}",
                r.payout_ordering, r.id
            ))
        })?;

        let visibility = match r.visibility.as_deref() {
            None => CircleVisibility::default(),
            Some(v) => CircleVisibility::parse(v).ok_or_else(|| {
                StoreError::InvalidData(format!("Unknown visibility '{}' on cluster {}", v, r.id))
            })?,
        };

        Ok(Cluster {
            coordinator_trust_score: score(r.coordinator_trust_score, "coordinator_trust_score")?,
            minimum_trust_score: score(r.minimum_trust_score, "minimum_trust_score")?,
            id: ClusterId::new(r.id),
            alias: r.alias,
            slogan: r.slogan,
            coordinator: r.coordinator,
            contribution_amount: r.contribution_amount,
            cycle_duration_days: r.cycle_duration_days,
            current_members: r.current_members,
            max_members: r.max_members,
            cycle_progress: r.cycle_progress.min(100),
            pool_amount: r.pool_amount,
            next_payout: r.next_payout,
            heat_score: r.heat_score.min(100),
            visibility,
            tags: r.tags,
            payout_ordering,
            rotation_position: r.rotation_position,
        })
    }
}

impl From<MembershipRecord> for Membership {
    fn from(r: MembershipRecord) -> Self {
        Membership {
            cluster_id: ClusterId::new(r.cluster_id),
            position: r.position,
            total_members: r.total_members,
            cycle_progress: r.cycle_progress.min(100),
            next_unlock: r.next_unlock,
            pool_amount: r.pool_amount,
            committed_today: r.committed_today,
            cycle_number: r.cycle_number,
            total_cycles: r.total_cycles,
            expected_payout: r.expected_payout,
            heat_score: r.heat_score.min(100),
        }
    }
}

impl TryFrom<ActivityRecord> for ActivityEntry {
    type Error = StoreError;

    fn try_from(r: ActivityRecord) -> Result<Self, Self::Error> {
        let kind = ActivityKind::parse(&r.kind)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown activity kind '{}'", r.kind)))?;

        Ok(ActivityEntry {
            date: r.date,
            kind,
            amount: r.amount,
            description: r.description,
            day_number: r.day_number,
        })
    }
}

impl TryFrom<VaultRecord> for VaultSummary {
    type Error = StoreError;

    fn try_from(r: VaultRecord) -> Result<Self, Self::Error> {
        let lock = VaultLock::parse(&r.lock)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown vault lock '{}'", r.lock)))?;

        Ok(VaultSummary {
            balance: r.balance,
            roi_earned: r.roi_earned,
            lock,
            unlock_days: r.unlock_days,
            total_saved: r.total_saved,
            average_roi_bps: r.average_roi_bps,
            streak_days: r.streak_days,
        })
    }
}

impl From<GoalRecord> for VaultGoal {
    fn from(r: GoalRecord) -> Self {
        VaultGoal {
            id: r.id,
            name: r.name,
            target_amount: r.target_amount,
            current_amount: r.current_amount,
            target_date: r.target_date,
            is_active: r.is_active,
        }
    }
}

impl TryFrom<FeatureRecord> for FeatureUnlock {
    type Error = StoreError;

    fn try_from(r: FeatureRecord) -> Result<Self, Self::Error> {
        Ok(FeatureUnlock {
            required_score: score(r.required_score, "required_score")?,
            name: r.name,
            description: r.description,
            category: r.category,
        })
    }
}
