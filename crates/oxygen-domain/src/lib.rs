//! Oxygen Domain Layer
//!
//! This crate contains the core rules and domain model for Oxygen, a savings
//! circle ("ajo") application. It has ZERO external dependencies and defines
//! the concepts, pure rule functions, and repository traits that every other
//! crate builds on.
//!
//! ## Key Concepts
//!
//! - **Screen**: The single value selecting what the user is looking at
//! - **Trust Score**: An integer in [0, 100] that gates almost every action
//! - **Cluster**: A savings circle members contribute to and rotate payouts from
//! - **Membership**: A cluster the user is actively contributing to
//! - **Eligibility**: Pure functions mapping a trust score to what the user may do
//! - **Metrics**: Percentages and aggregates derived from read-only collections
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure functions only, no I/O and no hidden state
//! - Data sourcing lives behind the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activity;
pub mod cluster;
pub mod currency;
pub mod eligibility;
pub mod identity;
pub mod metrics;
pub mod pledge;
pub mod screen;
pub mod traits;
pub mod trust;

// Re-exports for convenience
pub use activity::{ActivityEntry, ActivityKind, FeatureUnlock, VaultGoal, VaultLock, VaultSummary};
pub use cluster::{Cluster, ClusterId, CircleVisibility, Membership, PayoutOrdering};
pub use currency::{format_naira, MaskedAmount};
pub use eligibility::{HeatStatus, HeatTier, JoinBlockReason};
pub use identity::Identity;
pub use pledge::{PledgeDraft, PledgeStep};
pub use screen::{NavBar, Screen};
pub use trust::TrustScore;
