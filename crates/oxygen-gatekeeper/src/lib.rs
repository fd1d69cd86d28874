//! Oxygen Gatekeeper
//!
//! Decides whether eligibility-dependent actions are available and why not.
//!
//! The Gatekeeper provides:
//! - Join decisions with the first failing reason (limit, trust, capacity)
//! - Vault and coordinator access checks
//! - Pledge draft validation for the circle-creation wizard
//! - Marketplace listings (search, filter, sort) with a decision per cluster
//!
//! Nothing here raises on an ineligible user. A blocked action is a value the
//! view layer renders as a disabled control.
//!
//! # Examples
//!
//! ```no_run
//! use oxygen_gatekeeper::{Gatekeeper, GatekeeperConfig, JoinContext};
//! use oxygen_domain::TrustScore;
//!
//! let gatekeeper = Gatekeeper::new(GatekeeperConfig::default());
//! let ctx = JoinContext::new(TrustScore::new(45), 3);
//!
//! // let decision = gatekeeper.evaluate_join(&cluster, &ctx);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod gate;
pub mod marketplace;

pub use config::GatekeeperConfig;
pub use error::GatekeeperError;
pub use gate::{
    AccessDecision, Gatekeeper, JoinContext, JoinDecision, JoinStatus, PledgeIssue,
    PledgeStatus, PledgeValidation,
};
pub use marketplace::{ListingEntry, MarketplaceFilter, MarketplaceQuery, MarketplaceSort};
