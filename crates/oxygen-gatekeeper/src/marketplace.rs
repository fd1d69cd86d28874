//! Marketplace listing
//!
//! Search, filter and sort the public cluster list, attaching a join decision
//! and heat badge to every entry.

use crate::{Gatekeeper, GatekeeperError, JoinContext, JoinDecision};
use oxygen_domain::eligibility::heat_status;
use oxygen_domain::traits::ClusterRepository;
use oxygen_domain::{Cluster, HeatStatus};
use std::str::FromStr;

/// Marketplace filter chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketplaceFilter {
    /// Everything
    #[default]
    All,
    /// Clusters the user could join right now
    Available,
    /// Coordinators at or above the high-trust threshold
    HighTrust,
    /// Heat at or below the low-risk threshold
    LowRisk,
    /// Short cycles
    Fast,
}

impl MarketplaceFilter {
    /// Get the filter key as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketplaceFilter::All => "all",
            MarketplaceFilter::Available => "available",
            MarketplaceFilter::HighTrust => "high-trust",
            MarketplaceFilter::LowRisk => "low-risk",
            MarketplaceFilter::Fast => "fast",
        }
    }

    /// Parse a filter key
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(MarketplaceFilter::All),
            "available" => Some(MarketplaceFilter::Available),
            "high-trust" | "high_trust" => Some(MarketplaceFilter::HighTrust),
            "low-risk" | "low_risk" => Some(MarketplaceFilter::LowRisk),
            "fast" => Some(MarketplaceFilter::Fast),
            _ => None,
        }
    }
}

impl FromStr for MarketplaceFilter {
    type Err = GatekeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GatekeeperError::InvalidQuery(format!("unknown filter '{}'", s)))
    }
}

/// Marketplace sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketplaceSort {
    /// Listing order as supplied
    #[default]
    Newest,
    /// Highest daily amount first
    AmountHigh,
    /// Lowest daily amount first
    AmountLow,
    /// Shortest cycle first
    Duration,
    /// Most trusted coordinator first
    Trust,
    /// Coolest circle first
    Heat,
}

impl MarketplaceSort {
    /// Get the sort key as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketplaceSort::Newest => "newest",
            MarketplaceSort::AmountHigh => "amount-high",
            MarketplaceSort::AmountLow => "amount-low",
            MarketplaceSort::Duration => "duration",
            MarketplaceSort::Trust => "trust",
            MarketplaceSort::Heat => "heat",
        }
    }

    /// Parse a sort key
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newest" => Some(MarketplaceSort::Newest),
            "amount-high" | "amount_high" => Some(MarketplaceSort::AmountHigh),
            "amount-low" | "amount_low" => Some(MarketplaceSort::AmountLow),
            "duration" => Some(MarketplaceSort::Duration),
            "trust" => Some(MarketplaceSort::Trust),
            "heat" => Some(MarketplaceSort::Heat),
            _ => None,
        }
    }

    fn sort(&self, entries: &mut [ListingEntry]) {
        // slice::sort_by_key is stable, so equal keys keep listing order
        match self {
            MarketplaceSort::Newest => {}
            MarketplaceSort::AmountHigh => {
                entries.sort_by_key(|e| std::cmp::Reverse(e.cluster.contribution_amount))
            }
            MarketplaceSort::AmountLow => entries.sort_by_key(|e| e.cluster.contribution_amount),
            MarketplaceSort::Duration => entries.sort_by_key(|e| e.cluster.cycle_duration_days),
            MarketplaceSort::Trust => {
                entries.sort_by_key(|e| std::cmp::Reverse(e.cluster.coordinator_trust_score))
            }
            MarketplaceSort::Heat => entries.sort_by_key(|e| e.cluster.heat_score),
        }
    }
}

impl FromStr for MarketplaceSort {
    type Err = GatekeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GatekeeperError::InvalidQuery(format!("unknown sort '{}'", s)))
    }
}

/// Marketplace query
#[derive(Debug, Clone, Default)]
pub struct MarketplaceQuery {
    /// Case-insensitive text matched against alias, coordinator and slogan
    pub search: Option<String>,

    /// Filter chip
    pub filter: MarketplaceFilter,

    /// Sort order
    pub sort: MarketplaceSort,
}

/// One marketplace row
#[derive(Debug, Clone)]
pub struct ListingEntry {
    /// The cluster
    pub cluster: Cluster,

    /// Whether the user may join it, and why not
    pub decision: JoinDecision,

    /// Heat badge
    pub heat: HeatStatus,
}

impl Gatekeeper {
    /// Build the marketplace listing for `query`
    pub fn marketplace<R>(
        &self,
        repo: &R,
        query: &MarketplaceQuery,
        ctx: &JoinContext,
    ) -> Result<Vec<ListingEntry>, GatekeeperError>
    where
        R: ClusterRepository,
        R::Error: std::fmt::Display,
    {
        let clusters = repo
            .marketplace_clusters()
            .map_err(|e| GatekeeperError::Repository(format!("Failed to list clusters: {}", e)))?;

        Ok(self.list(clusters, query, ctx))
    }

    /// Filter and sort an already-loaded cluster list
    pub fn list(
        &self,
        clusters: Vec<Cluster>,
        query: &MarketplaceQuery,
        ctx: &JoinContext,
    ) -> Vec<ListingEntry> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let total = clusters.len();
        let mut entries: Vec<ListingEntry> = clusters
            .into_iter()
            .filter(|c| needle.as_deref().map_or(true, |n| matches_search(c, n)))
            .map(|cluster| ListingEntry {
                decision: self.evaluate_join(&cluster, ctx),
                heat: heat_status(cluster.heat_score),
                cluster,
            })
            .filter(|e| self.passes_filter(e, query.filter))
            .collect();

        query.sort.sort(&mut entries);

        tracing::debug!(
            total,
            shown = entries.len(),
            filter = query.filter.as_str(),
            sort = query.sort.as_str(),
            "marketplace listed"
        );

        entries
    }

    fn passes_filter(&self, entry: &ListingEntry, filter: MarketplaceFilter) -> bool {
        let cluster = &entry.cluster;
        match filter {
            MarketplaceFilter::All => true,
            MarketplaceFilter::Available => entry.decision.is_allowed(),
            MarketplaceFilter::HighTrust => {
                cluster.coordinator_trust_score.value() >= self.config().high_trust_coordinator_min
            }
            MarketplaceFilter::LowRisk => cluster.heat_score <= self.config().low_risk_heat_max,
            MarketplaceFilter::Fast => {
                cluster.cycle_duration_days <= self.config().fast_cycle_max_days
            }
        }
    }
}

fn matches_search(cluster: &Cluster, needle: &str) -> bool {
    [&cluster.alias, &cluster.coordinator, &cluster.slogan]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
