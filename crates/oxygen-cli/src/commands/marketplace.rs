//! Marketplace command implementation.

use crate::cli::MarketplaceArgs;
use crate::error::Result;
use crate::output::Formatter;
use oxygen_domain::traits::{ClusterRepository, TrustSource};
use oxygen_gatekeeper::{Gatekeeper, JoinContext, ListingEntry, MarketplaceQuery};
use oxygen_store::FixtureStore;

/// Build the listing the marketplace command prints.
pub fn build_listing(
    args: MarketplaceArgs,
    store: &FixtureStore,
    gatekeeper: &Gatekeeper,
) -> Result<Vec<ListingEntry>> {
    let active = match args.active {
        Some(active) => active,
        None => store.active_cluster_count()?,
    };
    let ctx = JoinContext::new(store.trust_score()?, active);

    let query = MarketplaceQuery {
        search: args.search,
        filter: args.filter.into(),
        sort: args.sort.into(),
    };

    Ok(gatekeeper.marketplace(store, &query, &ctx)?)
}

/// Execute the marketplace command.
pub fn execute_marketplace(
    args: MarketplaceArgs,
    store: &FixtureStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let entries = build_listing(args, store, gatekeeper)?;
    println!("{}", formatter.format_listing(&entries)?);
    Ok(())
}
