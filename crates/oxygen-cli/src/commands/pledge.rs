//! Pledge command implementation.

use crate::cli::PledgeArgs;
use crate::error::Result;
use crate::output::Formatter;
use oxygen_domain::traits::TrustSource;
use oxygen_domain::PledgeDraft;
use oxygen_gatekeeper::Gatekeeper;
use oxygen_store::FixtureStore;

/// Turn command-line arguments into a draft.
pub fn draft_from_args(args: PledgeArgs) -> PledgeDraft {
    let mut draft = PledgeDraft {
        alias: args.alias,
        slogan: args.slogan,
        daily_amount: args.amount,
        cycle_duration_days: args.cycle,
        max_members: args.members,
        payout_ordering: args.payout.into(),
        visibility: args.visibility.into(),
        ..PledgeDraft::default()
    };
    // Duplicates are dropped; extra tags stay so validation can report them
    for tag in args.tags {
        if !draft.mood_tags.contains(&tag) {
            draft.mood_tags.push(tag);
        }
    }
    draft.penalty_amount = draft.recommended_penalty();
    draft
}

/// Execute the pledge command.
pub fn execute_pledge(
    args: PledgeArgs,
    store: &FixtureStore,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let draft = draft_from_args(args);
    let validation = gatekeeper.validate_pledge(&draft, store.trust_score()?);
    println!("{}", formatter.format_pledge(&draft, &validation)?);
    Ok(())
}
