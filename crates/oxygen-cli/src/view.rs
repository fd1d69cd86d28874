//! Screen rendering for the REPL.
//!
//! Each screen becomes a block of text: a header with the screen name and
//! navigation bar, the screen body, and the commands available on it.

use crate::app::App;
use crate::error::Result;
use crate::output::{progress_bar, Formatter};
use oxygen_domain::metrics::{
    commit_success_rate, first_pending_commit, nearest_payout, next_feature_unlock,
    progress_to_next_unlock, total_committed, total_projected_payout, vault_fill_level,
    VAULT_CAPACITY,
};
use oxygen_domain::traits::{ActivityRepository, ClusterRepository, VaultRepository};
use oxygen_domain::{MaskedAmount, NavBar, PledgeStep, Screen};
use oxygen_gatekeeper::AccessDecision;
use oxygen_navigator::LoadingFrame;

/// Render the current screen.
pub fn render(app: &App, f: &Formatter) -> Result<String> {
    let mut lines = vec![header(app, f)];

    let body = match app.screen() {
        Screen::Landing => vec![
            "Save together. Get paid in turn.".to_string(),
            "Savings circles for people who move fast.".to_string(),
        ],
        Screen::Onboarding => vec![
            "1. Join a circle that matches your hustle".to_string(),
            "2. Commit a little every day".to_string(),
            "3. Collect the pool when your turn comes".to_string(),
        ],
        Screen::Registration => vec!["Pick an alias and the number payments come from.".to_string()],
        Screen::Success => {
            let alias = app
                .navigator()
                .session()
                .identity()
                .map(|i| i.alias.clone())
                .unwrap_or_default();
            vec![f.success(&format!("Welcome to the circle, {}!", alias))]
        }
        Screen::Dashboard => dashboard(app, f)?,
        Screen::ClusterDetail => cluster_detail(app, f)?,
        Screen::ContributionFlow => vec![f.info("Waiting for your payment signal...")],
        Screen::ContributionSuccess => vec![f.success("Contribution received. Streak kept alive!")],
        Screen::ActivityLog => activity_log(app, f)?,
        Screen::Settings => settings(app),
        Screen::JoinRandom => join_random(app, f)?,
        Screen::StartPledge => start_pledge(app, f),
        Screen::LoadingTrustHub => vec![f.info("Loading your trust engine...")],
        Screen::TrustHub => trust_hub(app, f)?,
        Screen::AutoInvestVault => vault(app, f)?,
    };
    lines.extend(body);

    let commands = commands_for(app);
    if !commands.is_empty() {
        lines.push(String::new());
        lines.push(format!("Commands: {}", commands.join(", ")));
    }

    Ok(lines.join("\n"))
}

/// One line of the loading screen.
pub fn loading_line(frame: &LoadingFrame) -> String {
    format!(
        "{} {} {}",
        progress_bar(frame.percent(), 30),
        frame.message(),
        frame.status()
    )
}

fn header(app: &App, f: &Formatter) -> String {
    let bar = match app.navigator().nav_bar() {
        NavBar::Hidden => String::new(),
        NavBar::AuthLinks => "  [O2]  about | circles | sign in".to_string(),
        NavBar::IdentityBadge {
            alias_initial,
            settings_shortcut,
        } => {
            if settings_shortcut {
                format!("  [O2]  ({}) settings", alias_initial)
            } else {
                format!("  [O2]  ({})", alias_initial)
            }
        }
        NavBar::LogoOnly => "  [O2]".to_string(),
    };

    format!(
        "{}{}  trust {}%",
        f.heading(&format!("== {} ==", app.screen())),
        bar,
        app.trust_score().value()
    )
}

fn money(app: &App, amount: u64) -> String {
    MaskedAmount::with_visibility(amount, app.amounts_visible()).render()
}

fn dashboard(app: &App, f: &Formatter) -> Result<Vec<String>> {
    let memberships = app.store().memberships()?;
    let mut lines = vec![format!(
        "Projected payouts: {}",
        money(app, total_projected_payout(&memberships))
    )];

    if let Some(next) = nearest_payout(&memberships) {
        lines.push(format!("Next payout: {} in {}", next.cluster_id, next.next_unlock));
    }
    if let Some(pending) = first_pending_commit(&memberships) {
        lines.push(f.warning(&format!("Today's commit pending for {}", pending.cluster_id)));
    }

    lines.push(f.format_memberships(&memberships, app.amounts_visible())?);
    Ok(lines)
}

fn cluster_detail(app: &App, f: &Formatter) -> Result<Vec<String>> {
    let session = app.navigator().session();
    let id = session.selected_cluster_id();

    if let Some(cluster) = app.selected_cluster()? {
        let heat = oxygen_domain::eligibility::heat_status(cluster.heat_score);
        let mut lines = vec![
            format!("{} ({})", cluster.alias, cluster.id),
            format!("\"{}\"", cluster.slogan),
            format!(
                "Coordinator: {} ({}%)",
                cluster.coordinator,
                cluster.coordinator_trust_score.value()
            ),
            format!(
                "Daily {} for {} days, pool {}",
                money(app, cluster.contribution_amount),
                cluster.cycle_duration_days,
                money(app, cluster.pool_amount)
            ),
            format!(
                "Members {}/{}, cycle {}%, next payout in {}",
                cluster.current_members,
                cluster.max_members,
                cluster.cycle_progress,
                cluster.next_payout
            ),
            format!("Heat: {}", f.heat_badge(&heat)),
        ];
        if cluster.is_almost_full() {
            lines.push(f.warning(&format!("Only {} spots left", cluster.spots_left())));
        }
        return Ok(lines);
    }

    let memberships = app.store().memberships()?;
    if let Some(m) = memberships.iter().find(|m| &m.cluster_id == id) {
        return Ok(vec![
            format!("Circle {}", m.cluster_id),
            format!("Your position: #{} of {}", m.position, m.total_members),
            format!(
                "Cycle {}/{} at {}%, unlock in {}",
                m.cycle_number, m.total_cycles, m.cycle_progress, m.next_unlock
            ),
            format!("Expected payout: {}", money(app, m.expected_payout)),
        ]);
    }

    Ok(vec![f.info(&format!("Circle {} is being set up.", id))])
}

fn activity_log(app: &App, f: &Formatter) -> Result<Vec<String>> {
    let id = app.navigator().session().selected_cluster_id();
    let entries = match app.store().cluster_activity(id) {
        Ok(entries) => entries,
        Err(oxygen_store::StoreError::NotFound(_)) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    Ok(vec![
        format!(
            "Success rate {}%, committed {}",
            commit_success_rate(&entries),
            money(app, total_committed(&entries))
        ),
        f.format_activity(&entries)?,
    ])
}

fn settings(app: &App) -> Vec<String> {
    match app.navigator().session().identity() {
        Some(identity) => vec![
            format!("Alias: {}", identity.alias),
            format!("Contact: {}", identity.contact_route),
        ],
        None => vec!["No identity registered.".to_string()],
    }
}

fn join_random(app: &App, f: &Formatter) -> Result<Vec<String>> {
    let query = app.query();
    let mut lines = vec![format!(
        "Filter: {}  Sort: {}{}",
        query.filter.as_str(),
        query.sort.as_str(),
        query
            .search
            .as_deref()
            .map(|s| format!("  Search: {}", s))
            .unwrap_or_default()
    )];
    lines.push(f.format_listing(&app.listing()?)?);
    Ok(lines)
}

fn start_pledge(app: &App, f: &Formatter) -> Vec<String> {
    let step = PledgeStep::Eligibility;
    let mut lines = vec![format!(
        "Step {} ({}%)",
        step.as_str(),
        step.progress_percent().unwrap_or(0)
    )];
    match app.coordinator_access() {
        AccessDecision::Unlocked => lines.push(f.success("You can coordinate a circle")),
        AccessDecision::Locked { shortfall } => lines.push(f.error(&format!(
            "Need {} more trust points to coordinate",
            shortfall
        ))),
    }
    lines
}

fn trust_hub(app: &App, f: &Formatter) -> Result<Vec<String>> {
    let score = app.trust_score();
    let features = app.feature_unlocks()?;

    let mut lines = vec![format!("Trust score {}%", score.value())];
    match next_feature_unlock(score, &features) {
        Some(next) => lines.push(format!(
            "Next unlock: {} at {}% {}",
            next.name,
            next.required_score.value(),
            progress_bar(progress_to_next_unlock(score, &features), 20)
        )),
        None => lines.push(f.success("Every feature unlocked")),
    }
    lines.push(f.format_features(&features, score)?);
    Ok(lines)
}

fn vault(app: &App, f: &Formatter) -> Result<Vec<String>> {
    if let AccessDecision::Locked { shortfall } = app.vault_access() {
        return Ok(vec![
            f.error("Auto-Invest Vault locked"),
            format!("Need {} more trust points to unlock the vault", shortfall),
        ]);
    }

    let summary = app.store().vault_summary()?;
    let goals = app.store().vault_goals()?;

    let mut lines = vec![
        format!(
            "Balance {}  ROI earned {}",
            money(app, summary.balance),
            money(app, summary.roi_earned)
        ),
        format!(
            "Fill {}",
            progress_bar(vault_fill_level(summary.balance, VAULT_CAPACITY), 20)
        ),
        format!(
            "Lock: {}{}  Avg return {}.{}%  Streak {} days",
            summary.lock.as_str(),
            if summary.can_withdraw() {
                String::new()
            } else {
                format!(" ({} days left)", summary.unlock_days)
            },
            summary.average_roi_bps / 100,
            summary.average_roi_bps % 100 / 10,
            summary.streak_days
        ),
    ];
    lines.push(f.format_goals(&goals, app.amounts_visible())?);
    Ok(lines)
}

/// REPL commands offered on the current screen.
pub fn commands_for(app: &App) -> Vec<&'static str> {
    let nav = app.navigator();
    let mut commands: Vec<&'static str> = nav
        .available_actions()
        .iter()
        .filter_map(|action| match action.name() {
            "initializeConnection" => Some("init"),
            "completeOnboarding" => Some("next"),
            "skipOnboarding" => Some("skip"),
            "back" => Some("back"),
            "continueToLobby" => Some("lobby"),
            "joinRandom" => Some("market"),
            "startPledge" => Some("pledge"),
            "joinCluster" => Some("commit"),
            "viewActivity" => Some("activity"),
            "openSettings" => Some("settings"),
            "openTrustHub" => Some("hub"),
            "openAutoInvestVault" => Some("vault"),
            _ => None,
        })
        .collect();

    match app.screen() {
        Screen::Registration => commands.push("register <alias> <route>"),
        Screen::Dashboard => commands.push("view <id>"),
        Screen::JoinRandom => commands.extend(["join <id>", "find <text>", "filter <f>", "sort <s>"]),
        Screen::StartPledge => commands.push("launch <name> | <slogan>"),
        _ => {}
    }
    if app.navigator().session().identity().is_some() {
        commands.push("profile <alias> <route>");
    }
    if app.navigator().nav_bar().has_logo() {
        commands.push("tap");
    }
    commands.dedup();
    commands
}
