//! Output formatting for the CLI.

use crate::commands::eligibility::EligibilityReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use oxygen_domain::metrics::goal_progress;
use oxygen_domain::{
    format_naira, ActivityEntry, FeatureUnlock, HeatStatus, HeatTier, MaskedAmount, Membership,
    PledgeDraft, TrustScore, VaultGoal,
};
use oxygen_gatekeeper::{AccessDecision, JoinDecision, ListingEntry, PledgeValidation};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a marketplace listing.
    pub fn format_listing(&self, entries: &[ListingEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        let c = &e.cluster;
                        serde_json::json!({
                            "id": c.id.as_str(),
                            "alias": c.alias,
                            "coordinator": c.coordinator,
                            "coordinator_trust_score": c.coordinator_trust_score.value(),
                            "contribution_amount": c.contribution_amount,
                            "cycle_duration_days": c.cycle_duration_days,
                            "members": { "current": c.current_members, "max": c.max_members },
                            "minimum_trust_score": c.minimum_trust_score.value(),
                            "heat": { "score": c.heat_score, "tier": e.heat.tier.as_str(), "label": e.heat.label },
                            "payout_ordering": c.payout_ordering.as_str(),
                            "joinable": e.decision.is_allowed(),
                            "label": e.decision.label(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.cluster.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No circles match.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Circle", "Coordinator", "Daily", "Cycle", "Members", "Min Trust", "Heat",
                    "Join",
                ]);
                for entry in entries {
                    let c = &entry.cluster;
                    builder.push_record([
                        c.id.to_string(),
                        c.alias.clone(),
                        format!("{} ({}%)", c.coordinator, c.coordinator_trust_score.value()),
                        format_naira(c.contribution_amount),
                        format!("{} days", c.cycle_duration_days),
                        format!("{}/{}", c.current_members, c.max_members),
                        format!("{}%", c.minimum_trust_score.value()),
                        self.heat_badge(&entry.heat),
                        self.join_label(&entry.decision),
                    ]);
                }
                Ok(self.build_table(builder))
            }
        }
    }

    /// Format the user's memberships.
    pub fn format_memberships(&self, memberships: &[Membership], visible: bool) -> Result<String> {
        if memberships.is_empty() {
            return Ok(self.colorize("No active circles yet.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Position", "Progress", "Next Unlock", "Payout", "Today"]);
        for m in memberships {
            builder.push_record([
                m.cluster_id.to_string(),
                format!("#{} of {}", m.position, m.total_members),
                format!("{}% (cycle {}/{})", m.cycle_progress, m.cycle_number, m.total_cycles),
                m.next_unlock.clone(),
                MaskedAmount::with_visibility(m.expected_payout, visible).render(),
                if m.committed_today {
                    self.colorize("committed", "green")
                } else {
                    self.colorize("pending", "yellow")
                },
            ]);
        }
        Ok(self.build_table(builder))
    }

    /// Format an activity log.
    pub fn format_activity(&self, entries: &[ActivityEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok(self.colorize("No activity yet.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Day", "Date", "Kind", "Amount", "Description"]);
        for e in entries {
            let kind = match e.kind.as_str() {
                "missed" => self.colorize("missed", "red"),
                "payout" => self.colorize("payout", "green"),
                "milestone" => self.colorize("milestone", "cyan"),
                other => other.to_string(),
            };
            builder.push_record([
                e.day_number.to_string(),
                e.date.clone(),
                kind,
                e.amount.map(format_naira).unwrap_or_else(|| "-".to_string()),
                e.description.clone(),
            ]);
        }
        Ok(self.build_table(builder))
    }

    /// Format the feature unlock table for a score.
    pub fn format_features(&self, features: &[FeatureUnlock], score: TrustScore) -> Result<String> {
        let mut builder = Builder::default();
        builder.push_record(["Feature", "Category", "Needs", "Status"]);
        for f in features {
            let status = if f.is_unlocked_at(score) {
                self.colorize("unlocked", "green")
            } else {
                self.colorize("locked", "red")
            };
            builder.push_record([
                f.name.clone(),
                f.category.clone(),
                format!("{}%", f.required_score.value()),
                status,
            ]);
        }
        Ok(self.build_table(builder))
    }

    /// Format vault savings goals.
    pub fn format_goals(&self, goals: &[VaultGoal], visible: bool) -> Result<String> {
        if goals.is_empty() {
            return Ok(self.colorize("No savings goals.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Goal", "Saved", "Target", "Progress", "Due"]);
        for g in goals {
            builder.push_record([
                if g.is_active {
                    g.name.clone()
                } else {
                    format!("{} (paused)", g.name)
                },
                MaskedAmount::with_visibility(g.current_amount, visible).render(),
                MaskedAmount::with_visibility(g.target_amount, visible).render(),
                progress_bar(goal_progress(g), 10),
                g.target_date.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        Ok(self.build_table(builder))
    }

    /// Format an eligibility report.
    pub fn format_eligibility(&self, report: &EligibilityReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "trust_score": report.score.value(),
                    "active_clusters": report.active_clusters,
                    "join_limit": report.join_limit,
                    "can_join_more": report.can_join_more,
                    "vault": access_json(report.vault),
                    "coordinator": access_json(report.coordinator),
                    "max_cycle_days": report.max_cycle_days,
                    "manual_payout": report.manual_payout,
                    "contribution_amounts": report.contribution_amounts,
                    "member_requirement": report.member_requirement.value(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(report.score.value().to_string()),
            OutputFormat::Table => {
                let amounts: Vec<String> = report
                    .contribution_amounts
                    .iter()
                    .map(|a| format_naira(*a))
                    .collect();

                let mut builder = Builder::default();
                builder.push_record(["Rule", "Value"]);
                builder.push_record(["Trust score".to_string(), format!("{}%", report.score.value())]);
                builder.push_record([
                    "Active circles".to_string(),
                    format!("{} of {}", report.active_clusters, report.join_limit),
                ]);
                builder.push_record(["Can join more".to_string(), self.yes_no(report.can_join_more)]);
                builder.push_record(["Auto-Invest vault".to_string(), self.access_label(report.vault)]);
                builder.push_record(["Create circles".to_string(), self.access_label(report.coordinator)]);
                builder.push_record(["Longest cycle".to_string(), format!("{} days", report.max_cycle_days)]);
                builder.push_record(["Manual payout order".to_string(), self.yes_no(report.manual_payout)]);
                builder.push_record(["Daily amounts".to_string(), amounts.join(", ")]);
                builder.push_record([
                    "Member trust needed".to_string(),
                    format!("{}%", report.member_requirement.value()),
                ]);
                Ok(self.build_table(builder))
            }
        }
    }

    /// Format a heat classification.
    pub fn format_heat(&self, score: u8, status: &HeatStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "score": score,
                "tier": status.tier.as_str(),
                "label": status.label,
            }))?),
            OutputFormat::Quiet => Ok(status.tier.as_str().to_string()),
            OutputFormat::Table => Ok(format!("Heat {}: {}", score, self.heat_badge(status))),
        }
    }

    /// Format a pledge draft and its validation.
    pub fn format_pledge(&self, draft: &PledgeDraft, validation: &PledgeValidation) -> Result<String> {
        let reasons: Vec<String> = validation.reasons.iter().map(|r| r.to_string()).collect();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "alias": draft.alias,
                "ready": validation.is_ready(),
                "reasons": reasons,
                "projected_pool": draft.projected_pool(),
                "recommended_penalty": draft.recommended_penalty(),
                "max_penalty": draft.max_penalty(),
            }))?),
            OutputFormat::Quiet => Ok(if validation.is_ready() { "ready" } else { "rejected" }.to_string()),
            OutputFormat::Table => {
                let mut lines = vec![format!(
                    "{} {}: {} x {} members x {} days = {}",
                    draft.emoji,
                    if draft.alias.trim().is_empty() { "(unnamed)" } else { draft.alias.as_str() },
                    format_naira(draft.daily_amount),
                    draft.max_members,
                    draft.cycle_duration_days,
                    format_naira(draft.projected_pool()),
                )];
                lines.push(format!(
                    "Payout: {}, penalty {} (recommended {})",
                    draft.payout_ordering.as_str(),
                    format_naira(draft.penalty_amount),
                    format_naira(draft.recommended_penalty()),
                ));
                if validation.is_ready() {
                    lines.push(self.success("Ready to launch"));
                } else {
                    for reason in &reasons {
                        lines.push(self.error(reason));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Label for a trust-gated area.
    pub fn access_label(&self, access: AccessDecision) -> String {
        match access {
            AccessDecision::Unlocked => self.colorize("unlocked", "green"),
            AccessDecision::Locked { shortfall } => {
                self.colorize(&format!("locked (need {} more)", shortfall), "red")
            }
        }
    }

    /// Label for a join control.
    pub fn join_label(&self, decision: &JoinDecision) -> String {
        let label = decision.label();
        if decision.is_allowed() {
            self.colorize(&label, "green")
        } else {
            self.colorize(&label, "red")
        }
    }

    /// Colored heat badge.
    pub fn heat_badge(&self, status: &HeatStatus) -> String {
        let color = match status.tier {
            HeatTier::Cool => "green",
            HeatTier::Warm => "yellow",
            HeatTier::Hot => "magenta",
            HeatTier::Critical => "red",
        };
        self.colorize(status.label, color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a heading.
    pub fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn yes_no(&self, value: bool) -> String {
        if value {
            self.colorize("yes", "green")
        } else {
            self.colorize("no", "red")
        }
    }

    fn build_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Text progress bar, e.g. `[#####-----] 50%`
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = (percent as usize * width + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

fn access_json(access: AccessDecision) -> serde_json::Value {
    match access {
        AccessDecision::Unlocked => serde_json::json!({ "unlocked": true }),
        AccessDecision::Locked { shortfall } => {
            serde_json::json!({ "unlocked": false, "shortfall": shortfall })
        }
    }
}
