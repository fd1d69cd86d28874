//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Each command maps to one control of the app. The current screen is
//! rendered again after every successful command.

use crate::app::App;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::view;
use oxygen_domain::PledgeDraft;
use oxygen_gatekeeper::{MarketplaceFilter, MarketplaceSort};
use oxygen_navigator::{Action, LoadingFrame, PaymentState};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(app: &mut App, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Oxygen REPL - Type 'help' for commands, 'exit' to quit"));
    println!();
    println!("{}", view::render(app, formatter)?);

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("oxygen:{}> ", app.screen());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => match execute_repl_command(cmd, app, formatter).await {
                        Ok(()) => {
                            println!();
                            println!("{}", view::render(app, formatter)?);
                        }
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// Show session details
    Status,
    /// Show or mask amounts
    Toggle,
    /// A navigation action needing no gate
    Action(Action),
    /// Open a cluster by id
    View(String),
    /// Join a marketplace cluster by id
    Join(String),
    /// Set or clear the marketplace search text
    Find(Option<String>),
    /// Set the marketplace filter
    Filter(MarketplaceFilter),
    /// Set the marketplace sort
    Sort(MarketplaceSort),
    /// Make today's contribution
    Commit,
    /// Tap the logo
    Tap,
    /// Open the trust hub from the dashboard
    Hub,
    /// Launch a circle from the pledge wizard
    Launch {
        /// Circle name
        alias: String,
        /// Motto
        slogan: String,
    },
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let args = &parts[1..];
    let cmd = match parts[0] {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        "status" => ReplCommand::Status,
        "toggle" => ReplCommand::Toggle,
        "init" => ReplCommand::Action(Action::InitializeConnection),
        "next" => ReplCommand::Action(Action::CompleteOnboarding),
        "skip" => ReplCommand::Action(Action::SkipOnboarding),
        "register" => parse_identity(args, "register").map(|(alias, contact_route)| {
            ReplCommand::Action(Action::SubmitRegistration {
                alias,
                contact_route,
            })
        })?,
        "profile" => parse_identity(args, "profile").map(|(alias, contact_route)| {
            ReplCommand::Action(Action::UpdateProfile {
                alias,
                contact_route,
            })
        })?,
        "lobby" => ReplCommand::Action(Action::ContinueToLobby),
        "market" => ReplCommand::Action(Action::JoinRandom),
        "pledge" => ReplCommand::Action(Action::StartPledge),
        "activity" => ReplCommand::Action(Action::ViewActivity),
        "settings" => ReplCommand::Action(Action::OpenSettings),
        "vault" => ReplCommand::Action(Action::OpenAutoInvestVault),
        "back" => ReplCommand::Action(Action::Back),
        "view" => ReplCommand::View(single_arg(args, "view <id>")?),
        "join" => ReplCommand::Join(single_arg(args, "join <id>")?),
        "find" => ReplCommand::Find(if args.is_empty() {
            None
        } else {
            Some(args.join(" "))
        }),
        "filter" => {
            let value = single_arg(args, "filter <all|available|high-trust|low-risk|fast>")?;
            ReplCommand::Filter(value.parse()?)
        }
        "sort" => {
            let value = single_arg(
                args,
                "sort <newest|amount-high|amount-low|duration|trust|heat>",
            )?;
            ReplCommand::Sort(value.parse()?)
        }
        "commit" => ReplCommand::Commit,
        "tap" => ReplCommand::Tap,
        "hub" => ReplCommand::Hub,
        "launch" => parse_launch(args)?,
        other => {
            return Err(CliError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                other
            )))
        }
    };

    Ok(cmd)
}

/// Execute a REPL command.
pub async fn execute_repl_command(
    cmd: ReplCommand,
    app: &mut App,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Exit | ReplCommand::Help => {}
        ReplCommand::Status => print_status(app),
        ReplCommand::Toggle => {
            let visible = app.toggle_amounts();
            println!(
                "{}",
                formatter.info(if visible { "Amounts shown" } else { "Amounts hidden" })
            );
        }
        ReplCommand::Action(action) => {
            app.dispatch(action)?;
        }
        ReplCommand::View(id) => {
            app.view_cluster(&id)?;
        }
        ReplCommand::Join(id) => {
            app.marketplace_join(&id)?;
            println!("{}", formatter.success(&format!("Joined {}", id)));
        }
        ReplCommand::Find(search) => {
            let mut query = app.query().clone();
            query.search = search;
            app.set_query(query);
        }
        ReplCommand::Filter(filter) => {
            let mut query = app.query().clone();
            query.filter = filter;
            app.set_query(query);
        }
        ReplCommand::Sort(sort) => {
            let mut query = app.query().clone();
            query.sort = sort;
            app.set_query(query);
        }
        ReplCommand::Commit => {
            app.commit(|state| match state {
                PaymentState::Detecting => {
                    println!("{}", formatter.info("Waiting for payment..."))
                }
                PaymentState::Detected => println!("{}", formatter.success("Payment detected")),
                PaymentState::Idle => {}
            })
            .await?;
        }
        ReplCommand::Tap => {
            let mut progress = LoadingPrinter::default();
            app.tap_logo(|frame| progress.print(frame)).await?;
            progress.finish();
            let taps = app.navigator().session().logo_tap_count();
            if taps > 0 {
                println!("{}", formatter.info(&format!("Logo tapped {} time(s)", taps)));
            }
        }
        ReplCommand::Hub => {
            let mut progress = LoadingPrinter::default();
            app.open_trust_hub(|frame| progress.print(frame)).await?;
            progress.finish();
        }
        ReplCommand::Launch { alias, slogan } => {
            let mut draft = PledgeDraft {
                alias,
                slogan,
                mood_tags: vec!["hustle".to_string()],
                ..PledgeDraft::default()
            };
            draft.penalty_amount = draft.recommended_penalty();
            let id = app.launch_pledge(&draft)?;
            println!("{}", formatter.success(&format!("Circle {} launched", id)));
        }
    }

    Ok(())
}

/// Prints loading frames on one line, only when the percentage changes.
#[derive(Default)]
struct LoadingPrinter {
    last_percent: Option<u8>,
}

impl LoadingPrinter {
    fn print(&mut self, frame: &LoadingFrame) {
        if self.last_percent == Some(frame.percent()) {
            return;
        }
        self.last_percent = Some(frame.percent());
        print!("\r{}", view::loading_line(frame));
        std::io::stdout().flush().ok();
    }

    fn finish(&self) {
        if self.last_percent.is_some() {
            println!();
        }
    }
}

fn single_arg(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [value] => Ok(value.to_string()),
        _ => Err(CliError::InvalidInput(format!("Usage: {}", usage))),
    }
}

fn parse_identity(args: &[&str], command: &str) -> Result<(String, String)> {
    match args.split_first() {
        Some((alias, route)) => Ok((alias.to_string(), route.join(" "))),
        None => Err(CliError::InvalidInput(format!(
            "Usage: {} <alias> [contact route]",
            command
        ))),
    }
}

fn parse_launch(args: &[&str]) -> Result<ReplCommand> {
    let joined = args.join(" ");
    match joined.split_once('|') {
        Some((alias, slogan)) if !alias.trim().is_empty() && !slogan.trim().is_empty() => {
            Ok(ReplCommand::Launch {
                alias: alias.trim().to_string(),
                slogan: slogan.trim().to_string(),
            })
        }
        _ => Err(CliError::InvalidInput(
            "Usage: launch <name> | <slogan>".to_string(),
        )),
    }
}

fn print_status(app: &App) {
    let session = app.navigator().session();
    println!("Screen:       {}", session.screen());
    println!(
        "Identity:     {}",
        session
            .identity()
            .map(|i| format!("{} ({})", i.alias, i.contact_route))
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Trust score:  {}%", session.trust_score().value());
    println!(
        "Cluster:      {}",
        if session.selected_cluster_id().is_empty() {
            "-".to_string()
        } else {
            session.selected_cluster_id().to_string()
        }
    );
    println!("Logo taps:    {}", session.logo_tap_count());
    println!(
        "Amounts:      {}",
        if app.amounts_visible() { "shown" } else { "hidden" }
    );
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  init                       - Start onboarding from the landing page");
    println!("  next | skip                - Finish or skip onboarding");
    println!("  register <alias> [route]   - Create your identity");
    println!("  lobby                      - Enter the dashboard");
    println!("  view <id>                  - Open a circle");
    println!("  market                     - Browse the marketplace");
    println!("  find [text]                - Search the marketplace (no text clears)");
    println!("  filter <f> | sort <s>      - Filter or sort the marketplace");
    println!("  join <id>                  - Join a marketplace circle");
    println!("  commit                     - Make today's contribution");
    println!("  activity                   - Open the circle's activity log");
    println!("  settings                   - Open settings");
    println!("  profile <alias> [route]    - Update your identity");
    println!("  tap                        - Tap the logo");
    println!("  hub                        - Open the trust hub");
    println!("  vault                      - Open the Auto-Invest vault");
    println!("  pledge                     - Start a new circle");
    println!("  launch <name> | <slogan>   - Launch the circle being created");
    println!("  back                       - Go back");
    println!("  toggle                     - Show or hide amounts");
    println!("  status                     - Show session details");
    println!("  help, ?                    - Show this help");
    println!("  exit, quit, q              - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_actions() {
        assert_eq!(
            parse_repl_command("init").unwrap(),
            ReplCommand::Action(Action::InitializeConnection)
        );
        assert_eq!(
            parse_repl_command("back").unwrap(),
            ReplCommand::Action(Action::Back)
        );
        assert_eq!(parse_repl_command("q").unwrap(), ReplCommand::Exit);
    }

    #[test]
    fn test_parse_register() {
        assert_eq!(
            parse_repl_command("register Tech_Naija +234 801 234 5678").unwrap(),
            ReplCommand::Action(Action::SubmitRegistration {
                alias: "Tech_Naija".to_string(),
                contact_route: "+234 801 234 5678".to_string(),
            })
        );
        assert!(parse_repl_command("register").is_err());
    }

    #[test]
    fn test_parse_view_and_join() {
        assert_eq!(
            parse_repl_command("view 0xA43F").unwrap(),
            ReplCommand::View("0xA43F".to_string())
        );
        assert!(parse_repl_command("join").is_err());
        assert!(parse_repl_command("join a b").is_err());
    }

    #[test]
    fn test_parse_marketplace_controls() {
        assert_eq!(
            parse_repl_command("filter low-risk").unwrap(),
            ReplCommand::Filter(MarketplaceFilter::LowRisk)
        );
        assert_eq!(
            parse_repl_command("sort amount_high").unwrap(),
            ReplCommand::Sort(MarketplaceSort::AmountHigh)
        );
        assert!(parse_repl_command("sort sideways").is_err());
        assert_eq!(
            parse_repl_command("find brick layers").unwrap(),
            ReplCommand::Find(Some("brick layers".to_string()))
        );
        assert_eq!(parse_repl_command("find").unwrap(), ReplCommand::Find(None));
    }

    #[test]
    fn test_parse_launch() {
        assert_eq!(
            parse_repl_command("launch Lagos Hustlers | Daily grind pays").unwrap(),
            ReplCommand::Launch {
                alias: "Lagos Hustlers".to_string(),
                slogan: "Daily grind pays".to_string(),
            }
        );
        assert!(parse_repl_command("launch Lagos Hustlers").is_err());
        assert!(parse_repl_command("launch | slogan only").is_err());
    }

    #[test]
    fn test_unknown_command() {
        match parse_repl_command("fly") {
            Err(CliError::InvalidInput(msg)) => assert!(msg.contains("Unknown command: fly")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
