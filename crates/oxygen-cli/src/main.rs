//! Oxygen CLI - Command-line interface for the Oxygen savings circle app.

use clap::Parser;
use oxygen_cli::app::{load_navigator_config, load_store};
use oxygen_cli::commands;
use oxygen_cli::repl;
use oxygen_cli::{App, Cli, Command, Config, Formatter};
use oxygen_gatekeeper::Gatekeeper;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so table and JSON output stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> oxygen_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Fixture data is loaded only by the commands that read it
    let fixtures = cli.fixtures.clone().or_else(|| config.fixtures.clone());
    let trust_score = cli.trust_score.or(config.trust_score);
    let gatekeeper = Gatekeeper::default();

    match cli.command {
        None | Some(Command::Repl) => {
            let navigator_path = cli.navigator.clone().or_else(|| config.navigator.clone());
            let fast = cli.fast || config.settings.fast_timers;
            let navigator_config = load_navigator_config(navigator_path.as_deref(), fast)?;

            let store = load_store(fixtures.as_deref(), trust_score)?;
            let mut app = App::new(store, navigator_config)?;
            repl::run_repl(&mut app, &config, &formatter).await?;
        }
        Some(Command::Eligibility(args)) => {
            let store = load_store(fixtures.as_deref(), trust_score)?;
            commands::execute_eligibility(args, &store, &gatekeeper, &formatter)?;
        }
        Some(Command::Marketplace(args)) => {
            let store = load_store(fixtures.as_deref(), trust_score)?;
            commands::execute_marketplace(args, &store, &gatekeeper, &formatter)?;
        }
        Some(Command::Heat(args)) => {
            commands::execute_heat(args, &formatter)?;
        }
        Some(Command::Pledge(args)) => {
            let store = load_store(fixtures.as_deref(), trust_score)?;
            commands::execute_pledge(args, &store, &gatekeeper, &formatter)?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &mut config, &formatter)?;
        }
    }

    Ok(())
}
