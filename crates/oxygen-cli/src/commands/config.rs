//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    let message = apply_config_action(args.action, config)?;
    if let Some(message) = message {
        config.save()?;
        println!("{}", formatter.success(&message));
    } else {
        show_config(config, formatter)?;
    }
    Ok(())
}

/// Apply an action to `config` in memory.
///
/// Returns a confirmation for actions that change the configuration and
/// `None` for `show`.
pub fn apply_config_action(action: ConfigAction, config: &mut Config) -> Result<Option<String>> {
    match action {
        ConfigAction::Show => Ok(None),
        ConfigAction::SetTrustScore { score } => {
            config.set_trust_score(Some(score))?;
            Ok(Some(format!("Trust score override set to {}%", score)))
        }
        ConfigAction::ClearTrustScore => {
            config.set_trust_score(None)?;
            Ok(Some("Trust score override removed".to_string()))
        }
        ConfigAction::Reset => {
            *config = Config::default();
            Ok(Some("Configuration reset".to_string()))
        }
    }
}

fn show_config(config: &Config, formatter: &Formatter) -> Result<()> {
    match formatter.format() {
        crate::config::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        _ => {
            let contents = toml::to_string_pretty(config)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("# {}", Config::path()?.display());
            print!("{}", contents);
        }
    }
    Ok(())
}
