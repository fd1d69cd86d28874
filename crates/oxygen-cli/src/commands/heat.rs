//! Heat command implementation.

use crate::cli::HeatArgs;
use crate::error::Result;
use crate::output::Formatter;
use oxygen_domain::eligibility::heat_status;

/// Execute the heat command.
pub fn execute_heat(args: HeatArgs, formatter: &Formatter) -> Result<()> {
    let status = heat_status(args.score);
    println!("{}", formatter.format_heat(args.score, &status)?);
    Ok(())
}
