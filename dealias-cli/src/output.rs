//! Tally output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use dealias::RunTally;

/// Output format for the final conversion tally.
#[derive(Clone, Copy, ValueEnum)]
pub enum TallyFormat {
    /// Human-readable summary.
    Human,
    /// Pretty-printed JSON object.
    Json,
}

/// Render the run tally in the requested format.
pub fn format_tally(format: TallyFormat, tally: &RunTally) -> Result<String, CliError> {
    match format {
        TallyFormat::Human => Ok(format!(
            "Conversion complete:\n  converted: {}\n  failed: {}\n",
            tally.converted, tally.failed
        )),
        TallyFormat::Json => {
            let json = serde_json::to_string_pretty(tally)?;
            Ok(format!("{json}\n"))
        }
    }
}
