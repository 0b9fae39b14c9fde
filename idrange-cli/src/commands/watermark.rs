//! Command to show the high-water marks of recorded ranges.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use clap::Args;
use idrange::HighWaterMark;
use std::path::PathBuf;

/// Print the high-water marks of recorded ranges.
#[derive(Args)]
pub struct WatermarkCommand {
    /// Recorded `idrange_find` response
    #[arg(long, value_name = "FILE")]
    pub ranges: PathBuf,

    /// Recorded `trust_find` response
    #[arg(long, value_name = "FILE")]
    pub trusts: Option<PathBuf>,
}

impl WatermarkCommand {
    /// Execute the watermark command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = utils::load_configuration(global)?;
        let snapshot = utils::load_snapshot(&self.ranges, self.trusts.as_deref())?;

        let mark = HighWaterMark::compute_with_margin(&snapshot, config.policy().margin);
        let output = utils::formatter(global, &config).format_mark(&mark)?;
        utils::print_output(&output);

        Ok(())
    }
}
