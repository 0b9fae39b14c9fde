//! Command to print the server's overlap and deletion messages.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use clap::Args;
use idrange::OverlapKind;

/// Print the messages overlap tests expect the server to return.
#[derive(Args)]
pub struct OverlapMessagesCommand {
    /// Only print this kind (base-range, primary-rid, secondary-rid,
    /// primary-secondary-rid, delete-leaves-objects)
    #[arg(value_name = "KIND")]
    pub kind: Option<String>,
}

impl OverlapMessagesCommand {
    /// Execute the overlap-messages command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let kinds = match &self.kind {
            Some(name) => vec![name
                .parse::<OverlapKind>()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?],
            None => OverlapKind::all().to_vec(),
        };

        let config = utils::load_configuration(global)?;
        let output = utils::formatter(global, &config).format_messages(&kinds)?;
        utils::print_output(&output);

        Ok(())
    }
}
