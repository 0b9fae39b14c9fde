//! Command to check an idrange configuration file.
//!
//! On success the allocation policy the file resolves to is printed, with
//! unset fields filled from the built-in defaults.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use idrange::config::{ConfigLoader, ConfigValidator};
use idrange::{AllocationPolicy, Config};
use std::path::PathBuf;

/// Validate an idrange configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        let config = ConfigLoader::load_file(&self.config_path)
            .and_then(|config| ConfigValidator::validate(&config).map(|()| config))
            .map_err(|e| {
                CliError::SemanticFailure(format!(
                    "{} is not a valid configuration: {e}",
                    self.config_path.display()
                ))
            })?;

        println!("Configuration is valid");
        if !global.quiet {
            println!("{}", describe_policy(&config));
        }
        Ok(())
    }
}

/// Render the policy a configuration resolves to.
fn describe_policy(config: &Config) -> String {
    let AllocationPolicy {
        shift,
        margin,
        default_size,
        name_prefix,
    } = config.policy();
    let format = config.output_format.unwrap_or_default();

    format!(
        "  shift:         {shift}\n  margin:        {margin}\n  default size:  {default_size}\n  \
         name prefix:   {name_prefix}\n  output format: {format}"
    )
}
