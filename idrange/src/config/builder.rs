//! Configuration builder.
//!
//! Composes loading, merging, environment overrides and validation into one
//! call, and turns the result into an [`AllocationPolicy`].

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::planner::AllocationPolicy;

/// Builds a [`Config`] from every source, lowest precedence first:
/// defaults, user file, project file, explicit file, environment,
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use idrange::config::{Config, ConfigBuilder};
///
/// let policy = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { shift: Some(10), ..Default::default() })
///     .build_policy()
///     .unwrap();
///
/// assert_eq!(policy.shift, 10);
/// assert_eq!(policy.default_size, 50);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// A builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project discovery from `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Read the user configuration from `dir` instead of `~/.idrange`.
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Layer an explicit configuration file above the discovered ones.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Apply `config` above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignore the user and project files. An explicit file is still read.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `IDRANGE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let sources = if self.skip_files {
            match &self.config_file {
                Some(path) => ConfigLoader::load_all_explicit(path)?,
                None => Vec::new(),
            }
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            ConfigLoader::load_all(
                &working_dir,
                self.user_dir.as_deref(),
                self.config_file.as_deref(),
            )?
        };

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Like [`ConfigBuilder::build`], then resolve the allocation policy.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigBuilder::build`].
    pub fn build_policy(self) -> Result<AllocationPolicy> {
        Ok(Config::policy(&self.build()?))
    }
}

impl Config {
    /// The allocation policy this configuration describes; unset fields take
    /// the defaults.
    #[must_use]
    pub fn policy(&self) -> AllocationPolicy {
        let defaults = AllocationPolicy::default();
        AllocationPolicy {
            shift: self.shift.unwrap_or(defaults.shift),
            margin: self.margin.unwrap_or(defaults.margin),
            default_size: self.default_size.unwrap_or(defaults.default_size),
            name_prefix: self.name_prefix.clone().unwrap_or(defaults.name_prefix),
        }
    }
}
