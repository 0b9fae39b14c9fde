//! Configuration system for idrange.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `idrange.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`IDRANGE_*`)
//! 3. Explicit file (via `ConfigBuilder::with_config_file`)
//! 4. Project config (`idrange.yaml`, nearest ancestor directory)
//! 5. User config (`~/.idrange/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use idrange::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let policy = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/tests"))
//!     .build_policy()
//!     .unwrap();
//! println!("shift {} margin {}", policy.shift, policy.margin);
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use idrange::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config { name_prefix: Some("nightly".into()), ..Default::default() })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.policy().name_prefix, "nightly");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat};
pub use validator::ConfigValidator;
