//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use idrange::config::{Config, ConfigMerger};
///
/// let low = Config { shift: Some(1), margin: Some(5), ..Default::default() };
/// let high = Config { shift: Some(2), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.shift, Some(2));
/// assert_eq!(result.margin, Some(5));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given lowest precedence first, into one configuration.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.shift.is_some() {
            target.shift = source.shift;
        }

        if source.margin.is_some() {
            target.margin = source.margin;
        }

        if source.default_size.is_some() {
            target.default_size = source.default_size;
        }

        if source.name_prefix.is_some() {
            target.name_prefix.clone_from(&source.name_prefix);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
