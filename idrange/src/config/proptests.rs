//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Yaml),
        Just(OutputFormat::Human),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u64>()),
        prop::option::of("[a-z][a-z0-9_-]{0,20}"),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(|(shift, margin, default_size, name_prefix, output_format)| Config {
            shift,
            margin,
            default_size,
            name_prefix,
            output_format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher source wins; unset fields keep the lower value
    #[test]
    fn merge_field_precedence(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.shift, high.shift.or(low.shift));
        prop_assert_eq!(merged.margin, high.margin.or(low.margin));
        prop_assert_eq!(merged.default_size, high.default_size.or(low.default_size));
        prop_assert_eq!(merged.name_prefix, high.name_prefix.or(low.name_prefix));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Any valid configuration yields a policy the planner accepts
    #[test]
    fn valid_config_gives_usable_policy(config in config_strategy()) {
        prop_assume!(ConfigValidator::validate(&config).is_ok());
        let policy = config.policy();
        prop_assert!(policy.shift >= 1);
        prop_assert!(policy.default_size >= 1);
        prop_assert!(!policy.name_prefix.is_empty());
    }

    // Configs survive a YAML round trip
    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
