//! Output formatter implementations.

use std::fmt::Write as _;

use crate::fixture::{FieldAssignment, FieldState, FixtureData};
use crate::overlap::OverlapKind;
use crate::watermark::HighWaterMark;
use crate::Result;

use super::{MessageEntry, OutputFormatter};

/// Width of the field-name column in human output.
const FIELD_COLUMN: usize = 24;

fn entries(kinds: &[OverlapKind]) -> Vec<MessageEntry> {
    kinds.iter().copied().map(MessageEntry::from).collect()
}

/// Formatter for pretty-printed JSON.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_fixtures(&self, fixtures: &[FixtureData]) -> Result<String> {
        Ok(serde_json::to_string_pretty(fixtures)?)
    }

    fn format_mark(&self, mark: &HighWaterMark) -> Result<String> {
        Ok(serde_json::to_string_pretty(mark)?)
    }

    fn format_messages(&self, kinds: &[OverlapKind]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&entries(kinds))?)
    }
}

/// Formatter for YAML documents.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format_fixtures(&self, fixtures: &[FixtureData]) -> Result<String> {
        Ok(serde_yaml::to_string(fixtures)?)
    }

    fn format_mark(&self, mark: &HighWaterMark) -> Result<String> {
        Ok(serde_yaml::to_string(mark)?)
    }

    fn format_messages(&self, kinds: &[OverlapKind]) -> Result<String> {
        Ok(serde_yaml::to_string(&entries(kinds))?)
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl HumanFormatter {
    fn push_step(out: &mut String, step: &FieldAssignment) {
        match step {
            FieldAssignment::Textbox { name, value } | FieldAssignment::Radio { name, value } => {
                let _ = writeln!(
                    out,
                    "    {:<width$}{value}  ({})",
                    name.as_str(),
                    step.widget(),
                    width = FIELD_COLUMN
                );
            }
            FieldAssignment::Callback {
                callback,
                range_type,
            } => {
                let states = callback
                    .expected_field_states()
                    .iter()
                    .map(|(field, state)| format!("{field}={}", state_label(*state)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "    <check {range_type}: {states}>");
            }
        }
    }
}

fn state_label(state: FieldState) -> &'static str {
    match state {
        FieldState::Enabled => "enabled",
        FieldState::Disabled => "disabled",
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_fixtures(&self, fixtures: &[FixtureData]) -> Result<String> {
        if fixtures.is_empty() {
            return Ok("No ranges planned.".to_string());
        }

        let mut out = String::new();
        for fixture in fixtures {
            let _ = writeln!(out, "{}", fixture.pkey);
            out.push_str("  add:\n");
            for step in &fixture.add {
                Self::push_step(&mut out, step);
            }
            out.push_str("  mod:\n");
            if fixture.modify.is_empty() {
                out.push_str("    (nothing)\n");
            }
            for step in &fixture.modify {
                Self::push_step(&mut out, step);
            }
        }
        Ok(out.trim_end().to_string())
    }

    fn format_mark(&self, mark: &HighWaterMark) -> Result<String> {
        Ok(format!(
            "High-water marks:\n  {:<18}{}\n  {:<18}{}\n  {:<18}{}",
            "base ID:",
            mark.max_base_id,
            "primary RID:",
            mark.max_primary_rid,
            "secondary RID:",
            mark.max_secondary_rid
        ))
    }

    fn format_messages(&self, kinds: &[OverlapKind]) -> Result<String> {
        let width = kinds.iter().map(|k| k.name().len()).max().unwrap_or(0) + 2;
        Ok(kinds
            .iter()
            .map(|kind| format!("{:<width$}{}", kind.name(), kind.message()))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
