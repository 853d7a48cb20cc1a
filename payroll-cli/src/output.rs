//! Rendering of command results.
//!
//! Commands return a [`serde_json::Value`]. JSON output keeps the engine's
//! full precision; text output rounds at the last moment, showing amounts as
//! `R$` currency and ratios to four places.

use std::fmt::Write as _;

use clap::ValueEnum;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::utils::format_brl;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Field name fragments that mark a ratio rather than an amount.
const RATIO_KEYS: [&str; 4] = ["rate", "fator_r", "multiplier", "percentage"];

/// Free-text fields shown verbatim even when they look numeric.
const TEXT_KEYS: [&str; 2] = ["name", "label"];

fn is_ratio(key: &str) -> bool {
    RATIO_KEYS.iter().any(|fragment| key.contains(fragment))
}

pub fn render(
    format: OutputFormat,
    value: &Value,
) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("JSON serialization error: {e}")),
        OutputFormat::Text => {
            let mut out = String::new();
            write_text(&mut out, "", value, 0);
            out
        }
    }
}

fn format_scalar(
    key: &str,
    value: &Value,
) -> String {
    match value {
        Value::String(s) if TEXT_KEYS.contains(&key) => s.clone(),
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) if is_ratio(key) => d
                .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
                .to_string(),
            Ok(d) => format_brl(d),
            Err(_) => s.clone(),
        },
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn write_text(
    out: &mut String,
    key: &str,
    value: &Value,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            if !key.is_empty() {
                let _ = writeln!(out, "{indent}{key}:");
            }
            let depth = if key.is_empty() { depth } else { depth + 1 };
            for (k, v) in map {
                write_text(out, k, v, depth);
            }
        }
        Value::Array(items) => {
            if !key.is_empty() {
                let _ = writeln!(out, "{indent}{key}:");
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                write_text(out, "", item, depth + 1);
            }
        }
        scalar => {
            let _ = writeln!(out, "{indent}{key}: {}", format_scalar(key, scalar));
        }
    }
}
