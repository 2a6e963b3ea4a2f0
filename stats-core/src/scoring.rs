//! # Scoring Module
//!
//! Turns the raw text typed into the stats form into numbers, and hosts the
//! scoring hook that sits between the form and the chart.

use indexmap::IndexMap;

use crate::document::FlatStats;

/// Result of reading the form: the parsed scores plus the names of the
/// fields whose text was not an integer (those were scored as 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormScores {
    pub scores: FlatStats,
    pub invalid_fields: Vec<String>,
}

/// Reads one input box. Empty text is 0; anything else must be an integer.
pub fn parse_score_input(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    text.parse::<i64>().ok()
}

/// Reads every input box of the form, in form order.
pub fn read_form(inputs: &IndexMap<String, String>) -> FormScores {
    let mut form = FormScores::default();
    for (name, text) in inputs {
        let value = match parse_score_input(text) {
            Some(v) => v,
            None => {
                form.invalid_fields.push(name.clone());
                0
            }
        };
        form.scores.insert(name.clone(), value as f64);
    }
    form
}

/// Processes raw form scores into the values that get charted and saved.
///
/// Currently the identity: the output is exactly the input.
pub fn calculate_scores(stats: &FlatStats) -> FlatStats {
    stats.clone()
}

/// Keeps only the scores whose input text was edited.
///
/// `baseline` holds the text each box was filled with when the stats were
/// loaded. Text is compared trimmed; a category missing from `baseline`
/// counts as edited.
pub fn edited_scores(
    scores: &FlatStats,
    inputs: &IndexMap<String, String>,
    baseline: &IndexMap<String, String>,
) -> FlatStats {
    scores
        .iter()
        .filter(|(name, _)| {
            let current = inputs.get(*name).map(|t| t.trim());
            let original = baseline.get(*name).map(|t| t.trim());
            original.is_none() || current != original
        })
        .map(|(name, value)| (name.clone(), *value))
        .collect()
}

/// Formats scores as `{Name: value, ...}` for the result label.
pub fn format_scores(stats: &FlatStats) -> String {
    let body = stats
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}
