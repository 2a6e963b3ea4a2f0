//! # Stats Document Module
//!
//! The persisted stats file is a JSON object mapping category names to
//! entries. An entry is either a plain number (or a numeric string) or an
//! object carrying a `subskills` mapping whose values are averaged.
//!
//! This module owns the data model and the rules that flatten a document
//! into one number per category for charting.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field that marks an entry as a subskill entry.
pub const SUBSKILLS_FIELD: &str = "subskills";

/// Field written back onto subskill entries when the store saves.
pub const AVERAGE_FIELD: &str = "average";

/// Category name to a single value, in display order.
pub type FlatStats = IndexMap<String, f64>;

/// The full persisted structure, kept verbatim (key order and extra fields
/// included) so that a save can patch it instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsDocument(Map<String, Value>);

/// A borrowed view of one document entry, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// A scalar (or anything that is not a subskill object).
    Plain(&'a Value),
    /// An object with a `subskills` field.
    Subskills {
        subskills: &'a Value,
        fields: &'a Map<String, Value>,
    },
}

impl<'a> Entry<'a> {
    /// Classifies a raw JSON value.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(fields) => match fields.get(SUBSKILLS_FIELD) {
                Some(subskills) => Entry::Subskills { subskills, fields },
                None => Entry::Plain(value),
            },
            _ => Entry::Plain(value),
        }
    }

    /// Applies the derived value rule.
    ///
    /// Subskill entries give their saved `average` when it coerces, otherwise
    /// the mean of their coercible subskill values rounded to two decimals,
    /// or 0.0 when none coerce. Plain entries give their coerced value, or
    /// 0.0 when coercion fails.
    pub fn numeric_value(&self) -> f64 {
        match self {
            Entry::Plain(value) => coerce_number(value).unwrap_or(0.0),
            Entry::Subskills { subskills, fields } => {
                if let Some(average) = fields.get(AVERAGE_FIELD).and_then(coerce_number) {
                    return average;
                }
                let Value::Object(subskills) = subskills else {
                    return 0.0;
                };
                let values: Vec<f64> = subskills.values().filter_map(coerce_number).collect();
                if values.is_empty() {
                    return 0.0;
                }
                round2(running_mean(&values))
            }
        }
    }
}

impl StatsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already parsed JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, category: &str) -> Option<&Value> {
        self.0.get(category)
    }

    pub fn entry(&self, category: &str) -> Option<Entry<'_>> {
        self.0.get(category).map(Entry::classify)
    }

    /// Iterates over the categories and their classified entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Entry<'_>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), Entry::classify(v)))
    }

    /// Flattens every entry into a single value, keeping the document order.
    pub fn flatten(&self) -> FlatStats {
        self.entries()
            .map(|(name, entry)| (name.to_string(), entry.numeric_value()))
            .collect()
    }

    /// Builds a document holding exactly `stats` as plain numbers.
    pub fn from_flat(stats: &FlatStats) -> Self {
        let mut doc = Self::new();
        for (name, value) in stats {
            doc.0.insert(name.clone(), number_value(*value));
        }
        doc
    }

    /// Patches one category with a new value.
    ///
    /// Subskill entries keep every field and get their `average` set; any
    /// other shape is replaced by the bare number.
    pub fn apply_value(&mut self, category: &str, value: f64) {
        let number = number_value(value);
        match self.0.get_mut(category) {
            Some(Value::Object(fields)) if fields.contains_key(SUBSKILLS_FIELD) => {
                fields.insert(AVERAGE_FIELD.to_string(), number);
            }
            _ => {
                self.0.insert(category.to_string(), number);
            }
        }
    }

    /// Returns a copy of this document with `stats` merged in.
    pub fn merged(&self, stats: &FlatStats) -> Self {
        let mut doc = self.clone();
        for (name, value) in stats {
            doc.apply_value(name, *value);
        }
        doc
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Converts a JSON value to a finite `f64`, if it has a numeric reading.
///
/// Numbers convert directly and strings are trimmed and parsed. Booleans,
/// null, arrays and objects never coerce, and neither do non-finite
/// results such as `"NaN"` or `"inf"`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Rounds to two decimal places.
///
/// Values too large to scale by 100 have no fractional part left to round
/// and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Mean that stays finite for finite inputs near `f64::MAX`.
fn running_mean(values: &[f64]) -> f64 {
    let mut mean = 0.0;
    for (i, v) in values.iter().enumerate() {
        let k = (i + 1) as f64;
        mean += v / k - mean / k;
    }
    mean
}

/// A JSON float for `value`. JSON has no NaN or infinity, so those become 0.0.
fn number_value(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => {
            tracing::warn!("Non-finite value {} cannot be stored, writing 0.0", value);
            Value::from(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value_of(v: Value) -> f64 {
        Entry::classify(&v).numeric_value()
    }

    #[test]
    fn subskills_are_averaged() {
        assert_eq!(value_of(json!({"subskills": {"a": 10, "b": 20, "c": 30}})), 20.0);
    }

    #[test]
    fn non_numeric_subskills_are_skipped() {
        assert_eq!(value_of(json!({"subskills": {"a": "x", "b": 50}})), 50.0);
    }

    #[test]
    fn empty_subskills_give_zero() {
        assert_eq!(value_of(json!({"subskills": {}})), 0.0);
    }

    #[test]
    fn subskills_that_are_not_an_object_give_zero() {
        assert_eq!(value_of(json!({"subskills": [1, 2, 3]})), 0.0);
    }

    #[test]
    fn subskill_mean_is_rounded() {
        assert_eq!(value_of(json!({"subskills": {"a": 10, "b": 10, "c": 11}})), 10.33);
    }

    #[test]
    fn subskill_strings_are_coerced() {
        assert_eq!(value_of(json!({"subskills": {"a": "40", "b": 60.0}})), 50.0);
    }

    #[test]
    fn huge_subskills_stay_finite() {
        let single = value_of(json!({"subskills": {"a": 1e307}}));
        assert!(single.is_finite());
        assert_eq!(single, 1e307);

        let pair = value_of(json!({"subskills": {"a": 1e308, "b": 1e308}}));
        assert!(pair.is_finite());
        assert_eq!(pair, 1e308);
    }

    #[test]
    fn round2_leaves_unscalable_values_alone() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
        assert_eq!(round2(2.125), 2.13);
    }

    #[test]
    fn saved_average_wins_over_subskills() {
        assert_eq!(value_of(json!({"subskills": {"a": 10}, "average": 77.0})), 77.0);
        assert_eq!(value_of(json!({"subskills": {"a": 10}, "average": "n/a"})), 10.0);
    }

    #[test]
    fn plain_values_are_coerced() {
        assert_eq!(value_of(json!("42")), 42.0);
        assert_eq!(value_of(json!(" 7.5 ")), 7.5);
        assert_eq!(value_of(json!("abc")), 0.0);
        assert_eq!(value_of(json!(12)), 12.0);
        assert_eq!(value_of(json!(null)), 0.0);
        assert_eq!(value_of(json!(true)), 0.0);
        assert_eq!(value_of(json!("NaN")), 0.0);
    }

    #[test]
    fn objects_without_subskills_are_plain() {
        let v = json!({"average": 30});
        assert!(matches!(Entry::classify(&v), Entry::Plain(_)));
        assert_eq!(value_of(v), 0.0);
    }

    #[test]
    fn flatten_keeps_document_order() {
        let map = json!({"Zeta": 1, "Alpha": {"subskills": {"x": 4}}, "Mid": "3"});
        let Value::Object(map) = map else { unreachable!() };
        let flat = StatsDocument::from_map(map).flatten();
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
        assert_eq!(flat["Alpha"], 4.0);
        assert_eq!(flat["Mid"], 3.0);
    }

    #[test]
    fn apply_value_sets_average_on_subskill_entries() {
        let Value::Object(map) = json!({
            "Stealth": {"subskills": {"a": 1}, "extra": "keepme"},
            "Speed": {"note": "replaced"}
        }) else {
            unreachable!()
        };
        let mut doc = StatsDocument::from_map(map);
        doc.apply_value("Stealth", 77.0);
        doc.apply_value("Speed", 5.0);

        assert_eq!(
            doc.get("Stealth"),
            Some(&json!({"subskills": {"a": 1}, "extra": "keepme", "average": 77.0}))
        );
        assert_eq!(doc.get("Speed"), Some(&json!(5.0)));
    }

    #[test]
    fn merged_leaves_original_untouched() {
        let Value::Object(map) = json!({"A": 1, "B": 2}) else { unreachable!() };
        let doc = StatsDocument::from_map(map);
        let mut stats = FlatStats::new();
        stats.insert("A".to_string(), 9.0);

        let merged = doc.merged(&stats);
        assert_eq!(doc.get("A"), Some(&json!(1)));
        assert_eq!(merged.get("A"), Some(&json!(9.0)));
        assert_eq!(merged.get("B"), Some(&json!(2)));
    }

    #[test]
    fn non_finite_values_are_written_as_zero() {
        let mut stats = FlatStats::new();
        stats.insert("Bad".to_string(), f64::NAN);
        let doc = StatsDocument::from_flat(&stats);
        assert_eq!(doc.get("Bad"), Some(&json!(0.0)));
    }
}
