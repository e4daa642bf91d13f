//! # Robust Numeric Aggregation
//!
//! The math tools receive heterogeneous sequences: numbers mixed with
//! numeric-looking strings (possibly using a comma as the decimal separator)
//! and outright garbage. This module coerces such a sequence into a
//! validated numeric list plus a side-channel of rejected entries, then
//! computes a sum or a rounded mean.
//!
//! Coercion never fails: an element that cannot be converted is recorded in
//! the `ignored` diagnostics with its original index and value, and the
//! batch continues.
//!
//! ```rust
//! use mcp_tools::numeric::{coerce, AggregateOp};
//! use serde_json::json;
//!
//! let values = vec![json!("10"), json!("abc"), json!(5), json!("3,5")];
//! let result = coerce(&values, AggregateOp::Mean { precision: 1 });
//!
//! assert!(result.success);
//! assert_eq!(result.value, Some(6.2));
//! assert_eq!(result.ignored.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The aggregation to apply over the valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// Arithmetic total; never rounded.
    Sum,
    /// Arithmetic mean, rounded to `precision` decimal places.
    ///
    /// Precision is caller-supplied: different callers legitimately want
    /// different display precision.
    Mean {
        /// Number of decimal places to round the mean to
        precision: u32,
    },
}

/// One input element that could not be coerced to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoredValue {
    /// Position of the element in the input sequence
    pub index: usize,
    /// The original, unconverted value
    pub value: Value,
}

/// The outcome of coercing and aggregating one input sequence.
///
/// Invariants: `success` is false iff `valid_count` is zero; `value` is
/// present iff `success` is true; `valid_count + ignored.len()` equals the
/// input length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Whether an aggregate could be computed
    pub success: bool,

    /// The computed aggregate, when successful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Why the aggregate could not be computed, when unsuccessful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Number of elements that coerced successfully
    pub valid_count: usize,

    /// Elements that were rejected, in input order
    pub ignored: Vec<IgnoredValue>,

    /// The coerced values, in their original relative order
    pub validated_values: Vec<f64>,
}

impl AggregationResult {
    fn failure(error: &str, ignored: Vec<IgnoredValue>) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.to_string()),
            valid_count: 0,
            ignored,
            validated_values: Vec::new(),
        }
    }
}

/// Coerces a heterogeneous sequence into numbers and applies `op`.
///
/// Per element: strings are trimmed and comma decimal separators replaced
/// with periods before parsing; numbers pass through; everything else is
/// diverted to the `ignored` list. Never raises.
pub fn coerce(values: &[Value], op: AggregateOp) -> AggregationResult {
    if values.is_empty() {
        return AggregationResult::failure("empty input", Vec::new());
    }

    let mut valid: Vec<f64> = Vec::with_capacity(values.len());
    let mut ignored: Vec<IgnoredValue> = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match coerce_one(value) {
            Some(number) => valid.push(number),
            None => ignored.push(IgnoredValue {
                index,
                value: value.clone(),
            }),
        }
    }

    if valid.is_empty() {
        return AggregationResult::failure("no valid numeric values", ignored);
    }

    let sum: f64 = valid.iter().sum();
    let value = match op {
        AggregateOp::Sum => sum,
        AggregateOp::Mean { precision } => round_to(sum / valid.len() as f64, precision),
    };

    AggregationResult {
        success: true,
        value: Some(value),
        error: None,
        valid_count: valid.len(),
        ignored,
        validated_values: valid,
    }
}

/// Best-effort conversion of one element to `f64`.
///
/// Strings that parse to non-finite values (`"inf"`, `"NaN"`) are rejected:
/// the result record is serialized to JSON, which cannot represent them.
fn coerce_one(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            // Locale decimal normalization: "3,5" means 3.5
            let cleaned = s.trim().replace(',', ".");
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Rounds to a fixed number of decimal places.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_numeric_sum() {
        let values = vec![json!(1), json!(2.5), json!(3)];
        let result = coerce(&values, AggregateOp::Sum);

        assert!(result.success);
        assert_eq!(result.value, Some(6.5));
        assert_eq!(result.valid_count, 3);
        assert!(result.ignored.is_empty());
        assert_eq!(result.validated_values, vec![1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_all_numeric_mean() {
        let values = vec![json!(2), json!(4)];
        let result = coerce(&values, AggregateOp::Mean { precision: 1 });

        assert!(result.success);
        assert_eq!(result.value, Some(3.0));
    }

    #[test]
    fn test_mixed_values_mean() {
        let values = vec![json!("10"), json!("abc"), json!(5), json!("3,5")];
        let result = coerce(&values, AggregateOp::Mean { precision: 1 });

        assert!(result.success);
        assert_eq!(result.valid_count, 3);
        assert_eq!(result.value, Some(6.2));
        assert_eq!(result.ignored, vec![IgnoredValue { index: 1, value: json!("abc") }]);
        assert_eq!(result.validated_values, vec![10.0, 5.0, 3.5]);
    }

    #[test]
    fn test_mean_precision_is_configurable() {
        let values = vec![json!(1), json!(2)];

        let one = coerce(&values, AggregateOp::Mean { precision: 1 });
        assert_eq!(one.value, Some(1.5));

        let values = vec![json!(10), json!(0), json!(0)];
        let two = coerce(&values, AggregateOp::Mean { precision: 2 });
        assert_eq!(two.value, Some(3.33));
        let one = coerce(&values, AggregateOp::Mean { precision: 1 });
        assert_eq!(one.value, Some(3.3));
    }

    #[test]
    fn test_sum_is_not_rounded() {
        let values = vec![json!(0.1), json!(0.2)];
        let result = coerce(&values, AggregateOp::Sum);
        assert_eq!(result.value, Some(0.1 + 0.2));
    }

    #[test]
    fn test_locale_decimal_strings() {
        let values = vec![json!("3,5")];
        let result = coerce(&values, AggregateOp::Sum);
        assert_eq!(result.value, Some(3.5));
    }

    #[test]
    fn test_whitespace_padded_strings() {
        let values = vec![json!(" 10 ")];
        let result = coerce(&values, AggregateOp::Sum);
        assert_eq!(result.value, Some(10.0));
    }

    #[test]
    fn test_empty_input_distinct_error() {
        let result = coerce(&[], AggregateOp::Sum);

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("empty input"));
        assert_eq!(result.valid_count, 0);
        assert!(result.ignored.is_empty());
    }

    #[test]
    fn test_all_invalid_distinct_error() {
        let values = vec![json!("x"), json!("y")];
        let result = coerce(&values, AggregateOp::Sum);

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("no valid numeric values"));
        assert_eq!(result.valid_count, 0);
        assert_eq!(result.ignored.len(), 2);
    }

    #[test]
    fn test_every_element_is_classified_exactly_once() {
        let values = vec![json!(1), json!(null), json!([2]), json!({"a": 1}), json!(true)];
        let result = coerce(&values, AggregateOp::Sum);

        assert_eq!(result.valid_count + result.ignored.len(), values.len());
        let indices: Vec<usize> = result.ignored.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        let values = vec![json!("inf"), json!("NaN"), json!("1")];
        let result = coerce(&values, AggregateOp::Sum);

        assert_eq!(result.valid_count, 1);
        assert_eq!(result.ignored.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let values = vec![json!("bad"), json!(2)];
        let result = coerce(&values, AggregateOp::Sum);
        let serialized = serde_json::to_value(&result).unwrap();

        assert_eq!(serialized["success"], true);
        assert_eq!(serialized["value"], 2.0);
        assert_eq!(serialized["valid_count"], 1);
        assert_eq!(serialized["ignored"][0]["index"], 0);
        assert_eq!(serialized["ignored"][0]["value"], "bad");
        assert!(serialized.get("error").is_none());
    }
}
