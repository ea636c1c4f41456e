//! Wire types shared by the extractor, the option lister and the HTTP layer.

use serde::{Deserialize, Serialize};

/// One point of an indicator time series.
///
/// `filing_date` is never empty and `count` is always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub filing_date: String,
    pub count: f64,
}

/// Points for a single component, in the row order of the source file.
pub type IndicatorSeries = Vec<IndicatorPoint>;

/// A dropdown entry for a widget parameter.
///
/// `value` is the raw `component` value and the only thing ever used for
/// filtering; `label` is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOption {
    pub value: String,
    pub label: String,
}

impl ComponentOption {
    /// Builds an option whose label is the value with underscores turned
    /// into spaces, title-cased.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = title_case(&value.replace('_', " "));
        Self { value, label }
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest. Any non-letter (space, digit, punctuation) starts a new run, so
/// `"ipo 2x"` becomes `"Ipo 2X"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
