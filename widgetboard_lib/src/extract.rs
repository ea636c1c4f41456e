//! Indicator extraction: turns a raw `filing_date,count,component` CSV into
//! the series for one component.
//!
//! Bad rows are dropped, never fatal. When nothing survives, the text is
//! parsed a second time to tell an unknown component apart from a known
//! component whose rows are all unusable.

use std::collections::BTreeSet;

use csv::StringRecord;
use thiserror::Error;

use crate::types::{IndicatorPoint, IndicatorSeries};

pub const FILING_DATE: &str = "filing_date";
pub const COUNT: &str = "count";
pub const COMPONENT: &str = "component";

/// Columns every indicator CSV must carry, in any order.
pub const REQUIRED_HEADERS: [&str; 3] = [FILING_DATE, COUNT, COMPONENT];

/// How many valid components an "unknown component" error lists.
pub const MAX_SAMPLES: usize = 5;

/// Largest single field accepted, in characters.
pub const MAX_FIELD_SIZE: usize = 131_072;

/// Why an extraction produced no points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotFoundCause {
    /// The component does not appear anywhere in the file.
    #[error(
        "Component type '{discriminator}' not found. Available: {}{}",
        .samples.join(", "),
        ellipsis(.more)
    )]
    UnknownComponent {
        discriminator: String,
        /// Up to [`MAX_SAMPLES`] components that do exist.
        samples: Vec<String>,
        /// Set when the file holds more components than `samples`.
        more: bool,
    },
    /// The component exists but every one of its rows lacked a date or a numeric count.
    #[error("No data found for component type '{discriminator}' with valid counts and filing dates.")]
    NoUsableData { discriminator: String },
}

/// Errors from [`extract_series`].
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The text is not usable CSV. The reader itself is lenient (ragged
    /// rows are read as-is), so in practice this is an oversized field.
    #[error("Error parsing CSV: {0}")]
    Parse(String),
    /// One or more required columns are missing from the header row.
    #[error(
        "CSV missing headers. Expected: [{}]. Found: {}. Missing: [{}]",
        .expected.join(", "),
        found_list(.found),
        .missing.join(", ")
    )]
    Schema {
        expected: Vec<String>,
        found: Vec<String>,
        missing: Vec<String>,
    },
    #[error(transparent)]
    NotFound(#[from] NotFoundCause),
}

fn ellipsis(more: &bool) -> &'static str {
    if *more {
        "..."
    } else {
        ""
    }
}

fn found_list(found: &[String]) -> String {
    if found.is_empty() {
        "None".to_string()
    } else {
        found.join(", ")
    }
}

impl From<csv::Error> for ExtractError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Column positions of the required headers.
struct Columns {
    filing_date: usize,
    count: usize,
    component: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, ExtractError> {
        match (
            position(headers, FILING_DATE),
            position(headers, COUNT),
            position(headers, COMPONENT),
        ) {
            (Some(filing_date), Some(count), Some(component)) => Ok(Self {
                filing_date,
                count,
                component,
            }),
            _ => Err(schema_error(headers)),
        }
    }
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn schema_error(headers: &[String]) -> ExtractError {
    ExtractError::Schema {
        expected: REQUIRED_HEADERS.iter().map(|h| h.to_string()).collect(),
        found: headers.to_vec(),
        missing: REQUIRED_HEADERS
            .iter()
            .filter(|h| position(headers, h).is_none())
            .map(|h| h.to_string())
            .collect(),
    }
}

fn reader(raw: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        // Short rows are allowed; their missing cells count as empty.
        .flexible(true)
        .from_reader(raw.trim_start_matches('\u{feff}').as_bytes())
}

fn header_names(rdr: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, ExtractError> {
    let headers = rdr.headers()?;
    check_field_sizes(headers)?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

fn check_field_sizes(record: &StringRecord) -> Result<(), ExtractError> {
    let oversized = record
        .iter()
        .any(|field| field.len() > MAX_FIELD_SIZE && field.chars().count() > MAX_FIELD_SIZE);
    if oversized {
        return Err(ExtractError::Parse(format!(
            "field larger than field limit ({})",
            MAX_FIELD_SIZE
        )));
    }
    Ok(())
}

/// Filters `raw` down to the rows whose `component` equals `discriminator`.
///
/// Rows with an empty `filing_date` or a missing, empty, unparseable or
/// non-finite `count` are skipped. Output keeps file order.
pub fn extract_series(raw: &str, discriminator: &str) -> Result<IndicatorSeries, ExtractError> {
    let mut rdr = reader(raw);
    let headers = header_names(&mut rdr)?;
    let columns = Columns::locate(&headers)?;

    let mut series = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        check_field_sizes(&record)?;
        if record.get(columns.component) != Some(discriminator) {
            continue;
        }
        match parse_point(&record, &columns) {
            Some(point) => series.push(point),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(
            "Skipped {} unusable rows for component '{}'",
            skipped,
            discriminator
        );
    }

    if !series.is_empty() {
        return Ok(series);
    }

    let components = distinct_components(raw)?;
    if components.contains(discriminator) {
        return Err(NotFoundCause::NoUsableData {
            discriminator: discriminator.to_string(),
        }
        .into());
    }
    Err(NotFoundCause::UnknownComponent {
        discriminator: discriminator.to_string(),
        samples: components.iter().take(MAX_SAMPLES).cloned().collect(),
        more: components.len() > MAX_SAMPLES,
    }
    .into())
}

fn parse_point(record: &StringRecord, columns: &Columns) -> Option<IndicatorPoint> {
    let filing_date = record.get(columns.filing_date)?;
    if filing_date.trim().is_empty() {
        return None;
    }
    let count = record.get(columns.count)?.trim();
    if count.is_empty() {
        return None;
    }
    let count = count.parse::<f64>().ok().filter(|c| c.is_finite())?;
    Some(IndicatorPoint {
        filing_date: filing_date.to_string(),
        count,
    })
}

/// Every distinct non-empty `component` value in `raw`.
///
/// Only the `component` header is required here.
pub fn distinct_components(raw: &str) -> Result<BTreeSet<String>, ExtractError> {
    let mut rdr = reader(raw);
    let headers = header_names(&mut rdr)?;
    let idx = position(&headers, COMPONENT).ok_or_else(|| schema_error(&headers))?;

    let mut components = BTreeSet::new();
    for result in rdr.records() {
        let record = result?;
        check_field_sizes(&record)?;
        if let Some(component) = record.get(idx).filter(|c| !c.is_empty()) {
            if !components.contains(component) {
                components.insert(component.to_string());
            }
        }
    }
    Ok(components)
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
