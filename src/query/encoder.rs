//! Query encoding and range validation

use super::types::{EncodedQuery, Filter, ParameterSet};
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::LazyLock;

/// Any run of whitespace, stripped from filter values before encoding
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Encode a parameter set into its canonical query string.
///
/// Filters are visited in [`Filter::ALL`] order and only non-empty values
/// are emitted as `name=value`. No URL escaping is applied.
pub fn encode(params: &ParameterSet) -> EncodedQuery {
    let pairs: Vec<String> = Filter::ALL
        .into_iter()
        .filter_map(|filter| {
            let value = normalize(filter, params.get(filter)?);
            if value.is_empty() {
                None
            } else {
                Some(format!("{}={value}", filter.name()))
            }
        })
        .collect();

    EncodedQuery::new(pairs.join("&"))
}

fn normalize(filter: Filter, raw: &str) -> String {
    let stripped = WHITESPACE_REGEX.replace_all(raw, "");
    if filter.is_list() {
        // "KL,,AF," -> "KL,AF"
        stripped
            .split(',')
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        stripped.into_owned()
    }
}

/// Parse a `startRange`/`endRange` bound
pub fn parse_range_bound(filter: Filter, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| {
        Error::invalid_value(filter.name(), format!("'{value}' is not a date-time: {e}"))
    })
}

/// Check that `startRange <= endRange`.
///
/// Both bounds are required by the API, so a missing bound is an error too.
pub fn validate_range(params: &ParameterSet) -> Result<()> {
    let start = params
        .start_range()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::missing_field(Filter::StartRange.name()))?;
    let end = params
        .end_range()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::missing_field(Filter::EndRange.name()))?;

    let start_at = parse_range_bound(Filter::StartRange, start)?;
    let end_at = parse_range_bound(Filter::EndRange, end)?;

    if start_at > end_at {
        return Err(Error::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(())
}
