//! Parameter table parsing
//!
//! Supports CSV (header row of filter names, one parameter set per row)
//! and YAML (a list of filter-name to value maps).

use crate::error::{Error, Result};
use crate::query::{Filter, ParameterSet};
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Separators accepted between the items of a list filter
const LIST_SEPARATORS: [char; 2] = [',', ';'];

/// On-disk format of a parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterFormat {
    /// Comma separated, header row first
    Csv,
    /// Sequence of mappings
    Yaml,
}

impl ParameterFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::invalid_value(
                "params",
                format!(
                    "'{}' must have a .csv, .yaml or .yml extension",
                    path.display()
                ),
            )),
        }
    }
}

/// Load the parameter sets of a run.
///
/// Without a path the built-in default set is used.
pub fn load_parameter_sets(path: Option<&Path>) -> Result<Vec<ParameterSet>> {
    let Some(path) = path else {
        debug!("No parameter table given, using the built-in default set");
        return Ok(vec![ParameterSet::builtin_default()]);
    };

    let format = ParameterFormat::from_path(path)?;
    let content = read_input(path, "parameter table")?;
    let sets = match format {
        ParameterFormat::Csv => parse_parameter_csv(&content)?,
        ParameterFormat::Yaml => parse_parameter_yaml(&content)?,
    };

    if sets.is_empty() {
        return Err(Error::config(format!(
            "Parameter table '{}' defines no parameter sets",
            path.display()
        )));
    }

    debug!("Loaded {} parameter set(s) from {}", sets.len(), path.display());
    Ok(sets)
}

/// Parse a CSV parameter table
pub fn parse_parameter_csv(content: &str) -> Result<Vec<ParameterSet>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Ok(Vec::new());
    };

    let headers = parse_csv_line(header_line.trim_start_matches('\u{feff}'))
        .iter()
        .map(|name| Filter::from_str(name))
        .collect::<Result<Vec<_>>>()?;
    check_unique(&headers)?;

    let mut sets = Vec::new();
    for (line_no, line) in lines {
        let cells = parse_csv_line(line);
        if cells.len() > headers.len() {
            return Err(Error::config(format!(
                "Parameter table line {} has {} cells but the header has {}",
                line_no + 1,
                cells.len(),
                headers.len()
            )));
        }

        let mut params = ParameterSet::new();
        for (filter, cell) in headers.iter().zip(&cells) {
            set_text(&mut params, *filter, cell);
        }
        sets.push(params);
    }

    Ok(sets)
}

/// Parse a YAML parameter table
pub fn parse_parameter_yaml(content: &str) -> Result<Vec<ParameterSet>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<serde_yaml::Mapping> = serde_yaml::from_str(content)?;
    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_yaml_row(index, row))
        .collect()
}

fn parse_yaml_row(index: usize, row: &serde_yaml::Mapping) -> Result<ParameterSet> {
    let mut params = ParameterSet::new();

    for (key, value) in row {
        let name = key.as_str().ok_or_else(|| {
            Error::config(format!("Parameter set {index} has a non-string key"))
        })?;
        let filter = Filter::from_str(name)?;

        match value {
            YamlValue::Null => {}
            YamlValue::Sequence(items) => {
                let items = items
                    .iter()
                    .map(|item| scalar_text(filter, item))
                    .collect::<Result<Vec<_>>>()?;
                if !filter.is_list() && items.len() > 1 {
                    return Err(Error::invalid_value(
                        filter.name(),
                        "only list filters accept several values",
                    ));
                }
                params.set_list(filter, items);
            }
            scalar => {
                let text = scalar_text(filter, scalar)?;
                set_text(&mut params, filter, &text);
            }
        }
    }

    Ok(params)
}

fn scalar_text(filter: Filter, value: &YamlValue) -> Result<String> {
    match value {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::invalid_value(
            filter.name(),
            "expected a string, number or list",
        )),
    }
}

/// Store a cell; blank cells leave the filter unset
fn set_text(params: &mut ParameterSet, filter: Filter, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if filter.is_list() {
        params.set_list(filter, text.split(LIST_SEPARATORS));
    } else {
        params.set(filter, text);
    }
}

fn check_unique(headers: &[Filter]) -> Result<()> {
    let mut seen = HashSet::new();
    for filter in headers {
        if !seen.insert(*filter) {
            return Err(Error::config(format!(
                "Filter '{filter}' appears more than once in the header"
            )));
        }
    }
    Ok(())
}

/// Parse a CSV line into fields
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Read an input file, mapping a missing file to `FileNotFound`
pub(super) fn read_input(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read {what} '{}': {e}",
                path.display()
            ))
        }
    })
}
