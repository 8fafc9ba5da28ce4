//! Tests for the input loader

use super::*;
use crate::error::Error;
use crate::query::{encode, Filter, ParameterSet};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::tempdir;
use test_case::test_case;

// ============================================================================
// CSV Tests
// ============================================================================

#[test]
fn test_csv_one_set_per_row() {
    let csv = "\
origin,startRange,endRange
AMS,2025-07-21T09:00:00Z,2025-07-23T23:59:59Z
CDG,2025-07-21T09:00:00Z,2025-07-23T23:59:59Z
";
    let sets = parse_parameter_csv(csv).unwrap();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0], ParameterSet::builtin_default().with(Filter::Origin, "AMS"));
    assert_eq!(sets[1].get(Filter::Origin), Some("CDG"));
}

#[test]
fn test_csv_blank_cells_are_omitted() {
    let csv = "origin,destination,startRange,endRange\nAMS,,2025-07-21T09:00:00Z,2025-07-23T23:59:59Z\n";
    let sets = parse_parameter_csv(csv).unwrap();

    assert_eq!(sets[0].get(Filter::Destination), None);
    assert_eq!(
        encode(&sets[0]).as_str(),
        encode(&ParameterSet::builtin_default().with(Filter::Origin, "AMS")).as_str()
    );
}

#[test]
fn test_csv_short_rows_are_padded() {
    let sets = parse_parameter_csv("origin,destination\nAMS\n").unwrap();
    assert_eq!(sets[0].len(), 1);
}

#[test_case("\"KL, AF\"" ; "quoted comma list")]
#[test_case("KL;AF" ; "semicolon list")]
#[test_case("\" KL ; AF ;\"" ; "padded list")]
fn test_csv_list_cells(cell: &str) {
    let csv = format!("carrierCode\n{cell}\n");
    let sets = parse_parameter_csv(&csv).unwrap();
    assert_eq!(sets[0].get(Filter::CarrierCode), Some("KL,AF"));
}

#[test]
fn test_csv_unknown_column() {
    let err = parse_parameter_csv("origin,gate\nAMS,D7\n").unwrap_err();
    assert!(matches!(err, Error::UnknownFilter { ref name } if name == "gate"));
    assert!(err.is_config());
}

#[test]
fn test_csv_duplicate_column() {
    let err = parse_parameter_csv("origin,origin\nAMS,CDG\n").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_csv_too_many_cells() {
    let err = parse_parameter_csv("origin\nAMS,CDG\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_csv_skips_blank_lines() {
    let sets = parse_parameter_csv("\norigin\n\nAMS\n\nCDG\n").unwrap();
    assert_eq!(sets.len(), 2);
}

#[test]
fn test_csv_header_only() {
    assert!(parse_parameter_csv("origin,destination\n").unwrap().is_empty());
    assert!(parse_parameter_csv("").unwrap().is_empty());
}

// ============================================================================
// YAML Tests
// ============================================================================

#[test]
fn test_yaml_sets() {
    let yaml = r"
- origin: AMS
  startRange: 2025-07-21T09:00:00Z
  endRange: 2025-07-23T23:59:59Z
- origin: CDG
  carrierCode: [KL, AF]
  flightNumber: 1234
  destination: null
";
    let sets = parse_parameter_yaml(yaml).unwrap();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0], ParameterSet::builtin_default().with(Filter::Origin, "AMS"));
    assert_eq!(sets[1].get(Filter::CarrierCode), Some("KL,AF"));
    assert_eq!(sets[1].get(Filter::FlightNumber), Some("1234"));
    assert_eq!(sets[1].get(Filter::Destination), None);
}

#[test]
fn test_yaml_list_as_string() {
    let sets = parse_parameter_yaml("- operatingAirlineCode: 'KL; AF'\n").unwrap();
    assert_eq!(sets[0].get(Filter::OperatingAirlineCode), Some("KL,AF"));
}

#[test]
fn test_yaml_unknown_key() {
    let err = parse_parameter_yaml("- terminal: 2\n").unwrap_err();
    assert!(matches!(err, Error::UnknownFilter { .. }));
}

#[test]
fn test_yaml_list_on_scalar_filter() {
    let err = parse_parameter_yaml("- origin: [AMS, CDG]\n").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_yaml_not_a_list() {
    let err = parse_parameter_yaml("origin: AMS\n").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_no_table_uses_builtin_default() {
    let sets = load_parameter_sets(None).unwrap();
    assert_eq!(sets, vec![ParameterSet::builtin_default()]);
}

#[test]
fn test_load_csv_and_yaml_files() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("params.csv");
    let yaml = dir.path().join("params.YML");
    std::fs::write(&csv, "origin\nAMS\n").unwrap();
    std::fs::write(&yaml, "- origin: AMS\n").unwrap();

    assert_eq!(
        load_parameter_sets(Some(csv.as_path())).unwrap(),
        load_parameter_sets(Some(yaml.as_path())).unwrap()
    );
}

#[test]
fn test_load_empty_table_is_error() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("params.csv");
    std::fs::write(&csv, "origin\n").unwrap();

    assert!(load_parameter_sets(Some(csv.as_path())).unwrap_err().is_config());
}

#[test_case("params.json" ; "json extension")]
#[test_case("params" ; "no extension")]
fn test_load_unsupported_extension(name: &str) {
    let err = load_parameter_sets(Some(Path::new(name))).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_load_missing_table() {
    let err = load_parameter_sets(Some(Path::new("/nonexistent/params.csv"))).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

// ============================================================================
// Credential Tests
// ============================================================================

#[test]
fn test_parse_credentials() {
    let content = "\
# production keys
  key-a

key-b
#key-c
";
    let tokens: Vec<String> = parse_credentials(content)
        .iter()
        .map(|c| c.token().to_string())
        .collect();
    assert_eq!(tokens, vec!["key-a", "key-b"]);
}

#[test]
fn test_load_credentials_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keys.txt");
    std::fs::write(&path, "key-a\r\nkey-b\r\n").unwrap();

    let credentials = load_credentials(&path).unwrap();
    assert_eq!(credentials.len(), 2);
    assert_eq!(credentials[0].token(), "key-a");
}

#[test]
fn test_load_credentials_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keys.txt");
    std::fs::write(&path, "# none yet\n\n").unwrap();

    assert!(load_credentials(&path).unwrap_err().is_config());
}

#[test]
fn test_load_credentials_missing_file() {
    let err = load_credentials("/nonexistent/keys.txt").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
