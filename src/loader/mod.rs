//! Input loader module
//!
//! Reads the parameter table and the credential file.
//!
//! # Overview
//!
//! The loader module provides:
//! - `load_parameter_sets` - CSV or YAML parameter table, or the built-in
//!   default set when no table is given
//! - `load_credentials` - newline-delimited API keys
//!
//! Parameter tables name their columns (CSV) or keys (YAML) after the API
//! filters; any other name is rejected.

mod credentials;
mod params;

pub use credentials::{load_credentials, parse_credentials};
pub use params::{
    load_parameter_sets, parse_parameter_csv, parse_parameter_yaml, ParameterFormat,
};

#[cfg(test)]
mod tests;
