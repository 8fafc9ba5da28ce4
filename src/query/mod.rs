//! Query module
//!
//! Turns parameter sets into the canonical query strings used both on the
//! wire and as artifact keys.
//!
//! # Overview
//!
//! - `Filter` - the fixed, ordered set of filters the flight status API knows
//! - `ParameterSet` - one combination of filter values
//! - `EncodedQuery` - canonical `name=value&...` encoding of a parameter set
//! - `encode` / `validate_range` - the pure encoder and the date range check

mod encoder;
mod types;

pub use encoder::{encode, parse_range_bound, validate_range};
pub use types::{EncodedQuery, Filter, ParameterSet};
