//! Query types
//!
//! Filter names, parameter sets, and the encoded query string.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Filter
// ============================================================================

/// A filter recognized by the flight status API.
///
/// Variant order is the canonical encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    /// Registration code of the aircraft (e.g. `PHBEF`)
    AircraftRegistration,
    /// Type of aircraft (e.g. `737`)
    AircraftType,
    /// Airport code of the arrival city
    ArrivalCity,
    /// Airline codes, 2-pos IATA or 3-pos ICAO
    CarrierCode,
    /// System the request is launched from
    ConsumerHost,
    /// IATA departure city code
    DepartureCity,
    /// Destination airport
    Destination,
    /// Flight number
    FlightNumber,
    /// `A` (arrival) or `D` (departure) focus
    MovementType,
    /// Operating airline codes
    OperatingAirlineCode,
    /// Flight advanced or delayed to the previous or next day
    OperationalSuffix,
    /// Departure airport
    Origin,
    /// Items per page
    PageSize,
    /// IATA service type codes
    ServiceType,
    /// `S`, `M`, `I` or `P`
    TimeOriginType,
    /// `U` (UTC) or `L` (local)
    TimeType,
    /// End of the date-time window
    EndRange,
    /// Start of the date-time window
    StartRange,
}

impl Filter {
    /// All filters in canonical order
    pub const ALL: [Filter; 18] = [
        Filter::AircraftRegistration,
        Filter::AircraftType,
        Filter::ArrivalCity,
        Filter::CarrierCode,
        Filter::ConsumerHost,
        Filter::DepartureCity,
        Filter::Destination,
        Filter::FlightNumber,
        Filter::MovementType,
        Filter::OperatingAirlineCode,
        Filter::OperationalSuffix,
        Filter::Origin,
        Filter::PageSize,
        Filter::ServiceType,
        Filter::TimeOriginType,
        Filter::TimeType,
        Filter::EndRange,
        Filter::StartRange,
    ];

    /// Query parameter name as the API spells it
    pub fn name(self) -> &'static str {
        match self {
            Filter::AircraftRegistration => "aircraftRegistration",
            Filter::AircraftType => "aircraftType",
            Filter::ArrivalCity => "arrivalCity",
            Filter::CarrierCode => "carrierCode",
            Filter::ConsumerHost => "consumerHost",
            Filter::DepartureCity => "departureCity",
            Filter::Destination => "destination",
            Filter::FlightNumber => "flightNumber",
            Filter::MovementType => "movementType",
            Filter::OperatingAirlineCode => "operatingAirlineCode",
            Filter::OperationalSuffix => "operationalSuffix",
            Filter::Origin => "origin",
            Filter::PageSize => "pageSize",
            Filter::ServiceType => "serviceType",
            Filter::TimeOriginType => "timeOriginType",
            Filter::TimeType => "timeType",
            Filter::EndRange => "endRange",
            Filter::StartRange => "startRange",
        }
    }

    /// Whether the API takes a comma-separated list for this filter
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Filter::CarrierCode | Filter::OperatingAirlineCode | Filter::ServiceType
        )
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == s)
            .ok_or_else(|| Error::UnknownFilter {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// Parameter Set
// ============================================================================

/// One combination of filter values defining a query.
///
/// An empty value means the filter is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<Filter, String>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// The parameter set used when no parameter table is supplied
    pub fn builtin_default() -> Self {
        Self::new()
            .with(Filter::EndRange, "2025-07-23T23:59:59Z")
            .with(Filter::StartRange, "2025-07-21T09:00:00Z")
    }

    /// Set a filter value
    #[must_use]
    pub fn with(mut self, filter: Filter, value: impl Into<String>) -> Self {
        self.set(filter, value);
        self
    }

    /// Set a list-valued filter, joining the items with commas
    #[must_use]
    pub fn with_list<I, S>(mut self, filter: Filter, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_list(filter, items);
        self
    }

    /// Set a filter value
    pub fn set(&mut self, filter: Filter, value: impl Into<String>) {
        self.values.insert(filter, value.into());
    }

    /// Set a list-valued filter, joining the items with commas
    pub fn set_list<I, S>(&mut self, filter: Filter, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self.values.insert(filter, joined);
    }

    /// Get the raw value of a filter, if present
    pub fn get(&self, filter: Filter) -> Option<&str> {
        self.values.get(&filter).map(String::as_str)
    }

    /// `startRange` value
    pub fn start_range(&self) -> Option<&str> {
        self.get(Filter::StartRange)
    }

    /// `endRange` value
    pub fn end_range(&self) -> Option<&str> {
        self.get(Filter::EndRange)
    }

    /// Iterate over the stored filters in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Filter, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of stored filters (set or blank)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no filter is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Encoded Query
// ============================================================================

/// Canonical `name=value&...` string of a parameter set's non-empty filters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedQuery(String);

impl EncodedQuery {
    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// The query string as sent to the API
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no filter made it into the query
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Filesystem-safe key used in artifact names.
    ///
    /// `:` (from date-times) and path separators become `_`.
    pub fn storage_key(&self) -> String {
        self.0.replace([':', '/', '\\'], "_")
    }

    /// Query string for a single page request
    pub fn with_page(&self, page: u32) -> String {
        if self.0.is_empty() {
            format!("pageNumber={page}")
        } else {
            format!("{}&pageNumber={page}", self.0)
        }
    }
}

impl fmt::Display for EncodedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
