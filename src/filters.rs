//! Predicate composition for temperature queries.
//!
//! Every supplied criterion contributes one predicate; omitted criteria leave
//! that dimension unconstrained. The predicates target the temperatures table
//! joined with cities.
//!
//! Latitude and longitude are matched with exact floating-point equality, so
//! a caller must send the same value that was stored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{sea_query::SimpleExpr, ColumnTrait, Condition};

use crate::entity::{cities, temperatures};

/// Calendar-date format accepted by `from` / `until`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid {field} '{value}': {source}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("invalid {field} date '{value}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parsed temperature filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureFilter {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Inclusive lower bound, midnight of the given day.
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound, midnight of the given day.
    pub until: Option<NaiveDateTime>,
}

impl TemperatureFilter {
    /// Parse raw query values. Malformed values are errors, never ignored.
    pub fn parse(
        lat: Option<&str>,
        lon: Option<&str>,
        from: Option<&str>,
        until: Option<&str>,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            lat: lat.map(|v| parse_coordinate("lat", v)).transpose()?,
            lon: lon.map(|v| parse_coordinate("lon", v)).transpose()?,
            from: from.map(|v| parse_day("from", v)).transpose()?,
            until: until.map(|v| parse_day("until", v)).transpose()?,
        })
    }

    /// Predicates in lat, lon, from, until order.
    #[must_use]
    pub fn predicates(&self) -> Vec<SimpleExpr> {
        let mut predicates = Vec::new();

        if let Some(lat) = self.lat {
            predicates.push(cities::Column::Lat.eq(lat));
        }
        if let Some(lon) = self.lon {
            predicates.push(cities::Column::Lon.eq(lon));
        }
        if let Some(from) = self.from {
            predicates.push(temperatures::Column::Timestamp.gte(from));
        }
        if let Some(until) = self.until {
            predicates.push(temperatures::Column::Timestamp.lte(until));
        }

        predicates
    }
}

/// AND together a predicate list.
#[must_use]
pub fn conjunction(predicates: Vec<SimpleExpr>) -> Condition {
    predicates
        .into_iter()
        .fold(Condition::all(), |condition, predicate| condition.add(predicate))
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, FilterError> {
    value
        .trim()
        .parse()
        .map_err(|source| FilterError::InvalidCoordinate {
            field,
            value: value.to_string(),
            source,
        })
}

fn parse_day(field: &'static str, value: &str) -> Result<NaiveDateTime, FilterError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|day| day.and_time(NaiveTime::MIN))
        .map_err(|source| FilterError::InvalidDate {
            field,
            value: value.to_string(),
            source,
        })
}
