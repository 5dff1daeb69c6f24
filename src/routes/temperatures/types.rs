use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::temperatures;
use crate::error::AppResult;
use crate::filters::{FilterError, TemperatureFilter, DATE_FORMAT};
use crate::payload::Payload;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemperatureResponse {
    pub id: i32,
    #[serde(rename = "valoare")]
    pub value: f64,
    /// Day of the reading, `YYYY-MM-DD`
    pub timestamp: String,
}

impl From<temperatures::Model> for TemperatureResponse {
    fn from(t: temperatures::Model) -> Self {
        Self {
            id: t.id,
            value: t.value,
            timestamp: t.timestamp.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Temperature fields accepted on create and update. The timestamp is always
/// assigned by the server.
#[derive(Debug, ToSchema)]
pub struct TemperatureInput {
    #[schema(rename = "idOras")]
    pub city_id: i64,
    #[schema(rename = "valoare")]
    pub value: f64,
}

impl TemperatureInput {
    pub fn from_payload(payload: &Payload) -> AppResult<Self> {
        payload.require(&["idOras", "valoare"])?;
        Ok(Self {
            city_id: payload.integer("idOras")?,
            value: payload.number("valoare")?,
        })
    }
}

/// Optional temperature filters. Values are kept raw so malformed input
/// fails the request instead of being dropped by the extractor.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemperatureQuery {
    /// Exact city latitude
    pub lat: Option<String>,
    /// Exact city longitude
    pub lon: Option<String>,
    /// Inclusive lower bound, YYYY-MM-DD
    pub from: Option<String>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub until: Option<String>,
}

impl TemperatureQuery {
    pub fn filter(&self) -> Result<TemperatureFilter, FilterError> {
        TemperatureFilter::parse(
            self.lat.as_deref(),
            self.lon.as_deref(),
            self.from.as_deref(),
            self.until.as_deref(),
        )
    }
}
