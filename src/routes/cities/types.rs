use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::cities;
use crate::error::AppResult;
use crate::payload::Payload;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CityResponse {
    pub id: i32,
    #[serde(rename = "nume")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "idTara")]
    pub country_id: i32,
}

impl From<cities::Model> for CityResponse {
    fn from(c: cities::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            lat: c.lat,
            lon: c.lon,
            country_id: c.country_id,
        }
    }
}

/// City fields accepted on create and update.
#[derive(Debug, ToSchema)]
pub struct CityInput {
    /// Required on update only; the path id is authoritative.
    pub id: Option<i64>,
    #[schema(rename = "nume")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[schema(rename = "idTara")]
    pub country_id: i64,
}

impl CityInput {
    pub fn for_create(payload: &Payload) -> AppResult<Self> {
        payload.require(&["nume", "lat", "lon", "idTara"])?;
        Ok(Self {
            id: None,
            lat: payload.number("lat")?,
            lon: payload.number("lon")?,
            name: payload.string("nume")?,
            country_id: payload.integer("idTara")?,
        })
    }

    pub fn for_update(payload: &Payload) -> AppResult<Self> {
        payload.require(&["id", "nume", "lat", "lon", "idTara"])?;
        Ok(Self {
            lat: payload.number("lat")?,
            lon: payload.number("lon")?,
            name: payload.string("nume")?,
            country_id: payload.integer("idTara")?,
            id: Some(payload.integer("id")?),
        })
    }
}
