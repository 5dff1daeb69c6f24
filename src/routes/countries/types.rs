use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::countries;
use crate::error::AppResult;
use crate::payload::Payload;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountryResponse {
    pub id: i32,
    #[serde(rename = "nume")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<countries::Model> for CountryResponse {
    fn from(c: countries::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            lat: c.lat,
            lon: c.lon,
        }
    }
}

/// Country fields accepted on create and update.
///
/// `id` is ignored on create and required on update, where the path id wins.
#[derive(Debug, ToSchema)]
pub struct CountryInput {
    pub id: Option<i64>,
    #[schema(rename = "nume")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl CountryInput {
    pub fn for_create(payload: &Payload) -> AppResult<Self> {
        payload.require(&["nume", "lat", "lon"])?;
        Ok(Self {
            id: None,
            lat: payload.number("lat")?,
            lon: payload.number("lon")?,
            name: payload.string("nume")?,
        })
    }

    pub fn for_update(payload: &Payload) -> AppResult<Self> {
        payload.require(&["id", "nume", "lat", "lon"])?;
        Ok(Self {
            lat: payload.number("lat")?,
            lon: payload.number("lon")?,
            name: payload.string("nume")?,
            id: Some(payload.integer("id")?),
        })
    }
}
