use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::common::AppState;
use crate::entity::cities;
use crate::error::{AppError, AppResult, OrFailed};
use crate::payload::Payload;
use crate::routes::ensure_country_exists;
use crate::routes::extract::PathId;
use crate::routes::types::{CreatedResponse, MessageResponse};

use super::types::{CityInput, CityResponse};

/// Create a city inside an existing country
#[utoipa::path(
    post,
    path = "/api/cities",
    request_body = CityInput,
    responses(
        (status = 201, description = "City created", body = CreatedResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 404, description = "Country does not exist"),
        (status = 409, description = "The country already has a city with this name"),
        (status = 500, description = "City could not be created"),
    ),
    tag = "cities"
)]
pub async fn create_city(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    const OP: &str = "Failed to create city";

    let input = CityInput::for_create(&Payload::parse(&body)?)?;

    let country_id = ensure_country_exists(&state.db, input.country_id, OP).await?;

    let duplicates = cities::Entity::find()
        .filter(cities::Column::CountryId.eq(country_id))
        .filter(cities::Column::Name.eq(&input.name))
        .count(&state.db)
        .await
        .or_failed(OP)?;
    if duplicates > 0 {
        tracing::debug!(country_id, name = %input.name, "City already exists");
        return Err(AppError::Conflict("City already exists".to_string()));
    }

    let city = cities::ActiveModel {
        country_id: Set(country_id),
        name: Set(input.name),
        lat: Set(input.lat),
        lon: Set(input.lon),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .or_failed(OP)?;

    tracing::info!(city_id = city.id, country_id = city.country_id, "City created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: city.id })))
}

/// List all cities
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "Cities retrieved successfully", body = Vec<CityResponse>),
        (status = 500, description = "Cities could not be fetched"),
    ),
    tag = "cities"
)]
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<CityResponse>>> {
    let cities_list = cities::Entity::find()
        .order_by_asc(cities::Column::Id)
        .all(&state.db)
        .await
        .or_failed("Failed to fetch cities")?;

    Ok(Json(cities_list.into_iter().map(CityResponse::from).collect()))
}

/// List the cities of a country
///
/// An unknown country id yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/api/cities/country/{id}",
    params(
        ("id" = i32, Path, description = "Country id"),
    ),
    responses(
        (status = 200, description = "Cities retrieved successfully", body = Vec<CityResponse>),
        (status = 500, description = "Cities could not be fetched"),
    ),
    tag = "cities"
)]
pub async fn list_cities_by_country(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<CityResponse>>> {
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };

    let cities_list = cities::Entity::find()
        .filter(cities::Column::CountryId.eq(id))
        .order_by_asc(cities::Column::Id)
        .all(&state.db)
        .await
        .or_failed("Failed to fetch cities")?;

    Ok(Json(cities_list.into_iter().map(CityResponse::from).collect()))
}

/// Replace a city's fields
///
/// The duplicate check matches on name alone, across all countries.
#[utoipa::path(
    put,
    path = "/api/cities/{id}",
    params(
        ("id" = i32, Path, description = "City id"),
    ),
    request_body = CityInput,
    responses(
        (status = 200, description = "City updated", body = MessageResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 404, description = "City or target country not found"),
        (status = 409, description = "A city with this name already exists"),
        (status = 500, description = "City could not be updated"),
    ),
    tag = "cities"
)]
pub async fn update_city(
    State(state): State<AppState>,
    path_id: PathId,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    const OP: &str = "Failed to update city";

    let id = path_id.or_not_found("City not found")?;
    let city = cities::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .or_failed(OP)?
        .ok_or_else(|| AppError::NotFound("City not found".to_string()))?;

    let input = CityInput::for_update(&Payload::parse(&body)?)?;
    if input.id != Some(i64::from(id)) {
        tracing::debug!(path_id = id, body_id = ?input.id, "Ignoring body id, path id wins");
    }

    // TODO: match on (country_id, name) once renames across countries are confirmed as allowed
    let duplicates = cities::Entity::find()
        .filter(cities::Column::Name.eq(&input.name))
        .count(&state.db)
        .await
        .or_failed(OP)?;
    if duplicates > 0 {
        tracing::debug!(city_id = id, name = %input.name, "City name already taken");
        return Err(AppError::Conflict("City already exists".to_string()));
    }

    let country_id = ensure_country_exists(&state.db, input.country_id, OP).await?;

    let mut active: cities::ActiveModel = city.into();
    active.country_id = Set(country_id);
    active.name = Set(input.name);
    active.lat = Set(input.lat);
    active.lon = Set(input.lon);
    active.update(&state.db).await.or_failed(OP)?;

    tracing::info!(city_id = id, "City updated");
    Ok(Json(MessageResponse::new("City updated")))
}

/// Delete a city together with its temperatures
#[utoipa::path(
    delete,
    path = "/api/cities/{id}",
    params(
        ("id" = i32, Path, description = "City id"),
    ),
    responses(
        (status = 200, description = "City deleted", body = MessageResponse),
        (status = 404, description = "City not found"),
        (status = 500, description = "City could not be deleted"),
    ),
    tag = "cities"
)]
pub async fn delete_city(
    State(state): State<AppState>,
    path_id: PathId,
) -> AppResult<Json<MessageResponse>> {
    let id = path_id.or_not_found("City not found")?;
    let result = cities::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .or_failed("Failed to delete city")?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("City not found".to_string()));
    }

    tracing::info!(city_id = id, "City deleted");
    Ok(Json(MessageResponse::new("City deleted")))
}
