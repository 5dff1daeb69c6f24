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
use crate::entity::countries;
use crate::error::{AppError, AppResult, OrFailed};
use crate::payload::Payload;
use crate::routes::extract::PathId;
use crate::routes::types::{CreatedResponse, MessageResponse};

use super::types::{CountryInput, CountryResponse};

async fn name_taken(state: &AppState, name: &str, operation: &'static str) -> AppResult<bool> {
    let count = countries::Entity::find()
        .filter(countries::Column::Name.eq(name))
        .count(&state.db)
        .await
        .or_failed(operation)?;
    Ok(count > 0)
}

/// Create a country
#[utoipa::path(
    post,
    path = "/api/countries",
    request_body = CountryInput,
    responses(
        (status = 201, description = "Country created", body = CreatedResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 409, description = "A country with this name already exists"),
        (status = 500, description = "Country could not be created"),
    ),
    tag = "countries"
)]
pub async fn create_country(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    const OP: &str = "Failed to create country";

    let input = CountryInput::for_create(&Payload::parse(&body)?)?;

    if name_taken(&state, &input.name, OP).await? {
        tracing::debug!(name = %input.name, "Country name already taken");
        return Err(AppError::Conflict("Country already exists".to_string()));
    }

    let country = countries::ActiveModel {
        name: Set(input.name),
        lat: Set(input.lat),
        lon: Set(input.lon),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .or_failed(OP)?;

    tracing::info!(country_id = country.id, name = %country.name, "Country created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: country.id })))
}

/// List all countries
#[utoipa::path(
    get,
    path = "/api/countries",
    responses(
        (status = 200, description = "Countries retrieved successfully", body = Vec<CountryResponse>),
        (status = 500, description = "Countries could not be fetched"),
    ),
    tag = "countries"
)]
pub async fn list_countries(State(state): State<AppState>) -> AppResult<Json<Vec<CountryResponse>>> {
    let countries_list = countries::Entity::find()
        .order_by_asc(countries::Column::Id)
        .all(&state.db)
        .await
        .or_failed("Failed to fetch countries")?;

    Ok(Json(
        countries_list.into_iter().map(CountryResponse::from).collect(),
    ))
}

/// Replace a country's name and coordinates
///
/// Every field, `id` included, must be present. Any existing country with the
/// requested name is a conflict, including the country being updated.
#[utoipa::path(
    put,
    path = "/api/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country id"),
    ),
    request_body = CountryInput,
    responses(
        (status = 200, description = "Country updated", body = MessageResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 404, description = "Country not found"),
        (status = 409, description = "A country with this name already exists"),
        (status = 500, description = "Country could not be updated"),
    ),
    tag = "countries"
)]
pub async fn update_country(
    State(state): State<AppState>,
    path_id: PathId,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    const OP: &str = "Failed to update country";

    let id = path_id.or_not_found("Country not found")?;
    let country = countries::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .or_failed(OP)?
        .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;

    let input = CountryInput::for_update(&Payload::parse(&body)?)?;
    if input.id != Some(i64::from(id)) {
        tracing::debug!(path_id = id, body_id = ?input.id, "Ignoring body id, path id wins");
    }

    if name_taken(&state, &input.name, OP).await? {
        tracing::debug!(country_id = id, name = %input.name, "Country name already taken");
        return Err(AppError::Conflict("Country already exists".to_string()));
    }

    let mut active: countries::ActiveModel = country.into();
    active.name = Set(input.name);
    active.lat = Set(input.lat);
    active.lon = Set(input.lon);
    active.update(&state.db).await.or_failed(OP)?;

    tracing::info!(country_id = id, "Country updated");
    Ok(Json(MessageResponse::new("Country updated")))
}

/// Delete a country together with its cities and their temperatures
#[utoipa::path(
    delete,
    path = "/api/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country id"),
    ),
    responses(
        (status = 200, description = "Country deleted", body = MessageResponse),
        (status = 404, description = "Country not found"),
        (status = 500, description = "Country could not be deleted"),
    ),
    tag = "countries"
)]
pub async fn delete_country(
    State(state): State<AppState>,
    path_id: PathId,
) -> AppResult<Json<MessageResponse>> {
    const OP: &str = "Failed to delete country";

    let id = path_id.or_not_found("Country not found")?;

    // Dependent rows go through the ON DELETE CASCADE foreign keys.
    let result = countries::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .or_failed(OP)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Country not found".to_string()));
    }

    tracing::info!(country_id = id, "Country deleted");
    Ok(Json(MessageResponse::new("Country deleted")))
}
