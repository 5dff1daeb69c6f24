use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    sea_query::SimpleExpr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::common::AppState;
use crate::entity::{cities, temperatures};
use crate::error::{AppError, AppResult, OrFailed};
use crate::filters::{conjunction, TemperatureFilter};
use crate::payload::Payload;
use crate::routes::ensure_city_exists;
use crate::routes::extract::PathId;
use crate::routes::types::{CreatedResponse, MessageResponse};

use super::types::{TemperatureInput, TemperatureQuery, TemperatureResponse};

/// Run the shared temperature filter plus an optional identity predicate
/// against temperatures joined with their city.
async fn fetch_temperatures(
    db: &DatabaseConnection,
    filter: &TemperatureFilter,
    scope: Option<SimpleExpr>,
    operation: &'static str,
) -> AppResult<Vec<TemperatureResponse>> {
    tracing::debug!(?filter, "Temperature filter");

    let mut predicates = filter.predicates();
    predicates.extend(scope);

    let rows = temperatures::Entity::find()
        .join(JoinType::InnerJoin, temperatures::Relation::City.def())
        .filter(conjunction(predicates))
        .order_by_asc(temperatures::Column::Id)
        .all(db)
        .await
        .or_failed(operation)?;

    Ok(rows.into_iter().map(TemperatureResponse::from).collect())
}

/// Record a temperature for an existing city
///
/// The timestamp is set to the server's current time.
#[utoipa::path(
    post,
    path = "/api/temperatures",
    request_body = TemperatureInput,
    responses(
        (status = 201, description = "Temperature recorded", body = CreatedResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 404, description = "City does not exist"),
        (status = 500, description = "Temperature could not be recorded"),
    ),
    tag = "temperatures"
)]
pub async fn create_temperature(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    const OP: &str = "Failed to create temperature";

    let input = TemperatureInput::from_payload(&Payload::parse(&body)?)?;

    let city_id = ensure_city_exists(&state.db, input.city_id, OP).await?;

    // (city_id, timestamp) uniqueness is left to the store's constraint.
    let temperature = temperatures::ActiveModel {
        city_id: Set(city_id),
        value: Set(input.value),
        timestamp: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .or_failed(OP)?;

    tracing::info!(
        temperature_id = temperature.id,
        city_id = temperature.city_id,
        value = temperature.value,
        "Temperature created"
    );
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: temperature.id })))
}

/// List temperatures, optionally filtered
#[utoipa::path(
    get,
    path = "/api/temperatures",
    params(TemperatureQuery),
    responses(
        (status = 200, description = "Temperatures retrieved successfully", body = Vec<TemperatureResponse>),
        (status = 500, description = "Malformed filter or query failure"),
    ),
    tag = "temperatures"
)]
pub async fn list_temperatures(
    State(state): State<AppState>,
    query: TemperatureQuery,
) -> AppResult<Json<Vec<TemperatureResponse>>> {
    const OP: &str = "Failed to fetch temperatures";

    let filter = query.filter().or_failed(OP)?;
    let rows = fetch_temperatures(&state.db, &filter, None, OP).await?;
    Ok(Json(rows))
}

/// List temperatures of one city, optionally filtered
#[utoipa::path(
    get,
    path = "/api/temperatures/cities/{id}",
    params(
        ("id" = i32, Path, description = "City id"),
        TemperatureQuery,
    ),
    responses(
        (status = 200, description = "Temperatures retrieved successfully", body = Vec<TemperatureResponse>),
        (status = 500, description = "Malformed filter or query failure"),
    ),
    tag = "temperatures"
)]
pub async fn list_temperatures_by_city(
    State(state): State<AppState>,
    PathId(id): PathId,
    query: TemperatureQuery,
) -> AppResult<Json<Vec<TemperatureResponse>>> {
    const OP: &str = "Failed to fetch city temperatures";

    // Parse first so malformed filters fail even for ids that match nothing.
    let filter = query.filter().or_failed(OP)?;
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };

    let rows = fetch_temperatures(
        &state.db,
        &filter,
        Some(temperatures::Column::CityId.eq(id)),
        OP,
    )
    .await?;
    Ok(Json(rows))
}

/// List temperatures of every city in one country, optionally filtered
#[utoipa::path(
    get,
    path = "/api/temperatures/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country id"),
        TemperatureQuery,
    ),
    responses(
        (status = 200, description = "Temperatures retrieved successfully", body = Vec<TemperatureResponse>),
        (status = 500, description = "Malformed filter or query failure"),
    ),
    tag = "temperatures"
)]
pub async fn list_temperatures_by_country(
    State(state): State<AppState>,
    PathId(id): PathId,
    query: TemperatureQuery,
) -> AppResult<Json<Vec<TemperatureResponse>>> {
    const OP: &str = "Failed to fetch country temperatures";

    let filter = query.filter().or_failed(OP)?;
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };

    let rows = fetch_temperatures(
        &state.db,
        &filter,
        Some(cities::Column::CountryId.eq(id)),
        OP,
    )
    .await?;
    Ok(Json(rows))
}

/// Change a temperature's value and city
///
/// The timestamp is not modifiable.
#[utoipa::path(
    put,
    path = "/api/temperatures/{id}",
    params(
        ("id" = i32, Path, description = "Temperature id"),
    ),
    request_body = TemperatureInput,
    responses(
        (status = 200, description = "Temperature updated", body = MessageResponse),
        (status = 400, description = "Missing fields or wrong field types"),
        (status = 404, description = "Temperature or target city not found"),
        (status = 500, description = "Temperature could not be updated"),
    ),
    tag = "temperatures"
)]
pub async fn update_temperature(
    State(state): State<AppState>,
    path_id: PathId,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    const OP: &str = "Failed to update temperature";

    let id = path_id.or_not_found("Temperature not found")?;
    let temperature = temperatures::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .or_failed(OP)?
        .ok_or_else(|| AppError::NotFound("Temperature not found".to_string()))?;

    let input = TemperatureInput::from_payload(&Payload::parse(&body)?)?;

    let city_id = ensure_city_exists(&state.db, input.city_id, OP).await?;

    let mut active: temperatures::ActiveModel = temperature.into();
    active.value = Set(input.value);
    active.city_id = Set(city_id);
    active.update(&state.db).await.or_failed(OP)?;

    tracing::info!(temperature_id = id, "Temperature updated");
    Ok(Json(MessageResponse::new("Temperature updated")))
}

/// Delete a temperature
#[utoipa::path(
    delete,
    path = "/api/temperatures/{id}",
    params(
        ("id" = i32, Path, description = "Temperature id"),
    ),
    responses(
        (status = 200, description = "Temperature deleted", body = MessageResponse),
        (status = 404, description = "Temperature not found"),
        (status = 500, description = "Temperature could not be deleted"),
    ),
    tag = "temperatures"
)]
pub async fn delete_temperature(
    State(state): State<AppState>,
    path_id: PathId,
) -> AppResult<Json<MessageResponse>> {
    let id = path_id.or_not_found("Temperature not found")?;
    let result = temperatures::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .or_failed("Failed to delete temperature")?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Temperature not found".to_string()));
    }

    tracing::info!(temperature_id = id, "Temperature deleted");
    Ok(Json(MessageResponse::new("Temperature deleted")))
}
