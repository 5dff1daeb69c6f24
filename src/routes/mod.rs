pub mod cities;
pub mod countries;
pub mod extract;
pub mod health;
pub mod temperatures;
pub mod types;

use axum::{
    routing::{get, put},
    Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::entity;
use crate::error::{AppError, AppResult, OrFailed};

/// Fail with `NotFound` unless the country exists; returns its id
pub async fn ensure_country_exists(
    db: &DatabaseConnection,
    country_id: i64,
    operation: &'static str,
) -> AppResult<i32> {
    let not_found = || {
        tracing::debug!(country_id, "Referenced country does not exist");
        AppError::NotFound("Country does not exist".to_string())
    };

    let Ok(id) = i32::try_from(country_id) else {
        return Err(not_found());
    };
    let count = entity::countries::Entity::find()
        .filter(entity::countries::Column::Id.eq(id))
        .count(db)
        .await
        .or_failed(operation)?;

    if count == 0 {
        return Err(not_found());
    }
    Ok(id)
}

/// Fail with `NotFound` unless the city exists; returns its id
pub async fn ensure_city_exists(
    db: &DatabaseConnection,
    city_id: i64,
    operation: &'static str,
) -> AppResult<i32> {
    let not_found = || {
        tracing::debug!(city_id, "Referenced city does not exist");
        AppError::NotFound("City does not exist".to_string())
    };

    let Ok(id) = i32::try_from(city_id) else {
        return Err(not_found());
    };
    let count = entity::cities::Entity::find()
        .filter(entity::cities::Column::Id.eq(id))
        .count(db)
        .await
        .or_failed(operation)?;

    if count == 0 {
        return Err(not_found());
    }
    Ok(id)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        countries::create_country,
        countries::list_countries,
        countries::update_country,
        countries::delete_country,
        cities::create_city,
        cities::list_cities,
        cities::list_cities_by_country,
        cities::update_city,
        cities::delete_city,
        temperatures::create_temperature,
        temperatures::list_temperatures,
        temperatures::list_temperatures_by_city,
        temperatures::list_temperatures_by_country,
        temperatures::update_temperature,
        temperatures::delete_temperature,
    ),
    components(
        schemas(
            types::CreatedResponse,
            types::MessageResponse,
            countries::CountryInput,
            countries::CountryResponse,
            cities::CityInput,
            cities::CityResponse,
            temperatures::TemperatureInput,
            temperatures::TemperatureResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "countries", description = "Countries"),
        (name = "cities", description = "Cities within a country"),
        (name = "temperatures", description = "Temperature readings of a city"),
    ),
    info(
        title = "Meteo DB API",
        description = "Countries, cities and their temperature readings",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/countries",
            get(countries::list_countries).post(countries::create_country),
        )
        .route(
            "/countries/{id}",
            put(countries::update_country).delete(countries::delete_country),
        )
        .route("/cities", get(cities::list_cities).post(cities::create_city))
        .route("/cities/country/{id}", get(cities::list_cities_by_country))
        .route(
            "/cities/{id}",
            put(cities::update_city).delete(cities::delete_city),
        )
        .route(
            "/temperatures",
            get(temperatures::list_temperatures).post(temperatures::create_temperature),
        )
        .route(
            "/temperatures/cities/{id}",
            get(temperatures::list_temperatures_by_city),
        )
        .route(
            "/temperatures/countries/{id}",
            get(temperatures::list_temperatures_by_country),
        )
        .route(
            "/temperatures/{id}",
            put(temperatures::update_temperature).delete(temperatures::delete_temperature),
        )
        .layer(RequestBodyLimitLayer::new(state.config.request_body_limit_bytes));

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
