mod handlers;
mod types;

pub use handlers::{create_city, delete_city, list_cities, list_cities_by_country, update_city};
pub use types::{CityInput, CityResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_city, __path_delete_city, __path_list_cities, __path_list_cities_by_country,
    __path_update_city,
};
