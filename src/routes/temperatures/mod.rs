mod handlers;
mod types;

pub use handlers::{
    create_temperature, delete_temperature, list_temperatures, list_temperatures_by_city,
    list_temperatures_by_country, update_temperature,
};
pub use types::{TemperatureInput, TemperatureQuery, TemperatureResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_temperature, __path_delete_temperature, __path_list_temperatures,
    __path_list_temperatures_by_city, __path_list_temperatures_by_country,
    __path_update_temperature,
};
