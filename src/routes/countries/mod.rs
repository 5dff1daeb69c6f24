mod handlers;
mod types;

pub use handlers::{create_country, delete_country, list_countries, update_country};
pub use types::{CountryInput, CountryResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_country, __path_delete_country, __path_list_countries, __path_update_country,
};
