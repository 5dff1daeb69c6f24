pub mod cities;
pub mod countries;
pub mod temperatures;
