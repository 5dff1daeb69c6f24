//! Meteo DB - REST API for countries, cities and temperature readings
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod filters;
pub mod payload;
pub mod routes;
