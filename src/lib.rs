pub mod app;
pub mod coerce;
pub mod config;
pub mod documents;
pub mod domain;
pub mod edges;
pub mod error;
pub mod ids;
pub mod output;
pub mod raw;
pub mod store;
pub mod swapi;
pub mod transform;
