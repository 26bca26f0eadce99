pub mod climate_store;
pub mod data_loader;
pub mod error;
