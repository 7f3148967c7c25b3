pub mod fetch_controller;
pub mod overlay_builder;
pub mod series_builder;
pub mod snapshot_service;
pub mod snapshot_source;
pub mod store;
pub mod time_series;
