pub mod benchmark;
pub mod ordered_map;
pub mod series;
pub mod settings;
pub mod snapshot;
pub mod transaction;
pub mod wire;
