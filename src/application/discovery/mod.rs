//! Discovery use cases: finding stations

pub mod search_stations;

pub use search_stations::{SearchStationsUseCase, StationView};
