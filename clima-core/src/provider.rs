use crate::{
    error::FetchError,
    model::{Coordinates, WeatherResult},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather for a coordinate pair.
///
/// One call is one outbound request: no caching, no retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherResult, FetchError>;
}
