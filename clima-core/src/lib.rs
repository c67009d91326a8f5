//! Core library for the `clima` weather lookup.
//!
//! This crate defines:
//! - Validation of free-text latitude/longitude input
//! - The OpenWeather current-weather client behind a provider trait
//! - The screen state machine (inputs, pending flag, result, alert)
//! - Configuration & credentials handling
//!
//! It is used by `clima-cli`, but any other front end can drive [`Screen`].

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod screen;
pub mod validate;

pub use config::Config;
pub use error::{ClimaError, ErrorKind, FetchError, ValidationError};
pub use model::{Coordinates, WeatherResult};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use screen::{Alert, Phase, Screen};
pub use validate::validate_coordinates;
