use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Coordinates, WeatherResult},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";
const LANG: &str = "pt_br";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherResult, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            "Requesting current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", UNITS.to_string()),
                ("lang", LANG.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send request to OpenWeather");
                FetchError::Unknown {
                    status: None,
                    detail: e.to_string(),
                }
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::error!(%status, error = %e, "Failed to read OpenWeather response body");
            FetchError::Unknown {
                status: Some(status.as_u16()),
                detail: e.to_string(),
            }
        })?;

        if !status.is_success() {
            let detail = truncate_body(&body);
            tracing::error!(%status, body = %detail, "OpenWeather request failed");
            return Err(FetchError::from_status(status.as_u16(), detail));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate_body(&body),
                "Failed to parse OpenWeather JSON"
            );
            FetchError::Unknown {
                status: Some(status.as_u16()),
                detail: format!("Failed to parse OpenWeather JSON: {e}"),
            }
        })?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                tracing::error!("OpenWeather response contained no weather entries");
                FetchError::Unknown {
                    status: Some(status.as_u16()),
                    detail: "OpenWeather response contained no weather entries".to_string(),
                }
            })?;

        let result = WeatherResult {
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            description,
            location_name: parsed.name.filter(|n| !n.is_empty()),
            observed_at: parsed.dt.and_then(unix_to_utc),
        };

        tracing::debug!(
            temp = result.temperature_c,
            humidity = result.humidity_pct,
            "Received current weather"
        );

        Ok(result)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherResult, FetchError> {
        self.fetch_current(coords).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
