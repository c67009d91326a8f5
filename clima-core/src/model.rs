use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Snapshot of the fields the screen displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherResult {
    /// The three lines of the result panel.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Temperatura: {}°C", self.temperature_c),
            format!("Umidade: {}%", self.humidity_pct),
            format!("Descrição: {}", self.description),
        ]
    }
}
