//! `getCurrentWeather`: current conditions from a weather provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use krushi_mcp::{Action, HandlerError};
use krushi_types::{ActionKind, DiagnosticError, ErrorKind, KrushiError};

/// Errors from a weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(String),
    #[error("weather service returned HTTP {0}")]
    Status(u16),
    #[error("unexpected weather response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<WeatherError> for KrushiError {
    fn from(e: WeatherError) -> Self {
        KrushiError::new(ErrorKind::Upstream, e.to_string())
    }
}

impl DiagnosticError for WeatherError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Transport(_) | Self::Status(_) => {
                Some("the weather service is unreachable or refused the request".into())
            }
            Self::Decode(_) => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Transport(_) => Some("check `weather.base_url` and network access".into()),
            _ => None,
        }
    }
}

/// Current conditions at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub wind_speed_kmh: f64,
    pub precipitation_mm: f64,
    /// WMO weather interpretation code.
    pub weather_code: u16,
    pub description: String,
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Returns current conditions at the given coordinates.
    async fn current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, WeatherError>;
}

/// Human-readable label for a WMO weather code.
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// [`WeatherProvider`] backed by the Open-Meteo forecast API.
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Parses the `current` block of an Open-Meteo forecast response.
    pub fn parse_current(body: &Value) -> Result<CurrentWeather, WeatherError> {
        let current = body
            .get("current")
            .ok_or_else(|| WeatherError::Decode("missing `current` block".into()))?;
        let number = |key: &str| {
            current
                .get(key)
                .and_then(Value::as_f64)
                .ok_or_else(|| WeatherError::Decode(format!("missing `{key}`")))
        };
        let weather_code = number("weather_code")?.max(0.0) as u16;
        Ok(CurrentWeather {
            temperature_c: number("temperature_2m")?,
            humidity: number("relative_humidity_2m")?,
            wind_speed_kmh: number("wind_speed_10m")?,
            precipitation_mm: number("precipitation").unwrap_or(0.0),
            weather_code,
            description: describe_weather_code(weather_code).to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[tracing::instrument(skip(self))]
    async fn current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m,precipitation,weather_code"
                        .to_string(),
                ),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }
        let body: Value = resp.json().await?;
        debug!("weather lookup complete");
        Self::parse_current(&body)
    }
}

/// Input for `getCurrentWeather`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeatherInput {
    pub latitude: f64,
    pub longitude: f64,
}

pub struct GetCurrentWeather {
    provider: Arc<dyn WeatherProvider>,
}

impl GetCurrentWeather {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Action for GetCurrentWeather {
    const NAME: &'static str = "getCurrentWeather";
    const KIND: ActionKind = ActionKind::Tool;
    type Input = WeatherInput;
    type Output = CurrentWeather;

    async fn run(&self, input: WeatherInput) -> Result<CurrentWeather, HandlerError> {
        if !(-90.0..=90.0).contains(&input.latitude) {
            return Err(HandlerError::invalid_input("`latitude` must be within -90..=90"));
        }
        if !(-180.0..=180.0).contains(&input.longitude) {
            return Err(HandlerError::invalid_input("`longitude` must be within -180..=180"));
        }
        self.provider
            .current(input.latitude, input.longitude)
            .await
            .map_err(HandlerError::upstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transport_failure_points_at_base_url() {
        let err = WeatherError::Transport("connection refused".into());
        assert!(err.fix().is_some_and(|f| f.contains("weather.base_url")));
        assert!(WeatherError::Decode("x".into()).hint().is_none());
        assert_eq!(KrushiError::from(err).kind, ErrorKind::Upstream);
    }

    #[test]
    fn parse_open_meteo_current() {
        let body = json!({
            "current": {
                "temperature_2m": 31.4,
                "relative_humidity_2m": 62.0,
                "wind_speed_10m": 11.2,
                "precipitation": 0.0,
                "weather_code": 2
            }
        });
        let w = OpenMeteoClient::parse_current(&body).expect("parse");
        assert_eq!(w.temperature_c, 31.4);
        assert_eq!(w.weather_code, 2);
        assert_eq!(w.description, "Partly cloudy");
    }

    #[test]
    fn parse_missing_block_fails() {
        assert!(matches!(
            OpenMeteoClient::parse_current(&json!({})),
            Err(WeatherError::Decode(_))
        ));
    }

    #[test]
    fn parse_missing_temperature_fails() {
        let body = json!({ "current": { "relative_humidity_2m": 50.0 } });
        assert!(OpenMeteoClient::parse_current(&body).is_err());
    }

    #[test]
    fn weather_codes_have_labels() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(63), "Rain");
        assert_eq!(describe_weather_code(96), "Thunderstorm");
        assert_eq!(describe_weather_code(200), "Unknown");
    }
}
