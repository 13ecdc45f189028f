//! Current-weather lookup against the OpenWeatherMap API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current conditions for a city, temperatures in whole degrees Celsius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub condition: String,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Weather lookup failure. The display text is shown to the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API key not configured. Please set WEATHER_API_KEY in .env file")]
    NotConfigured,

    #[error("Failed to fetch weather data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Provider(String),

    #[error("Failed to parse weather data")]
    Parse,
}

#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

// Subset of the provider's response that the report needs
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    name: String,
    #[serde(default)]
    sys: ProviderSys,
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
    #[serde(default)]
    wind: ProviderWind,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderWind {
    #[serde(default)]
    speed: f64,
}

impl TryFrom<ProviderResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(body: ProviderResponse) -> Result<Self, Self::Error> {
        let condition = body.weather.into_iter().next().ok_or(WeatherError::Parse)?;

        Ok(WeatherReport {
            location: format!("{}, {}", body.name, body.sys.country.unwrap_or_default()),
            temperature: body.main.temp.round() as i64,
            feels_like: body.main.feels_like.round() as i64,
            condition: condition.main,
            description: condition.description,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        })
    }
}

/// Map a provider status and JSON body onto a report or user-facing error
fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<WeatherReport, WeatherError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(|_| WeatherError::Parse)?;

    // Success needs both the HTTP status and the body's numeric `cod`
    let cod_ok = json.get("cod").and_then(|c| c.as_i64()) == Some(200);
    if status != reqwest::StatusCode::OK || !cod_ok {
        let message = json
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("City not found");
        return Err(WeatherError::Provider(message.to_string()));
    }

    let response: ProviderResponse =
        serde_json::from_value(json).map_err(|_| WeatherError::Parse)?;
    response.try_into()
}

/// `WeatherClient` calling OpenWeatherMap over HTTPS
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let result = parse_response(status, &body);
        if let Err(ref e) = result {
            tracing::warn!("Weather lookup for {} failed: {}", city, e);
        }
        result
    }
}
