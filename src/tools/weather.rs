//! Weather lookup tool backed by the OpenWeather API.
//!
//! Failures never propagate to the agent: a missing key or an unreachable
//! upstream degrades to a human-readable fallback string so the model always
//! has something to reason over.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use super::{city_arg, Tool};

/// Default OpenWeather API base URL.
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Timeout for each weather request. Single attempt, no retry.
const WEATHER_TIMEOUT_SECS: u64 = 10;

/// Forecast entries to request: 8 three-hour steps, roughly 24 hours.
const FORECAST_STEPS: u32 = 8;

/// Condensed next-24-hour outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherOutlook {
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub dominant_condition: String,
}

/// Structured snapshot of current conditions plus a short outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub conditions: String,
    pub outlook: WeatherOutlook,
}

/// Result of one weather lookup: live data or a fallback advisory.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    /// Live snapshot from the upstream provider.
    Report(WeatherSnapshot),
    /// Advisory string used when live data cannot be fetched.
    Unavailable(String),
}

/// OpenWeather HTTP client.
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up current weather and a short forecast for `city`.
    ///
    /// Never returns an error: without a key no request is attempted and a
    /// fixed advisory is returned; upstream failures degrade to a fallback
    /// string embedding the city name.
    pub async fn lookup(&self, city: &str) -> WeatherReport {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                return WeatherReport::Unavailable(
                    "Real-time weather is unavailable because OPENWEATHER_API_KEY is not set. \
                     You may still provide general, non-real-time weather expectations for the \
                     season."
                        .to_string(),
                );
            }
        };

        match self.fetch_snapshot(city, api_key).await {
            Ok(snapshot) => WeatherReport::Report(snapshot),
            Err(e) => {
                tracing::warn!("Weather lookup for {} failed: {}", city, e);
                WeatherReport::Unavailable(format!(
                    "Could not fetch real-time weather data for {}. Reason: {}. You may still \
                     provide general guidance based on the typical climate of the destination.",
                    city, e
                ))
            }
        }
    }

    async fn fetch_snapshot(&self, city: &str, api_key: &str) -> anyhow::Result<WeatherSnapshot> {
        let current: CurrentResponse = self
            .get_json(
                "weather",
                &[("q", city), ("appid", api_key), ("units", "metric")],
            )
            .await?;

        let steps = FORECAST_STEPS.to_string();
        let forecast: ForecastResponse = self
            .get_json(
                "forecast",
                &[
                    ("q", city),
                    ("appid", api_key),
                    ("units", "metric"),
                    ("cnt", &steps),
                ],
            )
            .await?;

        let conditions = current
            .weather
            .first()
            .map(|w| capitalize(&w.description))
            .unwrap_or_else(|| "Unknown".to_string());

        if forecast.list.is_empty() {
            anyhow::bail!("forecast response contained no entries");
        }

        let temps: Vec<f64> = forecast.list.iter().map(|e| e.main.temp).collect();
        let min_temp_c = temps.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_temp_c = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let dominant_condition = dominant_condition(&forecast.list).unwrap_or_else(|| {
            current
                .weather
                .first()
                .map_or(String::new(), |w| w.description.clone())
        });

        Ok(WeatherSnapshot {
            city: city.to_string(),
            temperature_c: current.main.temp,
            feels_like_c: current.main.feels_like,
            conditions,
            outlook: WeatherOutlook {
                min_temp_c,
                max_temp_c,
                dominant_condition,
            },
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        Ok(response.json().await?)
    }
}

/// Most frequent condition description across forecast entries.
fn dominant_condition(entries: &[ForecastEntry]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(condition) = entry.weather.first() {
            *counts.entry(condition.description.as_str()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(description, _)| description.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    weather: Vec<ConditionEntry>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    main: ForecastTemp,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastTemp {
    temp: f64,
}

/// Current-weather lookup tool exposed to the agent.
pub struct CurrentWeather {
    client: WeatherClient,
}

impl CurrentWeather {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CurrentWeather {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather and a short next-24-hour outlook for a city. Returns a structured snapshot, or an explanation when real-time data is unavailable."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "The destination city name"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let city = city_arg(&args)?;

        match self.client.lookup(city).await {
            WeatherReport::Report(snapshot) => Ok(serde_json::to_string_pretty(&snapshot)?),
            WeatherReport::Unavailable(advisory) => Ok(advisory),
        }
    }
}
