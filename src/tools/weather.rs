//! Current weather lookup via Open-Meteo.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{get_json, required_str, RetryPolicy, Tool};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Coordinates for the cities the tool knows about.
const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("mumbai", 19.0760, 72.8777),
    ("delhi", 28.6139, 77.2090),
    ("pune", 18.5204, 73.8567),
    ("bangalore", 12.9716, 77.5946),
];

/// Fetch current temperature and wind speed for a city.
pub struct WeatherLookup {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl WeatherLookup {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry,
        }
    }
}

#[async_trait]
impl Tool for WeatherLookup {
    fn name(&self) -> &str {
        "weather_tool"
    }

    fn description(&self) -> &str {
        "Get the current temperature and wind speed for a city."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. 'Mumbai'"
                }
            },
            "required": ["city"]
        })
    }

    async fn run(&self, input: &Map<String, Value>) -> anyhow::Result<Value> {
        let city = required_str(self.name(), input, "city")?;
        let (lat, lon) = coordinates_for(city);

        tracing::info!(city, lat, lon, "Fetching current weather");

        let url = format!(
            "{}?latitude={}&longitude={}&current_weather=true",
            OPEN_METEO_URL, lat, lon
        );

        let body: Value = self
            .retry
            .retry("open-meteo", || get_json(&self.client, &url))
            .await?;

        summarize_forecast(city, &body)
    }
}

/// Coordinates for `city`, falling back to Mumbai for unknown names.
fn coordinates_for(city: &str) -> (f64, f64) {
    let wanted = city.to_lowercase();
    let (_, lat, lon) = CITY_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == wanted)
        .unwrap_or(&CITY_COORDINATES[0]);
    (*lat, *lon)
}

/// Pull the fields we report out of an Open-Meteo forecast body.
fn summarize_forecast(city: &str, body: &Value) -> anyhow::Result<Value> {
    let current = body
        .get("current_weather")
        .ok_or_else(|| anyhow::anyhow!("Missing 'current_weather' in weather response"))?;
    let temperature = current
        .get("temperature")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing 'temperature' in weather response"))?;
    let windspeed = current
        .get("windspeed")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing 'windspeed' in weather response"))?;

    Ok(json!({
        "city": city,
        "temperature": temperature,
        "windspeed": windspeed,
    }))
}
