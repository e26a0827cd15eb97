//! weather tool: current conditions from a wttr.in-compatible service

use super::http::{fetch_json, source_name, url_with_segment};
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter};

pub fn weather_definition() -> ToolDefinition {
    ToolDefinition::new(
        ToolId::Weather,
        "Current weather conditions for a city, with a clothing advisory",
    )
    .with_parameter(ToolParameter::new("city", "City name, English or Chinese", true))
    .with_placeholder("What's the weather in Beijing?")
}

#[derive(Debug, Deserialize)]
struct WeatherReport {
    #[serde(default)]
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC", default)]
    feels_like_c: Option<String>,
    #[serde(default)]
    humidity: Option<String>,
    #[serde(default)]
    weather_desc: Vec<TextValue>,
    #[serde(default)]
    windspeed_kmph: Option<String>,
    #[serde(default)]
    uv_index: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: String,
}

/// Clothing advice for a temperature in °C.
pub fn advisory(temp_c: f64) -> &'static str {
    if temp_c < 10.0 {
        "Cold: wear a warm coat and layers."
    } else if temp_c < 20.0 {
        "Cool: a light jacket is recommended."
    } else if temp_c < 30.0 {
        "Pleasant: comfortable for outdoor activities."
    } else {
        "Hot: stay hydrated and avoid long sun exposure."
    }
}

pub struct WeatherTool {
    client: reqwest::Client,
    endpoint: String,
}

impl WeatherTool {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn render(city: &str, condition: &CurrentCondition) -> Result<String, ToolError> {
        let temp: f64 = condition.temp_c.trim().parse().map_err(|_| {
            ToolError::unavailable(format!("weather service sent temperature '{}'", condition.temp_c))
        })?;
        let description = condition
            .weather_desc
            .first()
            .map(|d| d.value.trim())
            .filter(|d| !d.is_empty())
            .unwrap_or("Unknown");

        let mut lines = vec![
            format!("Weather in {}", city),
            format!("Condition: {}", description),
        ];
        match condition.feels_like_c.as_deref() {
            Some(feels) => lines.push(format!("Temperature: {}°C (feels like {}°C)", condition.temp_c, feels)),
            None => lines.push(format!("Temperature: {}°C", condition.temp_c)),
        }
        if let Some(humidity) = &condition.humidity {
            lines.push(format!("Humidity: {}%", humidity));
        }
        if let Some(wind) = &condition.windspeed_kmph {
            lines.push(format!("Wind: {} km/h", wind));
        }
        if let Some(uv) = &condition.uv_index {
            lines.push(format!("UV index: {}", uv));
        }
        lines.push(format!("Advice: {}", advisory(temp)));
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    fn id(&self) -> ToolId {
        ToolId::Weather
    }

    fn definition(&self) -> ToolDefinition {
        weather_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::Weather { city } = args else {
            return Err(ToolError::argument("weather expects a city"));
        };

        let url = url_with_segment(&self.endpoint, city)?;
        let request = self.client.get(url).query(&[("format", "j1")]);
        let report: WeatherReport = fetch_json(request, cancel, "weather service").await?;

        let condition = report
            .current_condition
            .first()
            .ok_or_else(|| ToolError::unavailable(format!("no weather data for '{}'", city)))?;

        Ok(ToolOutput::new(Self::render(city, condition)?)
            .with_metadata("source", source_name(&self.endpoint))
            .with_metadata("city", city)
            .with_metadata("temperature_c", condition.temp_c.trim()))
    }
}
