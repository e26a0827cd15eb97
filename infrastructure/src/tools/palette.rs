//! color_palette tool: five-color palettes from a colormind-style service

use super::http::{fetch_json, parse_endpoint, source_name};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter};

/// Suggested role for each palette slot, in order
const USAGE: &[&str] = &["Background", "Primary", "Secondary", "Accent", "Highlight"];

pub fn palette_definition() -> ToolDefinition {
    ToolDefinition::new(ToolId::ColorPalette, "Generate a harmonious five-color palette")
        .with_parameter(ToolParameter::new(
            "model",
            "Palette model: 'ui' for interfaces, otherwise 'default'",
            true,
        ))
        .with_placeholder("Give me a color palette for my app UI")
}

#[derive(Debug, Deserialize)]
struct PaletteResponse {
    #[serde(default)]
    result: Vec<[u8; 3]>,
}

pub fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

pub struct PaletteTool {
    client: reqwest::Client,
    endpoint: String,
}

impl PaletteTool {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for PaletteTool {
    fn id(&self) -> ToolId {
        ToolId::ColorPalette
    }

    fn definition(&self) -> ToolDefinition {
        palette_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::ColorPalette { model } = args else {
            return Err(ToolError::argument("color_palette expects a model"));
        };

        let request = self
            .client
            .post(parse_endpoint(&self.endpoint)?)
            .json(&json!({ "model": model }));
        let palette: PaletteResponse = fetch_json(request, cancel, "palette service").await?;
        if palette.result.is_empty() {
            return Err(ToolError::unavailable("palette service returned no colors"));
        }

        let mut lines = vec![format!("Color palette (model: {})", model)];
        for (i, rgb) in palette.result.iter().enumerate() {
            let [r, g, b] = *rgb;
            let usage = USAGE.get(i).copied().unwrap_or("Extra");
            lines.push(format!(
                "{}. {}  RGB({}, {}, {})  {}",
                i + 1,
                to_hex(*rgb),
                r,
                g,
                b,
                usage
            ));
        }
        lines.push(String::new());
        lines.push(
            "Use the first color for large surfaces, the middle ones for content and the last \
             ones sparingly for emphasis."
                .to_string(),
        );

        let hex = palette.result.iter().map(|rgb| to_hex(*rgb)).collect::<Vec<_>>();
        Ok(ToolOutput::new(lines.join("\n"))
            .with_metadata("source", source_name(&self.endpoint))
            .with_metadata("model", model)
            .with_metadata("colors", hex.join(",")))
    }
}
