//! qr_generator tool: terminal-renderable QR codes, generated locally

use async_trait::async_trait;
use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter};

pub fn qr_definition() -> ToolDefinition {
    ToolDefinition::new(ToolId::QrGenerator, "Render text or a URL as a QR code")
        .with_parameter(ToolParameter::new("text", "Payload to encode", true).with_type("text"))
        .with_placeholder("Generate QR code for https://apple.com")
}

pub struct QrTool {
    max_bytes: usize,
}

impl QrTool {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    fn render(&self, payload: &str) -> Result<(String, usize), ToolError> {
        if payload.trim().is_empty() {
            return Err(ToolError::argument("QR payload is empty"));
        }
        // Capacity is measured in encoded bytes, not characters
        let length = payload.len();
        if length > self.max_bytes {
            return Err(ToolError::argument(format!(
                "QR payload is {} bytes; the limit is {}",
                length, self.max_bytes
            )));
        }

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| ToolError::unavailable(format!("QR encoding failed: {}", e)))?;
        let image = code
            .render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build();
        Ok((image, code.width()))
    }
}

#[async_trait]
impl ToolHandler for QrTool {
    fn id(&self) -> ToolId {
        ToolId::QrGenerator
    }

    fn definition(&self) -> ToolDefinition {
        qr_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::QrGenerator { text } = args else {
            return Err(ToolError::argument("qr_generator expects a payload"));
        };
        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled);
        }

        let (image, modules) = self.render(text)?;
        let report = format!(
            "QR code for: {}\n{}x{} modules, error correction M\n\n{}",
            text, modules, modules, image
        );
        Ok(ToolOutput::new(report)
            .with_metadata("source", "local")
            .with_metadata("payload", text)
            .with_metadata("modules", modules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_QR_MAX_BYTES;

    fn payload(text: &str) -> ToolArguments {
        ToolArguments::QrGenerator {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_url_payload() {
        let tool = QrTool::new(DEFAULT_QR_MAX_BYTES);
        let out = tool
            .call(&payload("https://apple.com"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(out.text.starts_with("QR code for: https://apple.com"));
        assert_eq!(out.metadata.get("payload").map(String::as_str), Some("https://apple.com"));
        // Smallest symbol is 21 modules wide
        let modules: usize = out.metadata["modules"].parse().unwrap();
        assert!(modules >= 21);
        assert!(out.text.contains('█') || out.text.contains('▀') || out.text.contains('▄'));
    }

    #[tokio::test]
    async fn test_unicode_payload() {
        let tool = QrTool::new(DEFAULT_QR_MAX_BYTES);
        let out = tool.call(&payload("你好"), &CancellationToken::new()).await.unwrap();
        assert!(out.text.contains("你好"));
    }

    #[tokio::test]
    async fn test_payload_over_limit_rejected() {
        let tool = QrTool::new(10);
        let err = tool
            .call(&payload("this payload is too long"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ArgumentExtraction(_)));
        assert!(err.to_string().contains("limit is 10"));
    }

    #[tokio::test]
    async fn test_multibyte_payload_over_limit_rejected() {
        let tool = QrTool::new(DEFAULT_QR_MAX_BYTES);
        // 1000 characters but 3000 bytes
        let text = "你".repeat(1000);
        let err = tool.call(&payload(&text), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::ArgumentExtraction(_)), "{err}");
        assert!(err.to_string().contains("3000 bytes"));

        // One byte over the limit
        let text = format!("{}a", "你".repeat(DEFAULT_QR_MAX_BYTES / 3));
        assert_eq!(text.len(), DEFAULT_QR_MAX_BYTES + 1);
        let err = tool.call(&payload(&text), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::ArgumentExtraction(_)));
    }

    #[tokio::test]
    async fn test_blank_payload_rejected() {
        let tool = QrTool::new(DEFAULT_QR_MAX_BYTES);
        let err = tool.call(&payload("   "), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::ArgumentExtraction(_)));
    }

    #[tokio::test]
    async fn test_limit_sized_payload_encodes() {
        let tool = QrTool::new(DEFAULT_QR_MAX_BYTES);
        let text = "a".repeat(DEFAULT_QR_MAX_BYTES);
        let out = tool.call(&payload(&text), &CancellationToken::new()).await.unwrap();
        assert_eq!(out.metadata.get("modules").map(String::as_str), Some("177"));
    }
}
