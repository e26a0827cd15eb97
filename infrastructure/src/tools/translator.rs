//! translator tool: English/Chinese translation via a gtx-style endpoint
//!
//! The endpoint answers with nested arrays; the first element holds one
//! `[translated, original, ...]` entry per sentence.

use super::http::{fetch_json, parse_endpoint, source_name};
use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter};

pub fn translator_definition() -> ToolDefinition {
    ToolDefinition::new(ToolId::Translator, "Translate between English and Chinese")
        .with_parameter(ToolParameter::new("text", "Text to translate", true))
        .with_parameter(
            ToolParameter::new("source", "Source language code (detected)", true).with_type("language"),
        )
        .with_parameter(
            ToolParameter::new("target", "Target language code", true).with_type("language"),
        )
        .with_placeholder("translate 你好世界 to English")
}

pub struct TranslatorTool {
    client: reqwest::Client,
    endpoint: String,
}

impl TranslatorTool {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// Join the translated sentence segments.
fn translated_text(body: &Value) -> Option<String> {
    let text: String = body
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl ToolHandler for TranslatorTool {
    fn id(&self) -> ToolId {
        ToolId::Translator
    }

    fn definition(&self) -> ToolDefinition {
        translator_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::Translator {
            text,
            source,
            target,
        } = args
        else {
            return Err(ToolError::argument("translator expects text and languages"));
        };

        let request = self.client.get(parse_endpoint(&self.endpoint)?).query(&[
            ("client", "gtx"),
            ("sl", source.code()),
            ("tl", target.code()),
            ("dt", "t"),
            ("q", text.as_str()),
        ]);
        let body: Value = fetch_json(request, cancel, "translation service").await?;
        let translated = translated_text(&body).ok_or_else(|| {
            ToolError::unavailable("translation service returned no translated text")
        })?;

        let report = format!(
            "Original ({}): {}\nTranslation ({}): {}",
            source.name(),
            text,
            target.name(),
            translated
        );
        Ok(ToolOutput::new(report)
            .with_metadata("source", source_name(&self.endpoint))
            .with_metadata("languages", format!("{}->{}", source.code(), target.code())))
    }
}

#[cfg(test)]
mod tests {
    use super::super::http::test_support::no_proxy_client;
    use super::*;
    use serde_json::json;
    use toolrouter_domain::Language;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn zh_to_en(text: &str) -> ToolArguments {
        ToolArguments::Translator {
            text: text.to_string(),
            source: Language::Zh,
            target: Language::En,
        }
    }

    #[test]
    fn test_translated_text_joins_segments() {
        let body = json!([[["Hello. ", "你好。", null], ["World", "世界", null]], null, "zh"]);
        assert_eq!(translated_text(&body).as_deref(), Some("Hello. World"));
        assert!(translated_text(&json!([])).is_none());
        assert!(translated_text(&json!({"error": "x"})).is_none());
    }

    #[tokio::test]
    async fn test_translate_chinese_to_english() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "zh"))
            .and(query_param("tl", "en"))
            .and(query_param("q", "你好世界"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([[["Hello World", "你好世界", null, null, 10]], null, "zh"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tool = TranslatorTool::new(no_proxy_client(), server.uri());
        let out = tool.call(&zh_to_en("你好世界"), &CancellationToken::new()).await.unwrap();

        assert_eq!(out.text, "Original (Chinese): 你好世界\nTranslation (English): Hello World");
        assert_eq!(out.metadata.get("languages").map(String::as_str), Some("zh->en"));
    }

    #[tokio::test]
    async fn test_empty_translation_is_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[], null, "zh"])))
            .mount(&server)
            .await;

        let tool = TranslatorTool::new(no_proxy_client(), server.uri());
        let err = tool.call(&zh_to_en("你好"), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let tool = TranslatorTool::new(no_proxy_client(), server.uri());
        let err = tool.call(&zh_to_en("你好"), &CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }
}
