//! Typed per-tool arguments, built from raw input by the extractors.
//!
//! Extraction happens before any handler is reached, so a request that
//! cannot produce its required fields fails without touching the network.

use super::entities::ToolId;
use super::value_objects::ToolError;
use crate::extraction::{
    Language, extract_city, extract_math_expression, extract_palette_model, extract_qr_payload,
    extract_search_query, extract_translation, parse_credentials,
};
use serde::Serialize;

/// Fallbacks applied when the input leaves a login field unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionDefaults {
    /// Base URL used when no `site=` is given
    pub login_site: Option<String>,
    pub login_domain: Option<String>,
    pub login_auth_type: Option<String>,
}

/// Login request body fields.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
    pub domain: String,
    #[serde(rename = "siteaddress")]
    pub site_address: String,
    #[serde(rename = "authenticationType")]
    pub auth_type: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("domain", &self.domain)
            .field("site_address", &self.site_address)
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

/// Arguments for one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments {
    Weather {
        city: String,
    },
    Calculator {
        expression: String,
    },
    Translator {
        text: String,
        source: Language,
        target: Language,
    },
    Search {
        query: String,
    },
    QrGenerator {
        text: String,
    },
    ColorPalette {
        model: String,
    },
    Login(LoginCredentials),
}

impl ToolArguments {
    /// Build arguments for `tool` from raw input.
    ///
    /// # Errors
    ///
    /// `ArgumentExtraction` when a required field cannot be found.
    /// Login reports missing username, password or site as
    /// `InvalidExpression`.
    pub fn extract(
        tool: ToolId,
        input: &str,
        defaults: &ExtractionDefaults,
    ) -> Result<Self, ToolError> {
        let missing = |what: &str| {
            ToolError::argument(format!("no {} found in '{}'", what, input.trim()))
        };

        match tool {
            ToolId::Weather => extract_city(input)
                .map(|city| ToolArguments::Weather { city })
                .ok_or_else(|| missing("city")),
            ToolId::Calculator => extract_math_expression(input)
                .map(|expression| ToolArguments::Calculator { expression })
                .ok_or_else(|| missing("expression")),
            ToolId::Translator => {
                let (text, explicit) =
                    extract_translation(input).ok_or_else(|| missing("text to translate"))?;
                let source = Language::detect(&text);
                let target = explicit
                    .filter(|lang| *lang != source)
                    .unwrap_or_else(|| source.opposite());
                Ok(ToolArguments::Translator {
                    text,
                    source,
                    target,
                })
            }
            ToolId::Search => extract_search_query(input)
                .map(|query| ToolArguments::Search { query })
                .ok_or_else(|| missing("search query")),
            ToolId::QrGenerator => extract_qr_payload(input)
                .map(|text| ToolArguments::QrGenerator { text })
                .ok_or_else(|| missing("QR payload")),
            ToolId::ColorPalette => Ok(ToolArguments::ColorPalette {
                model: extract_palette_model(input),
            }),
            ToolId::Login => extract_login(input, defaults).map(ToolArguments::Login),
        }
    }

    pub fn tool(&self) -> ToolId {
        match self {
            ToolArguments::Weather { .. } => ToolId::Weather,
            ToolArguments::Calculator { .. } => ToolId::Calculator,
            ToolArguments::Translator { .. } => ToolId::Translator,
            ToolArguments::Search { .. } => ToolId::Search,
            ToolArguments::QrGenerator { .. } => ToolId::QrGenerator,
            ToolArguments::ColorPalette { .. } => ToolId::ColorPalette,
            ToolArguments::Login(_) => ToolId::Login,
        }
    }

    /// Named field values, matched against a definition's parameter schema.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            ToolArguments::Weather { city } => vec![("city", city.as_str())],
            ToolArguments::Calculator { expression } => vec![("expression", expression.as_str())],
            ToolArguments::Translator {
                text,
                source,
                target,
            } => vec![
                ("text", text.as_str()),
                ("source", source.code()),
                ("target", target.code()),
            ],
            ToolArguments::Search { query } => vec![("query", query.as_str())],
            ToolArguments::QrGenerator { text } => vec![("text", text.as_str())],
            ToolArguments::ColorPalette { model } => vec![("model", model.as_str())],
            ToolArguments::Login(c) => vec![
                ("username", c.username.as_str()),
                ("password", c.password.as_str()),
                ("domain", c.domain.as_str()),
                ("site_address", c.site_address.as_str()),
                ("auth_type", c.auth_type.as_str()),
            ],
        }
    }

    /// One-line rendering for logs and metadata. Passwords are masked.
    pub fn summary(&self) -> String {
        self.fields()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| {
                if name == "password" {
                    format!("{name}=***")
                } else {
                    format!("{name}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn extract_login(input: &str, defaults: &ExtractionDefaults) -> Result<LoginCredentials, ToolError> {
    let parsed = parse_credentials(input);
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let username = non_empty(parsed.username)
        .ok_or_else(|| ToolError::expression("login requires a username"))?;
    let password = non_empty(parsed.password)
        .ok_or_else(|| ToolError::expression("login requires a password"))?;
    let site_address = non_empty(parsed.site)
        .or_else(|| non_empty(defaults.login_site.clone()))
        .map(|site| site.trim_end_matches('/').to_string())
        .ok_or_else(|| ToolError::expression("login requires a site address"))?;

    Ok(LoginCredentials {
        username,
        password,
        domain: non_empty(parsed.domain)
            .or_else(|| defaults.login_domain.clone())
            .unwrap_or_default(),
        site_address,
        auth_type: non_empty(parsed.auth_type)
            .or_else(|| defaults.login_auth_type.clone())
            .unwrap_or_default(),
    })
}
