//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Statically known capability identifiers.
///
/// Declaration order doubles as the routing priority: when two tools tie on
/// intent score, the one declared first wins (see
/// [`IntentScore::top`](crate::intent::IntentScore::top)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    Weather,
    Calculator,
    Translator,
    Search,
    QrGenerator,
    ColorPalette,
    Login,
}

impl ToolId {
    /// All tools in priority order.
    pub const ALL: [ToolId; 7] = [
        ToolId::Weather,
        ToolId::Calculator,
        ToolId::Translator,
        ToolId::Search,
        ToolId::QrGenerator,
        ToolId::ColorPalette,
        ToolId::Login,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Weather => "weather",
            ToolId::Calculator => "calculator",
            ToolId::Translator => "translator",
            ToolId::Search => "search",
            ToolId::QrGenerator => "qr_generator",
            ToolId::ColorPalette => "color_palette",
            ToolId::Login => "login",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolId::Weather => "Weather",
            ToolId::Calculator => "Calculator",
            ToolId::Translator => "Translator",
            ToolId::Search => "Search",
            ToolId::QrGenerator => "QR Generator",
            ToolId::ColorPalette => "Color Palette",
            ToolId::Login => "Login",
        }
    }

    /// Whether invoking this tool performs outbound network I/O.
    pub fn uses_network(&self) -> bool {
        !matches!(self, ToolId::Calculator | ToolId::QrGenerator)
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "weather" => Ok(ToolId::Weather),
            "calculator" | "calc" => Ok(ToolId::Calculator),
            "translator" | "translate" => Ok(ToolId::Translator),
            "search" => Ok(ToolId::Search),
            "qrgenerator" | "qr" | "qrcode" => Ok(ToolId::QrGenerator),
            "colorpalette" | "palette" => Ok(ToolId::ColorPalette),
            "login" => Ok(ToolId::Login),
            _ => Err(format!(
                "Unknown tool '{}'. Valid tools: {}",
                s,
                ToolId::ALL.map(|t| t.as_str()).join(", ")
            )),
        }
    }
}

/// Definition of a capability exposed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: ToolId,
    pub display_name: String,
    pub description: String,
    /// Typed argument schema
    pub parameters: Vec<ToolParameter>,
    /// Example input shown to users as a hint
    pub placeholder_example: String,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    /// Human-readable guidance for filling in this argument
    pub description: String,
    pub required: bool,
    /// Parameter type hint (e.g., "string", "url", "expression")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(id: ToolId, description: impl Into<String>) -> Self {
        Self {
            id,
            display_name: id.display_name().to_string(),
            description: description.into(),
            parameters: Vec::new(),
            placeholder_example: String::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_placeholder(mut self, example: impl Into<String>) -> Self {
        self.placeholder_example = example.into();
        self
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Specification of the registered tools, keyed by [`ToolId`].
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<ToolId, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.id, tool);
        self
    }

    pub fn get(&self, id: ToolId) -> Option<&ToolDefinition> {
        self.tools.get(&id)
    }

    pub fn contains(&self, id: ToolId) -> bool {
        self.tools.contains_key(&id)
    }

    /// Definitions in priority order
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.tools.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
