//! Tool domain traits
//!
//! Pure validation of extracted arguments against a tool's parameter schema.
//! The async `ToolExecutorPort` lives in the application layer.

use super::arguments::ToolArguments;
use super::entities::ToolDefinition;
use super::value_objects::ToolError;

/// Validator for extracted tool arguments
///
/// Runs after extraction and before any handler is invoked, without I/O.
pub trait ArgumentValidator {
    /// Validate arguments against the tool's definition
    fn validate(&self, args: &ToolArguments, definition: &ToolDefinition)
    -> Result<(), ToolError>;
}

/// Default implementation of ArgumentValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultArgumentValidator;

impl ArgumentValidator for DefaultArgumentValidator {
    fn validate(
        &self,
        args: &ToolArguments,
        definition: &ToolDefinition,
    ) -> Result<(), ToolError> {
        if args.tool() != definition.id {
            return Err(ToolError::argument(format!(
                "arguments for '{}' passed to '{}'",
                args.tool(),
                definition.id
            )));
        }

        let fields = args.fields();

        // Every required parameter must be present and non-blank
        for param in definition.required_parameters() {
            let value = fields
                .iter()
                .find(|(name, _)| *name == param.name)
                .map(|(_, value)| value.trim());
            match value {
                Some(v) if !v.is_empty() => {}
                _ => {
                    return Err(ToolError::argument(format!(
                        "missing required parameter '{}' for tool '{}'",
                        param.name, definition.id
                    )));
                }
            }
        }

        // Every extracted field must be declared by the schema
        for (name, _) in &fields {
            if !definition.parameters.iter().any(|p| p.name == *name) {
                return Err(ToolError::argument(format!(
                    "unknown parameter '{}' for tool '{}'",
                    name, definition.id
                )));
            }
        }

        Ok(())
    }
}
