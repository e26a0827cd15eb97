//! calculator tool: local arithmetic evaluation

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{
    ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter, evaluate_natural,
    format_number,
};

pub fn calculator_definition() -> ToolDefinition {
    ToolDefinition::new(
        ToolId::Calculator,
        "Evaluate arithmetic, including word operators and percentages",
    )
    .with_parameter(
        ToolParameter::new("expression", "Arithmetic such as '25 * 4 + 10' or '15% of 200'", true)
            .with_type("expression"),
    )
    .with_placeholder("Calculate 25 * 4 + 10")
}

/// Evaluates in-process; never touches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolHandler for CalculatorTool {
    fn id(&self) -> ToolId {
        ToolId::Calculator
    }

    fn definition(&self) -> ToolDefinition {
        calculator_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::Calculator { expression } = args else {
            return Err(ToolError::argument("calculator expects an expression"));
        };
        if cancel.is_cancelled() {
            return Err(ToolError::Cancelled);
        }

        let (evaluated, value) = evaluate_natural(expression)?;
        let rendered = format_number(value);

        Ok(
            ToolOutput::new(format!("The result of '{}' is {}", expression, rendered))
                .with_metadata("source", "local")
                .with_metadata("evaluated", evaluated)
                .with_metadata("value", rendered),
        )
    }
}
