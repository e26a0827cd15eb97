//! Natural-language arithmetic: rewrites word operators into symbols and
//! isolates the arithmetic span for the evaluator.

use super::sanitizer::strip_prefix_ci;
use crate::expression::{EvalError, evaluate};
use crate::tool::value_objects::ToolError;
use regex::Regex;
use std::sync::LazyLock;

static PERCENT_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*%\s*of\s*(\d+(?:\.\d+)?)").expect("valid percent regex")
});

/// Word operators, longest phrases first.
static WORD_OPERATORS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bmultiplied\s+by\b", " * "),
        (r"(?i)\bmultiply\s+by\b", " * "),
        (r"(?i)\bdivided\s+by\b", " / "),
        (r"(?i)\btimes\b", " * "),
        (r"(?i)\bplus\b", " + "),
        (r"(?i)\bminus\b", " - "),
        (r"(?i)\bequals\b", " - "),
        (r"==", " - "),
        (r"乘以", " * "),
        (r"除以", " / "),
        (r"加上?", " + "),
        (r"减去?", " - "),
    ]
    .iter()
    .map(|(p, op)| (Regex::new(p).expect("valid operator regex"), *op))
    .collect()
});

static ARITHMETIC_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+*/×÷().\d\s（）]+").expect("valid span regex"));

const CALC_LEAD_INS: &[&str] = &[
    "please calculate",
    "calculate",
    "compute",
    "evaluate",
    "what is",
    "what's",
    "how much is",
    "计算",
    "算一下",
];

/// Rewrite natural-language operators into symbolic form.
///
/// `"15% of 200"` becomes `"15 * 200 / 100"`, `"5 plus 3"` becomes `"5 + 3"`.
pub fn preprocess_expression(input: &str) -> String {
    let mut text = PERCENT_OF.replace_all(input, "$1 * $2 / 100").into_owned();
    for (pattern, symbol) in WORD_OPERATORS.iter() {
        text = pattern.replace_all(&text, *symbol).into_owned();
    }
    collapse_whitespace(&text)
}

/// Strip conversational lead-ins ("calculate", "what is") and a trailing
/// `?` or `=` from a calculator request.
pub fn extract_math_expression(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let without_lead = strip_prefix_ci(trimmed, CALC_LEAD_INS);
    let expression = without_lead
        .trim()
        .trim_start_matches([':', '：'])
        .trim_end_matches(['?', '？', '=', '。'])
        .trim();
    (!expression.is_empty()).then(|| expression.to_string())
}

/// Preprocess, isolate the longest arithmetic span and evaluate it.
///
/// Returns the symbolic expression that was evaluated alongside the value.
pub fn evaluate_natural(expression: &str) -> Result<(String, f64), ToolError> {
    let rewritten = preprocess_expression(expression);
    let span = ARITHMETIC_SPAN
        .find_iter(&rewritten)
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().any(|c| c.is_ascii_digit()))
        .max_by_key(|s| s.len())
        .ok_or_else(|| {
            ToolError::expression(format!("no arithmetic found in '{}'", expression.trim()))
        })?;

    // Words left over between numbers mean the request was not pure arithmetic
    if rewritten.trim().len() != span.len() && has_dangling_words(&rewritten, span) {
        return Err(ToolError::expression(format!(
            "unsupported terms in '{}'",
            expression.trim()
        )));
    }

    let value = evaluate(span).map_err(|e| match e {
        EvalError::DivisionByZero => {
            ToolError::expression(format!("division by zero in '{}'", expression.trim()))
        }
        other => ToolError::expression(format!("'{}': {}", expression.trim(), other)),
    })?;

    Ok((span.to_string(), value))
}

/// True when non-arithmetic text sits on both sides of the chosen span, or
/// the span is flanked by a bare number (e.g. `2 ^ 3`).
fn has_dangling_words(rewritten: &str, span: &str) -> bool {
    let Some(start) = rewritten.find(span) else {
        return false;
    };
    let before = rewritten[..start].trim();
    let after = rewritten[start + span.len()..].trim();
    let numeric = |s: &str| s.chars().any(|c| c.is_ascii_digit());
    numeric(before) || numeric(after) || (!before.is_empty() && !after.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
