//! Boolean expression rendering.
//!
//! Literals render with their own parentheses, equality atoms render bare,
//! and connectives parenthesize every operand so the rendered text keeps
//! the predicate tree's precedence exactly. Booleans render unquoted; all
//! other scalars are single-quoted.

use graphward_core::plan::Predicate;
use graphward_core::policy::ScalarValue;

use crate::pattern::render_path;

/// Renders a predicate tree into its textual form.
pub fn render_predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::True => "(true)".to_string(),
        Predicate::False => "(false)".to_string(),
        Predicate::AttrEquals { var, attr, value } => {
            format!("{var}.{attr}={}", equality_literal(value))
        }
        Predicate::AttrIsNull { var, attr } => format!("{var}.{attr} IS NULL"),
        Predicate::IdEquals {
            var,
            property,
            value,
        } => match property {
            Some(property) => format!("{var}.{property}='{}'", scalar_text(value)),
            None => format!("ID({var})={}", scalar_text(value)),
        },
        Predicate::HasPath(pattern) => render_path(pattern),
        Predicate::And(operands) => join_operands(operands, " AND "),
        Predicate::Or(operands) => join_operands(operands, " OR "),
        Predicate::Not(operand) => format!("NOT({})", render_predicate(operand)),
    }
}

fn join_operands(operands: &[Predicate], connector: &str) -> String {
    operands
        .iter()
        .map(|operand| match operand {
            // A negation already delimits itself.
            Predicate::Not(_) => render_predicate(operand),
            _ => format!("({})", render_predicate(operand)),
        })
        .collect::<Vec<_>>()
        .join(connector)
}

fn equality_literal(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Bool(value) => value.to_string(),
        other => format!("'{}'", scalar_text(other)),
    }
}

fn scalar_text(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Bool(value) => value.to_string(),
        ScalarValue::Int(value) => value.to_string(),
        ScalarValue::Float(value) => value.to_string(),
        ScalarValue::Str(value) => value.replace('\'', "\\'"),
    }
}
