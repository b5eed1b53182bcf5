//! Node, relationship, and path pattern rendering.
//!
//! Node patterns bind a variable to a backtick-quoted label, relationship
//! patterns carry the association's type and direction, and anonymous
//! nodes render as `()` when an existence check needs no binding.

use graphward_core::plan::{MatchFragment, NodeBinding, PathPattern, PathStep};
use graphward_core::schema::Direction;

/// Renders a labeled node pattern: `(article:`Article`)`.
pub fn render_node(binding: &NodeBinding) -> String {
    format!("({}:`{}`)", binding.var, binding.label)
}

/// Renders a traversal fragment anchored at the root variable.
///
/// The root renders variable-only because the base match clause already
/// carries its label.
pub fn render_fragment(fragment: &MatchFragment) -> String {
    let mut rendered = format!("({})", fragment.root.var);
    for step in &fragment.steps {
        rendered.push_str(&render_step(step));
    }
    rendered
}

/// Renders a predicate path pattern anchored at an already-bound variable.
pub fn render_path(pattern: &PathPattern) -> String {
    let mut rendered = format!("({})", pattern.anchor);
    for step in &pattern.steps {
        rendered.push_str(&render_step(step));
    }
    rendered
}

fn render_step(step: &PathStep) -> String {
    let relationship = format!("[:`{}`]", step.rel_label);
    let arrow = match step.direction {
        Direction::Out => format!("-{relationship}->"),
        Direction::In => format!("<-{relationship}-"),
        Direction::Both => format!("-{relationship}-"),
    };
    let node = match &step.node {
        Some(binding) => render_node(binding),
        None => "()".to_string(),
    };
    format!("{arrow}{node}")
}
