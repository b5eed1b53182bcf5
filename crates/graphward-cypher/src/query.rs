//! Whole-plan rendering.

use graphward_core::plan::{GraphQuery, QueryPlan};

use crate::expr::render_predicate;
use crate::pattern::{render_fragment, render_node};

/// Renders a graph query: base match, one match clause per fragment, the
/// filter, and a return clause that deduplicates when traversals could
/// multiply rows.
pub fn render_query(query: &GraphQuery) -> String {
    let mut clauses = Vec::with_capacity(query.match_fragments.len() + 3);
    clauses.push(format!("MATCH {}", render_node(&query.root)));
    for fragment in &query.match_fragments {
        clauses.push(format!("MATCH {}", render_fragment(fragment)));
    }
    clauses.push(format!("WHERE {}", render_predicate(&query.predicate)));
    if query.distinct {
        clauses.push(format!("RETURN DISTINCT {}", query.root.var));
    } else {
        clauses.push(format!("RETURN {}", query.root.var));
    }
    clauses.join(" ")
}

/// Renders a plan; raw scopes pass through verbatim.
pub fn render_plan(plan: &QueryPlan) -> String {
    match plan {
        QueryPlan::Raw(scope) => scope.as_str().to_string(),
        QueryPlan::Graph(query) => render_query(query),
    }
}
