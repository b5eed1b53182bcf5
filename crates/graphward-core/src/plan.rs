//! Compiled query plans: traversal fragments plus a boolean predicate.

use serde::{Deserialize, Serialize};

use crate::policy::{RawScope, ScalarValue};
use crate::schema::Direction;

/// A named node pattern: variable plus node label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeBinding {
    pub var: String,
    pub label: String,
}

impl NodeBinding {
    /// Creates a node binding.
    pub fn new(var: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            label: label.into(),
        }
    }
}

/// One relationship step along a traversal path.
///
/// `node` is the step's target pattern; `None` is an anonymous terminal used
/// by existence-only checks, which never name the far node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub direction: Direction,
    pub rel_label: String,
    pub node: Option<NodeBinding>,
}

impl PathStep {
    /// Creates a step bound to a named target node.
    pub fn to_node(direction: Direction, rel_label: impl Into<String>, node: NodeBinding) -> Self {
        Self {
            direction,
            rel_label: rel_label.into(),
            node: Some(node),
        }
    }

    /// Creates a step with an anonymous terminal.
    pub fn anonymous(direction: Direction, rel_label: impl Into<String>) -> Self {
        Self {
            direction,
            rel_label: rel_label.into(),
            node: None,
        }
    }
}

/// A full traversal path from the root entity, used as a match clause.
///
/// Structural equality drives deduplication: two fragments describing the
/// same chain compare equal and are merged by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchFragment {
    pub root: NodeBinding,
    pub steps: Vec<PathStep>,
}

/// A path pattern anchored at an already-bound variable, used inside the
/// predicate for relationship existence tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPattern {
    pub anchor: String,
    pub steps: Vec<PathStep>,
}

/// A structured boolean filter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Always true (an unconditioned grant).
    True,
    /// Always false (an unconditioned deny, or an empty policy).
    False,
    /// Attribute equality on a bound variable.
    AttrEquals {
        var: String,
        attr: String,
        value: ScalarValue,
    },
    /// Attribute non-existence on a bound variable.
    AttrIsNull { var: String, attr: String },
    /// Identity equality; `property` is `None` for engine-native ids.
    IdEquals {
        var: String,
        property: Option<String>,
        value: ScalarValue,
    },
    /// The anchored path exists.
    HasPath(PathPattern),
    /// All operands hold.
    And(Vec<Predicate>),
    /// At least one operand holds.
    Or(Vec<Predicate>),
    /// The operand does not hold.
    Not(Box<Predicate>),
}

/// A compiled graph query: root binding, traversal fragments, filter
/// predicate, and whether results must be deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQuery {
    pub root: NodeBinding,
    pub match_fragments: Vec<MatchFragment>,
    pub predicate: Predicate,
    pub distinct: bool,
}

/// The compiler's output: either a raw scope passed through verbatim, or a
/// compiled graph query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryPlan {
    Raw(RawScope),
    Graph(GraphQuery),
}

impl QueryPlan {
    /// Returns the graph query, if this plan is not a raw passthrough.
    pub fn as_graph(&self) -> Option<&GraphQuery> {
        match self {
            QueryPlan::Graph(query) => Some(query),
            QueryPlan::Raw(_) => None,
        }
    }

    /// Returns the raw scope, if this plan is a passthrough.
    pub fn as_raw(&self) -> Option<&RawScope> {
        match self {
            QueryPlan::Raw(scope) => Some(scope),
            QueryPlan::Graph(_) => None,
        }
    }
}
