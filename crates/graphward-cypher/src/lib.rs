//! graphward-cypher: Reference Cypher rendering
//!
//! Turns a compiled query plan into Cypher text:
//! - Node and relationship patterns with backtick-quoted labels
//! - Boolean filter expressions with explicit parenthesization
//! - Full queries with MATCH, WHERE, and RETURN [DISTINCT] clauses
//!
//! The plan itself stays engine-neutral; this crate is the textual
//! rendering used for testing and for engines that consume Cypher.

pub mod expr;
pub mod pattern;
pub mod query;

// Re-export commonly used functions at the crate root
pub use expr::render_predicate;
pub use pattern::{render_fragment, render_node, render_path};
pub use query::{render_plan, render_query};
