//! graphward-core: Authorization rule compilation
//!
//! This crate turns an ordered policy of grant/deny rules into a single
//! graph query plan:
//! - Condition trees over attributes, identity, and associations
//! - Traversal fragments for nested association chains
//! - One combined boolean predicate honoring grant/deny precedence
//! - Raw-scope passthrough for pre-built queries
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               graphward-core                │
//! ├─────────────────────────────────────────────┤
//! │  schema/   - Entity types & associations    │
//! │  policy/   - Rules & condition trees        │
//! │  compiler/ - Policy-to-plan compilation     │
//! │  plan/     - Query plan representation      │
//! └─────────────────────────────────────────────┘
//! ```

pub mod compiler;
pub mod error;
pub mod plan;
pub mod policy;
pub mod schema;

// Re-export commonly used types at the crate root
pub use compiler::{CompilerConfig, QueryCompiler};
pub use error::{CompileError, CompileResult};
pub use plan::{GraphQuery, MatchFragment, Predicate, QueryPlan};
pub use policy::{ConditionTree, ConditionValue, Policy, RawScope, Rule};
pub use schema::{Association, Direction, EntityDef, Identity, Schema, SchemaError, SchemaProvider};
