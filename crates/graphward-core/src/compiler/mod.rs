//! Policy-to-plan compilation.
//!
//! Compilation runs in stages. A raw-scope override check short-circuits
//! everything else. Each rule's condition tree is then partitioned into
//! attribute and association conditions, association chains are walked into
//! match fragments, and conditions become predicate atoms scoped to the
//! variables the walk binds. Rule predicates fold into one combined
//! expression, and the assembler deduplicates fragments and sets the
//! distinct flag.

mod assemble;
mod combine;
mod partition;
mod paths;
mod predicate;

#[cfg(test)]
mod compile_proptest;
#[cfg(test)]
mod tests;

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::plan::{NodeBinding, QueryPlan};
use crate::policy::{Policy, RawScope, Rule, RuleConditions};
use crate::schema::SchemaProvider;

use self::assemble::assemble;
use self::combine::fold_rules;
use self::paths::VarAllocator;
use self::predicate::RuleCompiler;

/// Configuration for the policy compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Maximum nesting depth for association conditions.
    pub max_depth: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { max_depth: 25 }
    }
}

impl CompilerConfig {
    /// Creates a new configuration with the specified max depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Compiles policies into query plans against one schema.
///
/// The compiler holds only the schema and its configuration; every
/// compilation is a pure function of its inputs and may run concurrently.
pub struct QueryCompiler<S: SchemaProvider> {
    schema: S,
    config: CompilerConfig,
}

impl<S: SchemaProvider> QueryCompiler<S> {
    /// Creates a compiler with the default configuration.
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            config: CompilerConfig::default(),
        }
    }

    /// Creates a compiler with an explicit configuration.
    pub fn with_config(schema: S, config: CompilerConfig) -> Self {
        Self { schema, config }
    }

    /// Compiles a policy for the given root entity type.
    ///
    /// Returns a raw passthrough when a lone raw-scope rule overrides the
    /// policy, otherwise a graph query combining every rule. An empty
    /// policy compiles to an unconditionally false query.
    pub fn compile(&self, root_type: &str, policy: &Policy) -> CompileResult<QueryPlan> {
        debug!(root_type = %root_type, rules = policy.len(), "compiling policy");

        if let Some(scope) = scope_override(policy)? {
            debug!(root_type = %root_type, "raw scope overrides compilation");
            return Ok(QueryPlan::Raw(scope));
        }

        let entity = self.schema.entity(root_type).ok_or_else(|| {
            CompileError::UnknownEntityType {
                type_name: root_type.to_string(),
            }
        })?;
        let root = NodeBinding::new(entity.var_name(), entity.label.clone());

        let mut vars = VarAllocator::new(root.var.clone());
        let mut outcomes = Vec::with_capacity(policy.len());
        let mut fragments = Vec::new();
        for rule in policy.rules() {
            let rule_compiler = RuleCompiler::new(&self.schema, &self.config, &root, &mut vars);
            let (rule_predicate, rule_fragments) = rule_compiler.compile(entity, rule)?;
            outcomes.push((rule.effect, rule_predicate));
            fragments.extend(rule_fragments);
        }

        let predicate = fold_rules(outcomes);
        Ok(QueryPlan::Graph(assemble(root, fragments, predicate)))
    }
}

/// Detects a raw-scope override.
///
/// A raw scope that is the only condition in the policy becomes the whole
/// plan. A raw scope next to any other condition, including a second raw
/// scope, is a conflict named after the scope-carrying rule.
fn scope_override(policy: &Policy) -> CompileResult<Option<RawScope>> {
    let mut scoped: Option<(&Rule, &RawScope)> = None;
    let mut trees = 0usize;

    for rule in policy.rules() {
        match &rule.conditions {
            Some(RuleConditions::Scope(scope)) => {
                if let Some((first, _)) = scoped {
                    return Err(conflict(first));
                }
                scoped = Some((rule, scope));
            }
            Some(RuleConditions::Tree(_)) => trees += 1,
            None => {}
        }
    }

    match scoped {
        Some((rule, _)) if trees > 0 => Err(conflict(rule)),
        Some((_, scope)) => Ok(Some(scope.clone())),
        None => Ok(None),
    }
}

fn conflict(rule: &Rule) -> CompileError {
    CompileError::ScopeConflict {
        action: rule.action.clone(),
        subject: rule.subject.clone(),
    }
}
