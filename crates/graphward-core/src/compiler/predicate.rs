//! Per-rule predicate construction.
//!
//! One [`RuleCompiler`] handles one rule: it walks the rule's condition tree
//! level by level, turning attribute conditions into predicate atoms and
//! association conditions into match fragments plus conjuncts scoped to the
//! variable each traversal binds.

use crate::error::{CompileError, CompileResult};
use crate::plan::{MatchFragment, NodeBinding, Predicate};
use crate::policy::{ConditionTree, ConditionValue, Rule, RuleConditions};
use crate::schema::{Association, EntityDef, Identity, SchemaProvider};

use super::partition::partition;
use super::paths::{PathScope, VarAllocator};
use super::CompilerConfig;

/// Reserved condition key selecting the entity identity.
pub(crate) const ID_KEY: &str = "id";

/// Compiles one rule's conditions against the root entity.
pub(crate) struct RuleCompiler<'c, S> {
    schema: &'c S,
    config: &'c CompilerConfig,
    root: &'c NodeBinding,
    vars: &'c mut VarAllocator,
    fragments: Vec<MatchFragment>,
}

impl<'c, S: SchemaProvider> RuleCompiler<'c, S> {
    pub(crate) fn new(
        schema: &'c S,
        config: &'c CompilerConfig,
        root: &'c NodeBinding,
        vars: &'c mut VarAllocator,
    ) -> Self {
        Self {
            schema,
            config,
            root,
            vars,
            fragments: Vec::new(),
        }
    }

    /// Compiles the rule into its predicate and the match fragments its
    /// association conditions require.
    ///
    /// A rule without conditions (or with an empty tree) contributes a bare
    /// `true`/`false` literal and no fragments.
    pub(crate) fn compile(
        mut self,
        entity: &'c EntityDef,
        rule: &Rule,
    ) -> CompileResult<(Predicate, Vec<MatchFragment>)> {
        let tree = match &rule.conditions {
            None => return Ok((literal(rule), Vec::new())),
            Some(RuleConditions::Tree(tree)) if tree.is_empty() => {
                return Ok((literal(rule), Vec::new()))
            }
            Some(RuleConditions::Tree(tree)) => tree,
            // A raw scope only reaches rule compilation when it coexists
            // with other conditions, which is the override conflict.
            Some(RuleConditions::Scope(_)) => {
                return Err(CompileError::ScopeConflict {
                    action: rule.action.clone(),
                    subject: rule.subject.clone(),
                })
            }
        };

        let scope = PathScope::root(entity, self.root.var.clone());
        let conjuncts = self.compile_tree(&scope, tree)?;
        let predicate = if conjuncts.is_empty() {
            // Existence-only conditions: the match fragments carry the whole
            // constraint.
            Predicate::True
        } else {
            Predicate::And(conjuncts)
        };
        Ok((predicate, self.fragments))
    }

    /// Conjuncts for one tree level: attribute conditions first, then
    /// association conditions, each group in tree order.
    fn compile_tree(
        &mut self,
        scope: &PathScope<'c>,
        tree: &ConditionTree,
    ) -> CompileResult<Vec<Predicate>> {
        let parts = partition(scope.entity, tree);
        let mut conjuncts = Vec::new();

        for (key, value) in parts.attributes {
            conjuncts.push(self.attribute_condition(scope, key, value)?);
        }
        for (association, value) in parts.associations {
            self.association_condition(scope, association, value, &mut conjuncts)?;
        }
        Ok(conjuncts)
    }

    fn attribute_condition(
        &self,
        scope: &PathScope<'c>,
        key: &str,
        value: &ConditionValue,
    ) -> CompileResult<Predicate> {
        if key == ID_KEY {
            return match value {
                ConditionValue::Scalar(scalar) => Ok(Predicate::IdEquals {
                    var: scope.var.clone(),
                    property: match &scope.entity.identity {
                        Identity::Property(name) => Some(name.clone()),
                        Identity::NativeId => None,
                    },
                    value: scalar.clone(),
                }),
                _ => Err(CompileError::InvalidCondition {
                    message: format!(
                        "identity condition on '{}' must be a scalar",
                        scope.entity.name
                    ),
                }),
            };
        }

        match value {
            ConditionValue::Nested(_) => Err(CompileError::UnresolvedAssociation {
                type_name: scope.entity.name.clone(),
                association: key.to_string(),
            }),
            _ if !scope.entity.has_attribute(key) => Err(CompileError::UnknownAttribute {
                type_name: scope.entity.name.clone(),
                attribute: key.to_string(),
            }),
            ConditionValue::Null => Ok(Predicate::AttrIsNull {
                var: scope.var.clone(),
                attr: key.to_string(),
            }),
            ConditionValue::Scalar(scalar) => Ok(Predicate::AttrEquals {
                var: scope.var.clone(),
                attr: key.to_string(),
                value: scalar.clone(),
            }),
        }
    }

    /// An association condition either asserts non-existence (`null`, a
    /// negated pattern anchored at the current variable) or existence (a
    /// nested tree, walked into a match fragment with its conditions
    /// compiled against the target's variable).
    fn association_condition(
        &mut self,
        scope: &PathScope<'c>,
        association: &Association,
        value: &ConditionValue,
        conjuncts: &mut Vec<Predicate>,
    ) -> CompileResult<()> {
        match value {
            ConditionValue::Null => {
                conjuncts.push(Predicate::Not(Box::new(Predicate::HasPath(
                    scope.absence_pattern(association),
                ))));
                Ok(())
            }
            ConditionValue::Scalar(_) => Err(CompileError::InvalidCondition {
                message: format!(
                    "association condition '{}' on '{}' must be null or a nested condition map",
                    association.name, scope.entity.name
                ),
            }),
            ConditionValue::Nested(nested) => {
                let target = self.schema.entity(&association.target_type).ok_or_else(|| {
                    CompileError::UnknownEntityType {
                        type_name: association.target_type.clone(),
                    }
                })?;
                let child = scope.descend(association, target, self.vars, self.config.max_depth)?;

                if nested.is_empty() {
                    // Pure existence check: no terminal binding needed.
                    self.fragments.push(child.fragment_anonymous(self.root));
                    return Ok(());
                }
                if needs_binding(target, nested) {
                    self.fragments.push(child.fragment(self.root));
                }
                let mut nested_conjuncts = self.compile_tree(&child, nested)?;
                conjuncts.append(&mut nested_conjuncts);
                Ok(())
            }
        }
    }
}

fn literal(rule: &Rule) -> Predicate {
    if rule.grants() {
        Predicate::True
    } else {
        Predicate::False
    }
}

/// True when a nested level tests attributes or anchors a non-existence
/// check, both of which need the terminal node bound by a match clause.
/// Levels that only descend further leave the binding to the deeper
/// fragments, where this node appears as an intermediate step.
fn needs_binding(target: &EntityDef, tree: &ConditionTree) -> bool {
    tree.iter().any(|(key, value)| match target.association(key) {
        None => true,
        Some(_) => matches!(value, ConditionValue::Null),
    })
}
