//! Policies: ordered grant/deny rules over condition trees or raw scopes.
//!
//! A [`Policy`] is the compiler's input: the rules an authorization engine
//! already matched for one (subject, action, entity type) triple, in the
//! order they were defined. Each rule either grants or denies, and may carry
//! a [`ConditionTree`] over attributes and associations, or an opaque
//! [`RawScope`] the engine understands natively.

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// A scalar condition value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Str(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Str(value)
    }
}

/// A value in a condition tree.
///
/// `Null` under an attribute key tests for a missing value; under an
/// association key it asserts the relationship does not exist. A nested tree
/// under an association key asserts the relationship exists and constrains
/// the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionValue {
    Null,
    Scalar(ScalarValue),
    Nested(ConditionTree),
}

impl From<ScalarValue> for ConditionValue {
    fn from(value: ScalarValue) -> Self {
        ConditionValue::Scalar(value)
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        ConditionValue::Scalar(value.into())
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Scalar(value.into())
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        ConditionValue::Scalar(value.into())
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Scalar(value.into())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Scalar(value.into())
    }
}

impl From<ConditionTree> for ConditionValue {
    fn from(tree: ConditionTree) -> Self {
        ConditionValue::Nested(tree)
    }
}

/// An insertion-ordered map of condition keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionTree {
    entries: Vec<(String, ConditionValue)>,
}

impl ConditionTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition, keeping insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a condition in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConditionValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Looks up the first value under a key.
    pub fn get(&self, key: &str) -> Option<&ConditionValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterates conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a condition tree from a JSON object.
    ///
    /// JSON `null` maps to [`ConditionValue::Null`], booleans/numbers/strings
    /// to scalars, and nested objects to nested trees. Anything else (arrays,
    /// or a non-object root) is rejected.
    pub fn from_json(value: &serde_json::Value) -> CompileResult<Self> {
        let object = value.as_object().ok_or_else(|| CompileError::InvalidCondition {
            message: "conditions must be a JSON object".to_string(),
        })?;

        let mut tree = ConditionTree::new();
        for (key, value) in object {
            tree.insert(key.clone(), Self::value_from_json(key, value)?);
        }
        Ok(tree)
    }

    fn value_from_json(key: &str, value: &serde_json::Value) -> CompileResult<ConditionValue> {
        use serde_json::Value;

        let value = match value {
            Value::Null => ConditionValue::Null,
            Value::Bool(b) => ConditionValue::Scalar(ScalarValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConditionValue::Scalar(ScalarValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    ConditionValue::Scalar(ScalarValue::Float(f))
                } else {
                    return Err(CompileError::InvalidCondition {
                        message: format!("unsupported number under key '{}'", key),
                    });
                }
            }
            Value::String(s) => ConditionValue::Scalar(ScalarValue::Str(s.clone())),
            Value::Object(_) => ConditionValue::Nested(Self::from_json(value)?),
            Value::Array(_) => {
                return Err(CompileError::InvalidCondition {
                    message: format!("array value under key '{}' is not supported", key),
                });
            }
        };
        Ok(value)
    }
}

/// An opaque, engine-native query fragment a rule may carry instead of a
/// condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScope(String);

impl RawScope {
    /// Wraps an engine-native query fragment.
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    /// Returns the fragment as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a rule grants or denies access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleEffect {
    Grant,
    Deny,
}

/// The conditions attached to one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleConditions {
    /// A tree of attribute and association conditions.
    Tree(ConditionTree),
    /// An opaque engine-native scope.
    Scope(RawScope),
}

/// One grant or deny rule.
///
/// `action` and `subject` are carried for diagnostics only; matching rules
/// to actions and subjects happened before compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub effect: RuleEffect,
    pub action: String,
    pub subject: String,
    pub conditions: Option<RuleConditions>,
}

impl Rule {
    /// Creates an unconditioned grant rule.
    pub fn grant(action: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            effect: RuleEffect::Grant,
            action: action.into(),
            subject: subject.into(),
            conditions: None,
        }
    }

    /// Creates an unconditioned deny rule.
    pub fn deny(action: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            effect: RuleEffect::Deny,
            action: action.into(),
            subject: subject.into(),
            conditions: None,
        }
    }

    /// Attaches a condition tree.
    pub fn with_conditions(mut self, tree: ConditionTree) -> Self {
        self.conditions = Some(RuleConditions::Tree(tree));
        self
    }

    /// Attaches a raw scope.
    pub fn with_scope(mut self, scope: RawScope) -> Self {
        self.conditions = Some(RuleConditions::Scope(scope));
        self
    }

    /// Returns true for grant rules.
    pub fn grants(&self) -> bool {
        self.effect == RuleEffect::Grant
    }
}

/// An ordered set of rules for one (subject, action, entity type) triple.
///
/// Order is definition order: earlier rules were defined first, and later
/// rules take precedence when combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    /// Creates an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, keeping definition order.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for Policy {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}
