//! Property-based tests for the policy compiler.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashSet;

    use crate::compiler::tests::fixtures::content_schema;
    use crate::compiler::QueryCompiler;
    use crate::plan::{Predicate, QueryPlan};
    use crate::policy::{ConditionTree, ConditionValue, Policy, Rule};

    /// Strategy over attribute names the fixture schema declares on Article.
    fn attribute_name_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("name"),
            Just("published"),
            Just("secret"),
            Just("priority"),
        ]
    }

    /// Strategy over association conditions: non-existence, or a nested
    /// condition one level deep.
    fn association_condition_strategy() -> impl Strategy<Value = (&'static str, ConditionValue)> {
        prop_oneof![
            Just(("mentions", ConditionValue::Null)),
            any::<bool>().prop_map(|active| {
                (
                    "mentions",
                    ConditionValue::from(ConditionTree::new().with("active", active)),
                )
            }),
            any::<bool>().prop_map(|visible| {
                (
                    "category",
                    ConditionValue::from(ConditionTree::new().with("visible", visible)),
                )
            }),
        ]
    }

    fn rule_strategy() -> impl Strategy<Value = Rule> {
        (
            any::<bool>(),
            proptest::collection::vec((attribute_name_strategy(), any::<bool>()), 0..3),
            proptest::option::of(association_condition_strategy()),
        )
            .prop_map(|(grants, attributes, association)| {
                let mut tree = ConditionTree::new();
                for (name, value) in attributes {
                    tree.insert(name, value);
                }
                if let Some((name, value)) = association {
                    tree.insert(name, value);
                }
                let rule = if grants {
                    Rule::grant("read", "Article")
                } else {
                    Rule::deny("read", "Article")
                };
                rule.with_conditions(tree)
            })
    }

    fn policy_strategy() -> impl Strategy<Value = Policy> {
        proptest::collection::vec(rule_strategy(), 0..5).prop_map(Policy::from)
    }

    /// Evaluates a predicate built entirely from literals.
    fn eval_literal(predicate: &Predicate) -> bool {
        match predicate {
            Predicate::True => true,
            Predicate::False => false,
            Predicate::And(operands) => operands.iter().all(eval_literal),
            Predicate::Or(operands) => operands.iter().any(eval_literal),
            Predicate::Not(operand) => !eval_literal(operand),
            other => panic!("unexpected non-literal predicate: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn test_compilation_is_deterministic(policy in policy_strategy()) {
            let compiler = QueryCompiler::new(content_schema());
            let first = compiler.compile("Article", &policy);
            let second = compiler.compile("Article", &policy);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_match_fragments_never_repeat(policy in policy_strategy()) {
            let compiler = QueryCompiler::new(content_schema());
            let plan = compiler.compile("Article", &policy);
            prop_assert!(plan.is_ok(), "fixture-driven policies must compile: {:?}", plan);
            if let Ok(QueryPlan::Graph(query)) = plan {
                let unique: HashSet<_> = query.match_fragments.iter().collect();
                prop_assert_eq!(unique.len(), query.match_fragments.len());
            }
        }

        #[test]
        fn test_distinct_tracks_fragment_presence(policy in policy_strategy()) {
            let compiler = QueryCompiler::new(content_schema());
            if let Ok(QueryPlan::Graph(query)) = compiler.compile("Article", &policy) {
                prop_assert_eq!(query.distinct, !query.match_fragments.is_empty());
            }
        }

        #[test]
        fn test_unconditioned_rules_fold_to_last_effect(effects in proptest::collection::vec(any::<bool>(), 0..6)) {
            let mut policy = Policy::new();
            for grants in &effects {
                policy = policy.with_rule(if *grants {
                    Rule::grant("read", "Article")
                } else {
                    Rule::deny("read", "Article")
                });
            }
            let compiler = QueryCompiler::new(content_schema());
            let plan = compiler.compile("Article", &policy).unwrap();
            let query = plan.as_graph().unwrap();

            // Grants disjoin true, denies conjoin false: the last effect wins.
            let expected = effects.last().copied().unwrap_or(false);
            prop_assert_eq!(eval_literal(&query.predicate), expected);
        }

        #[test]
        fn test_attribute_only_policies_need_no_traversal(
            attributes in proptest::collection::vec((attribute_name_strategy(), any::<bool>()), 1..4)
        ) {
            let mut tree = ConditionTree::new();
            for (name, value) in attributes {
                tree.insert(name, value);
            }
            let policy = Policy::new()
                .with_rule(Rule::grant("read", "Article").with_conditions(tree));
            let compiler = QueryCompiler::new(content_schema());
            let plan = compiler.compile("Article", &policy).unwrap();
            let query = plan.as_graph().unwrap();

            prop_assert!(query.match_fragments.is_empty());
            prop_assert!(!query.distinct);
        }
    }
}
