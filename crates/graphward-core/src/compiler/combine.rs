//! Folds per-rule predicates into one combined expression.

use crate::plan::Predicate;
use crate::policy::RuleEffect;

/// Folds rule predicates in definition order.
///
/// Grants widen the accumulated expression by disjunction. Denials narrow
/// the entire accumulated expression with a conjoined negation, so a deny
/// never widens access and a later grant re-opens only what it names.
/// Literals from unconditioned rules fold in unnegated: a leading
/// unconditioned deny seeds `false`, and a later one conjoins `false`.
pub(crate) fn fold_rules(outcomes: Vec<(RuleEffect, Predicate)>) -> Predicate {
    let mut combined: Option<Predicate> = None;
    for (effect, predicate) in outcomes {
        combined = Some(match (combined, effect) {
            (None, RuleEffect::Grant) => predicate,
            (None, RuleEffect::Deny) => deny_term(predicate),
            (Some(acc), RuleEffect::Grant) => disjoin(acc, predicate),
            (Some(acc), RuleEffect::Deny) => conjoin(acc, deny_term(predicate)),
        });
    }
    combined.unwrap_or(Predicate::False)
}

/// A deny's contribution: literals stay as-is, anything else is negated.
fn deny_term(predicate: Predicate) -> Predicate {
    match predicate {
        Predicate::True | Predicate::False => predicate,
        other => Predicate::Not(Box::new(other)),
    }
}

fn disjoin(acc: Predicate, predicate: Predicate) -> Predicate {
    match acc {
        Predicate::Or(mut operands) => {
            operands.push(predicate);
            Predicate::Or(operands)
        }
        other => Predicate::Or(vec![other, predicate]),
    }
}

fn conjoin(acc: Predicate, predicate: Predicate) -> Predicate {
    match acc {
        Predicate::And(mut operands) => {
            operands.push(predicate);
            Predicate::And(operands)
        }
        other => Predicate::And(vec![other, predicate]),
    }
}
