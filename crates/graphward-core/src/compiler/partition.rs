//! Splits a condition tree by what its keys resolve to on an entity type.

use crate::policy::{ConditionTree, ConditionValue};
use crate::schema::{Association, EntityDef};

/// One tree level, split into association and attribute conditions.
#[derive(Debug)]
pub(crate) struct Partitioned<'e, 't> {
    /// Conditions whose key the schema resolves to an association.
    pub(crate) associations: Vec<(&'e Association, &'t ConditionValue)>,
    /// Everything else: attribute, identity, and unknown keys.
    pub(crate) attributes: Vec<(&'t str, &'t ConditionValue)>,
}

/// Partitions one tree level against the entity's associations. Order within
/// each group follows the tree's insertion order.
pub(crate) fn partition<'e, 't>(
    entity: &'e EntityDef,
    tree: &'t ConditionTree,
) -> Partitioned<'e, 't> {
    let mut associations = Vec::new();
    let mut attributes = Vec::new();

    for (key, value) in tree.iter() {
        match entity.association(key) {
            Some(association) => associations.push((association, value)),
            None => attributes.push((key, value)),
        }
    }

    Partitioned {
        associations,
        attributes,
    }
}
