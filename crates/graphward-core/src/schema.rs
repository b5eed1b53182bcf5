//! Entity-type schema: attributes, identity, and graph associations.
//!
//! The schema is the compiler's map of the graph. Each entity type declares
//! the attributes conditions may test, how the type is identified when a
//! condition uses the reserved `id` key, and the named associations a
//! condition tree may traverse.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Traversal direction of an association, relative to the owning type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The relationship points from the owning node to the target.
    Out,
    /// The relationship points from the target to the owning node.
    In,
    /// The relationship may point either way.
    Both,
}

/// How an entity type is identified when a condition uses the `id` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    /// Identity lives in a regular node property.
    Property(String),
    /// Identity is the engine-native node id (rendered via the ID() function).
    NativeId,
}

/// A named, directed relationship from one entity type to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Condition key that selects this association.
    pub name: String,
    /// Entity type on the far end.
    pub target_type: String,
    /// Relationship label in the graph.
    pub rel_label: String,
    /// Traversal direction relative to the owning type.
    pub direction: Direction,
}

impl Association {
    /// Creates a new association descriptor.
    pub fn new(
        name: impl Into<String>,
        target_type: impl Into<String>,
        rel_label: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            rel_label: rel_label.into(),
            direction,
        }
    }
}

/// An entity type: node label, identity descriptor, declared attributes and
/// associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Type name used to register and look up the entity.
    pub name: String,
    /// Node label in the graph (defaults to the type name).
    pub label: String,
    /// Identity descriptor for `id` conditions.
    pub identity: Identity,
    /// Attribute names conditions may reference.
    pub attributes: Vec<String>,
    /// Associations conditions may traverse.
    pub associations: Vec<Association>,
}

impl EntityDef {
    /// Creates an entity type with the given name, a label equal to the
    /// name, a `uuid` property identity, and no attributes or associations.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            identity: Identity::Property("uuid".to_string()),
            attributes: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Overrides the node label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Overrides the identity descriptor.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Declares an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Declares an association.
    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    /// Looks up an association by its condition key.
    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.name == name)
    }

    /// Returns true if the attribute is declared on this type.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    /// Variable name used for nodes of this type in compiled plans:
    /// the type name lowercased, with `::` separators joined by `_`.
    pub fn var_name(&self) -> String {
        self.name
            .to_lowercase()
            .split("::")
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Read-only schema access used by the compiler.
pub trait SchemaProvider {
    /// Looks up an entity type by name.
    fn entity(&self, type_name: &str) -> Option<&EntityDef>;
}

/// Registry of entity types, keyed by type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    entities: Vec<EntityDef>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity type.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.add_entity(entity);
        self
    }

    /// Registers an entity type in place.
    pub fn add_entity(&mut self, entity: EntityDef) {
        self.entities.push(entity);
    }

    /// All registered entity types, in registration order.
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Validates referential integrity: unique type, attribute and
    /// association names, and association targets that resolve to registered
    /// types. All problems are collected before returning.
    pub fn validate(&self) -> Result<(), Vec<SchemaError>> {
        let mut errors = Vec::new();

        for (index, entity) in self.entities.iter().enumerate() {
            if self.entities[..index].iter().any(|e| e.name == entity.name) {
                errors.push(SchemaError::DuplicateEntity {
                    type_name: entity.name.clone(),
                });
            }

            for (i, attr) in entity.attributes.iter().enumerate() {
                if entity.attributes[..i].contains(attr) {
                    errors.push(SchemaError::DuplicateAttribute {
                        type_name: entity.name.clone(),
                        attribute: attr.clone(),
                    });
                }
            }

            for (i, assoc) in entity.associations.iter().enumerate() {
                if entity.associations[..i].iter().any(|a| a.name == assoc.name) {
                    errors.push(SchemaError::DuplicateAssociation {
                        type_name: entity.name.clone(),
                        association: assoc.name.clone(),
                    });
                }
                if self.entity(&assoc.target_type).is_none() {
                    errors.push(SchemaError::UndefinedTargetType {
                        type_name: entity.name.clone(),
                        association: assoc.name.clone(),
                        target_type: assoc.target_type.clone(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl SchemaProvider for Schema {
    fn entity(&self, type_name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == type_name)
    }
}

impl<S: SchemaProvider> SchemaProvider for &S {
    fn entity(&self, type_name: &str) -> Option<&EntityDef> {
        (**self).entity(type_name)
    }
}

impl<S: SchemaProvider> SchemaProvider for Arc<S> {
    fn entity(&self, type_name: &str) -> Option<&EntityDef> {
        (**self).entity(type_name)
    }
}

/// Schema validation error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Two entity types share a name.
    #[error("entity type '{type_name}' registered more than once")]
    DuplicateEntity { type_name: String },

    /// An attribute is declared twice on one type.
    #[error("attribute '{attribute}' declared more than once on type '{type_name}'")]
    DuplicateAttribute {
        type_name: String,
        attribute: String,
    },

    /// An association is declared twice on one type.
    #[error("association '{association}' declared more than once on type '{type_name}'")]
    DuplicateAssociation {
        type_name: String,
        association: String,
    },

    /// An association targets a type the schema does not register.
    #[error(
        "association '{association}' on type '{type_name}' targets undefined type '{target_type}'"
    )]
    UndefinedTargetType {
        type_name: String,
        association: String,
        target_type: String,
    },
}
