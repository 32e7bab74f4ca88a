//! Indexed, validated introspection snapshot.
//!
//! [`Introspection`] takes ownership of the raw records, resolves every id and attribute
//! position reference once, and then only hands out shared borrows. Record order from the
//! source is kept: a class lists its attributes and constraints in the order they were
//! supplied, and constraint keys keep their declared column order.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{MetaschemaError, Result};

use super::records::{
    Oid, PgAttribute, PgClass, PgConstraint, PgNamespace, PgType, RawIntrospection,
};

/// Position of a class within the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassIdx(usize);

/// Position of an attribute within the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeIdx(usize);

/// Position of a constraint within the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintIdx(usize);

#[derive(Debug)]
struct ClassLinks {
    namespace: usize,
    attributes: Vec<AttributeIdx>,
    constraints: Vec<ConstraintIdx>,
}

#[derive(Debug)]
struct ConstraintLinks {
    key_attributes: Vec<AttributeIdx>,
    foreign_class: Option<ClassIdx>,
    foreign_key_attributes: Vec<AttributeIdx>,
}

/// Immutable catalog snapshot shared by all resolvers of a schema
#[derive(Debug)]
pub struct Introspection {
    namespaces: Vec<PgNamespace>,
    classes: Vec<PgClass>,
    attributes: Vec<PgAttribute>,
    types: Vec<PgType>,
    constraints: Vec<PgConstraint>,
    class_links: Vec<ClassLinks>,
    attribute_types: Vec<usize>,
    constraint_links: Vec<ConstraintLinks>,
}

fn index_ids<T>(
    kind: &'static str,
    records: &[T],
    id: impl Fn(&T) -> Oid,
) -> Result<HashMap<Oid, usize>> {
    let mut by_id = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if by_id.insert(id(record), idx).is_some() {
            return Err(MetaschemaError::DuplicateId {
                kind,
                id: id(record),
            });
        }
    }
    Ok(by_id)
}

impl Introspection {
    /// Index and validate a raw introspection result.
    ///
    /// # Errors
    ///
    /// Returns an error if ids are duplicated or any record references a namespace,
    /// class, type or attribute position the snapshot does not contain.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "metaschema.index_snapshot",
            skip_all,
            fields(classes = raw.classes.len())
        )
    )]
    pub fn from_raw(raw: RawIntrospection) -> Result<Self> {
        let RawIntrospection {
            namespaces,
            classes,
            attributes,
            types,
            constraints,
        } = raw;

        let namespace_by_id = index_ids("namespace", &namespaces, |n| n.id)?;
        let type_by_id = index_ids("type", &types, |t| t.id)?;
        let class_by_id = index_ids("class", &classes, |c| c.id)?;
        index_ids("constraint", &constraints, |c| c.id)?;

        let mut class_links = Vec::with_capacity(classes.len());
        for class in &classes {
            let namespace = *namespace_by_id.get(&class.namespace_id).ok_or_else(|| {
                MetaschemaError::UnknownNamespace {
                    class: class.name.clone(),
                    namespace_id: class.namespace_id,
                }
            })?;
            class_links.push(ClassLinks {
                namespace,
                attributes: Vec::new(),
                constraints: Vec::new(),
            });
        }

        let mut attribute_types = Vec::with_capacity(attributes.len());
        let mut attribute_at: HashMap<(usize, i16), AttributeIdx> =
            HashMap::with_capacity(attributes.len());
        for (idx, attr) in attributes.iter().enumerate() {
            let class = *class_by_id.get(&attr.class_id).ok_or_else(|| {
                MetaschemaError::UnknownAttributeClass {
                    attribute: attr.name.clone(),
                    class_id: attr.class_id,
                }
            })?;
            let ty = *type_by_id
                .get(&attr.type_id)
                .ok_or_else(|| MetaschemaError::UnknownType {
                    class: classes[class].name.clone(),
                    attribute: attr.name.clone(),
                    type_id: attr.type_id,
                })?;
            if attribute_at.insert((class, attr.num), AttributeIdx(idx)).is_some() {
                return Err(MetaschemaError::DuplicateAttribute {
                    class: classes[class].name.clone(),
                    num: attr.num,
                });
            }
            attribute_types.push(ty);
            class_links[class].attributes.push(AttributeIdx(idx));
        }

        let resolve_keys = |constraint: &PgConstraint, class: usize, nums: &[i16]| {
            nums.iter()
                .map(|num| {
                    attribute_at.get(&(class, *num)).copied().ok_or_else(|| {
                        MetaschemaError::UnknownKeyAttribute {
                            constraint: constraint.name.clone(),
                            class: classes[class].name.clone(),
                            num: *num,
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()
        };

        let mut constraint_links = Vec::with_capacity(constraints.len());
        for (idx, constraint) in constraints.iter().enumerate() {
            let class = *class_by_id.get(&constraint.class_id).ok_or_else(|| {
                MetaschemaError::UnknownConstraintClass {
                    constraint: constraint.name.clone(),
                    class_id: constraint.class_id,
                }
            })?;
            let key_attributes = resolve_keys(constraint, class, &constraint.key_attribute_nums)?;

            let foreign_class = match constraint.foreign_class_id {
                Some(class_id) => Some(*class_by_id.get(&class_id).ok_or_else(|| {
                    MetaschemaError::UnknownConstraintClass {
                        constraint: constraint.name.clone(),
                        class_id,
                    }
                })?),
                None => None,
            };
            let foreign_key_attributes = match foreign_class {
                Some(foreign) => {
                    resolve_keys(constraint, foreign, &constraint.foreign_key_attribute_nums)?
                }
                None if constraint.foreign_key_attribute_nums.is_empty() => Vec::new(),
                None => {
                    return Err(MetaschemaError::MissingForeignClass {
                        constraint: constraint.name.clone(),
                    })
                }
            };

            class_links[class].constraints.push(ConstraintIdx(idx));
            constraint_links.push(ConstraintLinks {
                key_attributes,
                foreign_class: foreign_class.map(ClassIdx),
                foreign_key_attributes,
            });
        }

        log::debug!(
            "Indexed introspection snapshot: {} namespaces, {} classes, {} attributes, {} types, \
             {} constraints",
            namespaces.len(),
            classes.len(),
            attributes.len(),
            types.len(),
            constraints.len()
        );

        Ok(Self {
            namespaces,
            classes,
            attributes,
            types,
            constraints,
            class_links,
            attribute_types,
            constraint_links,
        })
    }

    /// Decode and index a JSON introspection document
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::from_raw(serde_json::from_value(value)?)
    }

    /// Read, decode and index a JSON introspection document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All classes in catalog order
    pub fn classes(&self) -> impl Iterator<Item = ClassIdx> + '_ {
        (0..self.classes.len()).map(ClassIdx)
    }

    pub fn class(&self, idx: ClassIdx) -> &PgClass {
        &self.classes[idx.0]
    }

    pub fn class_namespace(&self, idx: ClassIdx) -> &PgNamespace {
        &self.namespaces[self.class_links[idx.0].namespace]
    }

    /// Every attribute of a class, system columns included
    pub fn class_attributes(&self, idx: ClassIdx) -> &[AttributeIdx] {
        &self.class_links[idx.0].attributes
    }

    pub fn class_constraints(&self, idx: ClassIdx) -> &[ConstraintIdx] {
        &self.class_links[idx.0].constraints
    }

    /// Look up a class by namespace and relation name
    pub fn find_class(&self, namespace: &str, name: &str) -> Option<ClassIdx> {
        self.classes().find(|&idx| {
            self.class(idx).name == name && self.class_namespace(idx).name == namespace
        })
    }

    pub fn attribute(&self, idx: AttributeIdx) -> &PgAttribute {
        &self.attributes[idx.0]
    }

    pub fn attribute_type(&self, idx: AttributeIdx) -> &PgType {
        &self.types[self.attribute_types[idx.0]]
    }

    pub fn constraint(&self, idx: ConstraintIdx) -> &PgConstraint {
        &self.constraints[idx.0]
    }

    /// Constrained columns of the owning class, in key order
    pub fn constraint_key_attributes(&self, idx: ConstraintIdx) -> &[AttributeIdx] {
        &self.constraint_links[idx.0].key_attributes
    }

    pub fn constraint_foreign_class(&self, idx: ConstraintIdx) -> Option<ClassIdx> {
        self.constraint_links[idx.0].foreign_class
    }

    /// Referenced columns of the foreign class, in key order
    pub fn constraint_foreign_key_attributes(&self, idx: ConstraintIdx) -> &[AttributeIdx] {
        &self.constraint_links[idx.0].foreign_key_attributes
    }
}
