//! Raw catalog records as handed over by the introspection source.
//!
//! Records reference each other by id and attribute position, the way the catalog does.
//! Keys the projection does not use are ignored, so a richer introspection payload
//! deserializes unchanged.

use serde::Deserialize;

use super::kind::{ClassKind, ConstraintKind};

/// Catalog object identifier
pub type Oid = u32;

/// A complete introspection result, grouped by record kind
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIntrospection {
    #[serde(rename = "namespace", default)]
    pub namespaces: Vec<PgNamespace>,
    #[serde(rename = "class", default)]
    pub classes: Vec<PgClass>,
    #[serde(rename = "attribute", default)]
    pub attributes: Vec<PgAttribute>,
    #[serde(rename = "type", default)]
    pub types: Vec<PgType>,
    #[serde(rename = "constraint", default)]
    pub constraints: Vec<PgConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PgNamespace {
    pub id: Oid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgClass {
    pub id: Oid,
    pub name: String,
    pub namespace_id: Oid,
    /// `relkind` tag, kept raw
    pub class_kind: char,
}

impl PgClass {
    pub fn kind(&self) -> Option<ClassKind> {
        ClassKind::from_tag(self.class_kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgAttribute {
    pub class_id: Oid,
    /// Ordinal position; system columns sit at zero or below
    pub num: i16,
    pub name: String,
    pub type_id: Oid,
}

impl PgAttribute {
    /// Whether this is a user column rather than a system pseudo-column
    pub fn is_user_column(&self) -> bool {
        self.num >= 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PgType {
    pub id: Oid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgConstraint {
    pub id: Oid,
    pub name: String,
    pub class_id: Oid,
    /// `contype` tag, kept raw so unknown kinds survive until they are resolved
    #[serde(rename = "type")]
    pub kind_tag: char,
    #[serde(default)]
    pub key_attribute_nums: Vec<i16>,
    #[serde(default)]
    pub foreign_class_id: Option<Oid>,
    #[serde(default)]
    pub foreign_key_attribute_nums: Vec<i16>,
}

impl PgConstraint {
    pub fn kind(&self) -> Option<ConstraintKind> {
        ConstraintKind::from_tag(self.kind_tag)
    }
}
