//! Error types for snapshot indexing and projection resolvers

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::introspection::Oid;

/// Errors raised while indexing an introspection snapshot or resolving projected fields
#[derive(Debug, Error)]
pub enum MetaschemaError {
    /// The snapshot payload could not be decoded
    #[error("invalid introspection payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The snapshot file could not be read
    #[error("failed to read introspection snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Two records of the same kind share an id
    #[error("duplicate {kind} id {id} in introspection snapshot")]
    DuplicateId { kind: &'static str, id: Oid },

    /// Two attributes of one class share an ordinal position
    #[error("class '{class}' has more than one attribute at position {num}")]
    DuplicateAttribute { class: String, num: i16 },

    /// A class points at a namespace the snapshot does not contain
    #[error("class '{class}' references unknown namespace {namespace_id}")]
    UnknownNamespace { class: String, namespace_id: Oid },

    /// An attribute points at a class the snapshot does not contain
    #[error("attribute '{attribute}' references unknown class {class_id}")]
    UnknownAttributeClass { attribute: String, class_id: Oid },

    /// An attribute points at a type the snapshot does not contain
    #[error("attribute '{class}.{attribute}' references unknown type {type_id}")]
    UnknownType {
        class: String,
        attribute: String,
        type_id: Oid,
    },

    /// A constraint points at a class the snapshot does not contain
    #[error("constraint '{constraint}' references unknown class {class_id}")]
    UnknownConstraintClass { constraint: String, class_id: Oid },

    /// A constraint key lists an attribute position missing from its class
    #[error("constraint '{constraint}' references attribute {num} missing from class '{class}'")]
    UnknownKeyAttribute {
        constraint: String,
        class: String,
        num: i16,
    },

    /// A constraint lists referenced attributes without a referenced class
    #[error("constraint '{constraint}' lists referenced attributes but no referenced class")]
    MissingForeignClass { constraint: String },

    /// A constraint carries a kind tag outside `p`, `f`, `u`, `c`, `x`
    #[error("constraint '{constraint}' has unmapped kind tag '{tag}'")]
    UnmappedConstraintKind { constraint: String, tag: char },
}

impl MetaschemaError {
    /// Stable machine-readable code, exposed as `extensions.code` on GraphQL errors
    pub fn code(&self) -> &'static str {
        match self {
            MetaschemaError::Payload(_) => "INVALID_PAYLOAD",
            MetaschemaError::Io(_) => "SNAPSHOT_IO",
            MetaschemaError::DuplicateId { .. } | MetaschemaError::DuplicateAttribute { .. } => {
                "DUPLICATE_RECORD"
            }
            MetaschemaError::UnknownNamespace { .. }
            | MetaschemaError::UnknownAttributeClass { .. }
            | MetaschemaError::UnknownType { .. }
            | MetaschemaError::UnknownConstraintClass { .. }
            | MetaschemaError::UnknownKeyAttribute { .. }
            | MetaschemaError::MissingForeignClass { .. } => "DANGLING_REFERENCE",
            MetaschemaError::UnmappedConstraintKind { .. } => "UNMAPPED_CONSTRAINT_KIND",
        }
    }
}

impl ErrorExtensions for MetaschemaError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, MetaschemaError>;
