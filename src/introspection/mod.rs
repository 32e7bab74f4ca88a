//! Catalog introspection snapshot: raw records, kind tags, and the indexed view the
//! projection resolvers read from.

pub mod kind;
pub mod records;
pub mod snapshot;

pub use kind::{ClassKind, ConstraintKind};
pub use records::{Oid, PgAttribute, PgClass, PgConstraint, PgNamespace, PgType, RawIntrospection};
pub use snapshot::{AttributeIdx, ClassIdx, ConstraintIdx, Introspection};
