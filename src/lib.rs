//! # pg-metaschema
//!
//! Read-only GraphQL view of PostgreSQL structural metadata: tables, their columns and
//! column types, and their constraints.
//!
//! An already-fetched catalog introspection result is indexed once into an
//! [`Introspection`] snapshot. [`MetaschemaQuery`] contributes a single `_meta` root field
//! to the host's async-graphql schema; everything below it is resolved lazily from the
//! snapshot, per request, and only for the fields a query selects.

pub mod config;
pub mod error;
pub mod introspection;
pub mod schema;

pub use config::MetaschemaConfig;
pub use error::{MetaschemaError, Result};
pub use introspection::{ClassKind, ConstraintKind, Introspection, RawIntrospection};
pub use schema::{
    build_schema, register, Metaschema, MetaschemaCheckConstraint, MetaschemaConstraint,
    MetaschemaContext, MetaschemaExclusionConstraint, MetaschemaField,
    MetaschemaForeignKeyConstraint, MetaschemaPrimaryKeyConstraint, MetaschemaQuery,
    MetaschemaSchema, MetaschemaTable, MetaschemaType, MetaschemaUniqueConstraint,
};
