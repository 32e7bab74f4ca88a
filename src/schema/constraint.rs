//! Constraint union and its five variants.

use std::sync::Arc;

use async_graphql::{Object, Union};

use crate::error::MetaschemaError;
use crate::introspection::{AttributeIdx, ConstraintIdx, ConstraintKind, Introspection};

use super::nullable;
use super::table::{MetaschemaField, MetaschemaTable};

/// A table constraint, discriminated by its catalog kind tag
#[derive(Debug, Clone, Union)]
pub enum MetaschemaConstraint {
    ForeignKey(MetaschemaForeignKeyConstraint),
    Unique(MetaschemaUniqueConstraint),
    PrimaryKey(MetaschemaPrimaryKeyConstraint),
    Check(MetaschemaCheckConstraint),
    Exclusion(MetaschemaExclusionConstraint),
}

impl MetaschemaConstraint {
    /// Pick the variant for a constraint record from its kind tag alone.
    ///
    /// # Errors
    ///
    /// Returns [`MetaschemaError::UnmappedConstraintKind`] when the tag is not one of
    /// `p`, `f`, `u`, `c`, `x`.
    pub fn classify(
        introspection: Arc<Introspection>,
        constraint: ConstraintIdx,
    ) -> Result<Self, MetaschemaError> {
        let record = introspection.constraint(constraint);
        let Some(kind) = record.kind() else {
            log::warn!(
                "Constraint '{}' has unmapped kind tag '{}'",
                record.name,
                record.kind_tag
            );
            return Err(MetaschemaError::UnmappedConstraintKind {
                constraint: record.name.clone(),
                tag: record.kind_tag,
            });
        };

        let inner = ConstraintRecord {
            introspection,
            constraint,
        };
        Ok(match kind {
            ConstraintKind::PrimaryKey => Self::PrimaryKey(MetaschemaPrimaryKeyConstraint(inner)),
            ConstraintKind::ForeignKey => Self::ForeignKey(MetaschemaForeignKeyConstraint(inner)),
            ConstraintKind::Check => Self::Check(MetaschemaCheckConstraint(inner)),
            ConstraintKind::Unique => Self::Unique(MetaschemaUniqueConstraint(inner)),
            ConstraintKind::Exclusion => Self::Exclusion(MetaschemaExclusionConstraint(inner)),
        })
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::ForeignKey(_) => ConstraintKind::ForeignKey,
            Self::Unique(_) => ConstraintKind::Unique,
            Self::PrimaryKey(_) => ConstraintKind::PrimaryKey,
            Self::Check(_) => ConstraintKind::Check,
            Self::Exclusion(_) => ConstraintKind::Exclusion,
        }
    }
}

#[derive(Debug, Clone)]
struct ConstraintRecord {
    introspection: Arc<Introspection>,
    constraint: ConstraintIdx,
}

impl ConstraintRecord {
    fn name(&self) -> &str {
        &self.introspection.constraint(self.constraint).name
    }

    fn key_attributes(&self) -> &[AttributeIdx] {
        self.introspection.constraint_key_attributes(self.constraint)
    }

    fn project(&self, attributes: &[AttributeIdx]) -> Option<Vec<Option<MetaschemaField>>> {
        nullable(
            attributes
                .iter()
                .map(|&attr| MetaschemaField::new(self.introspection.clone(), attr)),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MetaschemaPrimaryKeyConstraint(ConstraintRecord);

#[Object]
impl MetaschemaPrimaryKeyConstraint {
    async fn name(&self) -> &str {
        self.0.name()
    }

    /// Key columns in key order
    async fn fields(&self) -> Option<Vec<Option<MetaschemaField>>> {
        self.0.project(self.0.key_attributes())
    }
}

#[derive(Debug, Clone)]
pub struct MetaschemaForeignKeyConstraint(ConstraintRecord);

#[Object]
impl MetaschemaForeignKeyConstraint {
    async fn name(&self) -> &str {
        self.0.name()
    }

    /// Referencing columns of the owning table, in key order
    async fn fields(&self) -> Option<Vec<Option<MetaschemaField>>> {
        self.0.project(self.0.key_attributes())
    }

    /// Referenced table; listed even when its namespace is not visible at the root
    async fn ref_table(&self) -> Option<MetaschemaTable> {
        let record = &self.0;
        record
            .introspection
            .constraint_foreign_class(record.constraint)
            .map(|class| MetaschemaTable::new(record.introspection.clone(), class))
    }

    /// Referenced columns, paired positionally with `fields`
    async fn ref_fields(&self) -> Option<Vec<Option<MetaschemaField>>> {
        let record = &self.0;
        record.project(
            record
                .introspection
                .constraint_foreign_key_attributes(record.constraint),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MetaschemaUniqueConstraint(ConstraintRecord);

#[Object]
impl MetaschemaUniqueConstraint {
    async fn name(&self) -> &str {
        self.0.name()
    }

    /// Column names in key order
    async fn fields(&self) -> Option<Vec<Option<String>>> {
        let snapshot = &self.0.introspection;
        nullable(
            self.0
                .key_attributes()
                .iter()
                .map(|&attr| snapshot.attribute(attr).name.clone()),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MetaschemaCheckConstraint(ConstraintRecord);

#[Object]
impl MetaschemaCheckConstraint {
    async fn name(&self) -> &str {
        self.0.name()
    }
}

#[derive(Debug, Clone)]
pub struct MetaschemaExclusionConstraint(ConstraintRecord);

#[Object]
impl MetaschemaExclusionConstraint {
    async fn name(&self) -> &str {
        self.0.name()
    }
}
