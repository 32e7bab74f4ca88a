use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, PathSegment};

use crate::introspection::{AttributeIdx, ClassIdx, Introspection, PgClass};

use super::constraint::MetaschemaConstraint;
use super::nullable;

/// An ordinary table
#[derive(Debug, Clone)]
pub struct MetaschemaTable {
    introspection: Arc<Introspection>,
    class: ClassIdx,
}

impl MetaschemaTable {
    pub(crate) fn new(introspection: Arc<Introspection>, class: ClassIdx) -> Self {
        Self {
            introspection,
            class,
        }
    }

    fn record(&self) -> &PgClass {
        self.introspection.class(self.class)
    }
}

#[Object]
impl MetaschemaTable {
    async fn name(&self) -> &str {
        &self.record().name
    }

    /// User columns in catalog order; system columns are never listed
    async fn fields(&self) -> Option<Vec<Option<MetaschemaField>>> {
        let snapshot = &self.introspection;
        nullable(
            snapshot
                .class_attributes(self.class)
                .iter()
                .filter(|&&attr| snapshot.attribute(attr).is_user_column())
                .map(|&attr| MetaschemaField::new(snapshot.clone(), attr)),
        )
    }

    /// Constraints in catalog order.
    ///
    /// A constraint with an unmapped kind tag resolves to `null` and reports its error at
    /// `constraints[i]`; the other constraints of the table are still returned.
    async fn constraints(
        &self,
        ctx: &Context<'_>,
    ) -> Option<Vec<Option<MetaschemaConstraint>>> {
        let snapshot = &self.introspection;
        let constraints = snapshot
            .class_constraints(self.class)
            .iter()
            .enumerate()
            .map(|(idx, &constraint)| {
                match MetaschemaConstraint::classify(snapshot.clone(), constraint) {
                    Ok(resolved) => Some(resolved),
                    Err(err) => {
                        let mut error =
                            ctx.set_error_path(err.extend().into_server_error(ctx.item.pos));
                        error.path.push(PathSegment::Index(idx));
                        ctx.add_error(error);
                        None
                    }
                }
            })
            .collect();
        Some(constraints)
    }
}

/// A column of a table
#[derive(Debug, Clone)]
pub struct MetaschemaField {
    introspection: Arc<Introspection>,
    attribute: AttributeIdx,
}

impl MetaschemaField {
    pub(crate) fn new(introspection: Arc<Introspection>, attribute: AttributeIdx) -> Self {
        Self {
            introspection,
            attribute,
        }
    }
}

#[Object]
impl MetaschemaField {
    async fn name(&self) -> &str {
        &self.introspection.attribute(self.attribute).name
    }

    #[graphql(name = "type")]
    async fn data_type(&self) -> MetaschemaType {
        MetaschemaType {
            introspection: self.introspection.clone(),
            attribute: self.attribute,
        }
    }
}

/// Declared data type of a column
#[derive(Debug, Clone)]
pub struct MetaschemaType {
    introspection: Arc<Introspection>,
    attribute: AttributeIdx,
}

#[Object]
impl MetaschemaType {
    async fn name(&self) -> &str {
        &self.introspection.attribute_type(self.attribute).name
    }
}
