//! GraphQL contribution: the `_meta` root field and the `Metaschema*` types behind it.
//!
//! Every type here is a thin handle over the shared [`Introspection`]; nothing is computed
//! until the executor resolves the corresponding field, so a query only pays for the
//! part of the graph it selects.
//!
//! # Merging into a host schema
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Object, Schema};
//! use pg_metaschema::{
//!     register, Introspection, MetaschemaConfig, MetaschemaContext, MetaschemaQuery,
//! };
//!
//! #[derive(Default)]
//! struct AppQuery;
//!
//! #[Object]
//! impl AppQuery {
//!     async fn version(&self) -> &str {
//!         "1.0"
//!     }
//! }
//!
//! #[derive(MergedObject, Default)]
//! struct Query(AppQuery, MetaschemaQuery);
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let introspection = Arc::new(Introspection::from_path("introspection.json")?);
//! let context = MetaschemaContext::new(introspection, MetaschemaConfig::load()?);
//! let schema = register(
//!     Schema::build(Query::default(), EmptyMutation, EmptySubscription),
//!     context,
//! )
//! .finish();
//! # Ok(())
//! # }
//! ```

mod constraint;
mod table;

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Object, ObjectType, Result, Schema, SchemaBuilder,
    SubscriptionType,
};

use crate::config::MetaschemaConfig;
use crate::introspection::{ClassIdx, ClassKind, Introspection};

pub use constraint::{
    MetaschemaCheckConstraint, MetaschemaConstraint, MetaschemaExclusionConstraint,
    MetaschemaForeignKeyConstraint, MetaschemaPrimaryKeyConstraint, MetaschemaUniqueConstraint,
};
pub use table::{MetaschemaField, MetaschemaTable, MetaschemaType};

/// Standalone schema exposing only the metaschema root field
pub type MetaschemaSchema = Schema<MetaschemaQuery, EmptyMutation, EmptySubscription>;

/// Read-only state shared by every metaschema resolver of one schema generation
#[derive(Debug, Clone)]
pub struct MetaschemaContext {
    introspection: Arc<Introspection>,
    config: Arc<MetaschemaConfig>,
}

impl MetaschemaContext {
    pub fn new(introspection: Arc<Introspection>, config: MetaschemaConfig) -> Self {
        Self {
            introspection,
            config: Arc::new(config),
        }
    }

    pub fn introspection(&self) -> &Arc<Introspection> {
        &self.introspection
    }

    pub fn config(&self) -> &MetaschemaConfig {
        &self.config
    }

    /// Ordinary tables in visible namespaces, in catalog order.
    ///
    /// Namespace visibility is enforced here and nowhere else; every other class kind
    /// (views, sequences, indexes, TOAST tables, partitioned tables, ...) is dropped.
    pub fn table_classes(&self) -> impl Iterator<Item = ClassIdx> + '_ {
        let snapshot = &self.introspection;
        snapshot.classes().filter(move |&class| {
            self.config.is_visible(&snapshot.class_namespace(class).name)
                && snapshot.class(class).kind() == Some(ClassKind::OrdinaryTable)
        })
    }
}

/// Query object contributing the `_meta` root field
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaschemaQuery;

#[Object]
impl MetaschemaQuery {
    /// Structural metadata of the visible database tables
    #[graphql(name = "_meta")]
    async fn meta(&self) -> Option<Metaschema> {
        Some(Metaschema)
    }
}

/// Root of the projected catalog graph
#[derive(Debug, Default, Clone, Copy)]
pub struct Metaschema;

#[Object]
impl Metaschema {
    async fn tables(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<MetaschemaTable>>>> {
        let context = ctx.data::<MetaschemaContext>()?;
        let tables: Vec<_> = context
            .table_classes()
            .map(|class| MetaschemaTable::new(context.introspection.clone(), class))
            .collect();
        log::debug!(
            "Listed {} table(s) across {} visible namespace(s)",
            tables.len(),
            context.config.schemas.len()
        );
        Ok(nullable(tables))
    }
}

/// Add the metaschema context to a host schema builder.
///
/// The host's query root must include [`MetaschemaQuery`] (usually through
/// `#[derive(MergedObject)]`) for `_meta` to be reachable.
pub fn register<Query, Mutation, Subscription>(
    builder: SchemaBuilder<Query, Mutation, Subscription>,
    context: MetaschemaContext,
) -> SchemaBuilder<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    let builder = builder.data(context);
    #[cfg(feature = "tracing")]
    let builder = builder.extension(async_graphql::extensions::Tracing);
    builder
}

/// Build a schema serving only `_meta`, e.g. for SDL export
pub fn build_schema(context: MetaschemaContext) -> MetaschemaSchema {
    register(
        Schema::build(MetaschemaQuery, EmptyMutation, EmptySubscription),
        context,
    )
    .finish()
}

/// Lists keep the nullable `[T]` shape of the published schema
fn nullable<T>(items: impl IntoIterator<Item = T>) -> Option<Vec<Option<T>>> {
    Some(items.into_iter().map(Some).collect())
}
