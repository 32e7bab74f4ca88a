//! Tests for the schema contribution: SDL shape, root laziness, and host merging

mod common;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Object, Schema};
use common::{catalog, context, execute, schema};
use pg_metaschema::{register, MetaschemaQuery};
use serde_json::json;

#[test]
fn test_sdl_declares_metaschema_types() {
    let sdl = schema(catalog(), &["public"]).sdl();

    for type_name in [
        "type Metaschema ",
        "type MetaschemaTable ",
        "type MetaschemaField ",
        "type MetaschemaType ",
        "type MetaschemaPrimaryKeyConstraint ",
        "type MetaschemaForeignKeyConstraint ",
        "type MetaschemaUniqueConstraint ",
        "type MetaschemaCheckConstraint ",
        "type MetaschemaExclusionConstraint ",
        "union MetaschemaConstraint =",
    ] {
        assert!(sdl.contains(type_name), "missing `{type_name}` in:\n{sdl}");
    }

    for field in [
        "_meta: Metaschema\n",
        "tables: [MetaschemaTable]\n",
        "fields: [MetaschemaField]\n",
        "constraints: [MetaschemaConstraint]\n",
        "type: MetaschemaType!\n",
        "refTable: MetaschemaTable\n",
        "refFields: [MetaschemaField]\n",
        "fields: [String]\n",
        "name: String!\n",
    ] {
        assert!(sdl.contains(field), "missing `{field}` in:\n{sdl}");
    }
}

#[test]
fn test_union_lists_all_variants() {
    let sdl = schema(catalog(), &["public"]).sdl();
    let union_line = sdl
        .lines()
        .find(|line| line.starts_with("union MetaschemaConstraint"))
        .expect("union declared");

    for variant in [
        "MetaschemaPrimaryKeyConstraint",
        "MetaschemaForeignKeyConstraint",
        "MetaschemaUniqueConstraint",
        "MetaschemaCheckConstraint",
        "MetaschemaExclusionConstraint",
    ] {
        assert!(union_line.contains(variant), "{variant} missing from `{union_line}`");
    }
}

#[test]
fn test_root_placeholder_computes_nothing() {
    // No context registered: any resolver that touched the snapshot would fail
    let schema = Schema::build(MetaschemaQuery, EmptyMutation, EmptySubscription).finish();

    let response = execute(&schema, "{ _meta { __typename } }");
    assert_eq!(
        response,
        json!({ "data": { "_meta": { "__typename": "Metaschema" } } })
    );

    let response = execute(&schema, "{ _meta { tables { name } } }");
    assert!(response["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
}

#[derive(Default)]
struct HostQuery;

#[Object]
impl HostQuery {
    async fn version(&self) -> &str {
        "2.1.0"
    }
}

#[derive(MergedObject, Default)]
struct Query(HostQuery, MetaschemaQuery);

#[test]
fn test_merges_into_host_schema() {
    let schema = register(
        Schema::build(Query::default(), EmptyMutation, EmptySubscription),
        context(catalog(), &["public"]),
    )
    .finish();

    let response = execute(&schema, "{ version _meta { tables { name } } }");
    assert_eq!(
        response,
        json!({
            "data": {
                "version": "2.1.0",
                "_meta": { "tables": [{ "name": "orgs" }, { "name": "users" }] }
            }
        })
    );
}
