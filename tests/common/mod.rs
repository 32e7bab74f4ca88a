//! Shared catalog fixtures and execution helpers for metaschema integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{ObjectType, Schema, SubscriptionType};
use futures::executor::block_on;
use pg_metaschema::{
    build_schema, Introspection, MetaschemaConfig, MetaschemaContext, MetaschemaSchema,
};
use serde_json::{json, Value};

/// A small catalog: two public tables with constraints of every kind, a table in a
/// private namespace, a catalog table, and one class of every non-table kind.
pub fn catalog() -> Value {
    json!({
        "namespace": [
            { "id": 11, "name": "pg_catalog" },
            { "id": 2200, "name": "public" },
            { "id": 16000, "name": "private" }
        ],
        "type": [
            { "id": 16, "name": "bool" },
            { "id": 23, "name": "int4" },
            { "id": 25, "name": "text" },
            { "id": 27, "name": "tid" },
            { "id": 28, "name": "xid" }
        ],
        "class": [
            { "id": 1259, "name": "pg_class", "namespaceId": 11, "classKind": "r" },
            { "id": 16384, "name": "orgs", "namespaceId": 2200, "classKind": "r" },
            { "id": 16390, "name": "users", "namespaceId": 2200, "classKind": "r" },
            { "id": 16400, "name": "users_pkey", "namespaceId": 2200, "classKind": "i" },
            { "id": 16401, "name": "users_id_seq", "namespaceId": 2200, "classKind": "S" },
            { "id": 16402, "name": "active_users", "namespaceId": 2200, "classKind": "v" },
            { "id": 16403, "name": "user_stats", "namespaceId": 2200, "classKind": "m" },
            { "id": 16404, "name": "address", "namespaceId": 2200, "classKind": "c" },
            { "id": 16405, "name": "remote_users", "namespaceId": 2200, "classKind": "f" },
            { "id": 16406, "name": "events", "namespaceId": 2200, "classKind": "p" },
            { "id": 16407, "name": "events_at_idx", "namespaceId": 2200, "classKind": "I" },
            { "id": 16408, "name": "pg_toast_16390", "namespaceId": 2200, "classKind": "t" },
            { "id": 16500, "name": "secrets", "namespaceId": 16000, "classKind": "r" }
        ],
        "attribute": [
            { "classId": 1259, "num": 1, "name": "relname", "typeId": 25 },

            { "classId": 16384, "num": -1, "name": "ctid", "typeId": 27 },
            { "classId": 16384, "num": 1, "name": "id", "typeId": 23 },
            { "classId": 16384, "num": 2, "name": "title", "typeId": 25 },

            { "classId": 16390, "num": -3, "name": "xmin", "typeId": 28 },
            { "classId": 16390, "num": -1, "name": "ctid", "typeId": 27 },
            { "classId": 16390, "num": 0, "name": "pseudo", "typeId": 23 },
            { "classId": 16390, "num": 1, "name": "id", "typeId": 23 },
            { "classId": 16390, "num": 2, "name": "name", "typeId": 25 },
            { "classId": 16390, "num": 3, "name": "org_id", "typeId": 23 },
            { "classId": 16390, "num": 4, "name": "email", "typeId": 25 },
            { "classId": 16390, "num": 5, "name": "active", "typeId": 16 },

            { "classId": 16402, "num": 1, "name": "id", "typeId": 23 },
            { "classId": 16500, "num": 1, "name": "token", "typeId": 25 }
        ],
        "constraint": [
            {
                "id": 17000, "name": "orgs_pkey", "classId": 16384, "type": "p",
                "keyAttributeNums": [1]
            },
            {
                "id": 17001, "name": "users_pkey", "classId": 16390, "type": "p",
                "keyAttributeNums": [1]
            },
            {
                "id": 17002, "name": "users_org_id_fkey", "classId": 16390, "type": "f",
                "keyAttributeNums": [3], "foreignClassId": 16384, "foreignKeyAttributeNums": [1]
            },
            {
                "id": 17003, "name": "users_email_key", "classId": 16390, "type": "u",
                "keyAttributeNums": [4]
            },
            {
                "id": 17004, "name": "users_name_check", "classId": 16390, "type": "c",
                "keyAttributeNums": [2]
            },
            {
                "id": 17005, "name": "users_active_excl", "classId": 16390, "type": "x",
                "keyAttributeNums": [5]
            },
            {
                "id": 17006, "name": "secrets_pkey", "classId": 16500, "type": "p",
                "keyAttributeNums": [1]
            }
        ]
    })
}

pub fn context(raw: Value, schemas: &[&str]) -> MetaschemaContext {
    let introspection = Introspection::from_value(raw).expect("fixture snapshot is valid");
    MetaschemaContext::new(Arc::new(introspection), MetaschemaConfig::new(schemas.iter().copied()))
}

pub fn schema(raw: Value, schemas: &[&str]) -> MetaschemaSchema {
    build_schema(context(raw, schemas))
}

/// Execute a query and return the serialized response (`data`, plus `errors` when present)
pub fn execute<Q, M, S>(schema: &Schema<Q, M, S>, query: &str) -> Value
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    let response = block_on(schema.execute(query));
    serde_json::to_value(&response).expect("response serializes")
}

/// Names of the tables listed under `_meta`
pub fn table_names(schema: &MetaschemaSchema) -> Vec<String> {
    let response = execute(schema, "{ _meta { tables { name } } }");
    assert_eq!(response.get("errors"), None, "unexpected errors: {response}");
    response["data"]["_meta"]["tables"]
        .as_array()
        .expect("tables is a list")
        .iter()
        .map(|table| table["name"].as_str().expect("name is a string").to_string())
        .collect()
}
