//! Connection Invariant Tests
//!
//! - One connection per node type, singletons excluded
//! - Generated names are unique across the schema
//! - Resolvers always read the latest nodes of their type
//! - Invalid queries are rejected with a stable code, never a panic
//! - Filter results match clause-by-clause evaluation

use std::sync::Arc;

use nodequery::connection::SchemaBuilder;
use nodequery::executor::{PaginationArgs, QueryArgs};
use nodequery::{
    EngineConfig, FieldKind, InMemoryNodeStore, Node, PluginFieldRegistry, QueryEngine,
    SchemaError, SortArgs,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn node(id: &str, node_type: &str, fields: Value) -> Node {
    Node::new(id, node_type, fields).unwrap()
}

fn blog_store() -> Arc<InMemoryNodeStore> {
    Arc::new(InMemoryNodeStore::from_nodes(vec![
        node("site", "Site", json!({"siteMetadata": {"title": "My Blog"}})),
        node(
            "post-1",
            "MarkdownRemark",
            json!({
                "frontmatter": {"title": "First", "date": "2024-01-05", "draft": false},
                "wordCount": 320,
                "tags": ["intro", "rust"],
            }),
        ),
        node(
            "post-2",
            "MarkdownRemark",
            json!({
                "frontmatter": {"title": "Second", "date": "2024-03-12", "draft": true},
                "wordCount": 1200,
                "tags": ["rust"],
            }),
        ),
        node(
            "post-3",
            "MarkdownRemark",
            json!({
                "frontmatter": {"title": "Third", "date": "2024-02-20", "draft": false},
                "wordCount": 780,
                "tags": [],
            }),
        ),
        node("page-a", "SitePage", json!({"path": "/a"})),
        node("page-b", "SitePage", json!({"path": "/b"})),
    ]))
}

fn engine(store: Arc<InMemoryNodeStore>) -> QueryEngine {
    QueryEngine::build(store, EngineConfig::default(), &PluginFieldRegistry::new()).unwrap()
}

fn ids(engine: &QueryEngine, field: &str, args: Value) -> Vec<String> {
    engine
        .query(field, &args)
        .unwrap()
        .nodes()
        .iter()
        .map(|n| n.id().to_string())
        .collect()
}

// =============================================================================
// Schema construction
// =============================================================================

#[test]
fn test_one_connection_per_type() {
    let engine = engine(blog_store());
    let schema = engine.schema();

    let fields: Vec<_> = schema.field_names().collect();
    assert_eq!(fields, vec!["allMarkdownRemark", "allSitePage"]);

    let md = schema.connection("allMarkdownRemark").unwrap();
    assert_eq!(md.connection_type_name, "MarkdownRemarkConnection");
    assert_eq!(md.args.filter.name, "filterMarkdownRemark");
    assert_eq!(md.args.sort.name(), "MarkdownRemarkConnectionSort");
    assert_eq!(md.description, "Connection to all MarkdownRemark nodes");

    let sort: Vec<_> = md.args.sort.fields().iter().map(|f| f.name.as_str()).collect();
    assert!(sort.contains(&"frontmatter___date"));
    assert!(sort.contains(&"wordCount"));
    assert!(!sort.contains(&"frontmatter"));
}

#[test]
fn test_schema_build_is_deterministic() {
    let store = blog_store();
    let first = SchemaBuilder::default()
        .build(&*store, &PluginFieldRegistry::new())
        .unwrap();

    for _ in 0..10 {
        let again = SchemaBuilder::default()
            .build(&*store, &PluginFieldRegistry::new())
            .unwrap();
        let a = serde_json::to_value(first.connections()).unwrap();
        let b = serde_json::to_value(again.connections()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_name_collision_reports_both_types() {
    let store = InMemoryNodeStore::from_nodes(vec![
        node("a", "BlogPost", json!({})),
        node("b", "blog_post", json!({})),
    ]);

    let err = SchemaBuilder::default()
        .build(&store, &PluginFieldRegistry::new())
        .unwrap_err();

    match err {
        SchemaError::NameCollision { first, second, .. } => {
            assert_eq!(first, "BlogPost");
            assert_eq!(second, "blog_post");
        }
    }
}

#[test]
fn test_plugin_fields_extend_filter_input() {
    let plugins = PluginFieldRegistry::new()
        .with_field("MarkdownRemark", "fields.slug", FieldKind::String)
        .with_field("MarkdownRemark", "wordCount", FieldKind::String);
    let engine =
        QueryEngine::build(blog_store(), EngineConfig::default(), &plugins).unwrap();

    let schema = engine.schema();
    let filter = &schema.connection("allMarkdownRemark").unwrap().args.filter.fields;
    assert!(filter.field("fields").is_some());
    assert_eq!(filter.field("wordCount").unwrap().kind, FieldKind::String);

    // wordCount is now a string field; ordering operators are rejected
    let err = engine
        .query("allMarkdownRemark", &json!({"filter": {"wordCount": {"gt": 5}}}))
        .unwrap_err();
    assert_eq!(err.code(), "QUERY_INVALID_OPERATOR");
}

// =============================================================================
// Query behaviour
// =============================================================================

/// Filtering `path` by equality returns exactly the matching page.
#[test]
fn test_filter_scenario() {
    let store = Arc::new(InMemoryNodeStore::from_nodes(vec![
        node("a", "Page", json!({"path": "/a"})),
        node("b", "Page", json!({"path": "/b"})),
    ]));
    let engine = engine(store);

    let output = engine
        .query("allPage", &json!({"filter": {"path": {"eq": "/a"}}}))
        .unwrap();
    let docs: Vec<_> = output.nodes().iter().map(|n| n.to_value()).collect();
    assert_eq!(docs, vec![json!({"id": "a", "type": "Page", "path": "/a"})]);
}

#[test]
fn test_filter_sort_and_paginate() {
    let engine = engine(blog_store());

    assert_eq!(
        ids(
            &engine,
            "allMarkdownRemark",
            json!({
                "filter": {"frontmatter": {"draft": {"eq": false}}},
                "sort": {"field": "frontmatter___date", "order": "DESC"},
            })
        ),
        vec!["post-3", "post-1"]
    );

    assert_eq!(
        ids(
            &engine,
            "allMarkdownRemark",
            json!({
                "filter": {"tags": {"in": ["rust"]}, "wordCount": {"lt": 1000}},
            })
        ),
        vec!["post-1"]
    );

    assert_eq!(
        ids(
            &engine,
            "allMarkdownRemark",
            json!({"sort": {"field": "wordCount"}, "skip": 1, "limit": 1})
        ),
        vec!["post-3"]
    );
}

#[test]
fn test_resolver_reads_latest_nodes() {
    let store = blog_store();
    let engine = engine(store.clone());

    store.upsert(node(
        "post-4",
        "MarkdownRemark",
        json!({"frontmatter": {"title": "Fourth", "date": "2024-04-01", "draft": false}}),
    ));
    store.delete("post-1");

    let found = ids(&engine, "allMarkdownRemark", Value::Null);
    assert_eq!(found, vec!["post-2", "post-3", "post-4"]);
}

#[test]
fn test_invalid_queries_are_rejected() {
    let engine = engine(blog_store());

    let cases = vec![
        (json!({"filter": {"frontmatter": {"draft": {"regex": "/x/"}}}}), "QUERY_INVALID_OPERATOR"),
        (json!({"filter": {"nope": {"eq": 1}}}), "QUERY_UNKNOWN_FIELD"),
        (json!({"filter": {"wordCount": {"in": 5}}}), "QUERY_INVALID_FILTER_VALUE"),
        (json!({"sort": {"field": "frontmatter"}}), "QUERY_UNKNOWN_SORT_FIELD"),
        (json!({"limit": -1}), "QUERY_INVALID_ARGUMENTS"),
    ];

    for (args, code) in cases {
        let err = engine.query("allMarkdownRemark", &args).unwrap_err();
        assert_eq!(err.code(), code, "args: {}", args);
    }
    assert_eq!(engine.metrics().snapshot().queries_rejected, 5);
}

#[test]
fn test_list_mode_matches_connection_nodes() {
    let engine = engine(blog_store());
    let args = QueryArgs::new()
        .with_sort(SortArgs::desc("wordCount"))
        .with_pagination(PaginationArgs::new().first(2));

    let page = engine.execute("allMarkdownRemark", &args, true).unwrap();
    let list = engine.execute("allMarkdownRemark", &args, false).unwrap();
    assert_eq!(page.nodes(), list.nodes());
    assert_eq!(page.as_page().unwrap().total_count, 3);
}

#[test]
fn test_distinct_and_group_on_page() {
    let engine = engine(blog_store());
    let schema = engine.schema();
    let connection = schema.connection("allMarkdownRemark").unwrap();

    let page = engine
        .query("allMarkdownRemark", &Value::Null)
        .unwrap()
        .into_page()
        .unwrap();

    assert_eq!(connection.distinct(&page, "tags").unwrap(), vec!["intro", "rust"]);

    let groups = connection.group(&page, "frontmatter.draft", None, None).unwrap();
    let counts: Vec<_> = groups
        .iter()
        .map(|g| (g.field_value.as_str(), g.total_count))
        .collect();
    assert_eq!(counts, vec![("false", 2), ("true", 1)]);
}
