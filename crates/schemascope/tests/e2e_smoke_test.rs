use std::{
    fs,
    path::{Path, PathBuf},
};

use schemascope::{Schemascope, SchemascopeError, error_adapter::to_reportables, intake};

fn schemas_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/schemas")
}

/// Collects all schema files from a directory
fn collect_schema_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && intake::is_schema_file(path))
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn visualize_file(path: &Path) -> Result<schemascope::graph::SchemaGraph, SchemascopeError> {
    let source = intake::read_schema_file(path)?;
    Schemascope::default().visualize(&source)
}

#[test]
fn e2e_smoke_test_valid_schemas() {
    let valid_schemas = collect_schema_files(schemas_dir());

    assert!(
        !valid_schemas.is_empty(),
        "No valid schemas found in tests/schemas/"
    );

    let mut failed_schemas = Vec::new();

    for path in &valid_schemas {
        match visualize_file(path) {
            Ok(graph) => assert!(!graph.is_empty(), "{} produced no nodes", path.display()),
            Err(e) => failed_schemas.push((path.clone(), e)),
        }
    }

    if !failed_schemas.is_empty() {
        eprintln!("\nValid schemas that failed:");
        for (path, err) in &failed_schemas {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid schema(s) failed unexpectedly", failed_schemas.len());
    }
}

#[test]
fn e2e_smoke_test_error_schemas() {
    let error_schemas = collect_schema_files(schemas_dir().join("errors"));

    assert!(
        !error_schemas.is_empty(),
        "No error schemas found in tests/schemas/errors/"
    );

    let mut unexpected_successes = Vec::new();

    for path in &error_schemas {
        match visualize_file(path) {
            Ok(_) => unexpected_successes.push(path.clone()),
            Err(err) => {
                assert!(
                    matches!(err, SchemascopeError::SchemaParse { .. }),
                    "{}: expected a parse error, got {err}",
                    path.display()
                );
                assert!(!to_reportables(&err).is_empty());
            }
        }
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError schemas that unexpectedly succeeded:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error schema(s) unexpectedly succeeded",
            unexpected_successes.len()
        );
    }
}

#[test]
fn e2e_blog_schema_graph() {
    let graph = visualize_file(&schemas_dir().join("blog.graphql")).unwrap();

    let names: Vec<_> = graph.nodes().iter().map(|node| node.display_name()).collect();
    assert_eq!(names, ["Node", "Author", "Comment", "Post", "Query", "Mutation"]);

    let post = graph.node_by_name("Post").unwrap();
    assert_eq!(
        post.field_summaries(),
        [
            "id: ID!",
            "title: String!",
            "author: Author!",
            "comments: [Comment!]!",
            "tags: [String!]!",
            "status: PostStatus!",
        ]
    );

    let targets: Vec<_> = graph
        .outgoing(post.id())
        .map(|edge| edge.target_name())
        .collect();
    assert_eq!(targets, ["Author", "Comment"]);
    assert_eq!(graph.edges().len(), 7);
}

#[test]
fn e2e_commerce_schema_graph() {
    let graph = visualize_file(&schemas_dir().join("commerce.gql")).unwrap();

    let names: Vec<_> = graph.nodes().iter().map(|node| node.display_name()).collect();
    assert_eq!(
        names,
        ["Money", "Product", "Category", "Order", "OrderLine", "Shop", "Checkout"]
    );

    // `Order.lines` points forward at `OrderLine` and is dropped
    let order = graph.node_by_name("Order").unwrap();
    let targets: Vec<_> = graph
        .outgoing(order.id())
        .map(|edge| edge.target_name())
        .collect();
    assert_eq!(targets, ["Money"]);

    // `Shop.categories` comes from an extension
    let shop = graph.node_by_name("Shop").unwrap();
    let fields: Vec<_> = graph.outgoing(shop.id()).map(|edge| edge.field()).collect();
    assert_eq!(fields, ["product", "orders", "categories"]);

    assert_eq!(graph.edges().len(), 8);
}
