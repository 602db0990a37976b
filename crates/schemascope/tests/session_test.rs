//! Integration tests for loading schemas into a session.

use std::fs;

use tempfile::tempdir;

use schemascope::{
    Schemascope, SchemascopeError,
    config::{AppConfig, load_config},
    layout::GridConfig,
    session::Session,
};

#[test]
fn test_load_source_replaces_previous_graph() {
    let mut session = Session::default();
    assert!(!session.is_loaded());

    session
        .load_source("type User { id: ID }\ntype Query { me: User }")
        .expect("first schema should load");
    assert_eq!(session.graph().unwrap().nodes().len(), 2);

    let graph = session
        .load_source("type Post { id: ID }")
        .expect("second schema should load");
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.nodes()[0].display_name(), "Post");
    assert_eq!(graph.nodes()[0].id().index(), 0);
    assert!(session.catalog().unwrap().contains("Post"));
    assert!(!session.catalog().unwrap().contains("User"));
}

#[test]
fn test_failed_load_clears_session() {
    let mut session = Session::default();
    session.load_source("type Query { ping: String }").unwrap();

    let err = session.load_source("type Query {").unwrap_err();
    assert!(matches!(err, SchemascopeError::SchemaParse { .. }));
    assert!(session.graph().is_none());
    assert!(session.catalog().is_none());
}

#[test]
fn test_blank_source_is_rejected_before_parsing() {
    let mut session = Session::default();
    let err = session.load_source("   \n  ").unwrap_err();
    assert!(matches!(err, SchemascopeError::EmptySource));
    assert!(!session.is_loaded());
}

#[test]
fn test_reset() {
    let mut session = Session::default();
    session.load_source("type Query { ping: String }").unwrap();
    session.reset();
    assert!(session.graph().is_none());
}

#[test]
fn test_load_graphql_and_gql_files() {
    let dir = tempdir().expect("Failed to create temp directory");
    let mut session = Session::default();

    for file_name in ["schema.graphql", "schema.gql"] {
        let path = dir.path().join(file_name);
        fs::write(&path, "type User { id: ID }\ntype Query { me: User }").unwrap();

        let graph = session.load_file(&path).expect("schema file should load");
        assert_eq!(graph.edges().len(), 1);
    }
}

#[test]
fn test_unsupported_file_extension() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("schema.json");
    fs::write(&path, "type Query { ping: String }").unwrap();

    let mut session = Session::default();
    session.load_source("type Query { ping: String }").unwrap();

    let err = session.load_file(&path).unwrap_err();
    assert!(matches!(err, SchemascopeError::UnsupportedFile { .. }));
    assert!(session.graph().is_none());
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("API.GraphQL");
    fs::write(&path, "type Query { ping: String }").unwrap();

    let err = Session::default().load_file(&path).unwrap_err();
    assert!(matches!(err, SchemascopeError::UnsupportedFile { .. }));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let mut session = Session::default();

    let err = session.load_file(dir.path().join("absent.graphql")).unwrap_err();
    assert!(matches!(err, SchemascopeError::Io(_)));
}

#[test]
fn test_session_uses_configured_grid() {
    let dir = tempdir().expect("Failed to create temp directory");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[layout]\nrow_spacing = 40\ncolumn_spacing = 90\ncolumn_capacity = 1\n",
    )
    .unwrap();

    let config = load_config(Some(&config_path)).expect("config should load");
    assert_eq!(*config.layout(), GridConfig::new(40, 90, 1));

    let mut session = Session::new(Schemascope::new(config));
    let graph = session
        .load_source("type A { id: ID }\ntype B { id: ID }")
        .unwrap();
    let xs: Vec<_> = graph.nodes().iter().map(|node| node.position().x).collect();
    assert_eq!(xs, [0, 90]);
}

#[test]
fn test_invalid_config_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\ncolumn_capacity = -1\n").unwrap();

    let err = load_config(Some(&config_path)).unwrap_err();
    assert!(matches!(err, SchemascopeError::Config(_)));
}

#[test]
fn test_default_config_matches_default_grid() {
    assert_eq!(*AppConfig::default().layout(), GridConfig::default());
}
