//! Schema source intake
//!
//! Schema text arrives either pasted or from a file. Files are accepted only
//! with a `.graphql` or `.gql` extension; both carry the same SDL text.

use std::{fs, path::Path};

use log::{debug, info};

use crate::SchemascopeError;

/// File extensions accepted for schema files, compared exactly.
pub const SCHEMA_EXTENSIONS: [&str; 2] = ["graphql", "gql"];

/// Returns `true` if `path` carries an accepted schema file extension.
pub fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SCHEMA_EXTENSIONS.contains(&extension)
        })
}

/// Read schema text from a `.graphql` or `.gql` file.
///
/// # Errors
///
/// Returns [`SchemascopeError::UnsupportedFile`] for any other extension
/// (the file is not opened), or [`SchemascopeError::Io`] if it cannot be
/// read.
pub fn read_schema_file(path: impl AsRef<Path>) -> Result<String, SchemascopeError> {
    let path = path.as_ref();

    if !is_schema_file(path) {
        debug!(path = path.display().to_string(); "Rejected schema file extension");
        return Err(SchemascopeError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    let source = fs::read_to_string(path)?;
    info!(path = path.display().to_string(), bytes = source.len(); "Read schema file");
    Ok(source)
}

/// Reject pasted text that contains nothing but whitespace.
pub fn validate_source(source: &str) -> Result<&str, SchemascopeError> {
    if source.trim().is_empty() {
        return Err(SchemascopeError::EmptySource);
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_schema_extensions() {
        assert!(is_schema_file(Path::new("schema.graphql")));
        assert!(is_schema_file(Path::new("dir/api.gql")));
        assert!(!is_schema_file(Path::new("API.GraphQL")));
        assert!(!is_schema_file(Path::new("schema.GQL")));
        assert!(!is_schema_file(Path::new("schema.json")));
        assert!(!is_schema_file(Path::new("graphql")));
        assert!(!is_schema_file(Path::new("schema.graphql.txt")));
    }

    #[test]
    fn test_unsupported_file_is_not_opened() {
        let path = PathBuf::from("does/not/exist.txt");
        match read_schema_file(&path) {
            Err(SchemascopeError::UnsupportedFile { path: rejected }) => assert_eq!(rejected, path),
            other => panic!("expected UnsupportedFile, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_schema_file("does/not/exist.graphql");
        assert!(matches!(result, Err(SchemascopeError::Io(_))));
    }

    #[test]
    fn test_validate_source() {
        assert!(matches!(
            validate_source(" \n\t "),
            Err(SchemascopeError::EmptySource)
        ));
        assert_eq!(validate_source("type A { id: ID }").unwrap(), "type A { id: ID }");
    }
}
