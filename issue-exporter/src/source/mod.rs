//! Source export loading.
//!
//! Parses a Google Code project hosting export into typed [`SourceIssue`]
//! records. Validation happens here so the engine only ever sees complete
//! records; malformed entries are skipped and counted.

mod error;
mod issue;

pub use error::SourceError;
pub use issue::{CommentList, CommentUpdates, IssueState, Person, SourceComment, SourceIssue};

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Issues loaded from an export, with the number of records that were rejected.
#[derive(Debug, Clone, Default)]
pub struct LoadedIssues {
    /// Valid issues in export order.
    pub issues: Vec<SourceIssue>,

    /// Number of records skipped because they failed validation.
    pub malformed: usize,
}

/// Loads issues from an export file.
///
/// The file may either be a plain JSON array of issues, or a Takeout-style
/// document of the form `{"projects": [{"name": ..., "issues": {"items": [...]}}]}`.
/// For the latter, `project_name` selects the project; it may be omitted when
/// the export contains exactly one project.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed, or if the
/// requested project is not present.
pub fn load_issues(path: &Path, project_name: Option<&str>) -> Result<LoadedIssues, SourceError> {
    debug!(path = %path.display(), "Loading issue file");

    let content = std::fs::read_to_string(path).map_err(|e| SourceError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|e| SourceError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;

    let records = select_issue_records(document, project_name, path)?;
    let loaded = parse_records(records);

    info!(
        count = loaded.issues.len(),
        malformed = loaded.malformed,
        "Loaded source issues"
    );
    Ok(loaded)
}

/// Validates raw issue records, skipping the ones that do not match the schema.
#[must_use]
pub fn parse_records(records: Vec<Value>) -> LoadedIssues {
    let mut loaded = LoadedIssues::default();

    for (position, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<SourceIssue>(record) {
            Ok(issue) => loaded.issues.push(issue),
            Err(e) => {
                warn!(position, error = %e, "Skipping malformed issue record");
                loaded.malformed += 1;
            }
        }
    }

    loaded
}

fn select_issue_records(
    document: Value,
    project_name: Option<&str>,
    path: &Path,
) -> Result<Vec<Value>, SourceError> {
    let missing = |message: &str| SourceError::MissingIssues {
        path: path.display().to_string(),
        message: message.to_string(),
    };

    let projects = match document {
        Value::Array(records) => return Ok(records),
        Value::Object(mut map) => match map.remove("projects") {
            Some(Value::Array(projects)) => projects,
            _ => return Err(missing("expected an array or a 'projects' list")),
        },
        _ => return Err(missing("expected an array or an object")),
    };

    let project = match project_name {
        Some(name) => projects
            .into_iter()
            .find(|p| p.get("name").and_then(Value::as_str) == Some(name))
            .ok_or_else(|| SourceError::ProjectNotFound {
                path: path.display().to_string(),
                name: name.to_string(),
            })?,
        None if projects.len() == 1 => projects
            .into_iter()
            .next()
            .ok_or_else(|| missing("no projects"))?,
        None => {
            return Err(missing(
                "export contains several projects, a project name is required",
            ))
        }
    };

    match project.get("issues").and_then(|i| i.get("items")) {
        Some(Value::Array(items)) => Ok(items.clone()),
        _ => Err(missing("project has no 'issues.items' list")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_export(value: &Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    #[test]
    fn loads_plain_array() {
        let file = write_export(&json!([
            {"id": "1", "title": "One", "state": "open"},
            {"id": "2", "title": "Two", "state": "closed"}
        ]));

        let loaded = load_issues(file.path(), None).unwrap();
        assert_eq!(loaded.issues.len(), 2);
        assert_eq!(loaded.malformed, 0);
    }

    #[test]
    fn selects_named_project() {
        let file = write_export(&json!({"projects": [
            {"name": "alpha", "issues": {"items": [{"id": "1", "title": "A", "state": "open"}]}},
            {"name": "beta", "issues": {"items": [
                {"id": "1", "title": "B1", "state": "open"},
                {"id": "2", "title": "B2", "state": "open"}
            ]}}
        ]}));

        let loaded = load_issues(file.path(), Some("beta")).unwrap();
        assert_eq!(loaded.issues.len(), 2);
        assert_eq!(loaded.issues[0].title, "B1");
    }

    #[test]
    fn unknown_project_is_an_error() {
        let file = write_export(&json!({"projects": [
            {"name": "alpha", "issues": {"items": []}}
        ]}));

        let result = load_issues(file.path(), Some("gamma"));
        assert!(matches!(result, Err(SourceError::ProjectNotFound { .. })));
    }

    #[test]
    fn several_projects_require_a_name() {
        let file = write_export(&json!({"projects": [
            {"name": "alpha", "issues": {"items": []}},
            {"name": "beta", "issues": {"items": []}}
        ]}));

        let result = load_issues(file.path(), None);
        assert!(matches!(result, Err(SourceError::MissingIssues { .. })));
    }

    #[test]
    fn skips_malformed_records() {
        let loaded = parse_records(vec![
            json!({"id": "1", "title": "Fine", "state": "open"}),
            json!({"id": "2", "state": "open"}),
            json!({"id": "3", "title": "Bad state", "state": "wontfix"}),
        ]);

        assert_eq!(loaded.issues.len(), 1);
        assert_eq!(loaded.malformed, 2);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let result = load_issues(file.path(), None);
        assert!(matches!(result, Err(SourceError::JsonError { .. })));
    }
}
