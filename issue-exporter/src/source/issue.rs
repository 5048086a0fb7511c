//! Source issue and comment records.

use serde::{Deserialize, Deserializer};

/// State of an issue in the source export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Issue is still open.
    Open,
    /// Issue was closed.
    Closed,
}

impl IssueState {
    /// Returns the state as used by the destination API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A person referenced by the export (issue owner or comment author).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    /// Display name or email-like handle.
    pub name: String,
}

/// Structured metadata changes attached to a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdates {
    /// Label deltas. A leading `-` marks a removed label.
    #[serde(default)]
    pub labels: Vec<String>,

    /// New status, if it changed.
    #[serde(default)]
    pub status: Option<String>,

    /// New owner, if it changed.
    #[serde(default)]
    pub owner: Option<String>,
}

impl CommentUpdates {
    /// Labels added by this update.
    pub fn labels_added(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|label| !label.starts_with('-'))
    }

    /// Labels removed by this update, without the `-` prefix.
    pub fn labels_removed(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter_map(|label| label.strip_prefix('-'))
    }

    /// Returns true if the update carries no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.status.is_none() && self.owner.is_none()
    }
}

/// One comment or update record attached to an issue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceComment {
    /// Comment identifier within the issue.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,

    /// Comment author.
    pub author: Person,

    /// Text content. Empty for pure metadata updates.
    #[serde(default)]
    pub content: String,

    /// Publication timestamp as found in the export.
    #[serde(default)]
    pub published: String,

    /// Label, status and owner changes.
    #[serde(default)]
    pub updates: Option<CommentUpdates>,

    /// Present when the comment was retracted. Any value counts.
    #[serde(default)]
    pub deleted_by: Option<serde_json::Value>,
}

impl SourceComment {
    /// Returns true if the comment carries a deleted marker.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_by.is_some()
    }
}

/// Wrapper matching the export's `comments: { items: [...] }` shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentList {
    /// Comments in publication order.
    #[serde(default)]
    pub items: Vec<SourceComment>,
}

/// One migratable issue from the source export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceIssue {
    /// Stable source identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Issue number shown by the source tracker.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub number: Option<String>,

    /// Issue title; also the resume key on the destination.
    pub title: String,

    /// Open or closed.
    pub state: IssueState,

    /// Source labels in export order.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Issue owner, when the export records one.
    #[serde(default)]
    pub owner: Option<Person>,

    /// Full comment history, including retracted comments.
    #[serde(default)]
    pub comments: CommentList,
}

impl SourceIssue {
    /// Raw comment history in export order.
    #[must_use]
    pub fn comments(&self) -> &[SourceComment] {
        &self.comments.items
    }

    /// Source number if present, otherwise the source id.
    #[must_use]
    pub fn display_number(&self) -> &str {
        self.number.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}
