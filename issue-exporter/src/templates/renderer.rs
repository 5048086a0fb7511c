//! Template renderer.

use crate::identity::ResolvedAuthor;
use crate::labels::LabelMapper;
use crate::source::{SourceComment, SourceIssue};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::json;

/// Name of the registered issue body template.
const ISSUE_TEMPLATE: &str = "issue";

/// Name of the registered comment body template.
const COMMENT_TEMPLATE: &str = "comment";

/// Built-in issue body template.
pub const DEFAULT_ISSUE_TEMPLATE: &str = include_str!("issue.md.hbs");

/// Built-in comment body template.
pub const DEFAULT_COMMENT_TEMPLATE: &str = include_str!("comment.md.hbs");

/// Creates a Handlebars registry configured for markdown output.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - A `fence` helper producing a code fence that `content` cannot close
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs.register_helper("fence", Box::new(fence));

    hbs
}

handlebars_helper!(fence: |content: str| code_fence(content));

/// Backtick fence one longer than the longest backtick run in `content`,
/// and at least three long.
fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Renders destination issue and comment bodies from source records.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    labels: LabelMapper,
}

impl TemplateRenderer {
    /// Creates a renderer using the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to register.
    pub fn new(labels: LabelMapper) -> Result<Self, super::TemplateError> {
        Self::with_templates(labels, DEFAULT_ISSUE_TEMPLATE, DEFAULT_COMMENT_TEMPLATE)
    }

    /// Creates a renderer using custom issue and comment templates.
    ///
    /// # Errors
    ///
    /// Returns an error if either template fails to parse.
    pub fn with_templates(
        labels: LabelMapper,
        issue_template: &str,
        comment_template: &str,
    ) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(ISSUE_TEMPLATE, issue_template)?;
        handlebars.register_template_string(COMMENT_TEMPLATE, comment_template)?;
        Ok(Self { handlebars, labels })
    }

    /// Returns the label mapper used for issue and update labels.
    pub fn labels(&self) -> &LabelMapper {
        &self.labels
    }

    /// Renders the body of a destination issue.
    ///
    /// `first_comment` is the first visible comment of the issue, which holds
    /// the original description. `reporter` is its resolved author, or the
    /// resolved owner when the issue has no visible comment.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(
        &self,
        issue: &SourceIssue,
        first_comment: Option<&SourceComment>,
        reporter: &ResolvedAuthor,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "number": issue.display_number(),
            "source_id": issue.id,
            "content": first_comment.map_or("", |c| c.content.as_str()),
            "published": first_comment.map_or("an unknown date", |c| c.published.as_str()),
            "author": reporter.attribution(),
        });

        Ok(self.handlebars.render(ISSUE_TEMPLATE, &data)?)
    }

    /// Renders the body of a destination comment.
    ///
    /// `number` is the comment's position among the issue's comments, the
    /// description not included.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment_body(
        &self,
        comment: &SourceComment,
        number: usize,
        author: &ResolvedAuthor,
    ) -> Result<String, super::TemplateError> {
        let updates = comment.updates.clone().unwrap_or_default();
        let data = json!({
            "number": number,
            "author": author.attribution(),
            "published": comment.published,
            "content": comment.content,
            "labels_added": self.labels.map_all(updates.labels_added()).join(", "),
            "labels_removed": self.labels.map_all(updates.labels_removed()).join(", "),
            "status": updates.status.as_deref().unwrap_or(""),
            "owner": updates.owner.as_deref().unwrap_or(""),
        });

        Ok(self.handlebars.render(COMMENT_TEMPLATE, &data)?)
    }
}
