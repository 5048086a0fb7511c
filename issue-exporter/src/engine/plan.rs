//! Per-issue decisions.

use crate::progress::DestinationIssue;
use serde::Serialize;

/// What the engine does with a source issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IssueAction {
    /// The issue does not exist on the destination yet.
    Create,

    /// The issue exists but lacks trailing comments, which are re-added
    /// starting at visible comment `from`.
    Repair {
        /// Destination issue id.
        id: u64,
        /// Offset of the first visible comment to re-add.
        from: usize,
    },

    /// The issue exists with all of its comments.
    Skip {
        /// Destination issue id.
        id: u64,
    },
}

impl IssueAction {
    /// Decides what to do given the destination state and the number of
    /// visible source comments.
    #[must_use]
    pub fn decide(existing: Option<&DestinationIssue>, visible: usize) -> Self {
        match existing {
            None => Self::Create,
            Some(issue) if issue.comment_count < visible => Self::Repair {
                id: issue.id,
                from: issue.comment_count,
            },
            Some(issue) => Self::Skip { id: issue.id },
        }
    }

    /// Number of comment-creation calls this action makes.
    #[must_use]
    pub fn comments_to_create(&self, visible: usize) -> usize {
        match self {
            // The first visible comment becomes the issue body
            Self::Create => visible.saturating_sub(1),
            Self::Repair { from, .. } => visible.saturating_sub(*from),
            Self::Skip { .. } => 0,
        }
    }

    /// Returns the action as a string for reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Repair { .. } => "repair",
            Self::Skip { .. } => "skip",
        }
    }
}

/// Dry-run entry for one source issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedIssue {
    /// Source issue title.
    pub title: String,

    /// Action a real run would take.
    pub action: IssueAction,

    /// Comment-creation calls a real run would make.
    pub comments_to_create: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(comment_count: usize) -> DestinationIssue {
        DestinationIssue {
            id: 9,
            title: "T".into(),
            comment_count,
        }
    }

    #[test]
    fn missing_issue_is_created() {
        let action = IssueAction::decide(None, 3);

        assert_eq!(action, IssueAction::Create);
        assert_eq!(action.comments_to_create(3), 2);
        assert_eq!(action.comments_to_create(0), 0);
    }

    #[test]
    fn incomplete_issue_is_repaired_from_its_comment_count() {
        let action = IssueAction::decide(Some(&existing(1)), 3);

        assert_eq!(action, IssueAction::Repair { id: 9, from: 1 });
        assert_eq!(action.comments_to_create(3), 2);
    }

    #[test]
    fn complete_issue_is_skipped() {
        assert_eq!(
            IssueAction::decide(Some(&existing(3)), 3),
            IssueAction::Skip { id: 9 }
        );
        assert_eq!(
            IssueAction::decide(Some(&existing(5)), 3),
            IssueAction::Skip { id: 9 }
        );
    }
}
