//! Comment visibility filtering.

use crate::source::SourceComment;

/// Returns the comments of an issue that are still visible, in order.
///
/// Retracted comments (those carrying a deleted marker) are dropped. Comments
/// with empty content are kept, since they usually record a label or status
/// change. The iterator is lazy and can be cloned to restart the pass.
pub fn visible_comments(
    comments: &[SourceComment],
) -> impl Iterator<Item = &SourceComment> + Clone {
    comments.iter().filter(|comment| !comment.is_deleted())
}

/// Number of visible comments, including the one that becomes the issue body.
#[must_use]
pub fn visible_count(comments: &[SourceComment]) -> usize {
    visible_comments(comments).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CommentUpdates, Person};

    fn comment(content: &str, deleted: bool) -> SourceComment {
        SourceComment {
            id: None,
            author: Person {
                name: "user@example.com".into(),
            },
            content: content.into(),
            published: "last year".into(),
            updates: None,
            deleted_by: deleted.then(|| serde_json::json!({})),
        }
    }

    #[test]
    fn drops_deleted_comments_in_order() {
        let comments = [
            comment("one", false),
            comment("gone", true),
            comment("two", false),
            comment("gone again", true),
        ];

        let visible: Vec<_> = visible_comments(&comments)
            .map(|c| c.content.as_str())
            .collect();
        assert_eq!(visible, ["one", "two"]);
        assert_eq!(visible_count(&comments), 2);
    }

    #[test]
    fn keeps_metadata_only_updates() {
        let mut update = comment("", false);
        update.updates = Some(CommentUpdates {
            labels: vec!["-Priority-Low".into()],
            ..CommentUpdates::default()
        });

        assert_eq!(visible_count(&[update]), 1);
    }

    #[test]
    fn iterator_can_restart() {
        let comments = [comment("a", false), comment("b", true)];
        let visible = visible_comments(&comments);

        assert_eq!(visible.clone().count(), 1);
        assert_eq!(visible.count(), 1);
    }
}
