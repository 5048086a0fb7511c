//! Conversion of GitHub's issue listing into destination issues.

use crate::service::{ExistingIssue, Operation, ServiceError};
use octocrab::models::issues::Issue;

/// Converts a listed issue, or returns `None` for a pull request.
///
/// GitHub's `comments` excludes the description, which counts as the first
/// migrated comment.
pub(crate) fn existing_issue(issue: Issue) -> Option<ExistingIssue> {
    if issue.pull_request.is_some() {
        return None;
    }

    Some(ExistingIssue {
        id: issue.number,
        title: issue.title,
        comment_count: issue.comments as usize + 1,
    })
}

/// Parses a page token into a 1-based page number. No token is the first page.
pub(crate) fn page_number(page_token: Option<&str>) -> Result<u32, ServiceError> {
    match page_token {
        Some(token) => token
            .parse::<u32>()
            .ok()
            .filter(|page| *page > 0)
            .ok_or_else(|| {
                ServiceError::permanent(
                    Operation::ListIssues,
                    format!("invalid page token '{token}'"),
                )
            }),
        None => Ok(1),
    }
}

/// Token for the page after `page`, if GitHub linked one.
pub(crate) fn next_page_token(page: u32, has_next: bool) -> Option<String> {
    has_next.then(|| (page + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn user() -> Value {
        json!({
            "login": "octocat",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "gravatar_id": "",
            "url": "https://api.github.com/users/octocat",
            "html_url": "https://github.com/octocat",
            "followers_url": "https://api.github.com/users/octocat/followers",
            "following_url": "https://api.github.com/users/octocat/following{/other_user}",
            "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
            "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
            "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
            "organizations_url": "https://api.github.com/users/octocat/orgs",
            "repos_url": "https://api.github.com/users/octocat/repos",
            "events_url": "https://api.github.com/users/octocat/events{/privacy}",
            "received_events_url": "https://api.github.com/users/octocat/received_events",
            "type": "User",
            "site_admin": false
        })
    }

    fn listed_issue(number: u64, title: &str, comments: u32) -> Value {
        let base = format!("https://api.github.com/repos/octocat/exported/issues/{number}");
        json!({
            "id": 1000 + number,
            "node_id": "MDU6SXNzdWUx",
            "url": base,
            "repository_url": "https://api.github.com/repos/octocat/exported",
            "labels_url": format!("{base}/labels{{/name}}"),
            "comments_url": format!("{base}/comments"),
            "events_url": format!("{base}/events"),
            "html_url": format!("https://github.com/octocat/exported/issues/{number}"),
            "number": number,
            "state": "open",
            "title": title,
            "body": "migrated description",
            "user": user(),
            "labels": [],
            "assignees": [],
            "locked": false,
            "comments": comments,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        })
    }

    fn parse(value: Value) -> Issue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn description_counts_as_first_comment() {
        let issue = existing_issue(parse(listed_issue(7, "Crash on startup", 2))).unwrap();

        assert_eq!(issue.id, 7);
        assert_eq!(issue.title, "Crash on startup");
        assert_eq!(issue.comment_count, 3);
    }

    #[test]
    fn issue_without_comments_counts_its_description() {
        let issue = existing_issue(parse(listed_issue(1, "Empty", 0))).unwrap();

        assert_eq!(issue.comment_count, 1);
    }

    #[test]
    fn pull_requests_are_dropped() {
        let mut value = listed_issue(8, "Add dark theme", 0);
        value["pull_request"] = json!({
            "url": "https://api.github.com/repos/octocat/exported/pulls/8",
            "html_url": "https://github.com/octocat/exported/pull/8",
            "diff_url": "https://github.com/octocat/exported/pull/8.diff",
            "patch_url": "https://github.com/octocat/exported/pull/8.patch"
        });

        assert_eq!(existing_issue(parse(value)), None);
    }

    #[test]
    fn page_tokens_follow_page_numbers() {
        assert_eq!(page_number(None).unwrap(), 1);
        assert_eq!(page_number(Some("3")).unwrap(), 3);
        assert_eq!(next_page_token(1, true).as_deref(), Some("2"));
        assert_eq!(next_page_token(3, false), None);
    }

    #[test]
    fn invalid_page_token_is_permanent() {
        let error = page_number(Some("next")).unwrap_err();
        assert!(!error.is_transient());
        assert!(page_number(Some("0")).is_err());
    }
}
