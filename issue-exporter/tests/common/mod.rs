//! In-memory destination tracker shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use issue_exporter::{
    ExistingIssue, FailureKind, IdentityResolver, IssuePage, IssueService, LabelMapper,
    NewComment, NewIssue, Operation, ServiceError, SourceComment, SourceIssue, TemplateRenderer,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call received by the fake tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListIssues(Option<String>),
    CreateIssue(NewIssue),
    CreateComment(u64, NewComment),
}

#[derive(Debug, Clone)]
struct FakeIssue {
    id: u64,
    title: String,
    comment_count: usize,
}

#[derive(Debug)]
struct State {
    issues: Vec<FakeIssue>,
    calls: Vec<Call>,
    page_size: usize,
    next_id: u64,
    fail_create_issue_at: Option<usize>,
    fail_list_page: Option<usize>,
    transient_comment_failures: usize,
    create_issue_calls: usize,
    list_calls: usize,
}

impl Default for State {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            calls: Vec::new(),
            page_size: 100,
            next_id: 1,
            fail_create_issue_at: None,
            fail_list_page: None,
            transient_comment_failures: 0,
            create_issue_calls: 0,
            list_calls: 0,
        }
    }
}

/// Fake issue tracker. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct FakeIssueService {
    state: Arc<Mutex<State>>,
}

impl FakeIssueService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing destination issue. `comment_count` includes the
    /// description.
    pub fn with_issue(self, id: u64, title: &str, comment_count: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.issues.push(FakeIssue {
                id,
                title: title.to_string(),
                comment_count,
            });
            state.next_id = state.next_id.max(id + 1);
        }
        self
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state.lock().unwrap().page_size = page_size;
        self
    }

    /// Makes the n-th (0-based) issue creation fail permanently.
    pub fn failing_create_issue_at(self, call: usize) -> Self {
        self.state.lock().unwrap().fail_create_issue_at = Some(call);
        self
    }

    /// Makes the n-th (0-based) listing request fail.
    pub fn failing_list_page(self, call: usize) -> Self {
        self.state.lock().unwrap().fail_list_page = Some(call);
        self
    }

    /// Makes the next `count` comment creations fail transiently.
    pub fn with_transient_comment_failures(self, count: usize) -> Self {
        self.state.lock().unwrap().transient_comment_failures = count;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn created_issues(&self) -> Vec<NewIssue> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateIssue(issue) => Some(issue),
                _ => None,
            })
            .collect()
    }

    pub fn created_comments(&self) -> Vec<(u64, NewComment)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateComment(id, comment) => Some((id, comment)),
                _ => None,
            })
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::ListIssues(_)))
            .count()
    }

    /// Comment count of a destination issue, including the description.
    pub fn comment_count(&self, title: &str) -> Option<usize> {
        self.state
            .lock()
            .unwrap()
            .issues
            .iter()
            .find(|issue| issue.title == title)
            .map(|issue| issue.comment_count)
    }
}

#[async_trait]
impl IssueService for FakeIssueService {
    async fn list_existing_issues(
        &self,
        page_token: Option<&str>,
    ) -> Result<IssuePage, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListIssues(page_token.map(str::to_string)));

        let call = state.list_calls;
        state.list_calls += 1;
        if state.fail_list_page == Some(call) {
            return Err(ServiceError::permanent(
                Operation::ListIssues,
                "500 Internal Server Error",
            ));
        }

        let start: usize = page_token.map_or(0, |token| token.parse().unwrap());
        let end = (start + state.page_size).min(state.issues.len());
        let items = state.issues[start..end]
            .iter()
            .map(|issue| ExistingIssue {
                id: issue.id,
                title: issue.title.clone(),
                comment_count: issue.comment_count,
            })
            .collect();

        Ok(IssuePage {
            items,
            next_page: (end < state.issues.len()).then(|| end.to_string()),
        })
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<u64, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateIssue(issue.clone()));

        let call = state.create_issue_calls;
        state.create_issue_calls += 1;
        if state.fail_create_issue_at == Some(call) {
            return Err(ServiceError::permanent(
                Operation::CreateIssue,
                "422 Validation Failed",
            ));
        }

        let id = state.next_id;
        state.next_id += 1;
        state.issues.push(FakeIssue {
            id,
            title: issue.title.clone(),
            comment_count: 1,
        });
        Ok(id)
    }

    async fn create_comment(
        &self,
        issue_id: u64,
        comment: &NewComment,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateComment(issue_id, comment.clone()));

        if state.transient_comment_failures > 0 {
            state.transient_comment_failures -= 1;
            return Err(ServiceError {
                operation: Operation::CreateComment,
                kind: FailureKind::Transient,
                message: "502 Bad Gateway".into(),
                retry_after: None,
            });
        }

        let issue = state
            .issues
            .iter_mut()
            .find(|issue| issue.id == issue_id)
            .ok_or_else(|| ServiceError::permanent(Operation::CreateComment, "404 Not Found"))?;
        issue.comment_count += 1;
        Ok(())
    }
}

pub const DEFAULT_USERNAME: &str = "default-user";

pub fn user_map() -> HashMap<String, String> {
    HashMap::from([
        ("user@email.com".to_string(), "a_uthor".to_string()),
        ("User1".to_string(), "user-one".to_string()),
    ])
}

pub fn resolver() -> IdentityResolver {
    IdentityResolver::new(user_map(), DEFAULT_USERNAME)
}

pub fn renderer() -> TemplateRenderer {
    TemplateRenderer::new(LabelMapper::default()).unwrap()
}

pub fn comment(content: &str) -> SourceComment {
    serde_json::from_value(json!({
        "content": content,
        "id": 1,
        "published": "last year",
        "author": {"name": "user@email.com"},
    }))
    .unwrap()
}

pub fn deleted(content: &str) -> SourceComment {
    let mut comment = comment(content);
    comment.deleted_by = Some(json!({}));
    comment
}

pub fn issue(id: &str, title: &str, state: &str, comments: Vec<SourceComment>) -> SourceIssue {
    let mut issue: SourceIssue = serde_json::from_value(json!({
        "id": id,
        "number": id,
        "title": title,
        "state": state,
        "labels": [],
        "owner": {"kind": "projecthosting#issuePerson", "name": format!("User{id}")},
    }))
    .unwrap();
    issue.comments.items = comments;
    issue
}

/// Three issues with 3, 1 and 2 comments.
pub fn three_issues() -> Vec<SourceIssue> {
    let mut first = issue(
        "1",
        "Title1",
        "open",
        vec![comment("one"), comment("two"), comment("three")],
    );
    first.labels = vec!["Type-Issue".into(), "Priority-High".into()];

    let second = issue("2", "Title2", "closed", vec![comment("one")]);

    let mut third = issue("3", "Title3", "closed", vec![comment("one"), comment("two")]);
    third.labels = vec!["Type-Defect".into()];

    vec![first, second, third]
}
