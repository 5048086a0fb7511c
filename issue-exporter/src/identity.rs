//! Author identity mapping.

use std::collections::HashMap;
use tracing::debug;

/// Outcome of resolving a source author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuthor {
    /// Destination username to act as.
    pub username: String,

    /// Author name as it appears in the source export.
    pub original: String,

    /// Whether the identity map had an entry for this author.
    pub mapped: bool,
}

impl ResolvedAuthor {
    /// Text used to credit the author in issue and comment bodies.
    ///
    /// Mapped authors are mentioned by username; unmapped authors keep their
    /// original name so provenance is not lost.
    #[must_use]
    pub fn attribution(&self) -> String {
        if self.mapped {
            format!("@{}", self.username)
        } else {
            format!("`{}`", self.original)
        }
    }
}

/// Maps source author identities to destination usernames.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    user_map: HashMap<String, String>,
    fallback: String,
}

impl IdentityResolver {
    /// Creates a resolver from an identity map and the username used for
    /// authors that have no mapping.
    pub fn new(user_map: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self {
            user_map,
            fallback: fallback.into(),
        }
    }

    /// Returns the fallback username.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves a source author. Never fails.
    pub fn resolve(&self, author: &str) -> ResolvedAuthor {
        match self.user_map.get(author) {
            Some(username) => ResolvedAuthor {
                username: username.clone(),
                original: author.to_string(),
                mapped: true,
            },
            None => {
                debug!(author, fallback = %self.fallback, "No identity mapping, using fallback");
                ResolvedAuthor {
                    username: self.fallback.clone(),
                    original: author.to_string(),
                    mapped: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        let map = HashMap::from([("user@example.com".to_string(), "octocat".to_string())]);
        IdentityResolver::new(map, "migration-bot")
    }

    #[test]
    fn resolves_mapped_author() {
        let author = resolver().resolve("user@example.com");

        assert_eq!(author.username, "octocat");
        assert!(author.mapped);
        assert_eq!(author.attribution(), "@octocat");
    }

    #[test]
    fn falls_back_for_unknown_author() {
        let resolver = resolver();
        let author = resolver.resolve("stranger@example.com");

        assert_eq!(author.username, resolver.fallback());
        assert!(!author.mapped);
        assert_eq!(author.attribution(), "`stranger@example.com`");
    }

    #[test]
    fn matching_is_exact() {
        assert!(!resolver().resolve("USER@example.com").mapped);
    }
}
