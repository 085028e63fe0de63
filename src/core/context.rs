//! Explicit organization context
//!
//! Callers pass the organization being viewed into the core functions
//! instead of reading it from shared session state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
}

/// The organization a finance view is rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationContext {
    pub name: String,
    /// Source platform of the organization, e.g. `github`
    pub platform: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryRef>,
}

impl OrganizationContext {
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            repositories: Vec::new(),
        }
    }

    pub fn with_repository(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.repositories.push(RepositoryRef {
            name: name.into(),
            visibility,
        });
        self
    }

    /// Pure: whether any repository is public
    pub fn has_public_repositories(&self) -> bool {
        self.repositories
            .iter()
            .any(|r| r.visibility == Visibility::Public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_public_repositories() {
        let org = OrganizationContext::new("acme", "github");
        assert!(!org.has_public_repositories());

        let org = org.with_repository("internal", Visibility::Private);
        assert!(!org.has_public_repositories());

        let org = org.with_repository("widgets", Visibility::Public);
        assert!(org.has_public_repositories());
    }

    #[test]
    fn test_visibility_defaults_to_private() {
        let repo: RepositoryRef = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(repo.visibility, Visibility::Private);
    }
}
