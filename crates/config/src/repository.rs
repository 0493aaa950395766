//! Repository coordinates with flexible parsing.
//!
//! A [`Repository`] is written either as `"owner/repo"` or as
//! `{ "owner": "...", "repo": "...", "token": "..." }` when it needs its own
//! token.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A configured GitHub repository.
///
/// An optional token is held as a [`SecretString`]; two repositories are
/// equal when their coordinates and tokens match.
///
/// # Examples
///
/// ```
/// use mergeable_config::Repository;
///
/// let repo: Repository = "mergeability/mergeable".parse().unwrap();
/// assert_eq!(repo.owner(), "mergeability");
/// assert_eq!(repo.repo(), "mergeable");
/// assert!(repo.token().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    owner: String,
    repo: String,
    token: Option<SecretString>,
}

impl Repository {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: None,
        }
    }

    /// Creates a repository that authenticates with its own `token`.
    #[must_use]
    pub fn with_token(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
            ..Self::new(owner, repo)
        }
    }

    /// Parses the short format `"owner/repo"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] unless the string has
    /// exactly one `/` with a non-empty part on each side.
    pub fn parse_short(s: &str) -> Result<Self> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        };

        if repo.contains('/') {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        }

        let (owner, repo) = (owner.trim(), repo.trim());
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRepository(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        Ok(Self::new(owner, repo))
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the repository-specific token, if configured.
    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Returns the repository name in `"owner/repo"` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        fn exposed(token: Option<&SecretString>) -> Option<&str> {
            token.map(|t| t.expose_secret())
        }
        self.owner == other.owner
            && self.repo == other.repo
            && exposed(self.token()) == exposed(other.token())
    }
}

impl Eq for Repository {}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_short(s)
    }
}

impl Serialize for Repository {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.token {
            None => serializer.collect_str(self),
            Some(token) => {
                let mut state = serializer.serialize_struct("Repository", 3)?;
                state.serialize_field("owner", &self.owner)?;
                state.serialize_field("repo", &self.repo)?;
                state.serialize_field("token", token.expose_secret())?;
                state.end()
            }
        }
    }
}

struct RepositoryVisitor;

impl<'de> Visitor<'de> for RepositoryVisitor {
    type Value = Repository;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string 'owner/repo' or an object with owner, repo, and optional token")
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Repository::parse_short(v).map_err(de::Error::custom)
    }

    fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut owner: Option<String> = None;
        let mut repo: Option<String> = None;
        let mut token: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.as_str() {
                "owner" => &mut owner,
                "repo" => &mut repo,
                "token" => &mut token,
                _ => {
                    // Unknown keys are tolerated
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if slot.is_some() {
                return Err(de::Error::custom(format!("duplicate field `{key}`")));
            }
            *slot = Some(map.next_value()?);
        }

        Ok(Repository {
            owner: owner.ok_or_else(|| de::Error::missing_field("owner"))?,
            repo: repo.ok_or_else(|| de::Error::missing_field("repo"))?,
            token: token.map(SecretString::from),
        })
    }
}

impl<'de> Deserialize<'de> for Repository {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RepositoryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_token_keeps_token() {
        let repo = Repository::with_token("owner", "repo", "ghp_xxx");
        assert_eq!(repo.full_name(), "owner/repo");
        assert_eq!(repo.token().map(|t| t.expose_secret()), Some("ghp_xxx"));
    }

    #[test]
    fn debug_hides_token() {
        let repo = Repository::with_token("owner", "repo", "ghp_xxx");
        assert!(!format!("{repo:?}").contains("ghp_xxx"));
    }

    #[test]
    fn equality_includes_token() {
        assert_eq!(
            Repository::with_token("o", "r", "a"),
            Repository::with_token("o", "r", "a")
        );
        assert_ne!(
            Repository::with_token("o", "r", "a"),
            Repository::with_token("o", "r", "b")
        );
        assert_ne!(Repository::new("o", "r"), Repository::with_token("o", "r", "a"));
    }

    #[test]
    fn parse_short_trims_whitespace() {
        let repo: Repository = "  owner / repo  ".parse().unwrap();
        assert_eq!(repo.owner(), "owner");
        assert_eq!(repo.repo(), "repo");
    }

    #[test]
    fn parse_short_rejects_bad_shapes() {
        for input in ["invalid", "too/many/slashes", "/repo", "owner/", "/"] {
            assert!(Repository::parse_short(input).is_err(), "{input} accepted");
        }
    }

    #[test]
    fn deserialize_short_format() {
        let repo: Repository = serde_json::from_str(r#""mergeability/mergeable""#).unwrap();
        assert_eq!(repo, Repository::new("mergeability", "mergeable"));
    }

    #[test]
    fn deserialize_full_format_with_token() {
        let repo: Repository =
            serde_json::from_str(r#"{"owner": "org", "repo": "repo", "token": "ghp_xxx"}"#)
                .unwrap();
        assert_eq!(repo, Repository::with_token("org", "repo", "ghp_xxx"));
    }

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let repo: Repository =
            serde_json::from_str(r#"{"owner": "org", "repo": "repo", "extra": [1, 2]}"#).unwrap();
        assert_eq!(repo.full_name(), "org/repo");
    }

    #[test]
    fn deserialize_rejects_duplicates_and_missing_fields() {
        assert!(serde_json::from_str::<Repository>(r#"{"owner": "a", "owner": "b", "repo": "r"}"#).is_err());
        assert!(serde_json::from_str::<Repository>(r#"{"owner": "a"}"#).is_err());
    }

    #[test]
    fn serialize_short_without_token() {
        let json = serde_json::to_string(&Repository::new("owner", "repo")).unwrap();
        assert_eq!(json, r#""owner/repo""#);
    }

    #[test]
    fn serialize_full_with_token() {
        let value = serde_json::to_value(Repository::with_token("org", "repo", "ghp_xxx")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "owner": "org", "repo": "repo", "token": "ghp_xxx" })
        );
    }
}
