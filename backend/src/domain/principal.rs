//! Authenticated caller identity.
//!
//! A [`Principal`] is what remains of a bearer token once an adapter has
//! verified it. Handlers only see this type, never the raw token.

use std::fmt;

/// Verified caller identity.
///
/// # Examples
/// ```
/// use book_catalog::domain::Principal;
///
/// let principal = Principal::new("reader-1", ["openid", "books"]);
/// assert_eq!(principal.subject(), "reader-1");
/// assert_eq!(principal.scopes(), ["openid", "books"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    scopes: Vec<String>,
}

impl Principal {
    /// Build a principal from a subject and its granted scopes.
    pub fn new<I, S>(subject: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Token subject (`sub` claim).
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Scopes granted to the token.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)
    }
}
