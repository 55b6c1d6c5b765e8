//! Book catalog data model.
//!
//! A [`Book`] is a flat record of optional descriptive attributes keyed by an
//! opaque [`BookId`]. The catalog does not enforce a schema on the attribute
//! values; [`BookField`] names the attributes that criteria searches may
//! target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`BookId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookIdValidationError {
    #[error("book id must not be empty")]
    Empty,
}

/// Opaque, store-assigned book identifier.
///
/// The catalog never interprets the identifier's shape: in-memory stores hand
/// out sequence numbers, the PostgreSQL store hands out UUIDs, and callers may
/// supply their own on create. Only blank identifiers are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookId(String);

impl BookId {
    /// Validate and construct a [`BookId`].
    ///
    /// # Examples
    /// ```
    /// use book_catalog::domain::BookId;
    ///
    /// let id = BookId::new("64b7f0c2e4b0a1").expect("non-empty id");
    /// assert_eq!(id.as_ref(), "64b7f0c2e4b0a1");
    /// assert!(BookId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, BookIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BookIdValidationError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BookId> for String {
    fn from(value: BookId) -> Self {
        value.0
    }
}

impl TryFrom<String> for BookId {
    type Error = BookIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A catalog entry.
///
/// Serialises with camelCase keys and omits absent attributes, which is also
/// the document shape persisted by the store adapters.
///
/// # Examples
/// ```
/// use book_catalog::domain::Book;
///
/// let book = Book::titled("Dune");
/// assert!(book.id.is_none());
/// assert_eq!(book.title.as_deref(), Some("Dune"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

impl Book {
    /// Construct an unsaved book carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Return a copy of this book keyed by `id`.
    #[must_use]
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Raised when a criteria name does not match any [`BookField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown book field: {name}")]
pub struct UnknownBookField {
    pub name: String,
}

/// Searchable book attributes.
///
/// Criteria names are matched against the document keys ignoring ASCII
/// case, so `title`, `Title` and `TITLE` all resolve to [`BookField::Title`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Title,
    Author,
    Publisher,
    Isbn,
    Genre,
    Language,
    PublishedYear,
}

impl BookField {
    /// Every searchable field, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Author,
        Self::Publisher,
        Self::Isbn,
        Self::Genre,
        Self::Language,
        Self::PublishedYear,
    ];

    /// Document key under which the attribute is stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Publisher => "publisher",
            Self::Isbn => "isbn",
            Self::Genre => "genre",
            Self::Language => "language",
            Self::PublishedYear => "publishedYear",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookField {
    type Err = UnknownBookField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBookField { name: s.to_owned() })
    }
}
