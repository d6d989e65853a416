//! Limit/page request primitives for collection endpoints.
//!
//! Collection handlers accept raw `limit` and `page` query parameters. This
//! crate validates them once, at the edge, and hands the rest of the stack a
//! [`PageRequest`] that knows how to slice an ordered collection.
//!
//! Semantics:
//! - `limit` caps the number of returned entries. Absent means "everything".
//! - `page` is one-based and only meaningful together with `limit`; the
//!   offset is `(page - 1) * limit`.
//! - Blank values behave like absent ones so `?limit=` is accepted.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::parse(Some("2"), Some("3")).expect("valid request");
//! assert_eq!(request.offset(), 4);
//! assert_eq!(request.apply(0..10), vec![4, 5]);
//! ```

use std::num::NonZeroUsize;

use serde::Deserialize;

/// Errors raised while parsing raw pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `limit` was present but not a positive integer.
    #[error("limit must be a positive integer")]
    InvalidLimit,
    /// `page` was present but not a positive integer.
    #[error("page must be a positive integer")]
    InvalidPage,
}

impl PageRequestError {
    /// Name of the offending query parameter.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidLimit => "limit",
            Self::InvalidPage => "page",
        }
    }
}

/// Raw pagination query parameters as received from a client.
///
/// Designed to be flattened into a handler's query struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// Maximum number of entries to return.
    pub limit: Option<String>,
    /// One-based page index.
    pub page: Option<String>,
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageQuery) -> Result<Self, Self::Error> {
        Self::parse(value.limit.as_deref(), value.page.as_deref())
    }
}

/// Validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: Option<NonZeroUsize>,
    page: NonZeroUsize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl PageRequest {
    /// A request returning the whole collection.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            limit: None,
            page: NonZeroUsize::MIN,
        }
    }

    /// Build a request from already validated parts.
    #[must_use]
    pub const fn new(limit: Option<NonZeroUsize>, page: NonZeroUsize) -> Self {
        Self { limit, page }
    }

    /// Parse raw `limit` and `page` values.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a present, non-blank value is not a
    /// positive integer.
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, PageRequestError> {
        let parsed_limit = parse_positive(limit).map_err(|()| PageRequestError::InvalidLimit)?;
        let parsed_page = parse_positive(page).map_err(|()| PageRequestError::InvalidPage)?;
        Ok(Self {
            limit: parsed_limit,
            page: parsed_page.unwrap_or(NonZeroUsize::MIN),
        })
    }

    /// Maximum number of entries, if capped.
    #[must_use]
    pub const fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// One-based page index.
    #[must_use]
    pub const fn page(&self) -> NonZeroUsize {
        self.page
    }

    /// Number of entries to skip before the page starts.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.limit.map_or(0, |limit| {
            (self.page.get() - 1).saturating_mul(limit.get())
        })
    }

    /// Slice an ordered collection down to this page.
    #[must_use]
    pub fn apply<I>(&self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        let skipped = items.into_iter().skip(self.offset());
        match self.limit {
            Some(limit) => skipped.take(limit.get()).collect(),
            None => skipped.collect(),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Result<Option<NonZeroUsize>, ()> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    value.parse::<NonZeroUsize>().map(Some).map_err(|_| ())
}
