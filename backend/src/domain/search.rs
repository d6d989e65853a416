//! Keyword filtering and paging for owner-scoped collections.

use std::num::NonZeroUsize;

use pagination::PageRequest;

/// Case-insensitive substring search term.
///
/// Built from the raw `q` parameter; a blank term means "no filter".
///
/// # Examples
/// ```
/// use shoplist::domain::Keyword;
///
/// let keyword = Keyword::parse(Some(" Trip ")).expect("non-blank keyword");
/// assert!(keyword.matches("Back from a trip to Mombasa"));
/// assert!(Keyword::parse(Some("  ")).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    raw: String,
    folded: String,
}

impl Keyword {
    /// Parse a raw query term; blank input yields `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw.map(str::trim).filter(|value| !value.is_empty())?;
        Some(Self {
            raw: trimmed.to_owned(),
            folded: trimmed.to_lowercase(),
        })
    }

    /// Term as the client sent it, trimmed.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Whether `candidate` contains the term, ignoring case.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.folded)
    }

    /// SQL `ILIKE` pattern with `%`, `_` and `\` escaped.
    ///
    /// Escapes use `\`, PostgreSQL's default `LIKE` escape character, so the
    /// pattern matches exactly what [`Keyword::matches`] accepts.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for ch in self.raw.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Filter and page applied to a collection read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    keyword: Option<Keyword>,
    page: PageRequest,
}

impl CollectionQuery {
    /// Combine an optional keyword with a page request.
    pub fn new(keyword: Option<Keyword>, page: PageRequest) -> Self {
        Self { keyword, page }
    }

    /// Query returning every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Active keyword filter.
    pub fn keyword(&self) -> Option<&Keyword> {
        self.keyword.as_ref()
    }

    /// Requested page.
    pub fn page(&self) -> &PageRequest {
        &self.page
    }

    /// Same filter, limited to the first matching entry.
    ///
    /// An empty page past the start says nothing about whether the keyword
    /// matches at all; this query answers that.
    pub fn first_match(&self) -> Self {
        Self {
            keyword: self.keyword.clone(),
            page: PageRequest::new(Some(NonZeroUsize::MIN), NonZeroUsize::MIN),
        }
    }

    /// Apply the filter then the page to entries already in creation order.
    ///
    /// Used by adapters that cannot push the query down to storage.
    pub fn apply<T, F>(&self, entries: impl IntoIterator<Item = T>, text_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        let filtered = entries
            .into_iter()
            .filter(|entry| self.keyword.as_ref().is_none_or(|k| k.matches(text_of(entry))));
        self.page.apply(filtered)
    }
}
