//! Query engine: year, extension and free-text filtering over normalized entries.

use crate::entry::CatalogEntry;

/// Extension filter value meaning "no extension filtering".
pub const EXT_ALL: &str = "all";

/// How the extension filter compares against an entry's `ext`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtMatch {
    /// `ppt` matches only `ppt`.
    #[default]
    Exact,
    /// `ppt` also matches `pptx`.
    Prefix,
}

/// Filter parameters. Every `None`/empty field disables its predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub year: Option<String>,
    pub ext: Option<String>,
    pub text: Option<String>,
    pub ext_match: ExtMatch,
}

impl CatalogQuery {
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn ext_match(mut self, ext_match: ExtMatch) -> Self {
        self.ext_match = ext_match;
        self
    }

    /// Compile the query into a reusable predicate.
    fn predicate(&self) -> Predicate {
        let year = self
            .year
            .as_deref()
            .filter(|y| !y.is_empty())
            .map(str::to_lowercase);
        let ext = self
            .ext
            .as_deref()
            .filter(|e| !e.is_empty() && !e.eq_ignore_ascii_case(EXT_ALL))
            .map(str::to_lowercase);
        let text = self
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Predicate {
            year,
            ext,
            text,
            ext_match: self.ext_match,
        }
    }
}

struct Predicate {
    year: Option<String>,
    ext: Option<String>,
    text: Option<String>,
    ext_match: ExtMatch,
}

impl Predicate {
    fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(year) = &self.year {
            if entry.year() != year.as_str() {
                return false;
            }
        }
        if let Some(ext) = &self.ext {
            let ok = match self.ext_match {
                ExtMatch::Exact => entry.ext() == ext.as_str(),
                ExtMatch::Prefix => entry.ext().starts_with(ext.as_str()),
            };
            if !ok {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if !entry.name().to_lowercase().contains(text.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Entries matching every supplied predicate, in input order.
///
/// An empty result is a valid "no matches" outcome.
pub fn query<'a>(entries: &'a [CatalogEntry], q: &CatalogQuery) -> Vec<&'a CatalogEntry> {
    let predicate = q.predicate();
    entries.iter().filter(|e| predicate.matches(e)).collect()
}
