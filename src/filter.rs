//! Search Filter
//!
//! Derives the visible subset of the accumulated catalog from a live search
//! term. The projection is pure and recomputed on every call; it holds no
//! state beyond the term itself.

use crate::model::Film;

/// Check if a film title matches a search term.
/// Case-insensitive substring; an empty term matches everything.
pub fn matches_title(title: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Holds the active search term for a session
#[derive(Debug, Default)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active term wholesale; no history is kept
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Every film whose title contains the term, in original order
    pub fn visible<'a>(&self, films: &'a [Film]) -> Vec<&'a Film> {
        films
            .iter()
            .filter(|f| matches_title(&f.title, &self.term))
            .collect()
    }
}
