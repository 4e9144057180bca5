//! Pagination Accumulator
//!
//! Owns the ordered sequence of every film fetched so far in a session and
//! drives cursor-based pagination against a [`PageSource`]. The sequence is
//! append-only: it never shrinks or reorders, and a failed fetch leaves it
//! untouched so the caller can retry with the last-known cursor.

use crate::error::Result;
use crate::model::{Film, FilmPage};
use tracing::{debug, warn};

/// Anything that can produce the next page of the catalog.
///
/// This is the seam between the accumulator and the transport; tests drive
/// the accumulator with scripted sources instead of a network client.
pub trait PageSource {
    /// Fetch the page that starts after `after` (`None` = first page)
    fn fetch_page(&self, after: Option<&str>) -> Result<FilmPage>;
}

// ============================================================================
// Catalog
// ============================================================================

/// Accumulated catalog state for one session
#[derive(Debug, Default)]
pub struct Catalog {
    /// All records fetched so far, in request order
    films: Vec<Film>,
    /// Continuation cursor for the next fetch (None before the first page)
    cursor: Option<String>,
    /// Optimistic until a page arrives saying otherwise
    exhausted: bool,
}

impl Catalog {
    /// Empty catalog: no records, no cursor, more pages assumed
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and merge the next page, returning the newly appended records.
    ///
    /// On failure the accumulated state is unchanged; calling again retries
    /// with the same cursor. Duplicate records from a stale cursor are
    /// accepted as-is, never deduplicated.
    pub fn load_next<S: PageSource>(&mut self, source: &S) -> Result<&[Film]> {
        let page = source.fetch_page(self.cursor.as_deref())?;
        let before = self.films.len();
        self.apply_page(page);
        Ok(&self.films[before..])
    }

    /// Merge one already-fetched page onto the accumulated state, returning
    /// how many records were appended.
    ///
    /// Records are appended in encounter order. Pagination stops when the
    /// page says so, when it is empty (service exhausted mid-stream), or
    /// when its cursor fails to advance past the one it was requested
    /// with (refetching would produce the identical request forever).
    /// Callers that fetch off-thread (the TUI) use this directly;
    /// `load_next` is this plus the fetch.
    pub fn apply_page(&mut self, page: FilmPage) -> usize {
        let advanced = match (&page.end_cursor, &self.cursor) {
            (Some(next), Some(prev)) => next != prev,
            (Some(_), None) => true,
            // No cursor in the page: the stored one stays as-is
            (None, _) => false,
        };
        if !advanced {
            warn!(cursor = ?page.end_cursor, "cursor did not advance, stopping pagination");
        }

        let empty = page.films.is_empty();
        let appended = page.films.len();
        self.films.extend(page.films);
        self.exhausted = !page.has_next_page || !advanced || empty;
        if let Some(cursor) = page.end_cursor {
            self.cursor = Some(cursor);
        }
        debug!(
            appended,
            total = self.films.len(),
            has_more = self.has_more(),
            "page merged"
        );
        appended
    }

    /// Keep loading pages until the service reports no more, calling
    /// `on_page` with the count of each batch as it lands.
    pub fn load_all<S: PageSource>(
        &mut self,
        source: &S,
        mut on_page: impl FnMut(usize),
    ) -> Result<()> {
        while self.has_more() {
            let appended = self.load_next(source)?.len();
            on_page(appended);
        }
        Ok(())
    }

    /// True until a page arrives whose has-more flag is false
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// All records fetched so far, in request order
    pub fn films(&self) -> &[Film] {
        &self.films
    }

    /// Last-known continuation cursor
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}
