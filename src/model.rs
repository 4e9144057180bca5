//! Film Catalog Data Model
//!
//! Value types for one page of the remote catalog and the records inside
//! it. Records carry no identity beyond their position in the accumulated
//! sequence; refetching with a stale cursor can legitimately produce
//! duplicates.

use chrono::NaiveDate;
use serde::Serialize;

/// One film record from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Film {
    pub title: String,
    pub director: String,
    /// Release date as returned by the service (`YYYY-MM-DD`)
    pub release_date: String,
    /// Species appearing in the film
    pub species: Vec<Species>,
}

impl Film {
    /// Release year parsed from `release_date`, for compact display
    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|d| {
                use chrono::Datelike;
                d.year()
            })
    }
}

/// A species associated with a film
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Species {
    pub name: String,
    pub classification: String,
    /// Homeworld name; the service returns null for some species
    pub homeworld: Option<String>,
}

/// One fetch's worth of records plus Relay-style pagination metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmPage {
    /// Records in encounter order
    pub films: Vec<Film>,
    /// Opaque continuation cursor for the next fetch
    pub end_cursor: Option<String>,
    /// Whether further pages exist after this one
    pub has_next_page: bool,
}
