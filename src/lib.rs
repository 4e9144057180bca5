//! Holocron - Star Wars film catalog browser
//!
//! Queries the public SWAPI GraphQL endpoint for film records, accumulates
//! cursor-paginated pages into an append-only in-memory catalog, and derives
//! a visible subset by case-insensitive title search.
//!
//! # Features
//!
//! - **Cursor Pagination**: Relay-style `first`/`after` paging over `allFilms`
//! - **Append-only Accumulation**: fetched records never shrink or reorder
//! - **Live Search**: pure, order-preserving title filtering
//! - **Interactive TUI**: search box, film table, load-more at the bottom
//! - **CLI**: list, search, and export commands for one-shot use
//!
//! # Example
//!
//! ```no_run
//! use holocron::{Catalog, CatalogClient, SearchFilter};
//!
//! fn main() -> holocron::Result<()> {
//!     let client = CatalogClient::with_defaults()?;
//!     let mut catalog = Catalog::new();
//!
//!     // Pull the whole catalog, one page at a time
//!     while catalog.has_more() {
//!         catalog.load_next(&client)?;
//!     }
//!
//!     // Filter the accumulated records by title
//!     let mut filter = SearchFilter::new();
//!     filter.set_term("empire");
//!     for film in filter.visible(catalog.films()) {
//!         println!("{} ({})", film.title, film.release_date);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod tui;

// Re-export main types
pub use catalog::{Catalog, PageSource};
pub use client::{CatalogClient, ClientConfig, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE};
pub use error::{CatalogError, Result};
pub use filter::{matches_title, SearchFilter};
pub use model::{Film, FilmPage, Species};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
