//! Interactive Catalog Browser
//!
//! Terminal UI with a search box on top, the film table below, and a status
//! bar. Pages load in the background; pushing the selection past the last
//! row asks for the next one.

pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use crate::client::{CatalogClient, ClientConfig};
use crate::error::Result;

pub use app::App;

/// Set up the terminal, run the browser, restore the terminal.
pub fn run(config: ClientConfig) -> Result<()> {
    let client = CatalogClient::new(config)?;
    let mut terminal = ratatui::init();
    let mut app = App::new(client);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
