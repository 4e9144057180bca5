use crate::catalog::{Catalog, PageSource};
use crate::client::CatalogClient;
use crate::filter::matches_title;
use crate::model::FilmPage;
use crate::tui::search::SearchState;
use crate::tui::table::TableState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Messages from the background fetch thread
pub enum BgMessage {
    PageLoaded(FilmPage),
    FetchFailed(String),
}

pub struct App {
    // Data
    pub catalog: Catalog,
    /// Indices into `catalog.films()` matching the current search term
    pub visible_indices: Vec<usize>,

    // Sub-states
    pub search: SearchState,
    pub table: TableState,

    // Fetch state
    pub is_loading: bool,
    pub status_message: String,
    pub last_error: Option<String>,

    // Channel
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    client: Arc<CatalogClient>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(client: CatalogClient) -> Self {
        let (tx, rx) = channel();

        let mut app = Self {
            catalog: Catalog::new(),
            visible_indices: Vec::new(),
            search: SearchState::default(),
            table: TableState::default(),
            is_loading: false,
            status_message: "Loading...".to_string(),
            last_error: None,
            bg_receiver: rx,
            bg_sender: tx,
            client: Arc::new(client),
            should_quit: false,
        };

        // First page starts loading immediately
        app.start_fetch();
        app
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                if self.search.needs_filter {
                    self.refilter();
                    self.search.needs_filter = false;
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Kick off a fetch for the next page unless one is already pending.
    /// Overlapping triggers are dropped, not queued.
    fn start_fetch(&mut self) {
        if self.is_loading || !self.catalog.has_more() {
            return;
        }

        self.is_loading = true;
        self.last_error = None;

        let tx = self.bg_sender.clone();
        let client = self.client.clone();
        let cursor = self.catalog.cursor().map(String::from);

        thread::spawn(move || {
            match client.fetch_page(cursor.as_deref()) {
                Ok(page) => {
                    let _ = tx.send(BgMessage::PageLoaded(page));
                }
                Err(e) => {
                    let _ = tx.send(BgMessage::FetchFailed(e.to_string()));
                }
            }
        });
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            match msg {
                BgMessage::PageLoaded(page) => {
                    let appended = self.catalog.apply_page(page);
                    self.is_loading = false;
                    info!(appended, total = self.catalog.len(), "page loaded");
                    self.status_message = if self.catalog.has_more() {
                        format!("{} films loaded, more available", self.catalog.len())
                    } else {
                        format!("{} films loaded", self.catalog.len())
                    };
                    self.search.needs_filter = true;
                }
                BgMessage::FetchFailed(msg) => {
                    self.is_loading = false;
                    warn!(error = %msg, "fetch failed");
                    self.last_error = Some(msg);
                }
            }
        }
    }

    /// Recompute the visible subset from the catalog and the search term
    fn refilter(&mut self) {
        let term = self.search.query.trim();
        self.visible_indices = self
            .catalog
            .films()
            .iter()
            .enumerate()
            .filter(|(_, film)| matches_title(&film.title, term))
            .map(|(idx, _)| idx)
            .collect();

        // Keep the selection inside the new subset
        self.table.selected = match self.table.selected {
            _ if self.visible_indices.is_empty() => None,
            Some(i) => Some(i.min(self.visible_indices.len() - 1)),
            None => Some(0),
        };
        self.table.scroll_offset = self
            .table
            .scroll_offset
            .min(self.visible_indices.len().saturating_sub(1));
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && !self.search.query.is_empty() {
                    self.search.clear();
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::F(5) => {
                self.start_fetch();
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.cursor_pos = 0,
            KeyCode::End => self.search.cursor_pos = self.search.query.len(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.search.focused = false;
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.visible_indices.len();
        let was_at_bottom = self.table.at_bottom(total);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
                return;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.insert(c);
                self.search.cursor_pos = self.search.query.len();
                return;
            }

            _ => return,
        }

        // Scroll-bottom trigger: pressing down against the last row asks
        // for the next page
        if was_at_bottom && self.table.at_bottom(total) {
            match key.code {
                KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown | KeyCode::End => {
                    self.start_fetch();
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::App;

    #[test]
    fn run_accepts_the_default_terminal() {
        // The event loop draws through the default backend; its errors are
        // io::Error and convert into the crate error type
        let _: fn(&mut App, &mut ratatui::DefaultTerminal) -> crate::Result<()> = App::run;
    }
}
