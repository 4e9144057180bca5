//! Holocron CLI
//!
//! Command-line interface for the film catalog browser.
//! Provides one-shot commands and an interactive browse mode.

use clap::{Parser, Subcommand};
use console::style;
use holocron::{
    Catalog, CatalogClient, ClientConfig, SearchFilter, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::{Duration, Instant};

/// Holocron - Star Wars film catalog browser
///
/// Pages through the SWAPI GraphQL film catalog and filters the
/// accumulated records by title.
#[derive(Parser)]
#[command(name = "holocron")]
#[command(author = "Holocron Contributors")]
#[command(version)]
#[command(about = "Star Wars film catalog browser", long_about = None)]
struct Cli {
    /// GraphQL endpoint to query
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Records requested per page
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Verbose logging (also honors RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch films and print them as a table
    List {
        /// Number of pages to fetch (default: all)
        #[arg(short, long)]
        pages: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Fetch films and print those whose title matches a term
    Search {
        /// Search term (case-insensitive substring, use -- before terms starting with -)
        #[arg(allow_hyphen_values = true)]
        term: String,

        /// Number of pages to fetch (default: all)
        #[arg(short, long)]
        pages: Option<usize>,
    },

    /// Export the full catalog to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Browse the catalog interactively
    Browse,
}

fn main() {
    let cli = Cli::parse();

    let config = ClientConfig {
        endpoint: cli.endpoint,
        page_size: cli.page_size,
        ..Default::default()
    };

    // The TUI owns the terminal, so browse logs to a file instead
    if matches!(cli.command, Commands::Browse) {
        holocron::logging::init_file(cli.verbose);
    } else {
        holocron::logging::init(cli.verbose);
    }

    let result = match cli.command {
        Commands::List { pages, output } => cmd_list(config, pages, &output),

        Commands::Search { term, pages } => cmd_search(config, &term, pages),

        Commands::Export { output, format } => cmd_export(config, &output, &format),

        Commands::Browse => holocron::tui::run(config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Fetch up to `pages` pages (all when None), with a spinner
fn fetch_catalog(config: ClientConfig, pages: Option<usize>) -> holocron::Result<Catalog> {
    let client = CatalogClient::new(config)?;
    let mut catalog = Catalog::new();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.enable_steady_tick(Duration::from_millis(80));

    match pages {
        None => {
            let mut total = 0;
            catalog.load_all(&client, |appended| {
                total += appended;
                pb.set_message(format!("Fetched {total} films"));
            })?;
        }
        Some(limit) => {
            let mut fetched_pages = 0;
            while catalog.has_more() && fetched_pages < limit {
                pb.set_message(format!(
                    "Fetching page {} ({} films so far)",
                    fetched_pages + 1,
                    catalog.len()
                ));
                catalog.load_next(&client)?;
                fetched_pages += 1;
            }
        }
    }

    pb.finish_and_clear();
    Ok(catalog)
}

/// List command implementation
fn cmd_list(config: ClientConfig, pages: Option<usize>, output_format: &str) -> holocron::Result<()> {
    let start = Instant::now();
    let catalog = fetch_catalog(config, pages)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.films())?);
        return Ok(());
    }

    println!(
        "{} Fetched {} films in {:.2}s",
        style("✓").green().bold(),
        style(catalog.len()).yellow(),
        start.elapsed().as_secs_f64()
    );
    println!();
    print_films(catalog.films().iter());

    if catalog.has_more() {
        println!();
        println!(
            "  {} more pages available (increase --pages)",
            style("…").dim()
        );
    }

    Ok(())
}

/// Search command implementation
fn cmd_search(config: ClientConfig, term: &str, pages: Option<usize>) -> holocron::Result<()> {
    println!(
        "{} Searching film titles for '{}'",
        style("→").cyan().bold(),
        style(term).yellow()
    );

    let catalog = fetch_catalog(config, pages)?;

    let mut filter = SearchFilter::new();
    filter.set_term(term);
    let visible = filter.visible(catalog.films());

    println!();
    println!(
        "Found {} of {} films:",
        style(visible.len()).green(),
        catalog.len()
    );
    println!();
    print_films(visible.into_iter());

    Ok(())
}

fn print_films<'a>(films: impl Iterator<Item = &'a holocron::Film>) {
    for (i, film) in films.enumerate() {
        println!(
            "  {} {} {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(&film.title).cyan(),
            style(format!("({})", film.release_date)).dim()
        );
        println!("      {} {}", style("Director:").dim(), film.director);
        if !film.species.is_empty() {
            let names: Vec<&str> = film.species.iter().map(|s| s.name.as_str()).collect();
            println!("      {} {}", style("Species:").dim(), names.join(", "));
        }
    }
}

/// Export command implementation
fn cmd_export(config: ClientConfig, output: &str, format: &str) -> holocron::Result<()> {
    if !matches!(format, "json" | "csv") {
        return Err(holocron::CatalogError::UnsupportedFormat(format.to_string()));
    }

    println!(
        "{} Exporting catalog to {}",
        style("→").cyan().bold(),
        style(output).yellow()
    );

    let catalog = fetch_catalog(config, None)?;
    let mut file = std::fs::File::create(output)?;

    match format {
        "csv" => {
            writeln!(file, "Title,Director,ReleaseDate,Species")?;
            for film in catalog.films() {
                let species: Vec<&str> = film.species.iter().map(|s| s.name.as_str()).collect();
                writeln!(
                    file,
                    "\"{}\",\"{}\",{},\"{}\"",
                    film.title.replace('"', "\"\""),
                    film.director.replace('"', "\"\""),
                    film.release_date,
                    species.join("; ").replace('"', "\"\"")
                )?;
            }
        }
        _ => {
            // JSON format
            serde_json::to_writer_pretty(&mut file, catalog.films())?;
            writeln!(file)?;
        }
    }

    println!(
        "{} Exported {} films to {}",
        style("✓").green().bold(),
        catalog.len(),
        output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocron::CatalogError;

    #[test]
    fn export_rejects_unknown_formats_before_fetching() {
        // Nothing must be contacted or written for a bad format
        let result = cmd_export(ClientConfig::default(), "unused.out", "xml");
        match result {
            Err(CatalogError::UnsupportedFormat(format)) => assert_eq!(format, "xml"),
            other => panic!("expected format rejection, got {:?}", other.map(|_| ())),
        }
    }
}
