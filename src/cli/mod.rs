//! Command-line interface for bookshelf.
//!
//! Provides commands for adding, issuing, and returning books, plus
//! search, listing, and catalog statistics.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::library::{Book, Catalog};

/// bookshelf - Book catalog and lending tracker
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file to operate on (defaults to the configured path)
    #[arg(short, long, global = true, env = "BOOKSHELF_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new book to the catalog
    Add {
        /// Book title
        title: String,

        /// Author name
        author: String,

        /// ISBN (unique identifier, exact text)
        isbn: String,
    },

    /// Issue a book to a reader
    Issue {
        /// ISBN of the book to issue
        isbn: String,
    },

    /// Return an issued book
    Return {
        /// ISBN of the book to return
        isbn: String,
    },

    /// List all books in the catalog
    List,

    /// Search the catalog
    Search {
        /// Search query (substring for title/author, exact for ISBN)
        query: String,

        /// Field to search
        #[arg(short, long, value_enum, default_value = "title")]
        by: SearchField,
    },

    /// Show catalog statistics
    Stats,

    /// Show resolved configuration (debug)
    Config,
}

/// Field a search runs against
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SearchField {
    /// Case-insensitive substring match on titles
    Title,

    /// Case-insensitive substring match on authors
    Author,

    /// Exact ISBN match
    Isbn,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let path = match self.catalog {
            Some(path) => path,
            None => config::catalog_path()?,
        };

        match self.command {
            Commands::Add {
                title,
                author,
                isbn,
            } => add_book(&path, &title, &author, &isbn).await,
            Commands::Issue { isbn } => issue_book(&path, &isbn).await,
            Commands::Return { isbn } => return_book(&path, &isbn).await,
            Commands::List => list_books(&path).await,
            Commands::Search { query, by } => search_books(&path, &query, by).await,
            Commands::Stats => show_stats(&path).await,
            Commands::Config => show_config(),
        }
    }
}

/// Add a book and report the stored entry
async fn add_book(path: &Path, title: &str, author: &str, isbn: &str) -> Result<()> {
    let mut catalog = Catalog::open(path).await?;
    let book = catalog.add_book(title, author, isbn).await?;

    eprintln!("Added: {}", book);
    Ok(())
}

/// Issue a book by ISBN
async fn issue_book(path: &Path, isbn: &str) -> Result<()> {
    let mut catalog = Catalog::open(path).await?;
    let book = catalog.issue_book(isbn).await?;

    eprintln!("Issued: {}", book);
    Ok(())
}

/// Return a book by ISBN
async fn return_book(path: &Path, isbn: &str) -> Result<()> {
    let mut catalog = Catalog::open(path).await?;
    let book = catalog.return_book(isbn).await?;

    eprintln!("Returned: {}", book);
    Ok(())
}

/// List all books in catalog order
async fn list_books(path: &Path) -> Result<()> {
    let catalog = Catalog::open(path).await?;

    if catalog.is_empty() {
        println!("Catalog is empty. Use 'bookshelf add <title> <author> <isbn>' to add a book.");
        return Ok(());
    }

    print_books(catalog.books().iter());
    println!("\nTotal: {} books", catalog.len());

    Ok(())
}

/// Search by the selected field
async fn search_books(path: &Path, query: &str, by: SearchField) -> Result<()> {
    let catalog = Catalog::open(path).await?;

    let results: Vec<&Book> = match by {
        SearchField::Title => catalog.search_by_title(query),
        SearchField::Author => catalog.search_by_author(query),
        SearchField::Isbn => catalog.search_by_isbn(query).into_iter().collect(),
    };

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    print_books(results.into_iter());

    Ok(())
}

/// Show catalog statistics
async fn show_stats(path: &Path) -> Result<()> {
    let catalog = Catalog::open(path).await?;
    let stats = catalog.stats();

    println!("Total books: {}", stats.total);
    println!("Available:   {}", stats.available);
    println!("Issued:      {}", stats.issued);

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Bookshelf configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Catalog: {}", cfg.catalog.display());
    println!("  Backup:  {}.bak", cfg.catalog.display());

    Ok(())
}

/// Print a book table in catalog order
fn print_books<'a>(books: impl Iterator<Item = &'a Book>) {
    println!("{:<16} {:<34} {:<24} {:<10}", "ISBN", "TITLE", "AUTHOR", "STATUS");
    println!("{}", "-".repeat(86));

    for book in books {
        println!(
            "{:<16} {:<34} {:<24} {:<10}",
            book.isbn(),
            truncate(book.title(), 31),
            truncate(book.author(), 21),
            book.status()
        );
    }
}

/// Truncate a display string, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
