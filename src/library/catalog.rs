//! In-memory catalog of books with JSON file persistence.
//!
//! The whole catalog is loaded on open and rewritten on every mutating
//! operation; the previous file is kept as a `.bak` backup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{error, info, warn};

use super::book::{Book, BookRecord};
use crate::error::{CatalogError, Result};

/// Catalog file format version
const CATALOG_VERSION: u32 = 1;

/// On-disk shape of the catalog file
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    saved_at: DateTime<Utc>,
    books: Vec<BookRecord>,
}

/// Aggregate lending statistics, computed in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub issued: usize,
}

/// Ordered collection of books bound to a persistence target
#[derive(Debug)]
pub struct Catalog {
    /// Path of the persisted catalog file
    path: PathBuf,

    /// All books, in insertion order
    books: Vec<Book>,
}

impl Catalog {
    /// Create an empty catalog bound to a persistence target (no I/O)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            books: Vec::new(),
        }
    }

    /// Open a catalog, hydrating it from the persisted file if present
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut catalog = Self::new(path);
        catalog.load().await?;
        Ok(catalog)
    }

    /// Get the persistence target path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the backup path (`<catalog>.bak`)
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Get the number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a new book and persist the catalog.
    ///
    /// The ISBN must not already be present (case-sensitive exact match).
    pub async fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<&Book> {
        let book = Book::new(title, author, isbn)?;

        if self.position(book.isbn()).is_some() {
            warn!(isbn = book.isbn(), "rejected add: ISBN already in catalog");
            return Err(CatalogError::DuplicateIsbn {
                isbn: book.isbn().to_string(),
            });
        }

        info!(isbn = book.isbn(), title = book.title(), "book added");
        let idx = self.books.len();
        self.books.push(book);
        self.save().await?;

        Ok(&self.books[idx])
    }

    /// Issue the book with the given ISBN and persist the catalog
    pub async fn issue_book(&mut self, isbn: &str) -> Result<&Book> {
        let idx = self.require(isbn)?;

        if let Err(err) = self.books[idx].issue() {
            warn!(isbn, "rejected issue: {}", err);
            return Err(err);
        }

        self.save().await?;
        info!(isbn, title = self.books[idx].title(), "book issued");
        Ok(&self.books[idx])
    }

    /// Return the book with the given ISBN and persist the catalog
    pub async fn return_book(&mut self, isbn: &str) -> Result<&Book> {
        let idx = self.require(isbn)?;

        if let Err(err) = self.books[idx].return_book() {
            warn!(isbn, "rejected return: {}", err);
            return Err(err);
        }

        self.save().await?;
        info!(isbn, title = self.books[idx].title(), "book returned");
        Ok(&self.books[idx])
    }

    /// Search by title (case-insensitive substring match), in catalog order
    pub fn search_by_title(&self, query: &str) -> Vec<&Book> {
        let query = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.title().to_lowercase().contains(&query))
            .collect()
    }

    /// Search by author (case-insensitive substring match), in catalog order
    pub fn search_by_author(&self, query: &str) -> Vec<&Book> {
        let query = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.author().to_lowercase().contains(&query))
            .collect()
    }

    /// Look up a book by exact ISBN; a miss is a normal empty result
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn() == isbn)
    }

    /// Count total/available/issued in a single pass
    pub fn stats(&self) -> CatalogStats {
        let total = self.books.len();
        let available = self.books.iter().filter(|b| b.is_available()).count();

        CatalogStats {
            total,
            available,
            issued: total - available,
        }
    }

    /// Serialize the full catalog to the persistence target.
    ///
    /// An existing file is first copied to the backup path; a failure
    /// there is logged and never blocks the save itself.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    CatalogError::persistence_io(
                        &self.path,
                        format!("failed to create directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        if self.path.exists() {
            let backup = self.backup_path();
            if let Err(e) = fs::copy(&self.path, &backup).await {
                warn!(
                    backup = %backup.display(),
                    "backup before save failed, continuing: {}", e
                );
            }
        }

        let file = CatalogFile {
            version: CATALOG_VERSION,
            saved_at: Utc::now(),
            books: self.books.iter().map(Book::to_record).collect(),
        };

        let content = serde_json::to_string_pretty(&file).map_err(|e| {
            CatalogError::persistence(&self.path, format!("failed to serialize catalog: {}", e))
        })?;

        if let Err(e) = fs::write(&self.path, content).await {
            error!(path = %self.path.display(), "failed to write catalog: {}", e);
            return Err(CatalogError::persistence_io(
                &self.path,
                "failed to write catalog",
                e,
            ));
        }

        info!(path = %self.path.display(), books = self.books.len(), "catalog saved");
        Ok(())
    }

    /// Rebuild the in-memory sequence from the persisted file.
    ///
    /// A missing file is the normal first-run case and leaves the
    /// catalog empty; unparseable content or a duplicated ISBN is a
    /// persistence error.
    pub async fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no catalog file yet, starting empty");
            self.books = Vec::new();
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::persistence_io(&self.path, "failed to read catalog", e))?;

        let file: CatalogFile = serde_json::from_str(&content).map_err(|e| {
            error!(path = %self.path.display(), "catalog file is corrupt: {}", e);
            CatalogError::persistence(&self.path, format!("not a valid catalog file: {}", e))
        })?;

        if file.version != CATALOG_VERSION {
            return Err(CatalogError::persistence(
                &self.path,
                format!("unsupported catalog version {}", file.version),
            ));
        }

        let mut books = Vec::with_capacity(file.books.len());
        let mut seen = HashSet::new();

        for record in file.books {
            let book = Book::from_record(record)?;
            if !seen.insert(book.isbn().to_string()) {
                return Err(CatalogError::persistence(
                    &self.path,
                    format!("duplicate ISBN {} in catalog file", book.isbn()),
                ));
            }
            books.push(book);
        }

        info!(path = %self.path.display(), books = books.len(), "catalog loaded");
        self.books = books;
        Ok(())
    }

    /// Index of a book by exact ISBN
    fn position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|b| b.isbn() == isbn)
    }

    /// Index of a book by exact ISBN, erroring when existence is mandatory
    fn require(&self, isbn: &str) -> Result<usize> {
        self.position(isbn).ok_or_else(|| {
            warn!(isbn, "no book with this ISBN in the catalog");
            CatalogError::NotFound {
                isbn: isbn.to_string(),
            }
        })
    }
}
