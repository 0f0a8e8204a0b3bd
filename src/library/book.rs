//! A single book entry and its lending state.
//!
//! Books convert to and from `BookRecord`, the fixed-field
//! representation used by the persisted catalog file.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Lending state of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf, can be issued
    Available,

    /// Checked out to a reader
    Issued,
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Issued => write!(f, "issued"),
        }
    }
}

impl std::str::FromStr for BookStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(BookStatus::Available),
            "issued" => Ok(BookStatus::Issued),
            other => Err(CatalogError::MalformedRecord {
                reason: format!("unrecognized status '{}'", other),
            }),
        }
    }
}

/// One catalog entry for a single book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
    status: BookStatus,
}

impl Book {
    /// Create a book with trimmed, non-blank fields; new books start available
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self> {
        let title = required(title.into(), "title")?;
        let author = required(author.into(), "author")?;
        let isbn = required(isbn.into(), "isbn")?;

        Ok(Self {
            title,
            author,
            isbn,
            status: BookStatus::Available,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// Check whether the book can currently be issued
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Transition `Available -> Issued`; issuing an issued book is an error
    pub fn issue(&mut self) -> Result<()> {
        if self.status == BookStatus::Issued {
            return Err(CatalogError::InvalidState {
                isbn: self.isbn.clone(),
                current: self.status,
            });
        }
        self.status = BookStatus::Issued;
        Ok(())
    }

    /// Transition `Issued -> Available`; returning an available book is an error
    pub fn return_book(&mut self) -> Result<()> {
        if self.status == BookStatus::Available {
            return Err(CatalogError::InvalidState {
                isbn: self.isbn.clone(),
                current: self.status,
            });
        }
        self.status = BookStatus::Available;
        Ok(())
    }

    /// Encode to the structured representation used on disk
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            status: self.status.to_string(),
        }
    }

    /// Decode from a structured representation, validating the field set
    pub fn from_record(record: BookRecord) -> Result<Self> {
        let status: BookStatus = record.status.parse()?;

        let title = record.title.trim();
        let author = record.author.trim();
        let isbn = record.isbn.trim();

        for (value, field) in [(title, "title"), (author, "author"), (isbn, "isbn")] {
            if value.is_empty() {
                return Err(CatalogError::MalformedRecord {
                    reason: format!("missing or blank {}", field),
                });
            }
        }

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            status,
        })
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} (ISBN {}) [{}]",
            self.title, self.author, self.isbn, self.status
        )
    }
}

fn required(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput { field });
    }
    Ok(trimmed.to_string())
}

/// Plain serializable form of a book, the unit of the catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_is_available() {
        let book = Book::new("Test Book", "Test Author", "1234567890").unwrap();

        assert_eq!(book.title(), "Test Book");
        assert_eq!(book.author(), "Test Author");
        assert_eq!(book.isbn(), "1234567890");
        assert_eq!(book.status(), BookStatus::Available);
        assert!(book.is_available());
    }

    #[test]
    fn test_new_book_trims_fields() {
        let book = Book::new("  Dune  ", " Frank Herbert ", " 9780441172719 ").unwrap();

        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Frank Herbert");
        assert_eq!(book.isbn(), "9780441172719");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let err = Book::new("", "Author", "123").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { field: "title" }));

        let err = Book::new("Title", "   ", "123").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { field: "author" }));

        let err = Book::new("Title", "Author", "\t").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput { field: "isbn" }));
    }

    #[test]
    fn test_issue_and_return_cycle() {
        let mut book = Book::new("Test", "Author", "123").unwrap();

        book.issue().unwrap();
        assert_eq!(book.status(), BookStatus::Issued);
        assert!(!book.is_available());

        book.return_book().unwrap();
        assert_eq!(book.status(), BookStatus::Available);
    }

    #[test]
    fn test_double_issue_is_an_error() {
        let mut book = Book::new("Test", "Author", "123").unwrap();
        book.issue().unwrap();

        let err = book.issue().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidState {
                current: BookStatus::Issued,
                ..
            }
        ));
        // status unchanged after the failed transition
        assert_eq!(book.status(), BookStatus::Issued);
    }

    #[test]
    fn test_return_of_available_book_is_an_error() {
        let mut book = Book::new("Test", "Author", "123").unwrap();

        let err = book.return_book().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidState {
                current: BookStatus::Available,
                ..
            }
        ));
        assert!(book.is_available());
    }

    #[test]
    fn test_record_round_trip() {
        let mut book = Book::new("Test", "Author", "123").unwrap();
        book.issue().unwrap();

        let record = book.to_record();
        assert_eq!(record.status, "issued");

        let decoded = Book::from_record(record).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_from_record_rejects_unknown_status() {
        let record = BookRecord {
            title: "Test".to_string(),
            author: "Author".to_string(),
            isbn: "123".to_string(),
            status: "lost".to_string(),
        };

        let err = Book::from_record(record).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
    }

    #[test]
    fn test_from_record_rejects_blank_field() {
        let record = BookRecord {
            title: "   ".to_string(),
            author: "Author".to_string(),
            isbn: "123".to_string(),
            status: "available".to_string(),
        };

        let err = Book::from_record(record).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("available".parse::<BookStatus>().unwrap(), BookStatus::Available);
        assert_eq!("issued".parse::<BookStatus>().unwrap(), BookStatus::Issued);
        assert!("AVAILABLE".parse::<BookStatus>().is_err());
        assert!("".parse::<BookStatus>().is_err());
    }
}
