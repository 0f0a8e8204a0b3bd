//! bookshelf - Book catalog and lending tracker
//!
//! A single-user CLI that tracks a catalog of books and their lending
//! state, persisted as a single JSON file between runs.
//!
//! # Architecture
//!
//! The whole catalog lives in memory:
//! - Books are loaded from the catalog file on startup
//! - Every mutating operation rewrites the full file
//! - The previous file state is kept as a `.bak` backup
//!
//! # Modules
//!
//! - `library`: Data structures and operations (Book, Catalog)
//! - `config`: Path resolution (env vars, config file, defaults)
//! - `error`: The `CatalogError` taxonomy
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! bookshelf add "Python Crash Course" "Eric Matthes" 9781593279288
//!
//! # Issue and return it
//! bookshelf issue 9781593279288
//! bookshelf return 9781593279288
//!
//! # Search and inspect
//! bookshelf search python
//! bookshelf search matthes --by author
//! bookshelf stats
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod library;

// Re-export main types at crate root for convenience
pub use error::CatalogError;
pub use library::{Book, BookRecord, BookStatus, Catalog, CatalogStats};
