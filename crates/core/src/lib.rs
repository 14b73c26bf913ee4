//! Functional core for the nenpyo history timeline.
//!
//! Everything in this crate is pure: domain types, identifier parsing,
//! document validation and normalization, plus the traits that the
//! imperative shell (`nenpyo`) implements for storage and caching.
//!
//! # Example
//!
//! ```
//! use nenpyo_core::history::{normalize_month, parse_document, Month, Year};
//!
//! let doc = parse_document(
//!     r#"
//! events:
//!   - date: "1945-08-15"
//!     title: "Surrender broadcast"
//!     category: "政治・経済"
//!     description: "The Emperor announces the end of the war."
//! "#,
//! )
//! .unwrap();
//!
//! let year = Year::new(1945).unwrap();
//! let month = Month::new(8).unwrap();
//! let record = normalize_month(&doc, year, month).unwrap();
//! assert_eq!(record.events.len(), 1);
//! ```

pub mod cache;
pub mod history;
pub mod storage;
