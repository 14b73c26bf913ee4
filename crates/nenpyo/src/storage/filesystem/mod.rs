//! Filesystem content source.
//!
//! Reads the content tree laid out as:
//!
//! ```text
//! <root>/<year>/<year>.yaml
//! <root>/<year>/<year>-<MM>.yaml
//! ```
//!
//! The tree is never written to.

mod source;

pub use source::FsHistorySource;
