// Corpus input — CSV loading, text normalization, and document identity.

pub mod loader;
pub mod normalizer;

pub use loader::RawCorpus;
pub use normalizer::{Document, DocumentTable};

/// The one column every input corpus must carry.
pub const TEXT_COLUMN: &str = "full_text";

/// Optional metadata columns that feed document identity.
/// Looked up by exact header name; absent columns behave as empty strings.
pub const TITLE_COLUMN: &str = "title";
pub const DATE_COLUMN: &str = "date";
pub const SOURCE_COLUMN: &str = "Source";
