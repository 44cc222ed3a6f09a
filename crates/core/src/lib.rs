//! nutri-core: shared types and pure logic for the health assistant
//!
//! Holds the domain models, the lenient JSON extractor used on model
//! replies, the fallback table, and the assist error taxonomy. Nothing here
//! performs I/O besides loading a fallback table from disk.

pub mod assisted;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod lenient;
pub mod models;
pub mod pages;
pub mod words;

pub use assisted::Assisted;
pub use error::AssistError;
pub use extract::{JsonShape, extract_json};
pub use fallback::{FallbackError, FallbackTable};
pub use pages::{PAGES, Page};
pub use words::{WordCount, word_frequencies};
