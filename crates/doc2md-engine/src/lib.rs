//! Structure inference for word-processor documents.
//!
//! The engine takes the flat paragraph and run descriptors extracted from a document and turns
//! them into Markdown with chapter-relative heading numbers:
//!
//! ```text
//! RawBlock* ──classify──▶ ClassifiedBlock* ──number──▶ ──group──▶ DocumentNode* ──render──▶ String
//! ```
//!
//! Every stage runs in document order within a chapter. Chapters are independent once seeded,
//! so [`Converter::convert_chapters`] handles them in parallel.

pub mod chapters;
pub mod classify;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod numbering;
pub mod pipeline;
pub mod render;
pub mod warnings;

// Re-export key types for easier usage
pub use chapters::{Chapter, split_chapters};
pub use config::EngineConfig;
pub use error::{ConfigurationError, ConvertError, InputContractViolation};
pub use models::*;
pub use numbering::HeadingCounters;
pub use pipeline::{ChapterOutput, Converter, validate_input};
pub use render::render;
pub use warnings::StructuralWarning;
