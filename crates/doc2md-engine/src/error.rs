use crate::models::TableId;

/// Invalid engine settings, reported before any block is processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Style '{style}' maps to heading level {level}, expected 1..=6")]
    StyleLevelOutOfRange { style: String, level: u8 },
    #[error("Style mapping contains an empty style name")]
    EmptyStyleName,
    #[error("heading_length_threshold must be positive")]
    ZeroLengthThreshold,
    #[error("font_size_ratio must be a positive finite number, got {0}")]
    InvalidFontSizeRatio(f64),
}

/// Input that breaks the signal extractor's contract. Aborts the affected chapter only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputContractViolation {
    #[error("Rows of table {table:?} are not contiguous (block {index} reopens it)")]
    NonContiguousTable { table: TableId, index: usize },
    #[error("Block {index} references list level {level}, expected 0..=8")]
    ListLevelOutOfRange { index: usize, level: u8 },
}

/// Any failure surfaced by [`crate::Converter`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Chapter {chapter}: {source}")]
    Input {
        chapter: usize,
        source: InputContractViolation,
    },
}
