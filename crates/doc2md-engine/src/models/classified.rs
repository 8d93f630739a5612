use std::fmt;

use serde::{Deserialize, Serialize};

use super::raw::{Run, TableId};

/// Hierarchical heading number such as `2.3.1`.
///
/// Holds one positive integer per level from 1 up to the heading's own level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DottedNumber(Vec<u32>);

impl DottedNumber {
    pub fn new(parts: Vec<u32>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Number of levels, equal to the heading level it was issued for.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The number of the enclosing heading, if any.
    #[cfg(test)]
    pub fn parent(&self) -> Option<DottedNumber> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }
}

impl fmt::Display for DottedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

/// Semantic role assigned to exactly one raw block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifiedBlock {
    Heading {
        /// `1..=6`
        level: u8,
        text: String,
        number: Option<DottedNumber>,
    },
    Paragraph {
        runs: Vec<Run>,
    },
    ListItem {
        ordered: bool,
        level: u8,
        runs: Vec<Run>,
    },
    TableRow {
        cells: Vec<Vec<Run>>,
        table_id: Option<TableId>,
        header_row: Option<bool>,
    },
    CodeLine {
        text: String,
    },
    Caption {
        text: String,
    },
    /// An admonition paragraph such as `Note: ...`, label kept apart from the body.
    Note {
        label: String,
        runs: Vec<Run>,
    },
}

impl ClassifiedBlock {
    pub fn is_code_line(&self) -> bool {
        matches!(self, ClassifiedBlock::CodeLine { .. })
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ClassifiedBlock::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Short name used in logs and snapshots.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassifiedBlock::Heading { .. } => "Heading",
            ClassifiedBlock::Paragraph { .. } => "Paragraph",
            ClassifiedBlock::ListItem { .. } => "ListItem",
            ClassifiedBlock::TableRow { .. } => "TableRow",
            ClassifiedBlock::CodeLine { .. } => "CodeLine",
            ClassifiedBlock::Caption { .. } => "Caption",
            ClassifiedBlock::Note { .. } => "Note",
        }
    }
}
