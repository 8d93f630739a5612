use std::fmt;

use serde::Serialize;

use crate::models::TableId;

/// Non-fatal signal that a best-effort decision was made and deserves human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StructuralWarning {
    /// A heading skipped one or more levels below its predecessor.
    HeadingLevelJump { heading: String, from: u8, to: u8 },
    /// Rows of a table had differing cell counts and were padded to `columns`.
    TableColumnsPadded {
        table: Option<TableId>,
        columns: usize,
        padded_rows: usize,
    },
    /// A list item nested deeper than its predecessor allows.
    ListLevelClamped { from: u8, to: u8 },
    /// No language could be inferred for a fenced block.
    CodeLanguageUnknown { first_line: String },
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::HeadingLevelJump { heading, from, to } => {
                write!(f, "heading '{heading}' jumps from level {from} to {to}")
            }
            StructuralWarning::TableColumnsPadded {
                table,
                columns,
                padded_rows,
            } => {
                match table {
                    Some(id) => write!(f, "table {}", id.0)?,
                    None => f.write_str("table")?,
                }
                write!(f, ": padded {padded_rows} row(s) to {columns} columns")
            }
            StructuralWarning::ListLevelClamped { from, to } => {
                write!(f, "list item at level {from} clamped to {to}")
            }
            StructuralWarning::CodeLanguageUnknown { first_line } => {
                write!(f, "no language inferred for code block starting '{first_line}'")
            }
        }
    }
}
