use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing one formatting state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub font_size_pt: Option<f64>,
}

impl Run {
    /// Plain run with no formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    pub fn mono(text: impl Into<String>) -> Self {
        Self {
            monospace: true,
            ..Self::plain(text)
        }
    }

    pub fn with_size(mut self, pt: f64) -> Self {
        self.font_size_pt = Some(pt);
        self
    }

    /// True when the run carries no visible characters.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether two runs can be concatenated without changing rendered emphasis.
    pub fn same_format(&self, other: &Run) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.monospace == other.monospace
    }
}

/// Opaque identifier grouping the rows of one source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

/// Numbering attached to a paragraph by the source document's list machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    pub numbering_id: u32,
    /// Nesting level, valid range `0..=8`.
    pub level: u8,
    #[serde(default)]
    pub ordered: bool,
}

/// One paragraph or table row as produced by the signal extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBlock {
    pub style_name: Option<String>,
    pub outline_level: Option<u8>,
    pub runs: Vec<Run>,
    pub list_info: Option<ListInfo>,
    pub is_table_row: bool,
    pub cells: Option<Vec<Vec<Run>>>,
    pub table_id: Option<TableId>,
    /// Explicit header marker on a table row; `None` leaves the first-row convention in place.
    pub header_row: Option<bool>,
}

impl RawBlock {
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    pub fn styled(style: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            style_name: Some(style.into()),
            runs,
            ..Self::default()
        }
    }

    pub fn list_item(level: u8, ordered: bool, runs: Vec<Run>) -> Self {
        Self {
            runs,
            list_info: Some(ListInfo {
                numbering_id: 1,
                level,
                ordered,
            }),
            ..Self::default()
        }
    }

    pub fn table_row(table: u32, cells: Vec<Vec<Run>>) -> Self {
        Self {
            is_table_row: true,
            cells: Some(cells),
            table_id: Some(TableId(table)),
            ..Self::default()
        }
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}
