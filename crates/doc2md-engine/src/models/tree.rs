use serde::{Deserialize, Serialize};

use super::{
    classified::ClassifiedBlock,
    raw::{Run, TableId},
};

/// A fenced code region assembled from consecutive code lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub lines: Vec<String>,
}

/// One list entry with its nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNode {
    pub ordered: bool,
    pub runs: Vec<Run>,
    pub children: Vec<ListNode>,
}

/// A contiguous list rebuilt from classified list items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListGroup {
    pub items: Vec<ListNode>,
}

impl ListGroup {
    /// Deepest nesting level present, 0 for a flat list.
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[ListNode]) -> usize {
            nodes
                .iter()
                .map(|n| {
                    if n.children.is_empty() {
                        0
                    } else {
                        1 + walk(&n.children)
                    }
                })
                .max()
                .unwrap_or(0)
        }
        walk(&self.items)
    }
}

/// Column alignment marker for the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Default,
    Right,
}

/// A table cell. Each entry of `lines` is one hard-break separated line of the source cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub lines: Vec<Vec<Run>>,
}

impl TableCell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|r| r.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.iter().all(Run::is_blank))
    }
}

/// Row/column grid. Every row holds exactly `alignments.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    pub table_id: Option<TableId>,
    pub rows: Vec<Vec<TableCell>>,
    pub has_header: bool,
    pub alignments: Vec<Alignment>,
    pub caption: Option<String>,
}

impl TableGrid {
    pub fn column_count(&self) -> usize {
        self.alignments.len()
    }
}

/// Node of the grouped document tree handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentNode {
    /// A block that no grouping stage claimed (headings, paragraphs, captions, notes).
    Block(ClassifiedBlock),
    Code(CodeBlock),
    List(ListGroup),
    Table(TableGrid),
}
