use std::sync::LazyLock;

use regex::Regex;

use crate::{
    models::{Alignment, ClassifiedBlock, DocumentNode, Run, TableCell, TableGrid, TableId},
    warnings::StructuralWarning,
};

/// Integers, decimals, thousands separators, an optional sign and percent.
static NUMERIC_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+\-−]?\d[\d\s.,]*%?$").expect("valid numeric cell regex")
});

#[derive(Debug)]
struct TableBuilder {
    table_id: Option<TableId>,
    has_header: bool,
    rows: Vec<Vec<TableCell>>,
}

impl TableBuilder {
    fn new(table_id: Option<TableId>, first_row_header: Option<bool>) -> Self {
        Self {
            table_id,
            has_header: first_row_header != Some(false),
            rows: vec![],
        }
    }

    fn push(&mut self, cells: Vec<Vec<Run>>) {
        self.rows.push(cells.into_iter().map(split_cell).collect());
    }

    fn finish(mut self, warnings: &mut Vec<StructuralWarning>) -> TableGrid {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0).max(1);

        let mut padded_rows = 0;
        for row in &mut self.rows {
            if row.len() < columns {
                row.resize_with(columns, TableCell::empty);
                padded_rows += 1;
            }
        }
        if padded_rows > 0 {
            warnings.push(StructuralWarning::TableColumnsPadded {
                table: self.table_id,
                columns,
                padded_rows,
            });
        }

        let body_start = usize::from(self.has_header);
        let alignments = (0..columns)
            .map(|col| column_alignment(&self.rows[body_start.min(self.rows.len())..], col))
            .collect();

        log::debug!(
            "grouped table {:?}: {} row(s) x {} column(s)",
            self.table_id,
            self.rows.len(),
            columns
        );

        TableGrid {
            table_id: self.table_id,
            rows: self.rows,
            has_header: self.has_header,
            alignments,
            caption: None,
        }
    }
}

/// Right-aligns a column whose body cells are all numeric. Empty cells don't count either way,
/// but a column needs at least one number.
fn column_alignment(body: &[Vec<TableCell>], col: usize) -> Alignment {
    let mut seen_number = false;
    for row in body {
        let cell = &row[col];
        if cell.is_empty() {
            continue;
        }
        if !NUMERIC_CELL.is_match(cell.plain_text().trim()) {
            return Alignment::Default;
        }
        seen_number = true;
    }
    if seen_number {
        Alignment::Right
    } else {
        Alignment::Default
    }
}

/// Splits a cell's runs at hard line breaks, keeping each piece's formatting.
fn split_cell(runs: Vec<Run>) -> TableCell {
    let mut lines = vec![];
    let mut line: Vec<Run> = vec![];

    for run in runs {
        let mut pieces = run.text.split('\n');
        if let Some(first) = pieces.next() {
            push_piece(&mut line, &run, first);
        }
        for piece in pieces {
            lines.push(std::mem::take(&mut line));
            push_piece(&mut line, &run, piece);
        }
    }
    lines.push(line);

    let cell = TableCell { lines };
    if cell.is_empty() {
        TableCell::empty()
    } else {
        cell
    }
}

fn push_piece(line: &mut Vec<Run>, template: &Run, piece: &str) {
    let piece = piece.trim_end_matches('\r');
    if piece.is_empty() {
        return;
    }
    line.push(Run {
        text: piece.to_string(),
        ..template.clone()
    });
}

/// Folds every run of consecutive rows sharing a table id into one [`DocumentNode::Table`].
///
/// Short rows are padded with empty cells to the widest row of their table.
pub fn group_tables(
    nodes: Vec<DocumentNode>,
    warnings: &mut Vec<StructuralWarning>,
) -> Vec<DocumentNode> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut current: Option<TableBuilder> = None;

    for node in nodes {
        match node {
            DocumentNode::Block(ClassifiedBlock::TableRow {
                cells,
                table_id,
                header_row,
            }) => {
                if let Some(table) = current.take_if(|t| t.table_id != table_id) {
                    out.push(DocumentNode::Table(table.finish(warnings)));
                }
                current
                    .get_or_insert_with(|| TableBuilder::new(table_id, header_row))
                    .push(cells);
            }
            other => {
                if let Some(table) = current.take() {
                    out.push(DocumentNode::Table(table.finish(warnings)));
                }
                out.push(other);
            }
        }
    }
    if let Some(table) = current.take() {
        out.push(DocumentNode::Table(table.finish(warnings)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn row(table: u32, cells: &[&str]) -> DocumentNode {
        DocumentNode::Block(ClassifiedBlock::TableRow {
            cells: cells.iter().map(|c| vec![Run::plain(*c)]).collect(),
            table_id: Some(TableId(table)),
            header_row: None,
        })
    }

    fn grids(nodes: &[DocumentNode]) -> Vec<&TableGrid> {
        nodes
            .iter()
            .filter_map(|n| match n {
                DocumentNode::Table(grid) => Some(grid),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn short_rows_are_padded() {
        let mut warnings = vec![];
        let nodes = group_tables(
            vec![row(1, &["Name", "Port", "Proto"]), row(1, &["ssh", "22"])],
            &mut warnings,
        );

        let grid = grids(&nodes)[0];
        assert_eq!(grid.column_count(), 3);
        assert!(grid.rows.iter().all(|r| r.len() == 3));
        assert!(grid.rows[1][2].is_empty());
        assert_eq!(
            warnings,
            vec![StructuralWarning::TableColumnsPadded {
                table: Some(TableId(1)),
                columns: 3,
                padded_rows: 1
            }]
        );
    }

    #[test]
    fn table_id_change_starts_new_grid() {
        let nodes = group_tables(
            vec![row(1, &["a"]), row(1, &["b"]), row(2, &["c"])],
            &mut vec![],
        );
        let grids = grids(&nodes);
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].rows.len(), 2);
        assert_eq!(grids[1].table_id, Some(TableId(2)));
    }

    #[test]
    fn explicit_no_header_is_respected() {
        let nodes = group_tables(
            vec![DocumentNode::Block(ClassifiedBlock::TableRow {
                cells: vec![vec![Run::plain("x")]],
                table_id: Some(TableId(3)),
                header_row: Some(false),
            })],
            &mut vec![],
        );
        assert!(!grids(&nodes)[0].has_header);
    }

    #[test]
    fn hard_breaks_become_cell_lines() {
        let nodes = group_tables(
            vec![DocumentNode::Block(ClassifiedBlock::TableRow {
                cells: vec![vec![Run::plain("first\nsec"), Run::bold("ond")]],
                table_id: Some(TableId(1)),
                header_row: None,
            })],
            &mut vec![],
        );
        let cell = &grids(&nodes)[0].rows[0][0];
        assert_eq!(
            cell.lines,
            vec![
                vec![Run::plain("first")],
                vec![Run::plain("sec"), Run::bold("ond")]
            ]
        );
        assert_eq!(grids(&nodes)[0].rows.len(), 1);
    }

    #[rstest]
    #[case(&["22", "443", ""], Alignment::Right)]
    #[case(&["1 024", "12.5%", "-3"], Alignment::Right)]
    #[case(&["22", "n/a"], Alignment::Default)]
    #[case(&["", ""], Alignment::Default)]
    fn numeric_columns_align_right(#[case] body: &[&str], #[case] expected: Alignment) {
        let mut rows = vec![row(1, &["Header"])];
        rows.extend(body.iter().map(|c| row(1, &[*c])));
        let nodes = group_tables(rows, &mut vec![]);
        assert_eq!(grids(&nodes)[0].alignments, vec![expected]);
    }
}
