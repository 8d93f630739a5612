//! Markdown serialization of the grouped document tree.
//!
//! Rendering is total: every node produces some text (possibly none for empty paragraphs) and
//! the same tree always yields the same bytes.

pub mod inline;

pub use inline::{code_span, render_runs};

use crate::models::{
    Alignment, ClassifiedBlock, CodeBlock, DocumentNode, ListNode, TableCell, TableGrid,
};

/// Renders a document tree. Blocks are separated by one blank line and the text ends with a
/// newline unless nothing was rendered at all.
pub fn render(nodes: &[DocumentNode]) -> String {
    let blocks: Vec<String> = nodes.iter().filter_map(render_node).collect();
    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_node(node: &DocumentNode) -> Option<String> {
    match node {
        DocumentNode::Block(block) => render_block(block),
        DocumentNode::Code(code) => Some(render_code(code)),
        DocumentNode::List(list) => {
            let mut lines = vec![];
            render_list_items(&list.items, "", &mut lines);
            Some(lines.join("\n"))
        }
        DocumentNode::Table(grid) => Some(render_table(grid)),
    }
}

fn render_block(block: &ClassifiedBlock) -> Option<String> {
    match block {
        ClassifiedBlock::Heading {
            level,
            text,
            number,
        } => {
            let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
            Some(match number {
                Some(number) => format!("{hashes} {number} {text}"),
                None => format!("{hashes} {text}"),
            })
        }
        ClassifiedBlock::Paragraph { runs } => {
            let text = render_runs(runs);
            (!text.trim().is_empty()).then(|| text.trim().to_string())
        }
        ClassifiedBlock::Caption { text } => Some(quote(text)),
        ClassifiedBlock::Note { label, runs } => {
            Some(quote(&format!("_{label}_{}", render_runs(runs).trim_end())))
        }
        // Grouping consumes these; a stray one still renders rather than vanishing.
        ClassifiedBlock::ListItem { .. } | ClassifiedBlock::TableRow { .. } => {
            render_stray(block)
        }
        ClassifiedBlock::CodeLine { text } => Some(render_code(&CodeBlock {
            language: None,
            lines: vec![text.clone()],
        })),
    }
}

fn render_stray(block: &ClassifiedBlock) -> Option<String> {
    match block {
        ClassifiedBlock::ListItem { ordered, runs, .. } => {
            let marker = if *ordered { "1." } else { "-" };
            Some(format!("{marker} {}", render_runs(runs).trim()))
        }
        ClassifiedBlock::TableRow { cells, .. } => Some(
            cells
                .iter()
                .map(|c| render_runs(c).trim().replace('|', "\\|"))
                .collect::<Vec<_>>()
                .join(" | "),
        ),
        _ => None,
    }
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_code(code: &CodeBlock) -> String {
    // A fence must be longer than any backtick run that opens a line inside it.
    let longest = code
        .lines
        .iter()
        .map(|l| inline::longest_backtick_run(l.trim_start()))
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);

    let mut out = String::new();
    out.push_str(&fence);
    out.push_str(code.language.as_deref().unwrap_or(""));
    out.push('\n');
    for line in &code.lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&fence);
    out
}

/// Children are indented by the width of their parent's marker so ordered parents nest too.
fn render_list_items(items: &[ListNode], indent: &str, lines: &mut Vec<String>) {
    let mut ordinal = 0;
    for item in items {
        let marker = if item.ordered {
            ordinal += 1;
            format!("{ordinal}.")
        } else {
            "-".to_string()
        };
        let text = render_runs(&item.runs).replace('\n', " ");
        lines.push(format!("{indent}{marker} {}", text.trim()).trim_end().to_string());

        if !item.children.is_empty() {
            let child_indent = format!("{indent}{}", " ".repeat(marker.len() + 1));
            render_list_items(&item.children, &child_indent, lines);
        }
    }
}

fn render_table(grid: &TableGrid) -> String {
    let columns = grid.column_count();
    let mut lines = vec![];

    let (header, body) = match grid.rows.split_first() {
        Some((first, rest)) if grid.has_header => (Some(first), rest),
        _ => (None, grid.rows.as_slice()),
    };

    lines.push(match header {
        Some(row) => table_row(row),
        None => table_row(&vec![TableCell::empty(); columns]),
    });
    lines.push(format!(
        "| {} |",
        grid.alignments
            .iter()
            .map(|a| match a {
                Alignment::Default => "---",
                Alignment::Right => "---:",
            })
            .collect::<Vec<_>>()
            .join(" | ")
    ));
    lines.extend(body.iter().map(|row| table_row(row)));

    let mut out = lines.join("\n");
    if let Some(caption) = &grid.caption {
        out.push_str("\n\n");
        out.push_str(&quote(caption));
    }
    out
}

fn table_row(cells: &[TableCell]) -> String {
    let rendered: Vec<String> = cells.iter().map(table_cell).collect();
    format!("| {} |", rendered.join(" | "))
}

fn table_cell(cell: &TableCell) -> String {
    cell.lines
        .iter()
        .map(|line| render_runs(line).trim().replace('|', "\\|"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("<br>")
}
