//! # Block Classification
//!
//! Assigns each [`RawBlock`] exactly one semantic role. Word-processor output rarely carries
//! reliable markup, so the decision is layered over several weak signals.
//!
//! ## Decision order
//!
//! 1. Table rows are always [`ClassifiedBlock::TableRow`]; empty blocks are paragraphs
//!    (or an empty code line when they sit inside code).
//! 2. **Explicit heading rules** (`rules::EXPLICIT_RULES`): configured style name, then
//!    outline level.
//! 3. List numbering from the document (`list_info`).
//! 4. Captions (`Caption` style or `Table 3 ...`) and notes (`Note: ...`).
//! 5. Literal list markers typed into the text (`•`, `-`, `1)`, `a)`).
//! 6. **Heuristic heading rules** (`rules::HEURISTIC_RULES`): section numbering pattern, then
//!    bold text / enlarged font.
//! 7. Code lines (code style, or mostly monospace runs), otherwise a paragraph.
//!
//! Heading rules short-circuit: the first rule that returns a level wins, so a misclassified
//! heading can always be traced to exactly one rule (logged at `trace` level).
//!
//! ## Modules
//!
//! - **`context`**: `ClassifierRules` (prepared configuration) and `ClassificationContext`
//! - **`rules`**: the heading rules as plain functions
//! - **`signals`**: run measurements (boldness, dominant font size, monospace share)
//! - **`text`**: text-shape patterns and heading text cleanup

pub mod context;
pub mod rules;
pub mod signals;
pub mod text;

pub use context::{ClassificationContext, ClassifierRules};

use crate::{
    config::normalize_style_name,
    models::{ClassifiedBlock, RawBlock},
};
use rules::{EXPLICIT_RULES, HEURISTIC_RULES, first_match};
use signals::{MonospaceShare, body_font_size, drop_text_prefix, monospace_share};
use text::{
    clean_heading_text, is_caption_title, label_prefix_len, literal_list_marker,
    numbered_prefix_tail,
};

/// Classifies one raw block. Pure: the result depends only on the block and the context.
pub fn classify(raw: &RawBlock, ctx: &ClassificationContext<'_>) -> ClassifiedBlock {
    decide(raw, ctx).0
}

/// Classifies a whole chapter in document order, feeding each result forward as the
/// `previous` hint of the next block.
pub fn classify_all(blocks: &[RawBlock], rules: &ClassifierRules) -> Vec<ClassifiedBlock> {
    classify_all_with_body_size(blocks, rules, body_font_size(blocks))
}

/// Like [`classify_all`], but measures font sizes against a body size taken from elsewhere,
/// typically the whole document a chapter was cut from.
pub fn classify_all_with_body_size(
    blocks: &[RawBlock],
    rules: &ClassifierRules,
    body_font_size: Option<f64>,
) -> Vec<ClassifiedBlock> {
    let mut out: Vec<ClassifiedBlock> = Vec::with_capacity(blocks.len());

    for (index, raw) in blocks.iter().enumerate() {
        let ctx = ClassificationContext {
            rules,
            body_font_size,
            previous: out.last(),
        };
        let (block, reason) = decide(raw, &ctx);
        log::trace!("block {index}: {} ({reason})", block.kind_name());
        out.push(block);
    }

    out
}

fn decide(raw: &RawBlock, ctx: &ClassificationContext<'_>) -> (ClassifiedBlock, &'static str) {
    if raw.is_table_row {
        return (table_row(raw), "table row");
    }

    let full_text = raw.text();
    let text = full_text.trim();
    let after_code = ctx.previous.is_some_and(ClassifiedBlock::is_code_line);

    if text.is_empty() {
        if after_code {
            return (
                ClassifiedBlock::CodeLine {
                    text: String::new(),
                },
                "blank line in code",
            );
        }
        return (
            ClassifiedBlock::Paragraph {
                runs: raw.runs.clone(),
            },
            "empty",
        );
    }

    if let Some((rule, level)) = first_match(EXPLICIT_RULES, raw, text, ctx) {
        return (heading(level, text), rule);
    }

    if let Some(info) = &raw.list_info {
        return (
            ClassifiedBlock::ListItem {
                ordered: info.ordered,
                level: info.level,
                runs: raw.runs.clone(),
            },
            "list numbering",
        );
    }

    if is_caption(raw, text, ctx) {
        return (
            ClassifiedBlock::Caption {
                text: text.split_whitespace().collect::<Vec<_>>().join(" "),
            },
            "caption",
        );
    }

    if let Some(note) = note(raw, &full_text, ctx.rules) {
        return (note, "note prefix");
    }

    if let Some(marker) = literal_list_marker(&full_text) {
        return (
            ClassifiedBlock::ListItem {
                ordered: marker.ordered,
                level: 0,
                runs: drop_text_prefix(&raw.runs, marker.len),
            },
            "literal list marker",
        );
    }

    if let Some((rule, level)) = first_match(HEURISTIC_RULES, raw, text, ctx) {
        return (heading(level, text), rule);
    }

    if is_code(raw, after_code) {
        return (
            ClassifiedBlock::CodeLine {
                text: full_text.trim_end_matches(['\r', '\n']).to_string(),
            },
            "code",
        );
    }

    (
        ClassifiedBlock::Paragraph {
            runs: raw.runs.clone(),
        },
        "paragraph",
    )
}

fn heading(level: u8, text: &str) -> ClassifiedBlock {
    ClassifiedBlock::Heading {
        level,
        text: clean_heading_text(text),
        number: None,
    }
}

fn table_row(raw: &RawBlock) -> ClassifiedBlock {
    let cells = match &raw.cells {
        Some(cells) => cells.clone(),
        None => vec![raw.runs.clone()],
    };
    ClassifiedBlock::TableRow {
        cells,
        table_id: raw.table_id,
        header_row: raw.header_row,
    }
}

fn style_contains(raw: &RawBlock, needles: &[&str]) -> bool {
    raw.style_name
        .as_deref()
        .map(normalize_style_name)
        .is_some_and(|style| needles.iter().any(|n| style.contains(n)))
}

/// Caption style, or `Table 3 ...` text. Right below a table any such text is its caption;
/// elsewhere it must read like a title and not end a sentence.
fn is_caption(raw: &RawBlock, text: &str, ctx: &ClassificationContext<'_>) -> bool {
    if style_contains(raw, &["caption"]) {
        return true;
    }
    let after_table = matches!(ctx.previous, Some(ClassifiedBlock::TableRow { .. }));
    ctx.rules.caption_prefixes.iter().any(|prefix| {
        numbered_prefix_tail(text, prefix).is_some_and(|tail| {
            after_table || (is_caption_title(tail) && !text.ends_with('.'))
        })
    })
}

fn note(raw: &RawBlock, full_text: &str, rules: &ClassifierRules) -> Option<ClassifiedBlock> {
    rules.note_prefixes.iter().find_map(|prefix| {
        let len = label_prefix_len(full_text, prefix)?;
        Some(ClassifiedBlock::Note {
            label: prefix.clone(),
            runs: drop_text_prefix(&raw.runs, len),
        })
    })
}

/// A fully monospace block is code. A mostly monospace one only continues code that is
/// already open; on its own it is a paragraph with inline code spans.
fn is_code(raw: &RawBlock, after_code: bool) -> bool {
    if style_contains(raw, &["code", "preformatted"]) {
        return true;
    }
    match monospace_share(&raw.runs) {
        MonospaceShare::All => true,
        MonospaceShare::Majority => after_code,
        MonospaceShare::Minority | MonospaceShare::None => false,
    }
}
