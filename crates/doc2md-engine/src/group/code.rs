//! Code block assembly: maximal runs of code lines become one fenced block.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    models::{ClassifiedBlock, CodeBlock, DocumentNode},
    warnings::StructuralWarning,
};

static SHELL_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\$\s|(?:sudo|apt|apt-get|docker|git|systemctl|pip|pip3|npm|cd)(?:\s|$))")
        .expect("valid shell regex")
});

static SQL_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:SELECT|INSERT|UPDATE|DELETE)\b").expect("valid sql regex")
});

static PYTHON_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:import|def|class)\b").expect("valid python regex"));

static YAML_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*:\s*$").expect("valid yaml key regex"));

static YAML_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+[\w-]+:\s*\S").expect("valid yaml entry regex"));

type LanguageRule = fn(first: &str, lines: &[String]) -> bool;

/// Checked in order; the first rule that accepts the block names its language.
const LANGUAGE_RULES: &[(&str, LanguageRule)] = &[
    ("bash", is_shebang),
    ("bash", is_shell_command),
    ("sql", is_sql),
    ("python", is_python),
    ("yaml", is_yaml),
];

fn is_shebang(first: &str, _lines: &[String]) -> bool {
    first.starts_with("#!")
}

fn is_shell_command(first: &str, _lines: &[String]) -> bool {
    SHELL_COMMAND.is_match(first)
}

fn is_sql(first: &str, _lines: &[String]) -> bool {
    SQL_STATEMENT.is_match(first)
}

fn is_python(first: &str, lines: &[String]) -> bool {
    PYTHON_START.is_match(first) && lines.iter().any(|l| l.trim_end().ends_with(':'))
}

fn is_yaml(first: &str, lines: &[String]) -> bool {
    YAML_KEY.is_match(first) && lines.iter().any(|l| YAML_ENTRY.is_match(l))
}

const WARNING_EXCERPT_CHARS: usize = 40;

/// Infers a fence language. `None` means no rule was confident enough.
pub fn infer_language(lines: &[String]) -> Option<&'static str> {
    let first = lines.first()?;
    LANGUAGE_RULES
        .iter()
        .find(|(_, accepts)| accepts(first, lines))
        .map(|(language, _)| *language)
}

/// Replaces every maximal run of [`ClassifiedBlock::CodeLine`] with a [`DocumentNode::Code`].
///
/// Blank lines at either edge of a run are dropped, and a run holding nothing but blank lines
/// produces no node at all. Everything else is passed through as [`DocumentNode::Block`].
pub fn assemble(
    blocks: Vec<ClassifiedBlock>,
    warnings: &mut Vec<StructuralWarning>,
) -> Vec<DocumentNode> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut open: Option<Vec<String>> = None;

    for block in blocks {
        match block {
            ClassifiedBlock::CodeLine { text } => {
                let lines = open.get_or_insert_with(Vec::new);
                lines.extend(text.split('\n').map(|l| l.trim_end_matches('\r').to_string()));
            }
            other => {
                if let Some(lines) = open.take() {
                    flush(lines, &mut out, warnings);
                }
                out.push(DocumentNode::Block(other));
            }
        }
    }
    if let Some(lines) = open.take() {
        flush(lines, &mut out, warnings);
    }

    out
}

fn flush(
    mut lines: Vec<String>,
    out: &mut Vec<DocumentNode>,
    warnings: &mut Vec<StructuralWarning>,
) {
    let trailing = lines.iter().rev().take_while(|l| is_blank(l)).count();
    lines.truncate(lines.len() - trailing);
    let leading = lines.iter().take_while(|l| is_blank(l)).count();
    lines.drain(..leading);

    if lines.is_empty() {
        return;
    }
    let language = infer_language(&lines).map(str::to_string);
    if language.is_none() {
        warnings.push(StructuralWarning::CodeLanguageUnknown {
            first_line: lines[0].trim().chars().take(WARNING_EXCERPT_CHARS).collect(),
        });
    }
    log::debug!(
        "assembled code block: {} line(s), language {:?}",
        lines.len(),
        language
    );

    out.push(DocumentNode::Code(CodeBlock { language, lines }));
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
