use std::sync::LazyLock;

use regex::Regex;

/// `2.3.1 Title` style numbering. Components are capped at three digits so years don't match.
static SECTION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,3}(?:\.\d{1,3})*)\.?\s+(\p{Lu}.*)$").expect("valid section regex")
});

/// Page reference left behind by a table of contents: `Title\t42` or `Title.....42`.
static TRAILING_PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\t|\.{3,}|…+)\s*\d+\s*$").expect("valid page regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Leading literal list marker: bullets, or `1)` / `a)` enumerators.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?P<bullet>[•\-–*−▪○·])|(?P<enum>\d{1,3}|[a-zа-я])\))\s+\S")
        .expect("valid list marker regex")
});

/// A section number found at the start of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNumber<'a> {
    pub parts: Vec<u32>,
    /// Text following the number, starting at its first uppercase letter.
    pub rest: &'a str,
}

pub fn leading_section_number(text: &str) -> Option<SectionNumber<'_>> {
    let caps = SECTION_NUMBER.captures(text)?;
    let parts = caps
        .get(1)?
        .as_str()
        .split('.')
        .map(str::parse)
        .collect::<Result<Vec<u32>, _>>()
        .ok()?;
    Some(SectionNumber {
        parts,
        rest: caps.get(2)?.as_str(),
    })
}

/// Normalizes heading text: removes TOC page numbers, tabs, repeated whitespace and any
/// literal section number.
pub fn clean_heading_text(text: &str) -> String {
    let without_page = TRAILING_PAGE_NUMBER.replace(text, "");
    let collapsed = WHITESPACE.replace_all(&without_page, " ");
    let collapsed = collapsed.trim();
    match leading_section_number(collapsed) {
        Some(number) => number.rest.trim().to_string(),
        None => collapsed.to_string(),
    }
}

/// A literal list marker at the start of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub ordered: bool,
    /// Bytes covering leading whitespace, the marker and the whitespace after it.
    pub len: usize,
}

pub fn literal_list_marker(text: &str) -> Option<ListMarker> {
    let caps = LIST_MARKER.captures(text)?;
    let whole = caps.get(0)?;
    // The match ends on the first content character; step back over it.
    let content_char = whole.as_str().chars().next_back()?;
    Some(ListMarker {
        ordered: caps.name("enum").is_some(),
        len: whole.end() - content_char.len_utf8(),
    })
}

/// Punctuation that separates a label or caption number from the text after it.
const LABEL_SEPARATORS: [char; 5] = [':', '–', '—', '-', '.'];

/// Matches `prefix` followed by whitespace and a number, e.g. `Table 3 – Users`.
/// Returns the text after the number.
pub fn numbered_prefix_tail<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.trim_start().strip_prefix(prefix)?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() || !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.'))
}

/// Whether the text after a caption number reads like a title (`– Users`, `: Users`,
/// `Users`) rather than the rest of a sentence (`lists the ports.`).
pub fn is_caption_title(tail: &str) -> bool {
    let tail = tail.trim_start();
    match tail.chars().next() {
        None => true,
        Some(c) => LABEL_SEPARATORS.contains(&c) || c.is_uppercase(),
    }
}

/// Matches a `prefix` label at the start of `text`, e.g. `Note: ...` or `Примечание – ...`.
/// The label must be followed by a separator. Returns the byte length of the label including
/// leading whitespace.
pub fn label_prefix_len(text: &str, prefix: &str) -> Option<usize> {
    let leading = text.len() - text.trim_start().len();
    let rest = text[leading..].strip_prefix(prefix)?;
    rest.trim_start()
        .starts_with(LABEL_SEPARATORS)
        .then_some(leading + prefix.len())
}
