//! Splitting a document into independently numbered chapters at its level-1 headings.

use serde::Serialize;

use crate::{
    classify::{
        ClassifierRules, classify_all_with_body_size, signals::body_font_size,
        text::leading_section_number,
    },
    models::{ClassifiedBlock, RawBlock},
};

/// A slice of the input converted on its own, with the number its first heading claims.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter<'a> {
    /// Cleaned text of the opening level-1 heading. `None` for the preamble.
    pub title: Option<String>,
    pub seed: u32,
    /// Body font size of the whole document, so font-based headings keep their level once
    /// the chapter is classified on its own.
    pub body_font_size: Option<f64>,
    #[serde(skip)]
    pub blocks: &'a [RawBlock],
}

/// Splits `blocks` before every level-1 heading.
///
/// Blocks ahead of the first level-1 heading form a preamble chapter that shares the first
/// seed without consuming it. A heading that spells out its own number (`3. Installation`)
/// seeds its chapter with that number; otherwise chapters count up from `first_seed`.
pub fn split_chapters<'a>(
    blocks: &'a [RawBlock],
    rules: &ClassifierRules,
    first_seed: u32,
) -> Vec<Chapter<'a>> {
    let body_font_size = body_font_size(blocks);
    let classified = classify_all_with_body_size(blocks, rules, body_font_size);
    let starts: Vec<(usize, String)> = classified
        .iter()
        .enumerate()
        .filter_map(|(i, block)| match block {
            ClassifiedBlock::Heading { level: 1, text, .. } => Some((i, text.clone())),
            _ => None,
        })
        .collect();

    let mut chapters = vec![];
    let first_start = starts.first().map_or(blocks.len(), |(i, _)| *i);
    if first_start > 0 {
        chapters.push(Chapter {
            title: None,
            seed: first_seed,
            body_font_size,
            blocks: &blocks[..first_start],
        });
    }

    let mut previous: Option<u32> = None;
    for (n, (start, title)) in starts.iter().enumerate() {
        let end = starts.get(n + 1).map_or(blocks.len(), |(i, _)| *i);
        let seed = explicit_chapter_number(&blocks[*start]).unwrap_or(match previous {
            Some(prev) => prev + 1,
            None => first_seed.max(1),
        });
        previous = Some(seed);

        log::debug!("chapter {seed} '{title}': blocks {start}..{end}");
        chapters.push(Chapter {
            title: Some(title.clone()),
            seed,
            body_font_size,
            blocks: &blocks[*start..end],
        });
    }

    chapters
}

/// A single leading integer such as `2. Architecture`. Dotted numbers don't name a chapter.
fn explicit_chapter_number(block: &RawBlock) -> Option<u32> {
    let text = block.text();
    match leading_section_number(text.trim())?.parts.as_slice() {
        [number] if *number > 0 => Some(*number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, models::Run};
    use pretty_assertions::assert_eq;

    fn h1(text: &str) -> RawBlock {
        RawBlock::styled("Heading 1", vec![Run::plain(text)])
    }

    fn para(text: &str) -> RawBlock {
        RawBlock::paragraph(vec![Run::plain(text)])
    }

    fn summary(chapters: &[Chapter<'_>]) -> Vec<(Option<String>, u32, usize)> {
        chapters
            .iter()
            .map(|c| (c.title.clone(), c.seed, c.blocks.len()))
            .collect()
    }

    #[test]
    fn splits_at_top_level_headings() {
        let blocks = vec![
            para("Cover page text."),
            h1("Overview"),
            para("Intro."),
            h1("Installation"),
            para("Steps."),
            para("More steps."),
        ];
        let rules = ClassifierRules::new(&EngineConfig::default());

        assert_eq!(
            summary(&split_chapters(&blocks, &rules, 0)),
            vec![
                (None, 0, 1),
                (Some("Overview".into()), 1, 2),
                (Some("Installation".into()), 2, 3),
            ]
        );
    }

    #[test]
    fn explicit_numbers_seed_chapters() {
        let blocks = vec![
            h1("1. Общие сведения"),
            para("Текст."),
            h1("2\t\tАрхитектура комплекса"),
            h1("Установка и настройка"),
        ];
        let rules = ClassifierRules::new(&EngineConfig::default());

        assert_eq!(
            summary(&split_chapters(&blocks, &rules, 0)),
            vec![
                (Some("Общие сведения".into()), 1, 2),
                (Some("Архитектура комплекса".into()), 2, 1),
                (Some("Установка и настройка".into()), 3, 1),
            ]
        );
    }

    #[test]
    fn configured_seed_starts_the_count() {
        let blocks = vec![h1("Overview"), h1("Usage")];
        let rules = ClassifierRules::new(&EngineConfig::default());
        let chapters = split_chapters(&blocks, &rules, 5);
        assert_eq!(
            chapters.iter().map(|c| c.seed).collect::<Vec<_>>(),
            vec![5, 6]
        );
    }

    #[test]
    fn chapters_share_the_document_body_size() {
        let blocks = vec![
            RawBlock::paragraph(vec![Run::plain("Overview").with_size(20.0)]),
            RawBlock::paragraph(vec![Run::plain("Intro.").with_size(11.0)]),
            RawBlock::paragraph(vec![Run::plain("More intro.").with_size(11.0)]),
            RawBlock::paragraph(vec![Run::plain("Usage").with_size(20.0)]),
        ];
        let rules = ClassifierRules::new(&EngineConfig::default());
        let chapters = split_chapters(&blocks, &rules, 0);

        assert_eq!(
            summary(&chapters),
            vec![
                (Some("Overview".into()), 1, 3),
                (Some("Usage".into()), 2, 1),
            ]
        );
        assert!(chapters.iter().all(|c| c.body_font_size == Some(11.0)));
    }

    #[test]
    fn document_without_headings_is_one_chapter() {
        let blocks = vec![para("Only text.")];
        let rules = ClassifierRules::new(&EngineConfig::default());
        assert_eq!(
            summary(&split_chapters(&blocks, &rules, 0)),
            vec![(None, 0, 1)]
        );
    }
}
