//! Heading rules. Each rule inspects one block and either names a level or falls through.
//! Rules never combine: the first one returning `Some` decides.

use crate::config::normalize_style_name;

use super::{
    context::ClassificationContext,
    signals::{dominant_font_size, ends_with_period, ends_with_sentence_punctuation, is_fully_bold},
    text::leading_section_number,
};
use crate::models::RawBlock;

/// Signature shared by every heading rule. `text` is the block's trimmed plain text.
pub type HeadingRule = fn(&RawBlock, &str, &ClassificationContext<'_>) -> Option<u8>;

/// Rules backed by explicit document markup. Applied to list items too.
pub const EXPLICIT_RULES: &[(&str, HeadingRule)] =
    &[("style", by_style_name), ("outline", by_outline_level)];

/// Rules inferred from text shape and font metrics.
pub const HEURISTIC_RULES: &[(&str, HeadingRule)] = &[
    ("numbering", by_numbering_pattern),
    ("font", by_font_metrics),
];

/// Size-to-median ratios for the font banding, most significant first.
const LEVEL_ONE_RATIO: f64 = 1.8;
const LEVEL_TWO_RATIO: f64 = 1.4;

/// Evaluates `rules` in order and reports the first level found with the rule's name.
pub fn first_match(
    rules: &[(&'static str, HeadingRule)],
    raw: &RawBlock,
    text: &str,
    ctx: &ClassificationContext<'_>,
) -> Option<(&'static str, u8)> {
    rules
        .iter()
        .find_map(|(name, rule)| rule(raw, text, ctx).map(|level| (*name, level)))
}

pub fn by_style_name(raw: &RawBlock, _text: &str, ctx: &ClassificationContext<'_>) -> Option<u8> {
    let style = raw.style_name.as_deref()?;
    ctx.rules.style_level(&normalize_style_name(style))
}

/// Outline levels 0..=8 map to heading levels 1..=6; 9 is body text.
pub fn by_outline_level(
    raw: &RawBlock,
    _text: &str,
    _ctx: &ClassificationContext<'_>,
) -> Option<u8> {
    match raw.outline_level? {
        level @ 0..=8 => Some((level + 1).min(6)),
        _ => None,
    }
}

pub fn by_numbering_pattern(
    _raw: &RawBlock,
    text: &str,
    ctx: &ClassificationContext<'_>,
) -> Option<u8> {
    if text.chars().count() >= ctx.rules.heading_length_threshold
        || ends_with_sentence_punctuation(text)
    {
        return None;
    }
    let number = leading_section_number(text)?;
    Some(number.parts.len().min(6) as u8)
}

pub fn by_font_metrics(raw: &RawBlock, text: &str, ctx: &ClassificationContext<'_>) -> Option<u8> {
    if text.chars().count() > ctx.rules.heading_length_threshold || ends_with_period(text) {
        return None;
    }

    let ratio = match (dominant_font_size(&raw.runs), ctx.body_font_size) {
        (Some(size), Some(body)) if body > 0.0 => Some(size / body),
        _ => None,
    };
    let enlarged = ratio.filter(|r| *r > ctx.rules.font_size_ratio);

    match enlarged {
        Some(r) if r >= LEVEL_ONE_RATIO => Some(1),
        Some(r) if r >= LEVEL_TWO_RATIO => Some(2),
        Some(_) => Some(3),
        None if is_fully_bold(&raw.runs) => Some(4),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::ClassifierRules,
        config::EngineConfig,
        models::Run,
    };
    use rstest::rstest;

    fn rules() -> ClassifierRules {
        ClassifierRules::new(&EngineConfig::default())
    }

    fn ctx(rules: &ClassifierRules, body: Option<f64>) -> ClassificationContext<'_> {
        ClassificationContext {
            rules,
            body_font_size: body,
            previous: None,
        }
    }

    #[rstest]
    #[case("Heading 2", Some(2))]
    #[case("heading2", Some(2))]
    #[case("Title", Some(1))]
    #[case("Body Text", None)]
    fn style_rule(#[case] style: &str, #[case] expected: Option<u8>) {
        let r = rules();
        let raw = RawBlock::styled(style, vec![Run::plain("x")]);
        assert_eq!(by_style_name(&raw, "x", &ctx(&r, None)), expected);
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(2, Some(3))]
    #[case(7, Some(6))]
    #[case(8, Some(6))]
    #[case(9, None)]
    fn outline_rule(#[case] outline: u8, #[case] expected: Option<u8>) {
        let r = rules();
        let raw = RawBlock {
            outline_level: Some(outline),
            ..RawBlock::default()
        };
        assert_eq!(by_outline_level(&raw, "", &ctx(&r, None)), expected);
    }

    #[rstest]
    #[case("2.3 Installation", Some(2))]
    #[case("1 Overview", Some(1))]
    #[case("1.2.3.4.5.6.7 Deep", Some(6))]
    #[case("2.3 Installation is described below.", None)]
    #[case("1. Run the installer:", None)]
    fn numbering_rule(#[case] text: &str, #[case] expected: Option<u8>) {
        let r = rules();
        let raw = RawBlock::paragraph(vec![Run::plain(text)]);
        assert_eq!(by_numbering_pattern(&raw, text, &ctx(&r, None)), expected);
    }

    #[test]
    fn numbering_rule_respects_threshold() {
        let r = ClassifierRules::new(&EngineConfig {
            heading_length_threshold: 10,
            ..EngineConfig::default()
        });
        let text = "1.1 Quite a long heading";
        let raw = RawBlock::paragraph(vec![Run::plain(text)]);
        assert_eq!(by_numbering_pattern(&raw, text, &ctx(&r, None)), None);
    }

    #[rstest]
    #[case(22.0, Some(1))]
    #[case(16.0, Some(2))]
    #[case(14.0, Some(3))]
    #[case(11.0, None)]
    fn font_banding(#[case] size: f64, #[case] expected: Option<u8>) {
        let r = rules();
        let raw = RawBlock::paragraph(vec![Run::plain("Setup").with_size(size)]);
        assert_eq!(by_font_metrics(&raw, "Setup", &ctx(&r, Some(11.0))), expected);
    }

    #[test]
    fn bold_body_text_is_level_four() {
        let r = rules();
        let raw = RawBlock::paragraph(vec![Run::bold("Setup").with_size(11.0)]);
        assert_eq!(by_font_metrics(&raw, "Setup", &ctx(&r, Some(11.0))), Some(4));
    }

    #[test]
    fn font_rule_rejects_sentences() {
        let r = rules();
        let raw = RawBlock::paragraph(vec![Run::bold("Done.").with_size(18.0)]);
        assert_eq!(by_font_metrics(&raw, "Done.", &ctx(&r, Some(11.0))), None);
    }

    #[test]
    fn first_match_reports_rule_name() {
        let r = rules();
        let raw = RawBlock {
            style_name: Some("Heading 3".into()),
            outline_level: Some(0),
            runs: vec![Run::plain("Both")],
            ..RawBlock::default()
        };
        assert_eq!(
            first_match(EXPLICIT_RULES, &raw, "Both", &ctx(&r, None)),
            Some(("style", 3))
        );
    }
}
