//! Measurements taken from a block's runs. Pure helpers, no configuration.

use crate::models::{RawBlock, Run};

/// True when every visible run is bold and at least one exists.
pub fn is_fully_bold(runs: &[Run]) -> bool {
    let mut visible = runs.iter().filter(|r| !r.is_blank()).peekable();
    visible.peek().is_some() && visible.all(|r| r.bold)
}

/// Font size covering the most characters. Ties go to the larger size.
pub fn dominant_font_size(runs: &[Run]) -> Option<f64> {
    let mut weights: Vec<(f64, usize)> = Vec::new();
    for run in runs.iter().filter(|r| !r.is_blank()) {
        let Some(size) = run.font_size_pt else {
            continue;
        };
        let chars = run.text.trim().chars().count();
        match weights.iter_mut().find(|(s, _)| *s == size) {
            Some((_, count)) => *count += chars,
            None => weights.push((size, chars)),
        }
    }
    weights
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.total_cmp(&b.0)))
        .map(|(size, _)| size)
}

pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Median dominant font size over the non-table blocks that declare one.
pub fn body_font_size(blocks: &[RawBlock]) -> Option<f64> {
    let mut sizes: Vec<f64> = blocks
        .iter()
        .filter(|b| !b.is_table_row)
        .filter_map(|b| dominant_font_size(&b.runs))
        .collect();
    median(&mut sizes)
}

/// How much of a block is set in a monospace font, counted over visible runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonospaceShare {
    None,
    Minority,
    Majority,
    All,
}

pub fn monospace_share(runs: &[Run]) -> MonospaceShare {
    let visible: Vec<&Run> = runs.iter().filter(|r| !r.is_blank()).collect();
    let mono = visible.iter().filter(|r| r.monospace).count();
    match mono {
        0 => MonospaceShare::None,
        m if m == visible.len() => MonospaceShare::All,
        m if m * 2 > visible.len() => MonospaceShare::Majority,
        _ => MonospaceShare::Minority,
    }
}

/// Ends with `.`, `!`, `?`, `;`, `:` or an ellipsis.
pub fn ends_with_sentence_punctuation(text: &str) -> bool {
    text.trim_end()
        .ends_with(['.', '!', '?', ';', ':', '…'])
}

pub fn ends_with_period(text: &str) -> bool {
    text.trim_end().ends_with(['.', '…'])
}

/// Drops the first `bytes` bytes of the concatenated run text, keeping run formatting.
pub fn drop_text_prefix(runs: &[Run], mut bytes: usize) -> Vec<Run> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        if bytes == 0 {
            out.push(run.clone());
            continue;
        }
        if run.text.len() <= bytes {
            bytes -= run.text.len();
            continue;
        }
        let mut rest = run.clone();
        rest.text = run.text[bytes..].to_string();
        bytes = 0;
        out.push(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bold_requires_visible_text() {
        assert!(!is_fully_bold(&[]));
        assert!(!is_fully_bold(&[Run::plain("  ")]));
        assert!(is_fully_bold(&[Run::bold("Setup"), Run::plain(" ")]));
        assert!(!is_fully_bold(&[Run::bold("Set"), Run::plain("up")]));
    }

    #[test]
    fn dominant_size_weights_by_characters() {
        let runs = vec![
            Run::plain("a").with_size(20.0),
            Run::plain("longer text").with_size(11.0),
        ];
        assert_eq!(dominant_font_size(&runs), Some(11.0));
    }

    #[test]
    fn dominant_size_ignores_unsized_runs() {
        assert_eq!(dominant_font_size(&[Run::plain("text")]), None);
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![11.0], Some(11.0))]
    #[case(vec![14.0, 11.0, 11.0], Some(11.0))]
    #[case(vec![10.0, 12.0], Some(11.0))]
    fn median_cases(#[case] mut values: Vec<f64>, #[case] expected: Option<f64>) {
        assert_eq!(median(&mut values), expected);
    }

    #[test]
    fn monospace_share_levels() {
        assert_eq!(
            monospace_share(&[Run::mono("x = 1")]),
            MonospaceShare::All
        );
        assert_eq!(
            monospace_share(&[Run::mono("a"), Run::mono("b"), Run::plain("c")]),
            MonospaceShare::Majority
        );
        assert_eq!(
            monospace_share(&[Run::plain("run "), Run::mono("ls")]),
            MonospaceShare::Minority
        );
        assert_eq!(monospace_share(&[Run::plain("text")]), MonospaceShare::None);
    }

    #[test]
    fn drop_prefix_spans_runs() {
        let runs = vec![Run::plain("• "), Run::bold("Item"), Run::plain(" one")];
        let rest = drop_text_prefix(&runs, "• ".len());
        assert_eq!(rest, vec![Run::bold("Item"), Run::plain(" one")]);

        let rest = drop_text_prefix(&runs, "• It".len());
        assert_eq!(rest, vec![Run::bold("em"), Run::plain(" one")]);
    }
}
