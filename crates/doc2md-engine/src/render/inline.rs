//! Run-level formatting: emphasis markers and code spans.

use crate::models::Run;

/// Joins neighbouring runs whose emphasis is identical so markers are not split needlessly.
pub fn merge_runs(runs: &[Run]) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.same_format(run) => last.text.push_str(&run.text),
            _ => merged.push(run.clone()),
        }
    }
    merged
}

/// Renders runs as inline Markdown.
pub fn render_runs(runs: &[Run]) -> String {
    let mut out = String::new();
    for run in merge_runs(runs) {
        write_run(&mut out, &run);
    }
    out
}

fn write_run(out: &mut String, run: &Run) {
    let core = run.text.trim();
    if core.is_empty() || !(run.bold || run.italic || run.monospace) {
        out.push_str(&run.text);
        return;
    }

    // Markers must hug the text, so surrounding whitespace stays outside them.
    let lead = &run.text[..run.text.len() - run.text.trim_start().len()];
    let trail = &run.text[run.text.trim_end().len()..];

    let body = if run.monospace {
        code_span(core)
    } else {
        core.to_string()
    };
    let marker = match (run.bold, run.italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => "",
    };

    out.push_str(lead);
    out.push_str(marker);
    out.push_str(&body);
    out.push_str(marker);
    out.push_str(trail);
}

/// Wraps `text` in enough backticks that none inside can close the span.
pub fn code_span(text: &str) -> String {
    let fence = "`".repeat(longest_backtick_run(text) + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{text}{pad}{fence}")
}

pub fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn plain_text_is_untouched() {
        let runs = vec![Run::plain("Install the package. "), Run::plain("Then *reboot*.")];
        assert_eq!(render_runs(&runs), "Install the package. Then *reboot*.");
    }

    #[rstest]
    #[case(Run::bold("strong"), "**strong**")]
    #[case(Run::italic("soft"), "*soft*")]
    #[case(Run { italic: true, ..Run::bold("both") }, "***both***")]
    #[case(Run::mono("ls -la"), "`ls -la`")]
    #[case(Run { bold: true, ..Run::mono("cfg") }, "**`cfg`**")]
    #[case(Run::bold(" spaced "), " **spaced** ")]
    #[case(Run::bold("   "), "   ")]
    fn single_run(#[case] run: Run, #[case] expected: &str) {
        assert_eq!(render_runs(&[run]), expected);
    }

    #[test]
    fn same_format_runs_merge() {
        let runs = vec![
            Run::plain("Press "),
            Run::bold("Ctrl"),
            Run::bold("+C"),
            Run::plain(" to stop."),
        ];
        assert_eq!(render_runs(&runs), "Press **Ctrl+C** to stop.");
    }

    #[test]
    fn merging_ignores_font_size() {
        let runs = vec![Run::plain("a").with_size(11.0), Run::plain("b").with_size(12.0)];
        assert_eq!(merge_runs(&runs).len(), 1);
    }

    #[rstest]
    #[case("plain", "`plain`")]
    #[case("a`b", "``a`b``")]
    #[case("`tick", "`` `tick ``")]
    #[case("x``y", "```x``y```")]
    fn backtick_safe_spans(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(code_span(text), expected);
    }
}
