//! Text normalization applied once before splitting
//!
//! Extraction output (PDF text especially) is full of stray tabs, trailing
//! spaces and runs of blank lines. The separator cascade and the lossless
//! round-trip guarantee are both defined relative to the cleaned text this
//! module produces. Paragraph breaks are preserved, not collapsed, because
//! the splitter prefers them over every other boundary.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)] // patterns are fixed at compile time
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static HORIZONTAL_RUNS: Lazy<Regex> = Lazy::new(|| pattern(r"[ \t]+"));
static LINE_EDGES: Lazy<Regex> = Lazy::new(|| pattern(r" ?\r?\n ?"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| pattern(r"\n{3,}"));

/// Normalize whitespace: collapse runs of spaces and tabs, trim line edges,
/// and squeeze 3+ newlines down to a single paragraph break.
pub fn clean_text(text: &str) -> String {
    let text = HORIZONTAL_RUNS.replace_all(text, " ");
    let text = LINE_EDGES.replace_all(&text, "\n");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_spaces_and_tabs() {
        assert_eq!(clean_text("a  b\t\tc"), "a b c");
    }

    #[test]
    fn preserves_single_newlines_and_paragraph_breaks() {
        assert_eq!(clean_text("line one\nline two"), "line one\nline two");
        assert_eq!(clean_text("para one\n\npara two"), "para one\n\npara two");
    }

    #[test]
    fn squeezes_blank_line_runs_to_one_paragraph_break() {
        assert_eq!(clean_text("para one\n\n\n\npara two"), "para one\n\npara two");
    }

    #[test]
    fn trims_line_edges_and_document_ends() {
        assert_eq!(clean_text("  spaced \n  indented  "), "spaced\nindented");
    }

    #[test]
    fn handles_windows_line_endings() {
        assert_eq!(clean_text("one\r\ntwo"), "one\ntwo");
    }

    #[test]
    fn whitespace_only_input_cleans_to_empty() {
        assert_eq!(clean_text("   \n\t \n "), "");
    }

    #[test]
    fn already_clean_text_is_unchanged() {
        let text = "First sentence. Second sentence.\n\nNext paragraph.";
        assert_eq!(clean_text(text), text);
    }
}
