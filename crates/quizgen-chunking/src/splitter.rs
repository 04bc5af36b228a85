//! Recursive boundary-aware splitting
//!
//! Partitions text into pieces that each fit the token budget, preferring to
//! break at the most natural boundary available: paragraph breaks first, then
//! line breaks, sentence ends and spaces, down to a character-level split as
//! the guaranteed terminal case. Separators stay attached to the end of the
//! piece they close, so concatenating the pieces reproduces the input
//! byte-for-byte.

use crate::counter::TokenCounterRef;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

/// Recursive splitter producing ordered, budget-sized pieces
pub struct BoundarySplitter {
    counter: TokenCounterRef,
    target_tokens: usize,
    min_piece_tokens: usize,
    separators: Vec<String>,
}

impl BoundarySplitter {
    /// Create a splitter over the given counter and separator cascade
    pub fn new(
        counter: TokenCounterRef,
        target_tokens: usize,
        min_piece_tokens: usize,
        separators: Vec<String>,
    ) -> Self {
        Self {
            counter,
            target_tokens,
            min_piece_tokens,
            separators,
        }
    }

    /// Split `text` into pieces of at most `target_tokens` each.
    ///
    /// Empty input yields an empty piece list. A single grapheme whose token
    /// count exceeds the target cannot be split further and is passed through
    /// oversized.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let pieces = self.split_with(text, &self.separators);
        self.merge_small(pieces)
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        if self.counter.count(text) <= self.target_tokens {
            return vec![text.to_string()];
        }

        let Some((separator, rest)) = separators.split_first() else {
            return self.split_by_length(text);
        };
        if separator.is_empty() {
            return self.split_by_length(text);
        }

        let parts = split_keeping_separator(text, separator);
        if parts.len() <= 1 {
            // Separator absent; move down the cascade.
            return self.split_with(text, rest);
        }

        let mut pieces = Vec::new();
        for part in parts {
            if self.counter.count(&part) <= self.target_tokens {
                pieces.push(part);
            } else {
                pieces.extend(self.split_with(&part, rest));
            }
        }
        pieces
    }

    /// Terminal case: bisect at grapheme boundaries until the budget holds.
    fn split_by_length(&self, text: &str) -> Vec<String> {
        let tokens = self.counter.count(text);
        if tokens <= self.target_tokens {
            return vec![text.to_string()];
        }

        let boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        if boundaries.len() <= 1 {
            warn!(
                tokens,
                target = self.target_tokens,
                "unsplittable text exceeds the target size, emitting oversized piece"
            );
            return vec![text.to_string()];
        }

        let mid = boundaries
            .get(boundaries.len() / 2)
            .copied()
            .unwrap_or(text.len());
        let (left, right) = text.split_at(mid);
        let mut pieces = self.split_by_length(left);
        pieces.extend(self.split_by_length(right));
        pieces
    }

    /// Fold pieces below the minimum size into a neighbor where the combined
    /// piece still fits the target. Trailing fragments that cannot be merged
    /// stay as they are.
    fn merge_small(&self, pieces: Vec<String>) -> Vec<String> {
        let mut merged: Vec<String> = Vec::new();
        for piece in pieces {
            if let Some(last) = merged.last_mut() {
                let last_tokens = self.counter.count(last);
                let piece_tokens = self.counter.count(&piece);
                let either_small =
                    last_tokens < self.min_piece_tokens || piece_tokens < self.min_piece_tokens;
                if either_small && last_tokens + piece_tokens <= self.target_tokens {
                    last.push_str(&piece);
                    continue;
                }
            }
            merged.push(piece);
        }
        merged
    }
}

/// Split on every occurrence of `separator`, keeping the separator attached
/// to the end of the preceding part so concatenation is lossless.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some(found) = rest.find(separator) {
        let end = found + separator.len();
        parts.push(rest.get(..end).unwrap_or(rest).to_string());
        rest = rest.get(end..).unwrap_or("");
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::TokenCounter;
    use std::sync::Arc;

    /// One token per char, deterministic for tests
    struct CharCounter;

    impl TokenCounter for CharCounter {
        fn name(&self) -> &str {
            "char-counter"
        }

        fn max_tokens(&self) -> usize {
            usize::MAX
        }

        fn count(&self, text: &str) -> usize {
            text.chars().count()
        }

        fn is_exact(&self) -> bool {
            true
        }
    }

    fn splitter(target: usize, min: usize) -> BoundarySplitter {
        let separators = ["\n\n", "\n", ". ", " ", ""]
            .iter()
            .map(ToString::to_string)
            .collect();
        BoundarySplitter::new(Arc::new(CharCounter), target, min, separators)
    }

    #[test]
    fn separator_stays_attached_to_the_preceding_part() {
        let parts = split_keeping_separator("one two three", " ");
        assert_eq!(parts, vec!["one ", "two ", "three"]);
        assert_eq!(parts.concat(), "one two three");
    }

    #[test]
    fn trailing_separator_does_not_create_an_empty_part() {
        let parts = split_keeping_separator("one two ", " ");
        assert_eq!(parts, vec!["one ", "two "]);
    }

    #[test]
    fn empty_text_splits_to_nothing() {
        assert!(splitter(10, 0).split("").is_empty());
    }

    #[test]
    fn text_within_budget_is_one_piece() {
        let pieces = splitter(50, 0).split("short text");
        assert_eq!(pieces, vec!["short text"]);
    }

    #[test]
    fn paragraphs_are_preferred_over_smaller_boundaries() {
        let text = "first paragraph here\n\nsecond paragraph here";
        let pieces = splitter(25, 0).split(text);
        assert_eq!(pieces, vec!["first paragraph here\n\n", "second paragraph here"]);
    }

    #[test]
    fn oversized_paragraphs_recurse_into_sentences() {
        let text = "First sentence is long. Second sentence is long. Third one.";
        let pieces = splitter(30, 0).split(text);
        assert!(pieces.len() >= 2);
        for piece in &pieces {
            assert!(piece.chars().count() <= 30, "piece over budget: {piece:?}");
        }
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn separator_free_text_falls_through_to_length_split() {
        let text = "x".repeat(100);
        let pieces = splitter(30, 0).split(&text);
        for piece in &pieces {
            assert!(piece.chars().count() <= 30);
        }
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn small_fragments_merge_into_neighbors() {
        let text = "one two three four";
        // Words are 4 tokens or less; min 10 forces merges up to the target.
        let pieces = splitter(14, 10).split(text);
        assert_eq!(pieces, vec!["one two three ", "four"]);
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn merge_respects_the_target_budget() {
        let text = "aaaa bbbb cccc";
        let pieces = splitter(10, 10).split(text);
        for piece in &pieces {
            assert!(piece.chars().count() <= 10);
        }
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn lossless_across_mixed_boundaries() {
        let text = "Intro line.\nMore text here. And more.\n\nSecond paragraph with words. Final.";
        let pieces = splitter(20, 0).split(text);
        assert_eq!(pieces.concat(), text);
    }
}
