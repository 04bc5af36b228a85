//! Heuristic token counter for when no tokenizer is available
//!
//! Estimates counts from character classes: roughly 4 word characters per
//! token for English text, with punctuation and non-ASCII symbols tending to
//! become tokens of their own. Counts are flagged as estimates so callers
//! can tell them apart from tokenizer output.

use super::traits::TokenCounter;

/// Fast character-ratio token estimator
pub struct HeuristicCounter {
    name: String,
    max_tokens: usize,
    /// Word characters per token (default: 4.0)
    chars_per_token: f64,
}

impl HeuristicCounter {
    /// Create a new heuristic counter with the default 4.0 ratio
    pub fn new(name: &str, max_tokens: usize) -> Self {
        Self {
            name: name.to_string(),
            max_tokens,
            chars_per_token: 4.0,
        }
    }

    /// Create with a custom chars-per-token ratio
    pub fn with_ratio(name: &str, max_tokens: usize, chars_per_token: f64) -> Self {
        Self {
            name: name.to_string(),
            max_tokens,
            chars_per_token,
        }
    }

    /// Recompute the ratio from sample texts with known token counts
    pub fn calibrate(&mut self, samples: &[(&str, usize)]) {
        let total_chars: usize = samples.iter().map(|(text, _)| text.len()).sum();
        let total_tokens: usize = samples.iter().map(|(_, tokens)| *tokens).sum();

        if total_tokens > 0 {
            self.chars_per_token = total_chars as f64 / total_tokens as f64;
        }
    }

    /// The current chars-per-token ratio
    pub fn ratio(&self) -> f64 {
        self.chars_per_token
    }

    fn estimate_tokens(&self, text: &str) -> usize {
        let mut word_chars = 0usize;
        let mut whitespace = 0usize;
        let mut punctuation = 0usize;
        let mut other = 0usize;

        for ch in text.chars() {
            if ch.is_alphabetic() || ch.is_numeric() {
                word_chars += 1;
            } else if ch.is_whitespace() {
                whitespace += 1;
            } else if ch.is_ascii_punctuation() {
                punctuation += 1;
            } else {
                other += 1;
            }
        }

        // Word characters amortize over the ratio; punctuation and symbols
        // mostly become their own tokens; a sliver of whitespace does too.
        let estimated = (word_chars as f64 / self.chars_per_token)
            + (punctuation as f64 * 0.8)
            + (other as f64 * 0.9)
            + (whitespace as f64 * 0.1);

        estimated.ceil() as usize
    }
}

impl TokenCounter for HeuristicCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.estimate_tokens(text)
    }

    fn is_exact(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratio_is_four_chars_per_token() {
        let counter = HeuristicCounter::new("test-heuristic", 4096);
        assert_eq!(counter.name(), "test-heuristic");
        assert_eq!(counter.max_tokens(), 4096);
        assert!((counter.ratio() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_text_counts_zero() {
        let counter = HeuristicCounter::new("test", 4096);
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn counts_are_flagged_as_estimates() {
        let counter = HeuristicCounter::new("test", 4096);
        let measured = counter.measure("Hello world");
        assert!(!measured.exact);
        assert!(measured.tokens > 0);
    }

    #[test]
    fn estimates_land_in_a_plausible_range() {
        let counter = HeuristicCounter::new("test", 4096);

        let count = counter.count("Hello world");
        assert!((2..=4).contains(&count), "Expected 2-4 tokens, got {count}");

        let long_text = "The quick brown fox jumps over the lazy dog";
        let count = counter.count(long_text);
        assert!(
            (8..=14).contains(&count),
            "Expected 8-14 tokens, got {count}"
        );
    }

    #[test]
    fn punctuation_increases_the_estimate() {
        let counter = HeuristicCounter::new("test", 4096);

        let count_with = counter.count("Hello, world! How are you?");
        let count_without = counter.count("Hello world How are you");

        assert!(
            count_with > count_without,
            "Punctuation should increase token count: {count_with} vs {count_without}"
        );
    }

    #[test]
    fn calibration_adjusts_the_ratio() {
        let mut counter = HeuristicCounter::new("test", 4096);

        // 35 chars over 7 tokens -> ratio 5.0
        counter.calibrate(&[("Hello", 1), ("Hello world", 2), ("The quick brown fox", 4)]);
        assert!((counter.ratio() - 5.0).abs() < 0.01);
    }

    #[test]
    fn emoji_count_as_tokens() {
        let counter = HeuristicCounter::new("test", 4096);
        let count = counter.count("Hello 👋 World 🌍");
        assert!(count >= 4, "Emojis should increase token count");
    }
}
