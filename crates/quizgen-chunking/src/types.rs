//! Chunk data model shared by the splitter, assembler, validator and store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied key/value pairs copied onto every chunk of a document
pub type ChunkMetadata = serde_json::Map<String, serde_json::Value>;

/// A contiguous slice of document text sized for downstream retrieval.
///
/// Consecutive chunks may share text: `overlap_with_previous` records how
/// many leading chars of `text` were carried over from the previous chunk,
/// so [`Chunk::new_content`] can strip the overlap and reconstruct the
/// source document losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based, contiguous position in emission order
    pub chunk_id: usize,

    /// The chunk text, including any carried-over prefix
    pub text: String,

    /// Characters in `text`
    pub char_count: usize,

    /// Tokens in `text`, measured by the counter that produced the chunk
    pub token_count: usize,

    /// Chars of `text` shared with the tail of the previous chunk (0 for the
    /// first chunk and for chunk sets built without overlap)
    pub overlap_with_previous: usize,

    /// Caller-supplied metadata
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// The part of `text` not carried over from the previous chunk.
    pub fn new_content(&self) -> &str {
        if self.overlap_with_previous == 0 {
            return &self.text;
        }
        self.text
            .char_indices()
            .nth(self.overlap_with_previous)
            .and_then(|(idx, _)| self.text.get(idx..))
            .unwrap_or("")
    }

    /// Short display preview, cut at a sentence boundary when one lands in
    /// the final 30% of the window.
    pub fn preview(&self, max_len: usize) -> String {
        if self.text.chars().count() <= max_len {
            return self.text.clone();
        }
        let cut: String = self.text.chars().take(max_len).collect();
        match cut.rfind('.') {
            Some(idx) if idx.saturating_mul(10) >= cut.len().saturating_mul(7) => {
                cut.get(..=idx).unwrap_or(&cut).to_string()
            }
            _ => format!("{cut}..."),
        }
    }
}

/// A document's chunks plus derived statistics, as stored and returned to
/// upload-handler callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSet {
    /// Ordered chunks
    pub chunks: Vec<Chunk>,

    /// Aggregate statistics over `chunks`
    pub stats: ChunkStats,

    /// When this set was produced
    pub created_at: DateTime<Utc>,
}

impl ChunkSet {
    /// Bundle chunks with freshly computed statistics
    pub fn new(chunks: Vec<Chunk>) -> Self {
        let stats = ChunkStats::from_chunks(&chunks);
        Self {
            chunks,
            stats,
            created_at: Utc::now(),
        }
    }
}

/// Aggregate statistics for a chunk set. Pure derivation, no side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub total_chunks: usize,
    pub total_tokens: usize,
    pub total_chars: usize,
    pub avg_tokens_per_chunk: f64,
    pub avg_chars_per_chunk: f64,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl ChunkStats {
    /// Aggregate over a chunk slice; an empty slice yields all-zero stats.
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        if chunks.is_empty() {
            return Self {
                total_chunks: 0,
                total_tokens: 0,
                total_chars: 0,
                avg_tokens_per_chunk: 0.0,
                avg_chars_per_chunk: 0.0,
                min_tokens: 0,
                max_tokens: 0,
            };
        }

        let total_tokens: usize = chunks.iter().map(|c| c.token_count).sum();
        let total_chars: usize = chunks.iter().map(|c| c.char_count).sum();
        let count = chunks.len();

        Self {
            total_chunks: count,
            total_tokens,
            total_chars,
            avg_tokens_per_chunk: round2(total_tokens as f64 / count as f64),
            avg_chars_per_chunk: round2(total_chars as f64 / count as f64),
            min_tokens: chunks.iter().map(|c| c.token_count).min().unwrap_or(0),
            max_tokens: chunks.iter().map(|c| c.token_count).max().unwrap_or(0),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: usize, text: &str, tokens: usize, overlap: usize) -> Chunk {
        Chunk {
            chunk_id: id,
            text: text.to_string(),
            char_count: text.chars().count(),
            token_count: tokens,
            overlap_with_previous: overlap,
            metadata: ChunkMetadata::new(),
        }
    }

    #[test]
    fn new_content_strips_the_carried_prefix() {
        let c = chunk(1, "tail head", 2, 5);
        assert_eq!(c.new_content(), "head");

        let first = chunk(0, "tail head", 2, 0);
        assert_eq!(first.new_content(), "tail head");
    }

    #[test]
    fn new_content_of_pure_overlap_chunk_is_empty() {
        let c = chunk(1, "tail", 1, 4);
        assert_eq!(c.new_content(), "");
    }

    #[test]
    fn stats_on_reference_sizes() {
        let chunks = vec![
            chunk(0, "a", 500, 0),
            chunk(1, "b", 480, 0),
            chunk(2, "c", 230, 0),
        ];
        let stats = ChunkStats::from_chunks(&chunks);
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.total_tokens, 1210);
        assert!((stats.avg_tokens_per_chunk - 403.33).abs() < f64::EPSILON);
        assert_eq!(stats.min_tokens, 230);
        assert_eq!(stats.max_tokens, 500);
    }

    #[test]
    fn stats_on_empty_set_are_zeroed() {
        let stats = ChunkStats::from_chunks(&[]);
        assert_eq!(stats.total_chunks, 0);
        assert_eq!(stats.total_tokens, 0);
        assert!((stats.avg_tokens_per_chunk - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_text_previews_unchanged() {
        let c = chunk(0, "short text", 2, 0);
        assert_eq!(c.preview(100), "short text");
    }

    #[test]
    fn long_preview_prefers_a_sentence_boundary() {
        let text = "This is the first sentence. This is the second one that runs long";
        let c = chunk(0, text, 15, 0);
        let preview = c.preview(30);
        assert_eq!(preview, "This is the first sentence.");
    }

    #[test]
    fn preview_without_late_period_gets_an_ellipsis() {
        let text = "word ".repeat(40);
        let c = chunk(0, &text, 40, 0);
        let preview = c.preview(20);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 23);
    }

    #[test]
    fn chunk_serializes_with_metadata() {
        let mut metadata = ChunkMetadata::new();
        metadata.insert("filename".to_string(), "notes.txt".into());
        let c = Chunk {
            metadata,
            ..chunk(0, "hello", 1, 0)
        };
        let json = serde_json::to_value(&c).expect("chunk serializes");
        assert_eq!(json["chunk_id"], 0);
        assert_eq!(json["metadata"]["filename"], "notes.txt");
    }
}
