//! Overlapping chunk assembly
//!
//! Walks the splitter's pieces in order, packing them into chunks of at most
//! the target size. Closing a chunk seeds the next one with the trailing
//! `overlap_tokens` worth of pieces, so context survives the boundary. Seeds
//! are cut at piece boundaries when possible; when the final piece alone
//! exceeds the overlap budget, a character-level tail of it is carried
//! instead.

use crate::counter::TokenCounterRef;
use crate::types::{Chunk, ChunkMetadata};
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

/// Assembles ordered pieces into overlapping, budget-sized chunks
pub struct OverlapAssembler {
    counter: TokenCounterRef,
    target_tokens: usize,
    overlap_tokens: usize,
}

impl OverlapAssembler {
    /// Create an assembler for the given budget
    pub fn new(counter: TokenCounterRef, target_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            counter,
            target_tokens,
            overlap_tokens,
        }
    }

    /// Pack pieces into chunks, attaching `metadata` to each.
    ///
    /// Chunk ids are assigned 0-based in emission order. The final chunk may
    /// be shorter than the target; a document that fits in one chunk carries
    /// no overlap at all.
    pub fn assemble(&self, pieces: Vec<String>, metadata: &ChunkMetadata) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = Vec::new();
        // Pieces accumulated for the chunk being built; the first
        // `carried_chars` chars of it were copied from the previous chunk.
        let mut buffer: Vec<String> = Vec::new();
        let mut buffer_tokens = 0usize;
        let mut carried_chars = 0usize;

        for piece in pieces {
            let piece_tokens = self.counter.count(&piece);

            if piece_tokens > self.target_tokens {
                // Unbreakable piece over the budget: it becomes a chunk of
                // its own rather than being corrupted.
                if has_new_content(&buffer, carried_chars) {
                    // Flush what was accumulated; its seed is discarded so
                    // the oversized chunk stands alone.
                    self.close_chunk(&mut chunks, &buffer, carried_chars, metadata);
                }
                warn!(
                    tokens = piece_tokens,
                    target = self.target_tokens,
                    "piece exceeds the target size, emitting oversized chunk"
                );
                let oversized = vec![piece];
                let seed = self.close_chunk(&mut chunks, &oversized, 0, metadata);
                carried_chars = char_len(&seed);
                buffer_tokens = self.token_sum(&seed);
                buffer = seed;
                continue;
            }

            if !buffer.is_empty() && buffer_tokens + piece_tokens > self.target_tokens {
                let seed = self.close_chunk(&mut chunks, &buffer, carried_chars, metadata);
                carried_chars = char_len(&seed);
                buffer_tokens = self.token_sum(&seed);
                buffer = seed;

                // Shed carried pieces from the front until the incoming
                // piece fits the budget again.
                while !buffer.is_empty() && buffer_tokens + piece_tokens > self.target_tokens {
                    let dropped = buffer.remove(0);
                    buffer_tokens = buffer_tokens.saturating_sub(self.counter.count(&dropped));
                    carried_chars = carried_chars.saturating_sub(dropped.chars().count());
                }
            }

            buffer_tokens += piece_tokens;
            buffer.push(piece);
        }

        if has_new_content(&buffer, carried_chars) {
            self.close_chunk(&mut chunks, &buffer, carried_chars, metadata);
        }

        chunks
    }

    /// Emit the buffered pieces as a chunk and return the overlap seed for
    /// the next one.
    fn close_chunk(
        &self,
        chunks: &mut Vec<Chunk>,
        buffer: &[String],
        carried_chars: usize,
        metadata: &ChunkMetadata,
    ) -> Vec<String> {
        let text = buffer.concat();
        let chunk = Chunk {
            chunk_id: chunks.len(),
            char_count: text.chars().count(),
            token_count: self.counter.count(&text),
            overlap_with_previous: carried_chars,
            metadata: metadata.clone(),
            text,
        };
        debug!(
            chunk_id = chunk.chunk_id,
            tokens = chunk.token_count,
            "chunk closed"
        );
        chunks.push(chunk);

        self.carry_over(buffer)
    }

    /// Trailing pieces worth at most `overlap_tokens`, oldest first.
    fn carry_over(&self, pieces: &[String]) -> Vec<String> {
        if self.overlap_tokens == 0 {
            return Vec::new();
        }

        let mut seed: Vec<String> = Vec::new();
        let mut seed_tokens = 0usize;
        for piece in pieces.iter().rev() {
            let piece_tokens = self.counter.count(piece);
            if seed_tokens + piece_tokens > self.overlap_tokens {
                break;
            }
            seed.push(piece.clone());
            seed_tokens += piece_tokens;
        }
        seed.reverse();

        if seed.is_empty() {
            // No whole piece fits the overlap budget; carve a tail off the
            // last one at a grapheme boundary.
            if let Some(last) = pieces.last() {
                let tail = self.token_tail(last);
                if !tail.is_empty() {
                    seed.push(tail);
                }
            }
        }
        seed
    }

    /// Longest suffix of `text` within the overlap budget.
    fn token_tail(&self, text: &str) -> String {
        let boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();

        let suffix_fits = |grapheme_idx: usize| {
            let start = boundaries.get(grapheme_idx).copied().unwrap_or(text.len());
            let suffix = text.get(start..).unwrap_or("");
            self.counter.count(suffix) <= self.overlap_tokens
        };

        // Binary search for the first boundary whose suffix fits.
        let mut lo = 0usize;
        let mut hi = boundaries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if suffix_fits(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let start = boundaries.get(hi).copied().unwrap_or(text.len());
        text.get(start..).unwrap_or("").to_string()
    }

    fn token_sum(&self, pieces: &[String]) -> usize {
        pieces.iter().map(|p| self.counter.count(p)).sum()
    }
}

fn char_len(pieces: &[String]) -> usize {
    pieces.iter().map(|p| p.chars().count()).sum()
}

/// Whether the buffer holds anything beyond the carried-over prefix.
fn has_new_content(buffer: &[String], carried_chars: usize) -> bool {
    !buffer.is_empty() && char_len(buffer) > carried_chars
}
