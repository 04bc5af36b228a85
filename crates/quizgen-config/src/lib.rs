//! Centralized configuration management for quizgen
//!
//! One source of truth for every tunable in the workspace, following a simple
//! hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides (`QUIZGEN_*`)
//! 3. Runtime validation via the [`Validate`] trait
//!
//! Invalid configuration is rejected before any work starts, so the chunking
//! engine never sees an overlap that exceeds its target size.

pub mod error;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use validation::Validate;

// =============================================================================
// SAFE DEFAULTS - Work for any environment (dev, staging, prod, test)
// =============================================================================

// Chunking
const DEFAULT_CHUNK_TARGET_TOKENS: usize = 500;
const DEFAULT_CHUNK_OVERLAP_TOKENS: usize = 100;
const DEFAULT_MIN_PIECE_TOKENS: usize = 10;
const DEFAULT_TOKEN_ENCODING: &str = "cl100k_base";
const DEFAULT_MAX_SMALL_FRACTION: f64 = 0.5;
const DEFAULT_MAX_SIZE_FACTOR: f64 = 1.5;

// Chunk store
const DEFAULT_STORE_CAPACITY: usize = 128;
const DEFAULT_STORE_TTL_SECONDS: u64 = 3600;

// Telemetry
const DEFAULT_TRACING_LEVEL: &str = "info";

/// Separator cascade tried from most to least natural. The trailing empty
/// string is the character-level terminal case and must stay last.
fn default_separators() -> Vec<String> {
    ["\n\n", "\n", ". ", " ", ""]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Core configuration for the whole quizgen backend
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApplicationConfig {
    /// Chunking engine configuration
    pub chunking: ChunkingConfig,

    /// Chunk store configuration
    pub store: StoreConfig,

    /// Telemetry configuration
    pub telemetry: TelemetryConfig,
}

impl ApplicationConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self {
            chunking: ChunkingConfig::from_env(),
            store: StoreConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Bootstrap `.env` overrides, then load from the environment
    pub fn load() -> Self {
        quizgen_common::initialize_environment();
        Self::from_env()
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.chunking.validate()?;
        self.store.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

/// Chunking engine configuration
///
/// `target_tokens` bounds every emitted chunk; `overlap_tokens` is the amount
/// of trailing context carried into the next chunk and must stay strictly
/// below the target or the assembler cannot make progress.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    pub target_tokens: usize,

    /// Tokens of trailing context shared between consecutive chunks
    pub overlap_tokens: usize,

    /// Pieces below this size get merged into a neighbor where possible
    pub min_piece_tokens: usize,

    /// Tokenizer encoding name (`cl100k_base`, `o200k_base`, ...); unknown
    /// names fall back to a character-ratio estimate
    pub encoding: String,

    /// Split-point cascade, most preferred first, empty string last
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,

    /// Validation fails when more than this fraction of chunks is undersized
    pub max_small_fraction: f64,

    /// Validation fails when a chunk exceeds `target_tokens * max_size_factor`
    pub max_size_factor: f64,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_tokens: DEFAULT_CHUNK_TARGET_TOKENS,
            overlap_tokens: DEFAULT_CHUNK_OVERLAP_TOKENS,
            min_piece_tokens: DEFAULT_MIN_PIECE_TOKENS,
            encoding: DEFAULT_TOKEN_ENCODING.to_string(),
            separators: default_separators(),
            max_small_fraction: DEFAULT_MAX_SMALL_FRACTION,
            max_size_factor: DEFAULT_MAX_SIZE_FACTOR,
        }
    }
}

impl ChunkingConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_tokens: env_parse("QUIZGEN_CHUNKING_TARGET_TOKENS")
                .unwrap_or(defaults.target_tokens),
            overlap_tokens: env_parse("QUIZGEN_CHUNKING_OVERLAP_TOKENS")
                .unwrap_or(defaults.overlap_tokens),
            min_piece_tokens: env_parse("QUIZGEN_CHUNKING_MIN_PIECE_TOKENS")
                .unwrap_or(defaults.min_piece_tokens),
            encoding: std::env::var("QUIZGEN_CHUNKING_ENCODING").unwrap_or(defaults.encoding),
            separators: defaults.separators,
            max_small_fraction: env_parse("QUIZGEN_CHUNKING_MAX_SMALL_FRACTION")
                .unwrap_or(defaults.max_small_fraction),
            max_size_factor: env_parse("QUIZGEN_CHUNKING_MAX_SIZE_FACTOR")
                .unwrap_or(defaults.max_size_factor),
        }
    }

    /// Default configuration with custom chunk and overlap sizes
    pub fn with_sizes(target_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            target_tokens,
            overlap_tokens,
            ..Self::default()
        }
    }
}

impl Validate for ChunkingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_range(self.target_tokens as u64, 1, 100_000, "target_tokens")?;

        if self.overlap_tokens >= self.target_tokens {
            return Err(ConfigError::generic(format!(
                "overlap_tokens ({}) must be strictly below target_tokens ({})",
                self.overlap_tokens, self.target_tokens
            )));
        }

        validation::validate_range(
            self.min_piece_tokens as u64,
            0,
            self.target_tokens as u64,
            "min_piece_tokens",
        )?;
        validation::validate_non_empty(&self.encoding, "encoding")?;

        match self.separators.split_last() {
            None => {
                return Err(ConfigError::generic("separator list must not be empty"));
            }
            Some((last, rest)) => {
                if !last.is_empty() {
                    return Err(ConfigError::generic(
                        "separator list must end with the empty string",
                    ));
                }
                if rest.iter().any(String::is_empty) {
                    return Err(ConfigError::generic(
                        "only the final separator may be the empty string",
                    ));
                }
            }
        }

        validation::validate_fraction(self.max_small_fraction, "max_small_fraction")?;
        if self.max_size_factor < 1.0 {
            return Err(ConfigError::generic(format!(
                "max_size_factor ({}) must be at least 1.0",
                self.max_size_factor
            )));
        }

        Ok(())
    }
}

/// Chunk store configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoreConfig {
    /// Maximum number of chunk sets held at once (least recently used wins)
    pub capacity: usize,

    /// Seconds a stored chunk set stays readable
    pub ttl_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STORE_CAPACITY,
            ttl_seconds: DEFAULT_STORE_TTL_SECONDS,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_parse("QUIZGEN_STORE_CAPACITY").unwrap_or(defaults.capacity),
            ttl_seconds: env_parse("QUIZGEN_STORE_TTL_SECONDS").unwrap_or(defaults.ttl_seconds),
        }
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_range(self.capacity as u64, 1, 100_000, "capacity")?;
        validation::validate_range(self.ttl_seconds, 1, 86_400 * 30, "ttl_seconds")?;
        Ok(())
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetryConfig {
    /// Tracing level (trace, debug, info, warn, error)
    pub tracing_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self {
            tracing_level: std::env::var("QUIZGEN_TRACING_LEVEL")
                .unwrap_or_else(|_| DEFAULT_TRACING_LEVEL.to_string()),
        }
    }
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.tracing_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::generic(format!(
                "Invalid tracing level: {}",
                self.tracing_level
            ))),
        }
    }
}
