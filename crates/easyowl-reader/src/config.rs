//! Configuration types for the ontology reader.

use std::time::Duration;

use easyowl::{SynonymType, LABEL_PROPERTY};

/// Configuration for [`OntologyParser`](crate::OntologyParser).
///
/// # Example
///
/// ```rust
/// use easyowl_reader::{CacheConfig, ParserConfig, SimilarityConfig};
/// use easyowl::SynonymType;
///
/// let config = ParserConfig::builder()
///     .with_similarity(SimilarityConfig::default().with_synonym_kinds([SynonymType::Exact]))
///     .with_cache(CacheConfig::default())
///     .with_parallel(true)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Similarity index settings.
    pub similarity: SimilarityConfig,
    /// Similarity result cache (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Score candidates in parallel (requires the `parallel` feature).
    pub parallel: bool,
}

impl ParserConfig {
    /// Creates a new builder for ParserConfig.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for ParserConfig.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    similarity: SimilarityConfig,
    cache: Option<CacheConfig>,
    parallel: bool,
}

impl ParserConfigBuilder {
    /// Replaces the similarity index settings.
    pub fn with_similarity(mut self, similarity: SimilarityConfig) -> Self {
        self.similarity = similarity;
        self
    }

    /// Enables result caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the ParserConfig.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            similarity: self.similarity,
            cache: self.cache,
            parallel: self.parallel,
        }
    }
}

/// Which strings become similarity candidates, and how they are tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Property holding each entity's primary label.
    pub label_property: String,
    /// Synonym kinds indexed next to the label.
    pub synonym_kinds: Vec<SynonymType>,
    /// Shortest token (in characters) kept by the tokenizer.
    pub min_token_len: usize,
}

impl SimilarityConfig {
    /// Restricts which synonym kinds are indexed.
    pub fn with_synonym_kinds(mut self, kinds: impl IntoIterator<Item = SynonymType>) -> Self {
        self.synonym_kinds = kinds.into_iter().collect();
        self
    }

    /// Uses a different property as the primary label.
    pub fn with_label_property(mut self, property: impl Into<String>) -> Self {
        self.label_property = property.into();
        self
    }

    /// Sets the shortest token length kept by the tokenizer.
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len.max(1);
        self
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            label_property: LABEL_PROPERTY.to_string(),
            synonym_kinds: SynonymType::ALL.to_vec(),
            min_token_len: 2,
        }
    }
}

/// Configuration for the similarity result cache.
///
/// # Example
///
/// ```rust
/// use easyowl_reader::CacheConfig;
/// use std::time::Duration;
///
/// let cache = CacheConfig {
///     max_entries: 1_000,
///     ttl: Duration::from_secs(60),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached result lists.
    pub max_entries: usize,
    /// Time-to-live for cached entries.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(300),
        }
    }
}
