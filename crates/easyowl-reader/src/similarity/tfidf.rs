//! Tokenization and TF-IDF weighting.
//!
//! Weights follow the common smoothed formulation: raw term counts times
//! `ln((1 + n) / (1 + df)) + 1`, then L2 normalization, so the cosine of two
//! vectors is their dot product.

use std::collections::HashMap;

/// Splits text into lowercase word tokens of at least `min_len` characters.
///
/// Word characters are alphanumerics and `_`; everything else separates.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= min_len)
        .map(str::to_lowercase)
        .collect()
}

/// An L2-normalized sparse vector, sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Returns `true` if every weight is zero.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero weights.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cosine similarity with another normalized vector, clamped to `[0, 1]`.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot.clamp(0.0, 1.0)
    }
}

/// Term ids and inverse document frequencies learned from a corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Learns the vocabulary from tokenized documents.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut terms: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for tokens in documents {
            let mut seen_in_doc: Vec<usize> = Vec::with_capacity(tokens.len());
            for token in tokens {
                let next_id = terms.len();
                let id = *terms.entry(token.clone()).or_insert(next_id);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                if !seen_in_doc.contains(&id) {
                    seen_in_doc.push(id);
                    doc_freq[id] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { terms, idf }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if no term was learned.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Inverse document frequency of a term, if known.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|&id| self.idf[id])
    }

    /// Embeds tokens into the learned space.
    ///
    /// Tokens outside the vocabulary contribute nothing; if none is known
    /// the result is empty.
    pub fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.terms.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }
        for (_, weight) in &mut entries {
            *weight /= norm;
        }
        SparseVector { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts.iter().map(|t| tokenize(t, 2)).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Heart Disease", 2), vec!["heart", "disease"]);
        assert_eq!(
            tokenize("type-2 diabetes (T2DM), a", 2),
            vec!["type", "diabetes", "t2dm"]
        );
        assert_eq!(tokenize("a b", 1), vec!["a", "b"]);
        assert!(tokenize("  ", 2).is_empty());
    }

    #[test]
    fn test_idf_is_smoothed() {
        let vocabulary = Vocabulary::fit(&docs(&["heart disease", "disease"]));
        assert_eq!(vocabulary.len(), 2);
        // disease appears in both documents: ln(3/3) + 1
        assert!((vocabulary.idf("disease").unwrap() - 1.0).abs() < 1e-12);
        // heart appears in one: ln(3/2) + 1
        assert!((vocabulary.idf("heart").unwrap() - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(vocabulary.idf("lung"), None);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let corpus = docs(&["heart disease", "disease", "lung disease"]);
        let vocabulary = Vocabulary::fit(&corpus);
        let a = vocabulary.vectorize(&corpus[0]);
        let b = vocabulary.vectorize(&tokenize("HEART  disease", 2));
        assert!((a.cosine(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_scores_between() {
        let corpus = docs(&["heart disease", "disease", "lung disease"]);
        let vocabulary = Vocabulary::fit(&corpus);
        let query = vocabulary.vectorize(&tokenize("heart disease", 2));
        let score = vocabulary.vectorize(&corpus[1]).cosine(&query);
        assert!(score > 0.0 && score < 1.0);
        let disjoint = vocabulary.vectorize(&tokenize("lung", 2));
        assert_eq!(disjoint.cosine(&vocabulary.vectorize(&corpus[1])), 0.0);
    }

    #[test]
    fn test_out_of_vocabulary_query_is_empty() {
        let vocabulary = Vocabulary::fit(&docs(&["heart disease"]));
        let vector = vocabulary.vectorize(&tokenize("kidney stone", 2));
        assert!(vector.is_empty());
        assert_eq!(vector.len(), 0);
    }

    #[test]
    fn test_empty_corpus() {
        let vocabulary = Vocabulary::fit(&[]);
        assert!(vocabulary.is_empty());
        assert!(vocabulary.vectorize(&tokenize("anything", 2)).is_empty());
    }
}
