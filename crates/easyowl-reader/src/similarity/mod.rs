//! Lexical similarity search over entity labels and synonyms.
//!
//! Every label and configured synonym becomes one candidate document. Candidate
//! rows remember the entity they came from, so a query is scored against all
//! candidates and collapsed back to one result per entity.

mod tfidf;

pub use tfidf::{tokenize, SparseVector, Vocabulary};

use std::cmp::Ordering;
use std::collections::HashSet;

use easyowl::EntityMap;
use tracing::debug;

use crate::config::SimilarityConfig;

/// One entity matched by a similarity query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarMatch {
    /// Identifier of the matched entity.
    pub identifier: String,
    /// The label or synonym that scored best.
    pub matched_label: String,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}

#[derive(Debug, Clone)]
struct Candidate {
    /// Position of the owning entity in the entity map.
    entity: usize,
    text: String,
    vector: SparseVector,
}

/// TF-IDF index over every candidate string of an entity map.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    candidates: Vec<Candidate>,
    entity_ids: Vec<String>,
    vocabulary: Vocabulary,
    texts: HashSet<String>,
    min_token_len: usize,
}

impl SimilarityIndex {
    /// Builds the index from the entities' labels and synonyms.
    ///
    /// Entities without a label still contribute their synonyms.
    pub fn build(entities: &EntityMap, config: &SimilarityConfig) -> Self {
        let mut owners: Vec<(usize, String)> = Vec::new();
        for (position, entity) in entities.iter().enumerate() {
            if let Some(label) = entity.property(&config.label_property) {
                owners.push((position, label.to_string()));
            }
            for &kind in &config.synonym_kinds {
                for synonym in entity.synonyms_of(kind) {
                    owners.push((position, synonym.clone()));
                }
            }
        }

        let tokens: Vec<Vec<String>> = owners
            .iter()
            .map(|(_, text)| tokenize(text, config.min_token_len))
            .collect();
        let vocabulary = Vocabulary::fit(&tokens);

        let candidates: Vec<Candidate> = owners
            .into_iter()
            .zip(&tokens)
            .map(|((entity, text), tokens)| Candidate {
                entity,
                vector: vocabulary.vectorize(tokens),
                text,
            })
            .collect();
        let texts = candidates.iter().map(|c| c.text.clone()).collect();

        debug!(
            candidates = candidates.len(),
            vocabulary = vocabulary.len(),
            entities = entities.len(),
            "built similarity index"
        );

        Self {
            candidates,
            entity_ids: entities.ids().map(str::to_string).collect(),
            vocabulary,
            texts,
            min_token_len: config.min_token_len,
        }
    }

    /// Number of candidate strings.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if no entity had a label or synonym.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Exact, case-sensitive membership of a label or synonym.
    pub fn contains_term(&self, term: &str) -> bool {
        self.texts.contains(term)
    }

    /// Ranks entities by similarity to `query`.
    ///
    /// Results hold at most one match per entity, never a zero score, only
    /// scores `>= threshold` when one is given, and at most `n` entries.
    /// Ordering is by descending score, then by entity declaration order.
    pub fn query(
        &self,
        query: &str,
        n: Option<usize>,
        threshold: Option<f64>,
        parallel: bool,
    ) -> Vec<SimilarMatch> {
        let query_vector = self.vocabulary.vectorize(&tokenize(query, self.min_token_len));
        if query_vector.is_empty() {
            return Vec::new();
        }

        let scores = self.score_all(&query_vector, parallel);

        // Best (score, candidate row) per entity; earlier rows win ties.
        let mut best: Vec<Option<(f64, usize)>> = vec![None; self.entity_ids.len()];
        for (row, &score) in scores.iter().enumerate() {
            if score <= 0.0 {
                continue;
            }
            let slot = &mut best[self.candidates[row].entity];
            if slot.map_or(true, |(current, _)| score > current) {
                *slot = Some((score, row));
            }
        }

        let mut ranked: Vec<(usize, f64, usize)> = best
            .into_iter()
            .enumerate()
            .filter_map(|(entity, slot)| slot.map(|(score, row)| (entity, score, row)))
            .filter(|&(_, score, _)| threshold.map_or(true, |t| score >= t))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        if let Some(n) = n {
            ranked.truncate(n);
        }

        ranked
            .into_iter()
            .map(|(entity, score, row)| SimilarMatch {
                identifier: self.entity_ids[entity].clone(),
                matched_label: self.candidates[row].text.clone(),
                score,
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, query: &SparseVector, parallel: bool) -> Vec<f64> {
        if parallel {
            use rayon::prelude::*;
            self.candidates
                .par_iter()
                .map(|c| c.vector.cosine(query))
                .collect()
        } else {
            self.candidates.iter().map(|c| c.vector.cosine(query)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, query: &SparseVector, _parallel: bool) -> Vec<f64> {
        self.candidates.iter().map(|c| c.vector.cosine(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyowl::{Entity, SynonymType};

    fn entity(id: &str, label: Option<&str>, synonyms: &[&str]) -> Entity {
        let mut entity = Entity::new(id);
        if let Some(label) = label {
            entity.properties.insert("label".into(), label.into());
        }
        if !synonyms.is_empty() {
            entity.synonyms.insert(
                SynonymType::Exact,
                synonyms.iter().map(|s| s.to_string()).collect(),
            );
        }
        entity
    }

    fn cardiac_entities() -> EntityMap {
        [
            entity("A", Some("Heart Disease"), &["cardiac disease", "heart disorder"]),
            entity("B", Some("Disease"), &[]),
            entity("C", Some("Lung Disease"), &[]),
            entity("D", None, &["heart attack"]),
        ]
        .into_iter()
        .collect()
    }

    fn index() -> SimilarityIndex {
        SimilarityIndex::build(&cardiac_entities(), &SimilarityConfig::default())
    }

    #[test]
    fn test_build_counts_candidates() {
        let index = index();
        assert_eq!(index.len(), 6);
        assert!(!index.is_empty());
        // heart, disease, cardiac, disorder, lung, attack
        assert_eq!(index.vocabulary_size(), 6);
    }

    #[test]
    fn test_exact_label_ranks_first() {
        let results = index().query("heart disease", None, None, false);
        assert_eq!(results[0].identifier, "A");
        assert_eq!(results[0].matched_label, "Heart Disease");
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_result_per_entity() {
        let results = index().query("heart disease", None, None, false);
        let ids: Vec<&str> = results.iter().map(|m| m.identifier.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_scores_descend() {
        let results = index().query("heart disease", None, None, false);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(results.iter().all(|m| m.score > 0.0 && m.score <= 1.0));
    }

    #[test]
    fn test_threshold_then_truncate() {
        let all = index().query("heart disease", None, None, false);
        let cutoff = all[1].score;
        let filtered = index().query("heart disease", Some(10), Some(cutoff), false);
        assert!(filtered.iter().all(|m| m.score >= cutoff));
        assert!(filtered.len() >= 2);

        let top = index().query("heart disease", Some(1), Some(cutoff), false);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].identifier, "A");
    }

    #[test]
    fn test_n_zero_is_empty() {
        assert!(index().query("heart disease", Some(0), None, false).is_empty());
    }

    #[test]
    fn test_unknown_terms_match_nothing() {
        assert!(index().query("kidney stone", None, None, false).is_empty());
        assert!(index().query("", None, None, false).is_empty());
    }

    #[test]
    fn test_synonym_only_entity_is_searchable() {
        let results = index().query("attack", None, None, false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "D");
        assert_eq!(results[0].matched_label, "heart attack");
    }

    #[test]
    fn test_ties_break_by_declaration_order() {
        let entities: EntityMap = [
            entity("Z", Some("fever"), &[]),
            entity("Y", Some("fever"), &[]),
        ]
        .into_iter()
        .collect();
        let index = SimilarityIndex::build(&entities, &SimilarityConfig::default());
        let results = index.query("fever", None, None, false);
        let ids: Vec<&str> = results.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["Z", "Y"]);
    }

    #[test]
    fn test_synonym_kinds_respected() {
        let config = SimilarityConfig::default().with_synonym_kinds([SynonymType::Broad]);
        let index = SimilarityIndex::build(&cardiac_entities(), &config);
        assert_eq!(index.len(), 3);
        assert!(!index.contains_term("heart attack"));
        assert!(index.query("attack", None, None, false).is_empty());
    }

    #[test]
    fn test_contains_term_is_exact() {
        let index = index();
        assert!(index.contains_term("Heart Disease"));
        assert!(index.contains_term("cardiac disease"));
        assert!(!index.contains_term("heart disease"));
        assert!(!index.contains_term("A"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let index = index();
        assert_eq!(
            index.query("heart disease", None, None, true),
            index.query("heart disease", None, None, false)
        );
    }
}
