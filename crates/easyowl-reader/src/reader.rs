//! The ontology parser facade.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use easyowl::{Entity, EntityMap, Ontology, ParseResult, Relation};
use easyowl_hierarchy::{
    EntityNotFoundError, HierarchyIndex, HierarchyResult, HierarchyTraverser, TraversalDepth,
};
use tracing::debug;

use crate::cache::{similarity_cache_key, CacheStats, QueryCache};
use crate::config::ParserConfig;
use crate::similarity::{SimilarMatch, SimilarityIndex};

/// Direct neighbours of one entity plus the relations that mention it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRelations {
    /// Direct superclasses, dangling references included.
    pub parents: Vec<String>,
    /// Direct subclasses.
    pub children: Vec<String>,
    /// Object properties whose domain, range or an annotation value is the entity.
    pub relations: Vec<Relation>,
}

/// A parsed ontology with hierarchy navigation and label similarity search.
///
/// The hierarchy index is built eagerly at construction. The similarity
/// index is built once, on the first similarity query, and reused for the
/// lifetime of the parser.
///
/// # Example
///
/// ```rust
/// use easyowl_reader::OntologyParser;
///
/// let parser = OntologyParser::parse_str(r#"
///     <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
///              xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
///              xmlns:owl="http://www.w3.org/2002/07/owl#">
///       <owl:Class rdf:about="A">
///         <rdfs:label>Heart Disease</rdfs:label>
///         <rdfs:subClassOf rdf:resource="B"/>
///       </owl:Class>
///       <owl:Class rdf:about="B"><rdfs:label>Disease</rdfs:label></owl:Class>
///     </rdf:RDF>"#)?;
///
/// assert_eq!(parser.entities()["A"].properties["label"], "Heart Disease");
/// assert_eq!(parser.get_ancestors("A", -1)?, vec!["A", "B"]);
/// assert_eq!(parser.get_descendants("B", -1)?, vec!["B", "A"]);
/// assert_eq!(parser.find_similar_terms("heart disease", Some(1), None)[0].identifier, "A");
/// # Ok::<(), easyowl_reader::EasyOwlError>(())
/// ```
#[derive(Debug)]
pub struct OntologyParser {
    source: Option<PathBuf>,
    ontology: Ontology,
    hierarchy: HierarchyIndex,
    similarity: OnceLock<SimilarityIndex>,
    cache: Option<QueryCache>,
    config: ParserConfig,
}

impl OntologyParser {
    /// Parses the ontology file at `path` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`easyowl::OntologyParseError`] if the file cannot be read,
    /// is not well-formed XML, or declares no class.
    pub fn from_path(path: impl AsRef<Path>) -> ParseResult<Self> {
        Self::from_path_with_config(path, ParserConfig::default())
    }

    /// Parses the ontology file at `path`.
    pub fn from_path_with_config(path: impl AsRef<Path>, config: ParserConfig) -> ParseResult<Self> {
        let path = path.as_ref();
        let ontology = Ontology::from_path(path)?;
        let mut parser = Self::from_ontology(ontology, config);
        parser.source = Some(path.to_path_buf());
        Ok(parser)
    }

    /// Parses an ontology from a byte stream with the default configuration.
    pub fn from_reader<R: Read>(source: R) -> ParseResult<Self> {
        Self::from_reader_with_config(source, ParserConfig::default())
    }

    /// Parses an ontology from a byte stream.
    pub fn from_reader_with_config<R: Read>(source: R, config: ParserConfig) -> ParseResult<Self> {
        Ok(Self::from_ontology(Ontology::from_reader(source)?, config))
    }

    /// Parses an in-memory ontology document with the default configuration.
    pub fn parse_str(content: &str) -> ParseResult<Self> {
        Ok(Self::from_ontology(
            Ontology::parse_str(content)?,
            ParserConfig::default(),
        ))
    }

    /// Wraps an already extracted ontology, building its hierarchy index.
    pub fn from_ontology(ontology: Ontology, config: ParserConfig) -> Self {
        let hierarchy = HierarchyIndex::build(&ontology.entities);
        let cache = config.cache.as_ref().map(QueryCache::new);
        Self {
            source: None,
            ontology,
            hierarchy,
            similarity: OnceLock::new(),
            cache,
            config,
        }
    }

    /// All entities, in order of first declaration.
    pub fn entities(&self) -> &EntityMap {
        &self.ontology.entities
    }

    /// Looks up one entity.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.ontology.entities.get(id)
    }

    /// Number of distinct entities.
    pub fn len(&self) -> usize {
        self.ontology.entities.len()
    }

    /// Always `false` for a successfully constructed parser.
    pub fn is_empty(&self) -> bool {
        self.ontology.entities.is_empty()
    }

    /// Returns `true` if `id` is a declared entity.
    pub fn has_entity(&self, id: &str) -> bool {
        self.ontology.entities.contains(id)
    }

    /// Declared object properties.
    pub fn relations(&self) -> &[Relation] {
        &self.ontology.relations
    }

    /// Prefix to URI map declared on the document root.
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.ontology.namespaces
    }

    /// The underlying ontology.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The file this parser was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The configuration in use.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The hierarchy index built at construction.
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    fn traverser(&self) -> HierarchyTraverser<'_> {
        HierarchyTraverser::new(&self.hierarchy)
    }

    /// Returns `id` followed by every ancestor within `max_depth` hops, in
    /// breadth-first order. A negative `max_depth` means unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFoundError`] if `id` is not a declared entity.
    pub fn get_ancestors(&self, id: &str, max_depth: i32) -> HierarchyResult<Vec<String>> {
        let ancestors = self
            .traverser()
            .get_ancestors(id, TraversalDepth::from(max_depth))?;
        Ok(ancestors.into_iter().map(str::to_string).collect())
    }

    /// Returns `id` followed by every descendant within `max_depth` hops, in
    /// breadth-first order. A negative `max_depth` means unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`EntityNotFoundError`] if `id` is not a declared entity.
    pub fn get_descendants(&self, id: &str, max_depth: i32) -> HierarchyResult<Vec<String>> {
        let descendants = self
            .traverser()
            .get_descendants(id, TraversalDepth::from(max_depth))?;
        Ok(descendants.into_iter().map(str::to_string).collect())
    }

    /// Direct parents, direct children and mentioning relations of `id`.
    pub fn get_entity_relations(&self, id: &str) -> Result<EntityRelations, EntityNotFoundError> {
        let traverser = self.traverser();
        let parents = traverser.get_direct_parents(id)?;
        let children = traverser.get_direct_children(id)?;
        let relations = self
            .ontology
            .relations
            .iter()
            .filter(|relation| relation.involves(id))
            .cloned()
            .collect();

        Ok(EntityRelations {
            parents: parents.into_iter().map(str::to_string).collect(),
            children: children.into_iter().map(str::to_string).collect(),
            relations,
        })
    }

    /// The similarity index, built on first access.
    pub fn similarity_index(&self) -> &SimilarityIndex {
        self.similarity.get_or_init(|| {
            debug!(
                entities = self.ontology.entities.len(),
                "building similarity index on first use"
            );
            SimilarityIndex::build(&self.ontology.entities, &self.config.similarity)
        })
    }

    /// Returns `true` once a similarity query has built the index.
    pub fn is_similarity_index_built(&self) -> bool {
        self.similarity.get().is_some()
    }

    /// Returns `true` if `term` is exactly one of the indexed labels or synonyms.
    pub fn has_term(&self, term: &str) -> bool {
        self.similarity_index().contains_term(term)
    }

    /// Ranks entities by TF-IDF cosine similarity of their labels and
    /// synonyms to `query`.
    ///
    /// At most one match per entity is returned. With `threshold`, scores
    /// below it are dropped; with `n`, at most `n` entities are kept (after
    /// filtering). No match is an empty result, not an error.
    pub fn find_similar_terms(
        &self,
        query: &str,
        n: Option<usize>,
        threshold: Option<f64>,
    ) -> Vec<SimilarMatch> {
        let Some(cache) = &self.cache else {
            return self.rank(query, n, threshold);
        };

        let key = similarity_cache_key(query, n, threshold);
        if let Some(cached) = cache.get(&key) {
            debug!(query, "similarity cache hit");
            return cached;
        }
        let results = self.rank(query, n, threshold);
        cache.set(key, results.clone());
        results
    }

    fn rank(&self, query: &str, n: Option<usize>, threshold: Option<f64>) -> Vec<SimilarMatch> {
        self.similarity_index()
            .query(query, n, threshold, self.config.parallel)
    }

    /// Statistics of the result cache, if caching is enabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(QueryCache::stats)
    }

    /// Drops every cached similarity result.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    const DOC: &str = r#"<rdf:RDF
        xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
        xmlns:owl="http://www.w3.org/2002/07/owl#">
      <owl:ObjectProperty rdf:about="affects">
        <rdfs:domain rdf:resource="A"/>
        <rdfs:range rdf:resource="organ"/>
      </owl:ObjectProperty>
      <owl:Class rdf:about="A">
        <rdfs:label>Heart Disease</rdfs:label>
        <rdfs:subClassOf rdf:resource="B"/>
      </owl:Class>
      <owl:Class rdf:about="B">
        <rdfs:label>Disease</rdfs:label>
      </owl:Class>
    </rdf:RDF>"#;

    #[test]
    fn test_hierarchy_built_eagerly() {
        let parser = OntologyParser::parse_str(DOC).unwrap();
        assert_eq!(parser.hierarchy().declared_count(), 2);
        assert_eq!(parser.hierarchy().edge_count(), 1);
        assert!(parser.source_path().is_none());
    }

    #[test]
    fn test_similarity_index_is_lazy() {
        let parser = OntologyParser::parse_str(DOC).unwrap();
        assert!(!parser.is_similarity_index_built());
        let _ = parser.find_similar_terms("disease", None, None);
        assert!(parser.is_similarity_index_built());
        let first: *const SimilarityIndex = parser.similarity_index();
        let second: *const SimilarityIndex = parser.similarity_index();
        assert_eq!(first, second);
    }

    #[test]
    fn test_has_term_builds_index() {
        let parser = OntologyParser::parse_str(DOC).unwrap();
        assert!(parser.has_term("Disease"));
        assert!(parser.is_similarity_index_built());
        assert!(!parser.has_term("disease"));
    }

    #[test]
    fn test_get_entity_relations() {
        let parser = OntologyParser::parse_str(DOC).unwrap();
        let relations = parser.get_entity_relations("A").unwrap();
        assert_eq!(relations.parents, vec!["B"]);
        assert!(relations.children.is_empty());
        assert_eq!(relations.relations.len(), 1);
        assert_eq!(relations.relations[0].predicate, "affects");

        let b = parser.get_entity_relations("B").unwrap();
        assert_eq!(b.children, vec!["A"]);
        assert!(b.relations.is_empty());

        let err = parser.get_entity_relations("Z").unwrap_err();
        assert_eq!(err.entity_id, "Z");
    }

    #[test]
    fn test_cache_serves_repeated_queries() {
        let config = ParserConfig::builder()
            .with_cache(CacheConfig::default())
            .build();
        let parser = OntologyParser::from_ontology(Ontology::parse_str(DOC).unwrap(), config);

        let first = parser.find_similar_terms("Heart Disease", Some(1), None);
        let second = parser.find_similar_terms("heart   disease", Some(1), None);
        assert_eq!(first, second);
        assert_eq!(parser.cache_stats().unwrap().total_entries, 1);

        let _ = parser.find_similar_terms("heart disease", None, None);
        assert_eq!(parser.cache_stats().unwrap().total_entries, 2);

        parser.clear_cache();
        assert_eq!(parser.cache_stats().unwrap().total_entries, 0);
    }

    #[test]
    fn test_no_cache_by_default() {
        let parser = OntologyParser::parse_str(DOC).unwrap();
        assert!(parser.cache_stats().is_none());
        parser.clear_cache();
    }
}
