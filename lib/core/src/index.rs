//! Feature index: TF-IDF vectors over each restaurant's feature text and the
//! pairwise cosine-similarity matrix derived from them.
//!
//! The index is immutable once built and can be shared read-only across
//! threads (`Arc<FeatureIndex>`); a changed catalog needs a fresh build.

use crate::{Catalog, Error, Result, SimilarityMatrix, TermVector, TfidfModel, TfidfVectorizer};
use ahash::AHashMap;
use std::time::Instant;

/// Configuration for the feature index vectorizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub lowercase: bool,
    /// Shortest token (in characters) kept in the vocabulary
    pub min_token_len: usize,
    /// `ln((1 + N) / (1 + df)) + 1` when set, `ln(N / df) + 1` otherwise
    pub smooth_idf: bool,
    /// Use `1 + ln(tf)` instead of the raw term count
    pub sublinear_tf: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

pub struct FeatureIndex {
    fingerprint: String,
    names: Vec<String>,
    positions: AHashMap<String, usize>,
    model: TfidfModel,
    vectors: Vec<TermVector>,
    matrix: SimilarityMatrix,
}

/// Build the feature index for a catalog with the default configuration
pub fn build_index(catalog: &Catalog) -> Result<FeatureIndex> {
    FeatureIndex::build(catalog, &IndexConfig::default())
}

impl FeatureIndex {
    pub fn build(catalog: &Catalog, config: &IndexConfig) -> Result<Self> {
        catalog.validate()?;
        let started = Instant::now();

        let docs: Vec<String> = catalog.iter().map(|r| r.feature_text()).collect();
        let (model, vectors) = TfidfVectorizer::new(config).fit_transform(&docs);
        let matrix = SimilarityMatrix::from_normalized(&vectors);

        let names: Vec<String> = catalog.iter().map(|r| r.name.clone()).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(row, name)| (name.clone(), row))
            .collect();

        tracing::info!(
            rows = names.len(),
            terms = model.vocabulary_len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Feature index built"
        );

        Ok(Self {
            fingerprint: catalog.fingerprint().to_string(),
            names,
            positions,
            model,
            vectors,
            matrix,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fingerprint of the catalog this index was built from
    #[inline]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Restaurant name at a matrix row
    #[inline]
    pub fn name(&self, row: usize) -> Option<&str> {
        self.names.get(row).map(String::as_str)
    }

    /// Matrix row of a restaurant
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Row of `name`, or [`Error::UnknownRestaurant`]
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| Error::UnknownRestaurant(name.to_string()))
    }

    pub fn similarity(&self, a: usize, b: usize) -> Option<f32> {
        self.matrix.get(a, b)
    }

    /// Vocabulary terms rows `a` and `b` share, with each term's share of
    /// their cosine similarity, largest first
    pub fn shared_terms(&self, a: usize, b: usize) -> Option<Vec<(&str, f32)>> {
        let (va, vb) = (self.vectors.get(a)?, self.vectors.get(b)?);
        let mut shared: Vec<(&str, f32)> = va
            .shared_products(vb)
            .into_iter()
            .filter_map(|(id, weight)| Some((self.model.term(id)?, weight)))
            .collect();
        shared.sort_by(|x, y| y.1.total_cmp(&x.1).then_with(|| x.0.cmp(y.0)));
        Some(shared)
    }

    /// Ensure this index was built from `catalog`, so rows line up 1:1
    pub fn check_catalog(&self, catalog: &Catalog) -> Result<()> {
        if self.fingerprint != catalog.fingerprint() {
            return Err(Error::StaleIndex {
                index: self.fingerprint.clone(),
                catalog: catalog.fingerprint().to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for FeatureIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureIndex")
            .field("fingerprint", &self.fingerprint)
            .field("rows", &self.names.len())
            .field("terms", &self.model.vocabulary_len())
            .finish()
    }
}
