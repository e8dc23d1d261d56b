// Process-wide feature index cache keyed by catalog fingerprint
use crate::{Catalog, FeatureIndex, IndexConfig, Result};
use parking_lot::RwLock;
use std::sync::Arc;

struct CachedIndex {
    fingerprint: String,
    config: IndexConfig,
    index: Arc<FeatureIndex>,
}

/// Holds the index for the most recent catalog snapshot.
///
/// A miss builds the complete index before publishing it, so readers only
/// ever see a finished index for one snapshot or the other.
#[derive(Default)]
pub struct IndexCache {
    entry: RwLock<Option<CachedIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, catalog: &Catalog, config: &IndexConfig) -> Result<Arc<FeatureIndex>> {
        if let Some(index) = self.lookup(catalog, config) {
            tracing::debug!(fingerprint = %catalog.fingerprint(), "Index cache hit");
            return Ok(index);
        }

        tracing::debug!(fingerprint = %catalog.fingerprint(), "Index cache miss");
        let index = Arc::new(FeatureIndex::build(catalog, config)?);

        let mut entry = self.entry.write();
        // another caller may have published the same snapshot while we were building
        if let Some(cached) = entry.as_ref() {
            if cached.fingerprint == catalog.fingerprint() && cached.config == *config {
                return Ok(cached.index.clone());
            }
        }
        *entry = Some(CachedIndex {
            fingerprint: catalog.fingerprint().to_string(),
            config: config.clone(),
            index: index.clone(),
        });
        Ok(index)
    }

    fn lookup(&self, catalog: &Catalog, config: &IndexConfig) -> Option<Arc<FeatureIndex>> {
        self.entry
            .read()
            .as_ref()
            .filter(|c| c.fingerprint == catalog.fingerprint() && c.config == *config)
            .map(|c| c.index.clone())
    }

    /// Fingerprint of the cached snapshot, if any
    pub fn current(&self) -> Option<String> {
        self.entry.read().as_ref().map(|c| c.fingerprint.clone())
    }

    pub fn invalidate(&self) {
        *self.entry.write() = None;
    }
}
