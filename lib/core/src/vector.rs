use serde::{Deserialize, Serialize};

/// Sparse vector over a term vocabulary, entries sorted by term id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TermVector {
    entries: Vec<(u32, f32)>,
}

impl TermVector {
    /// Build from `(term_id, weight)` pairs; ids are sorted and zero weights dropped
    #[must_use]
    pub fn new(mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(id, _)| id);
        Self { entries }
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn weight(&self, term_id: u32) -> f32 {
        self.entries
            .binary_search_by_key(&term_id, |&(id, _)| id)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Merge-join dot product over the sorted entries
    pub fn dot(&self, other: &TermVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Per-term products `a[t] * b[t]` for every term both vectors carry, in id order.
    /// They sum to [`TermVector::dot`].
    pub fn shared_products(&self, other: &TermVector) -> Vec<(u32, f32)> {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut shared = Vec::new();
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared.push((a[i].0, a[i].1 * b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Compute cosine similarity with another vector
    #[inline]
    pub fn cosine_similarity(&self, other: &TermVector) -> f32 {
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for (_, w) in &mut self.entries {
                *w *= inv_norm;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}
