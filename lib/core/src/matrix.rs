//! Dense pairwise similarity matrix.

use crate::TermVector;
use rayon::prelude::*;

/// Square, symmetric N x N matrix of cosine similarities stored row-major.
/// Entries lie in [0, 1] and the diagonal is exactly 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Fill every pair from L2-normalized vectors, one row per rayon task.
    ///
    /// Equal vectors score exactly 1. Two all-zero vectors come from feature
    /// text with no usable tokens and count as identical; an all-zero vector
    /// scores 0 against anything else.
    pub fn from_normalized(vectors: &[TermVector]) -> Self {
        let n = vectors.len();
        let mut data = vec![0.0f32; n * n];

        if n > 0 {
            data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                let vi = &vectors[i];
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if i == j {
                        1.0
                    } else {
                        pair_similarity(vi, &vectors[j])
                    };
                }
            });
        }

        Self { n, data }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    /// Similarities of row `i` against every row, in catalog order
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.data[i * self.n + j] == self.data[j * self.n + i]))
    }
}

#[inline]
fn pair_similarity(a: &TermVector, b: &TermVector) -> f32 {
    // identical token content (including none at all) is identical, whatever f32 rounding says
    if a.entries() == b.entries() {
        return 1.0;
    }
    // merge-join visits shared terms in id order, so a.dot(b) == b.dot(a) bit for bit
    a.dot(b).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let m = SimilarityMatrix::from_normalized(&[TermVector::new(vec![(0, 1.0)])]);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(0, 1), None);
    }

    #[test]
    fn test_symmetric_bounded() {
        let vectors: Vec<TermVector> = vec![
            TermVector::new(vec![(0, 1.0), (1, 2.0)]).normalized(),
            TermVector::new(vec![(1, 1.0), (2, 1.0)]).normalized(),
            TermVector::new(vec![(2, 5.0)]).normalized(),
            TermVector::default(),
        ];
        let m = SimilarityMatrix::from_normalized(&vectors);

        assert!(m.is_symmetric());
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for &s in m.row(i).unwrap() {
                assert!((0.0..=1.0).contains(&s));
            }
        }
        assert_eq!(m.get(0, 2), Some(0.0));
        assert_eq!(m.get(3, 0), Some(0.0));
    }

    #[test]
    fn test_equal_vectors_score_exactly_one() {
        // weights whose normalized self-dot rounds below 1 in f32
        let v = TermVector::new(vec![(0, 1.3), (1, 2.7), (2, 0.9), (3, 4.1), (4, 1.1)]).normalized();
        let m = SimilarityMatrix::from_normalized(&[v.clone(), v, TermVector::new(vec![(9, 1.0)])]);
        assert_eq!(m.get(0, 1), Some(1.0));
        assert_eq!(m.get(1, 0), Some(1.0));
        assert_eq!(m.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_empty_vectors_match_each_other() {
        let m = SimilarityMatrix::from_normalized(&[TermVector::default(), TermVector::default()]);
        assert_eq!(m.get(0, 1), Some(1.0));
    }
}
