// TF-IDF vectorizer over restaurant feature text
use crate::{IndexConfig, TermVector};
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Lowercases (optionally) and splits on anything that is not a word character.
/// Tokens shorter than `min_len` characters are dropped.
pub fn tokenize(text: &str, lowercase: bool, min_len: usize) -> Vec<String> {
    let text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| !s.is_empty() && s.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

pub struct TfidfVectorizer {
    lowercase: bool,
    min_token_len: usize,
    smooth_idf: bool,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            lowercase: config.lowercase,
            min_token_len: config.min_token_len.max(1),
            smooth_idf: config.smooth_idf,
            sublinear_tf: config.sublinear_tf,
        }
    }

    fn term_counts(&self, doc: &str) -> AHashMap<String, u32> {
        let mut counts = AHashMap::new();
        for token in tokenize(doc, self.lowercase, self.min_token_len) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Learn the vocabulary and idf weights, returning the model and one
    /// L2-normalized vector per document in input order
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> (TfidfModel, Vec<TermVector>) {
        let counts: Vec<AHashMap<String, u32>> =
            docs.iter().map(|d| self.term_counts(d.as_ref())).collect();

        // Sorted vocabulary keeps term ids stable across runs
        let mut doc_freqs: BTreeMap<&str, u32> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *doc_freqs.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len() as f32;
        let mut terms = Vec::with_capacity(doc_freqs.len());
        let mut idf = Vec::with_capacity(doc_freqs.len());
        for (term, df) in &doc_freqs {
            terms.push(term.to_string());
            idf.push(self.idf(n_docs, *df as f32));
        }

        let ids = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();

        let model = TfidfModel {
            terms,
            ids,
            idf,
            sublinear_tf: self.sublinear_tf,
        };

        let vectors = counts.iter().map(|c| model.weigh(c)).collect();
        (model, vectors)
    }

    fn idf(&self, n_docs: f32, df: f32) -> f32 {
        if self.smooth_idf {
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        } else {
            (n_docs / df).ln() + 1.0
        }
    }
}

/// Fitted vocabulary with per-term inverse document frequencies
#[derive(Debug, Clone)]
pub struct TfidfModel {
    terms: Vec<String>,
    ids: AHashMap<String, u32>,
    idf: Vec<f32>,
    sublinear_tf: bool,
}

impl TfidfModel {
    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: u32) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }

    fn weigh(&self, counts: &AHashMap<String, u32>) -> TermVector {
        let entries = counts
            .iter()
            .filter_map(|(term, &tf)| {
                let id = self.term_id(term)?;
                let tf = if self.sublinear_tf {
                    1.0 + (tf as f32).ln()
                } else {
                    tf as f32
                };
                Some((id, tf * self.idf[id as usize]))
            })
            .collect();
        TermVector::new(entries).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("New Delhi North Indian, Chinese 450", true, 2),
            vec!["new", "delhi", "north", "indian", "chinese", "450"]
        );
        // single characters and punctuation never become tokens
        assert_eq!(tokenize("Doha  12.5", true, 2), vec!["doha", "12"]);
        assert_eq!(tokenize("Café Bar", false, 2), vec!["Café", "Bar"]);
        assert!(tokenize("", true, 2).is_empty());
    }

    #[test]
    fn test_smooth_idf_weights() {
        let vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        let docs = ["rome italian", "rome mexican"];
        let (model, vectors) = vectorizer.fit_transform(&docs);

        assert_eq!(model.vocabulary_len(), 3);
        // present everywhere: ln(3/3) + 1
        assert!((model.idf("rome").unwrap() - 1.0).abs() < 1e-6);
        // present once: ln(3/2) + 1
        assert!((model.idf("italian").unwrap() - (1.5f32.ln() + 1.0)).abs() < 1e-6);

        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = TfidfVectorizer::new(&IndexConfig::default());
        let (model, _) = vectorizer.fit_transform(&["zeta alpha", "mid"]);
        assert_eq!(model.term(0), Some("alpha"));
        assert_eq!(model.term(1), Some("mid"));
        assert_eq!(model.term(2), Some("zeta"));
    }

    #[test]
    fn test_sublinear_tf() {
        let config = IndexConfig {
            sublinear_tf: true,
            ..IndexConfig::default()
        };
        let vectorizer = TfidfVectorizer::new(&config);
        let (model, vectors) = vectorizer.fit_transform(&["pizza pizza pasta", "pasta"]);

        let pizza = model.term_id("pizza").unwrap();
        let pasta = model.term_id("pasta").unwrap();
        // raw tf would be 2 for pizza, sublinear gives 1 + ln 2
        let ratio = vectors[0].weight(pizza) / vectors[0].weight(pasta);
        let expected = (1.0 + 2f32.ln()) * model.idf("pizza").unwrap() / model.idf("pasta").unwrap();
        assert!((ratio - expected).abs() < 1e-5);
    }
}
