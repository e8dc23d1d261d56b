//! # dinewise Core
//!
//! Core library for the dinewise restaurant recommender.
//!
//! This crate provides the catalog model and the feature index:
//!
//! - [`Restaurant`] / [`Catalog`] - Immutable restaurant records in catalog row order
//! - [`TfidfVectorizer`] - TF-IDF weighting over each restaurant's feature text
//! - [`SimilarityMatrix`] - Symmetric pairwise cosine similarities
//! - [`FeatureIndex`] - Vectors, matrix and the row mapping back to restaurant names
//! - [`IndexCache`] - One cached index per catalog snapshot
//! - [`QueryConstraints`] / [`ConstraintFilter`] - City, cuisine and budget filtering
//!
//! ## Example
//!
//! ```rust
//! use dinewise_core::{build_index, Catalog, Restaurant};
//!
//! let catalog = Catalog::new(vec![
//!     Restaurant::new("Trattoria", "Rome", 40.0, "EUR").with_cuisines_field("Italian, Pizza"),
//!     Restaurant::new("Pizzeria", "Rome", 25.0, "EUR").with_cuisines_field("Pizza"),
//! ]);
//!
//! let index = build_index(&catalog).unwrap();
//! assert_eq!(index.matrix().len(), 2);
//! assert_eq!(index.similarity(0, 0), Some(1.0));
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod index;
pub mod matrix;
pub mod restaurant;
pub mod tfidf;
pub mod vector;

pub use cache::IndexCache;
pub use error::{Error, Result};
pub use filter::{is_wildcard, ConstraintFilter, CostRange, CuisineMatch, Filter, QueryConstraints, Selector};
pub use index::{build_index, FeatureIndex, IndexConfig};
pub use matrix::SimilarityMatrix;
pub use restaurant::{format_cost, split_cuisines, Catalog, Restaurant};
pub use tfidf::{tokenize, TfidfModel, TfidfVectorizer};
pub use vector::TermVector;
