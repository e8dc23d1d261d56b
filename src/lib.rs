//! # dinewise
//!
//! A content-based restaurant recommender over a static catalog.
//!
//! dinewise builds a TF-IDF vector for every restaurant from its city,
//! cuisines and average cost for two, derives a pairwise cosine-similarity
//! matrix, and answers queries either by ranking restaurants against a seed
//! or by sampling at random, always within city, cuisine and budget filters.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! dinewise options --catalog zomato.json
//! dinewise recommend --catalog zomato.json --seed "Le Petit Souffle" --city "Makati City" --top-n 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dinewise::prelude::*;
//!
//! let catalog = CatalogLoader::parse(r#"[
//!     {"Restaurant Name": "A", "City": "Rome", "Cuisines": "Italian", "Average Cost for two": 20, "Currency": "EUR"},
//!     {"Restaurant Name": "B", "City": "Rome", "Cuisines": "Italian", "Average Cost for two": 22, "Currency": "EUR"}
//! ]"#).unwrap();
//!
//! let index = build_index(&catalog).unwrap();
//! let constraints = QueryConstraints::default().with_city("Rome").with_top_n(1);
//! let results = recommend(&Seed::parse("A"), &index, &catalog, &constraints, &mut rand::rng()).unwrap();
//! assert_eq!(results[0].name, "B");
//! ```
//!
//! ## Crate Structure
//!
//! - `dinewise-core` - Catalog model, TF-IDF vectorizer, similarity matrix, feature index, filters
//! - `dinewise-recommend` - Ranked and random recommendation modes
//! - `dinewise-catalog` - Raw catalog loading and currency normalization

// Re-export core types
pub use dinewise_core::{
    build_index, Catalog, ConstraintFilter, CostRange, CuisineMatch, Error, FeatureIndex, Filter, IndexCache,
    IndexConfig, QueryConstraints, Restaurant, Result, Selector, SimilarityMatrix,
};

// Re-export engine
pub use dinewise_recommend::{recommend, Recommender, RecommenderConfig, RestaurantSummary, Seed};

// Re-export loader
pub use dinewise_catalog::{normalize_currency, CatalogLoader};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_index, recommend, Catalog, CatalogLoader, CostRange, CuisineMatch, Error, FeatureIndex, IndexCache,
        IndexConfig, QueryConstraints, Recommender, RecommenderConfig, Restaurant, RestaurantSummary, Result, Seed,
        Selector,
    };
}
