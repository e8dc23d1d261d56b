//! # dinewise Recommend
//!
//! Recommendation engine over a [`dinewise_core::FeatureIndex`].
//!
//! ## Example
//!
//! ```rust
//! use dinewise_core::{build_index, Catalog, CostRange, QueryConstraints, Restaurant};
//! use dinewise_recommend::{recommend, Seed};
//!
//! let catalog = Catalog::new(vec![
//!     Restaurant::new("A", "Rome", 20.0, "EUR").with_cuisines_field("Italian"),
//!     Restaurant::new("B", "Rome", 22.0, "EUR").with_cuisines_field("Italian"),
//!     Restaurant::new("C", "Milan", 15.0, "EUR").with_cuisines_field("Mexican"),
//! ]);
//! let index = build_index(&catalog).unwrap();
//!
//! let constraints = QueryConstraints::default()
//!     .with_city("Rome")
//!     .with_cost(CostRange::new(0.0, 100.0))
//!     .with_top_n(2);
//! let results = recommend(&Seed::parse("A"), &index, &catalog, &constraints, &mut rand::rng()).unwrap();
//! assert_eq!(results[0].name, "B");
//! ```

pub mod engine;
pub mod summary;

pub use engine::{recommend, RecommenderConfig, Recommender, Seed};
pub use summary::RestaurantSummary;
