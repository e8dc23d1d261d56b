//! Recommendation engine
//!
//! Two modes share the same constraint filter:
//! - a named seed ranks every other restaurant by its similarity to the seed
//! - the `Any` seed draws matching restaurants uniformly at random

use crate::RestaurantSummary;
use dinewise_core::{
    is_wildcard, Catalog, ConstraintFilter, CuisineMatch, Error, FeatureIndex, Filter, QueryConstraints, Result,
};
use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Basis for a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seed {
    /// No seed: sample matching restaurants at random
    Any,
    /// Rank by similarity to the named restaurant
    Restaurant(String),
}

impl Seed {
    /// `"All"` and `"any"` in any case map to [`Seed::Any`]
    pub fn parse(value: &str) -> Self {
        if is_wildcard(value) {
            Seed::Any
        } else {
            Seed::Restaurant(value.trim().to_string())
        }
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::parse(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub cuisine_match: CuisineMatch,
}

#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend up to `constraints.top_n` restaurants.
    ///
    /// # Errors
    /// * [`Error::StaleIndex`] - `index` was built from another catalog
    /// * [`Error::UnknownRestaurant`] - the seed is not in the catalog
    ///
    /// Nothing matching the constraints is not an error: the result is empty.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        seed: &Seed,
        index: &FeatureIndex,
        catalog: &Catalog,
        constraints: &QueryConstraints,
        rng: &mut R,
    ) -> Result<Vec<RestaurantSummary>> {
        index.check_catalog(catalog)?;

        match seed {
            Seed::Any => Ok(self.sample(catalog, constraints, rng)),
            Seed::Restaurant(name) => {
                let row = index.resolve(name)?;
                self.ranked(row, index, catalog, constraints)
            }
        }
    }

    /// Rank the catalog against the restaurant at `seed_row`, most similar first.
    /// Equal scores keep catalog order.
    pub fn ranked(
        &self,
        seed_row: usize,
        index: &FeatureIndex,
        catalog: &Catalog,
        constraints: &QueryConstraints,
    ) -> Result<Vec<RestaurantSummary>> {
        let scores = index.matrix().row(seed_row).ok_or_else(|| {
            Error::UnknownRestaurant(format!("row {} is outside the catalog", seed_row))
        })?;

        if constraints.top_n == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(row, _)| row != seed_row)
            .collect();
        // sort_by_key is stable
        candidates.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));

        let filter = ConstraintFilter::new(constraints, self.config.cuisine_match);
        let results: Vec<RestaurantSummary> = candidates
            .into_iter()
            .filter_map(|(row, score)| catalog.get(row).map(|r| (r, score)))
            .filter(|(r, _)| filter.matches(r))
            .take(constraints.top_n)
            .map(|(r, score)| RestaurantSummary::from(r).with_score(score))
            .collect();

        tracing::debug!(
            seed = ?index.name(seed_row),
            returned = results.len(),
            top_n = constraints.top_n,
            "Ranked recommendations"
        );

        Ok(results)
    }

    /// Draw `min(top_n, matches)` distinct matching restaurants at random
    pub fn sample<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        constraints: &QueryConstraints,
        rng: &mut R,
    ) -> Vec<RestaurantSummary> {
        let filter = ConstraintFilter::new(constraints, self.config.cuisine_match);
        let matching: Vec<usize> = catalog
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(row, _)| row)
            .collect();

        let amount = constraints.top_n.min(matching.len());
        let results: Vec<RestaurantSummary> = rand::seq::index::sample(rng, matching.len(), amount)
            .into_iter()
            .filter_map(|i| catalog.get(matching[i]))
            .map(RestaurantSummary::from)
            .collect();

        tracing::debug!(
            matching = matching.len(),
            returned = results.len(),
            top_n = constraints.top_n,
            "Sampled recommendations"
        );

        results
    }
}

/// Recommend with the default engine configuration (exact cuisine matching)
pub fn recommend<R: Rng + ?Sized>(
    seed: &Seed,
    index: &FeatureIndex,
    catalog: &Catalog,
    constraints: &QueryConstraints,
    rng: &mut R,
) -> Result<Vec<RestaurantSummary>> {
    Recommender::default().recommend(seed, index, catalog, constraints, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinewise_core::{build_index, CostRange, Restaurant};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Restaurant::new("A", "X", 20.0, "USD").with_cuisines_field("Italian"),
            Restaurant::new("B", "X", 22.0, "USD").with_cuisines_field("Italian"),
            Restaurant::new("C", "Y", 15.0, "USD").with_cuisines_field("Mexican"),
        ])
    }

    fn names(results: &[RestaurantSummary]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_seed_parse() {
        assert_eq!(Seed::parse("All"), Seed::Any);
        assert_eq!(Seed::parse("any"), Seed::Any);
        assert_eq!(Seed::parse("Ooma"), Seed::Restaurant("Ooma".to_string()));
    }

    #[test]
    fn test_ranked_example() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default()
            .with_city("X")
            .with_cuisine("Italian")
            .with_cost(CostRange::new(0.0, 100.0))
            .with_top_n(2);

        let mut rng = StdRng::seed_from_u64(7);
        let results = recommend(&Seed::parse("A"), &index, &catalog, &constraints, &mut rng).unwrap();
        assert_eq!(names(&results), vec!["B"]);
        assert!(results[0].score.unwrap() > 0.0);
    }

    #[test]
    fn test_ranked_never_returns_seed() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default().with_top_n(10);
        let mut rng = StdRng::seed_from_u64(1);

        for r in &catalog {
            let results = recommend(&Seed::Restaurant(r.name.clone()), &index, &catalog, &constraints, &mut rng)
                .unwrap();
            assert_eq!(results.len(), 2);
            assert!(results.iter().all(|s| s.name != r.name));
        }
    }

    #[test]
    fn test_ranked_order_and_ties() {
        let catalog = Catalog::new(vec![
            Restaurant::new("Seed", "Pune", 500.0, "INR").with_cuisines_field("Cafe, Bakery"),
            Restaurant::new("Far", "Goa", 900.0, "INR").with_cuisines_field("Seafood"),
            Restaurant::new("Twin 1", "Pune", 500.0, "INR").with_cuisines_field("Cafe, Bakery"),
            Restaurant::new("Near", "Pune", 700.0, "INR").with_cuisines_field("Cafe"),
            Restaurant::new("Twin 2", "Pune", 500.0, "INR").with_cuisines_field("Cafe, Bakery"),
        ]);
        let index = build_index(&catalog).unwrap();
        let results = Recommender::default()
            .ranked(0, &index, &catalog, &QueryConstraints::default().with_top_n(4))
            .unwrap();

        assert_eq!(names(&results), vec!["Twin 1", "Twin 2", "Near", "Far"]);
        let scores: Vec<f32> = results.iter().map(|r| r.score.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ranked_is_deterministic() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default().with_top_n(2);
        let engine = Recommender::default();

        let first = engine.ranked(2, &index, &catalog, &constraints).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.ranked(2, &index, &catalog, &constraints).unwrap(), first);
        }
    }

    #[test]
    fn test_unknown_seed() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = recommend(
            &Seed::parse("Nowhere"),
            &index,
            &catalog,
            &QueryConstraints::default(),
            &mut rng,
        );
        assert_eq!(err, Err(Error::UnknownRestaurant("Nowhere".to_string())));
    }

    #[test]
    fn test_stale_index_rejected() {
        let index = build_index(&catalog()).unwrap();
        let other = Catalog::new(vec![Restaurant::new("Z", "X", 1.0, "USD")]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = recommend(&Seed::Any, &index, &other, &QueryConstraints::default(), &mut rng);
        assert!(matches!(err, Err(Error::StaleIndex { .. })));
    }

    #[test]
    fn test_random_example() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default()
            .with_city("All")
            .with_cuisine("All")
            .with_cost(CostRange::new(0.0, 100.0))
            .with_top_n(2);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let results = recommend(&Seed::Any, &index, &catalog, &constraints, &mut rng).unwrap();
            assert_eq!(results.len(), 2);
            let unique: HashSet<&str> = names(&results).into_iter().collect();
            assert_eq!(unique.len(), 2);
            assert!(unique.iter().all(|n| ["A", "B", "C"].contains(n)));
            assert!(results.iter().all(|r| r.score.is_none()));
        }
    }

    #[test]
    fn test_random_is_reproducible_with_seeded_rng() {
        let catalog = catalog();
        let constraints = QueryConstraints::default().with_top_n(2);
        let engine = Recommender::default();

        let a = engine.sample(&catalog, &constraints, &mut StdRng::seed_from_u64(9));
        let b = engine.sample(&catalog, &constraints, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_respects_constraints() {
        let catalog = catalog();
        let constraints = QueryConstraints::default()
            .with_city("X")
            .with_cost(CostRange::new(21.0, 30.0))
            .with_top_n(5);
        let mut rng = StdRng::seed_from_u64(3);

        let results = Recommender::default().sample(&catalog, &constraints, &mut rng);
        assert_eq!(names(&results), vec!["B"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = catalog();
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default().with_cuisine("Thai");
        let mut rng = StdRng::seed_from_u64(0);

        assert!(recommend(&Seed::Any, &index, &catalog, &constraints, &mut rng).unwrap().is_empty());
        assert!(recommend(&Seed::parse("A"), &index, &catalog, &constraints, &mut rng).unwrap().is_empty());

        let zero = QueryConstraints::default().with_top_n(0);
        assert!(recommend(&Seed::Any, &index, &catalog, &zero, &mut rng).unwrap().is_empty());
        assert!(recommend(&Seed::parse("A"), &index, &catalog, &zero, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_substring_cuisine_match() {
        let catalog = Catalog::new(vec![
            Restaurant::new("Seed", "Rome", 20.0, "EUR").with_cuisines_field("Italian"),
            Restaurant::new("Forno", "Rome", 25.0, "EUR").with_cuisines_field("Pizzaiolo"),
        ]);
        let index = build_index(&catalog).unwrap();
        let constraints = QueryConstraints::default().with_cuisine("Pizza");

        let exact = Recommender::default().ranked(0, &index, &catalog, &constraints).unwrap();
        assert!(exact.is_empty());

        let legacy = Recommender::new(RecommenderConfig {
            cuisine_match: CuisineMatch::Substring,
        });
        let results = legacy.ranked(0, &index, &catalog, &constraints).unwrap();
        assert_eq!(names(&results), vec!["Forno"]);
    }
}
