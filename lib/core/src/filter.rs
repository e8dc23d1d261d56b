// Query constraints and the filter that applies them to catalog rows
use crate::Restaurant;
use serde::{Deserialize, Serialize};

/// Spellings accepted as "no constraint" for seeds, cities and cuisines
pub const WILDCARDS: [&str; 2] = ["all", "any"];

#[inline]
pub fn is_wildcard(value: &str) -> bool {
    let value = value.trim();
    WILDCARDS.iter().any(|w| value.eq_ignore_ascii_case(w))
}

pub trait Filter {
    fn matches(&self, restaurant: &Restaurant) -> bool;
}

/// A city or cuisine constraint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    Any,
    Only(String),
}

impl Selector {
    /// `"All"` and `"any"` in any case map to [`Selector::Any`]
    pub fn parse(value: &str) -> Self {
        if is_wildcard(value) {
            Selector::Any
        } else {
            Selector::Only(value.trim().to_string())
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }

    /// Exact comparison against a single field value; `Any` admits everything
    #[inline]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Selector::parse(value)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::parse(&value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Any => "All".to_string(),
            Selector::Only(value) => value,
        }
    }
}

/// Inclusive cost window; an inverted range matches nothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    #[inline]
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range that admits every non-negative cost
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    #[inline]
    pub fn contains(&self, cost: f64) -> bool {
        self.min <= cost && cost <= self.max
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// How a requested cuisine is compared against a restaurant's cuisines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CuisineMatch {
    /// Requested cuisine must equal one of the restaurant's cuisines
    #[default]
    Exact,
    /// Requested cuisine may appear anywhere in the comma-joined cuisine list,
    /// so "Pizza" also matches "Pizzaiolo"
    Substring,
}

impl CuisineMatch {
    pub fn matches(self, restaurant: &Restaurant, cuisine: &str) -> bool {
        match self {
            CuisineMatch::Exact => restaurant.has_cuisine(cuisine),
            CuisineMatch::Substring => restaurant.cuisines_joined().contains(cuisine),
        }
    }
}

/// User-supplied constraints for one recommendation query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConstraints {
    #[serde(default)]
    pub city: Selector,
    #[serde(default)]
    pub cuisine: Selector,
    #[serde(default)]
    pub cost: CostRange,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    3
}

impl Default for QueryConstraints {
    fn default() -> Self {
        Self {
            city: Selector::Any,
            cuisine: Selector::Any,
            cost: CostRange::unbounded(),
            top_n: default_top_n(),
        }
    }
}

impl QueryConstraints {
    #[must_use]
    pub fn with_city(mut self, city: impl Into<Selector>) -> Self {
        self.city = city.into();
        self
    }

    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<Selector>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: CostRange) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Applies [`QueryConstraints`] to restaurants
pub struct ConstraintFilter<'a> {
    constraints: &'a QueryConstraints,
    cuisine_match: CuisineMatch,
}

impl<'a> ConstraintFilter<'a> {
    pub fn new(constraints: &'a QueryConstraints, cuisine_match: CuisineMatch) -> Self {
        Self {
            constraints,
            cuisine_match,
        }
    }
}

impl Filter for ConstraintFilter<'_> {
    fn matches(&self, restaurant: &Restaurant) -> bool {
        let city_ok = self.constraints.city.admits(&restaurant.city);
        let cuisine_ok = match &self.constraints.cuisine {
            Selector::Any => true,
            Selector::Only(cuisine) => self.cuisine_match.matches(restaurant, cuisine),
        };
        city_ok && cuisine_ok && self.constraints.cost.contains(restaurant.average_cost_for_two)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizzeria() -> Restaurant {
        Restaurant::new("Da Mario", "Rome", 30.0, "EUR").with_cuisines_field("Pizzaiolo, Italian")
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse("All"), Selector::Any);
        assert_eq!(Selector::parse(" ANY "), Selector::Any);
        assert_eq!(Selector::parse("Rome "), Selector::Only("Rome".to_string()));
    }

    #[test]
    fn test_cost_range_inclusive() {
        let range = CostRange::new(10.0, 30.0);
        assert!(range.contains(10.0));
        assert!(range.contains(30.0));
        assert!(!range.contains(30.5));
        assert!(!CostRange::new(50.0, 10.0).contains(20.0));
    }

    #[test]
    fn test_cuisine_match_modes() {
        let r = pizzeria();
        assert!(CuisineMatch::Exact.matches(&r, "Italian"));
        assert!(!CuisineMatch::Exact.matches(&r, "Pizza"));
        assert!(CuisineMatch::Substring.matches(&r, "Pizza"));
    }

    #[test]
    fn test_constraint_filter() {
        let r = pizzeria();
        let any = QueryConstraints::default();
        assert!(ConstraintFilter::new(&any, CuisineMatch::Exact).matches(&r));

        let other_city = QueryConstraints::default().with_city("Milan");
        assert!(!ConstraintFilter::new(&other_city, CuisineMatch::Exact).matches(&r));

        let too_cheap = QueryConstraints::default().with_cost(CostRange::new(0.0, 29.99));
        assert!(!ConstraintFilter::new(&too_cheap, CuisineMatch::Exact).matches(&r));

        let all_match = QueryConstraints::default()
            .with_city("Rome")
            .with_cuisine("Italian")
            .with_cost(CostRange::new(30.0, 30.0));
        assert!(ConstraintFilter::new(&all_match, CuisineMatch::Exact).matches(&r));
    }

    #[test]
    fn test_constraints_deserialize_defaults() {
        let parsed: QueryConstraints = serde_json::from_str(r#"{"city": "Rome"}"#).unwrap();
        assert_eq!(parsed.city, Selector::Only("Rome".to_string()));
        assert_eq!(parsed.cuisine, Selector::Any);
        assert_eq!(parsed.top_n, 3);

        let wildcard: QueryConstraints = serde_json::from_str(r#"{"cuisine": "All"}"#).unwrap();
        assert!(wildcard.cuisine.is_any());
    }
}
