//! Restaurant records and the ordered catalog snapshot they live in.

use crate::filter::{CostRange, Selector};
use crate::{Error, Result};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// A single immutable catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub city: String,
    pub cuisines: Vec<String>,
    pub average_cost_for_two: f64,
    /// ISO-4217 code, normalized upstream by the catalog loader
    pub currency: String,
}

impl Restaurant {
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        average_cost_for_two: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: trimmed(name.into()),
            city: trimmed(city.into()),
            cuisines: Vec::new(),
            average_cost_for_two,
            currency: trimmed(currency.into()),
        }
    }

    /// Set cuisines from a comma-delimited field such as `"North Indian, Mughlai"`
    #[must_use]
    pub fn with_cuisines_field(mut self, raw: &str) -> Self {
        self.cuisines = split_cuisines(raw);
        self
    }

    #[must_use]
    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisines = cuisines
            .into_iter()
            .map(|c| trimmed(c.into()))
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    /// Cuisines joined the way the raw catalog field spells them
    pub fn cuisines_joined(&self) -> String {
        self.cuisines.join(", ")
    }

    #[inline]
    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        self.cuisines.iter().any(|c| c == cuisine)
    }

    /// Text fed to the vectorizer: city, cuisines and cost separated by spaces
    pub fn feature_text(&self) -> String {
        format!(
            "{} {} {}",
            self.city,
            self.cuisines_joined(),
            format_cost(self.average_cost_for_two)
        )
    }
}

fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Split a delimited cuisine field, trimming entries and dropping blanks and repeats
pub fn split_cuisines(raw: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}

/// Whole costs print without a fractional part (`450.0` -> `"450"`)
pub fn format_cost(cost: f64) -> String {
    if cost.is_finite() && cost.fract() == 0.0 {
        format!("{}", cost as i64)
    } else {
        format!("{}", cost)
    }
}

/// Ordered snapshot of restaurants. Row order is the index order of the similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    fingerprint: String,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        let fingerprint = fingerprint_of(&restaurants);
        Self {
            restaurants,
            fingerprint,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&Restaurant> {
        self.restaurants.get(row)
    }

    #[inline]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restaurant> {
        self.restaurants.iter()
    }

    /// Content digest identifying this snapshot; equal content gives an equal fingerprint
    #[inline]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Row of the restaurant with the given name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.restaurants.iter().position(|r| r.name == name)
    }

    /// Distinct cities, sorted
    pub fn cities(&self) -> Vec<String> {
        self.restaurants
            .iter()
            .map(|r| r.city.clone())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct cuisines across every restaurant, sorted
    pub fn cuisines(&self) -> Vec<String> {
        self.restaurants
            .iter()
            .flat_map(|r| r.cuisines.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Cheapest to most expensive average cost for two, or `None` for an empty catalog
    pub fn cost_bounds(&self) -> Option<CostRange> {
        self.cost_bounds_in(&Selector::Any)
    }

    /// Cost bounds over the restaurants of one city, or `None` when the city has none
    pub fn cost_bounds_in(&self, city: &Selector) -> Option<CostRange> {
        let mut costs = self
            .restaurants
            .iter()
            .filter(|r| city.admits(&r.city))
            .map(|r| r.average_cost_for_two);
        let first = costs.next()?;
        let (min, max) = costs.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
        Some(CostRange::new(min, max))
    }

    /// The one currency every restaurant of the city prices in.
    /// `None` when the city is empty or its restaurants mix currencies.
    pub fn currency_in(&self, city: &Selector) -> Option<&str> {
        let mut currencies = self
            .restaurants
            .iter()
            .filter(|r| city.admits(&r.city))
            .map(|r| r.currency.as_str());
        let first = currencies.next()?;
        currencies.all(|c| c == first).then_some(first)
    }

    /// Check the invariants the feature index relies on
    pub fn validate(&self) -> Result<()> {
        if self.restaurants.is_empty() {
            return Err(Error::InvalidCatalog("catalog is empty".to_string()));
        }

        let mut names = AHashSet::with_capacity(self.restaurants.len());
        for (row, restaurant) in self.restaurants.iter().enumerate() {
            if restaurant.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!("row {} has a blank name", row)));
            }
            if !names.insert(restaurant.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate restaurant name '{}' at row {}",
                    restaurant.name, row
                )));
            }
            let cost = restaurant.average_cost_for_two;
            if !cost.is_finite() || cost < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "restaurant '{}' has invalid cost {}",
                    restaurant.name, cost
                )));
            }
        }

        Ok(())
    }
}

impl From<Vec<Restaurant>> for Catalog {
    fn from(restaurants: Vec<Restaurant>) -> Self {
        Self::new(restaurants)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Restaurant;
    type IntoIter = std::slice::Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.restaurants.iter()
    }
}

fn fingerprint_of(restaurants: &[Restaurant]) -> String {
    let mut hasher = Sha256::new();
    for r in restaurants {
        hasher.update(r.name.as_bytes());
        hasher.update([0x1f]);
        hasher.update(r.city.as_bytes());
        hasher.update([0x1f]);
        for cuisine in &r.cuisines {
            hasher.update(cuisine.as_bytes());
            hasher.update([0x1e]);
        }
        hasher.update([0x1f]);
        hasher.update(r.average_cost_for_two.to_bits().to_le_bytes());
        hasher.update(r.currency.as_bytes());
        hasher.update([0x1d]);
    }
    format!("{:x}", hasher.finalize())
}
