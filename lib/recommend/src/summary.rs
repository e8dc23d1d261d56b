use dinewise_core::Restaurant;
use serde::{Deserialize, Serialize};

/// Fields of a recommended restaurant handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantSummary {
    pub name: String,
    pub cuisines: Vec<String>,
    pub average_cost_for_two: f64,
    pub currency: String,
    pub city: String,
    /// Similarity to the seed; absent for randomly sampled results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl RestaurantSummary {
    #[inline]
    #[must_use]
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(r: &Restaurant) -> Self {
        Self {
            name: r.name.clone(),
            cuisines: r.cuisines.clone(),
            average_cost_for_two: r.average_cost_for_two,
            currency: r.currency.clone(),
            city: r.city.clone(),
            score: None,
        }
    }
}
