use crate::currency::normalize_currency;
use crate::Result;
use dinewise_core::{Catalog, Error as CoreError, Restaurant};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One row of the raw catalog file, using the source data set's column names.
/// Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRestaurant {
    #[serde(rename = "Restaurant Name")]
    pub name: String,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "Cuisines", default)]
    pub cuisines: Option<String>,
    #[serde(rename = "Average Cost for two", default)]
    pub average_cost_for_two: Option<f64>,
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
}

impl RawRestaurant {
    /// Clean one row into a catalog record
    pub fn into_restaurant(self, row: usize) -> Result<Restaurant> {
        let cost = self.average_cost_for_two.ok_or_else(|| {
            CoreError::InvalidCatalog(format!("row {} ('{}') has no average cost for two", row, self.name))
        })?;
        let currency = normalize_currency(self.currency.as_deref().unwrap_or_default());

        Ok(Restaurant::new(
            self.name.trim(),
            self.city.as_deref().unwrap_or_default().trim(),
            cost,
            currency,
        )
        .with_cuisines_field(self.cuisines.as_deref().unwrap_or_default()))
    }
}

/// Reads raw catalog JSON (an array of rows) into a validated [`Catalog`]
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), rows = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog> {
        let rows: Vec<RawRestaurant> = serde_json::from_reader(reader)?;
        Self::from_rows(rows)
    }

    pub fn parse(json: &str) -> Result<Catalog> {
        let rows: Vec<RawRestaurant> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<RawRestaurant>) -> Result<Catalog> {
        let restaurants = rows
            .into_iter()
            .enumerate()
            .map(|(row, raw)| raw.into_restaurant(row))
            .collect::<Result<Vec<_>>>()?;

        let catalog = Catalog::new(restaurants);
        catalog.validate()?;
        Ok(catalog)
    }
}
