//! # dinewise Catalog
//!
//! Turns a raw restaurant catalog file into a [`dinewise_core::Catalog`]:
//! cuisine fields are split, currency labels normalized to ISO codes, and the
//! result validated before any index is built from it.

pub mod currency;
pub mod error;
pub mod loader;

pub use currency::normalize_currency;
pub use error::{Error, Result};
pub use loader::{CatalogLoader, RawRestaurant};
