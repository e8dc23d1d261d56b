use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(String),

    #[error("Stale index: built for catalog {index}, queried with catalog {catalog}")]
    StaleIndex { index: String, catalog: String },
}
