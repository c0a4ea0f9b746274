use std::fmt;
use std::sync::Arc;

use chrono::Local;

use crate::filter::RecipeFilter;
use crate::recipe::{NewRecipe, Recipe};
use crate::settings::MongoSettings;

pub mod connection;
pub mod memory;
pub mod mongo;

pub type StoreHandle = Arc<dyn RecipeStore>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Connection(String),
    Read(String),
    Write(String),
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(reason) => write!(f, "Connection error: {}", reason),
            StoreError::Read(reason) => write!(f, "Read error: {}", reason),
            StoreError::Write(reason) => write!(f, "Write error: {}", reason),
            StoreError::NotFound(id) => write!(f, "Recipe {} not found", id),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage operations used by the pages. Each call is a single round trip.
pub trait RecipeStore: fmt::Debug + Send + Sync {
    fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError>;

    /// Malformed or unknown identifiers resolve to `Ok(None)`.
    fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Returns the generated identifier as a hex string.
    fn insert(&self, recipe: &NewRecipe) -> Result<String, StoreError>;

    /// Fails with `StoreError::NotFound` when nothing was removed.
    fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

pub fn open_store(settings: &MongoSettings, use_mock: bool) -> Result<StoreHandle, StoreError> {
    if use_mock {
        log::info!("Using in-memory recipe store");
        return Ok(Arc::new(memory::MemoryRecipeStore::default()));
    }

    let client = connection::connect(&settings.uri)?;
    let collection = connection::resolve_collection(&client, settings);
    Ok(Arc::new(mongo::MongoRecipeStore::new(collection)))
}

pub(crate) fn today_stamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_stamp_is_iso_date() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&stamp, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn mock_flag_opens_memory_store_without_network() {
        let settings = MongoSettings {
            uri: String::from("mongodb://unreachable.invalid:1"),
            ..MongoSettings::default()
        };
        let store = open_store(&settings, true).expect("memory store should open");
        assert!(store.search(&RecipeFilter::default()).expect("search").is_empty());
    }

    #[test]
    fn errors_render_their_reason() {
        assert_eq!(StoreError::NotFound(String::from("abc")).to_string(), "Recipe abc not found");
        assert_eq!(
            StoreError::Write(String::from("not acknowledged")).to_string(),
            "Write error: not acknowledged"
        );
    }
}
