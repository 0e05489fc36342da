//! Static plant catalog.
//!
//! The catalog is a JSON array of categories, each with its plants. A copy
//! is compiled into the binary from `content/catalog.json`; a file given by
//! `STOREFRONT_CATALOG_PATH` replaces it at startup.
//!
//! Plant names are the cart key, so they must be unique across the whole
//! catalog.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use paradise_nursery_core::{CartLine, Cost};
use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../content/catalog.json");

/// Errors loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Plant {0:?} appears more than once")]
    DuplicatePlant(String),
    #[error("Unknown plant: {0}")]
    UnknownPlant(String),
}

/// A plant offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cost: Cost,
}

impl Plant {
    /// The cart line created when this plant is added to the cart.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        CartLine {
            name: self.name.clone(),
            cost: self.cost.clone(),
            quantity: 1,
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }
}

/// A named group of plants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    pub plants: Vec<Plant>,
}

/// The full catalog, cheap to clone.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Arc<Vec<Category>>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is invalid.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Load the file at `path` if given, otherwise the embedded catalog.
    ///
    /// # Errors
    ///
    /// See [`Catalog::load`] and [`Catalog::embedded`].
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Self::load(path)?
            }
            None => Self::embedded()?,
        };
        tracing::info!(
            categories = catalog.categories().len(),
            plants = catalog.plant_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a plant name repeats.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::from_categories(categories)
    }

    /// Build a catalog from already-parsed categories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicatePlant`] if a plant name repeats.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for plant in categories.iter().flat_map(|c| &c.plants) {
            if !seen.insert(plant.name.as_str()) {
                return Err(CatalogError::DuplicatePlant(plant.name.clone()));
            }
            if plant.cost.amount().is_err() {
                tracing::warn!(plant = %plant.name, cost = %plant.cost, "Plant cost is not a number");
            }
        }

        Ok(Self {
            categories: Arc::new(categories),
        })
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of plants.
    #[must_use]
    pub fn plant_count(&self) -> usize {
        self.categories.iter().map(|c| c.plants.len()).sum()
    }

    /// Find a plant by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownPlant`] if no plant has this name.
    pub fn find(&self, name: &str) -> Result<&Plant, CatalogError> {
        self.categories
            .iter()
            .flat_map(|c| &c.plants)
            .find(|plant| plant.name == name)
            .ok_or_else(|| CatalogError::UnknownPlant(name.to_string()))
    }
}
