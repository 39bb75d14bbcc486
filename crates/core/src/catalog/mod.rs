//! Property catalog: board reference data plus live ownership state.

/// CSV catalog loading.
pub mod loader;
mod models;

pub use loader::CatalogLoader;
pub use models::Property;

use crate::error::{LedgerError, Result};

/// Fixed-length list of properties in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    /// Wrap an already-built property list.
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Number of properties on the board.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the catalog holds no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Case-insensitive exact lookup by code.
    pub fn lookup(&self, code: &str) -> Result<&Property> {
        self.index_of(code).map(|index| &self.properties[index])
    }

    pub(crate) fn index_of(&self, code: &str) -> Result<usize> {
        self.properties
            .iter()
            .position(|property| property.matches_code(code))
            .ok_or_else(|| LedgerError::UnknownProperty(code.trim().to_uppercase()))
    }

    pub(crate) fn get(&self, index: usize) -> &Property {
        &self.properties[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Property {
        &mut self.properties[index]
    }

    /// All properties sharing `color`, in load order.
    pub fn group_members<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties
            .iter()
            .filter(move |property| property.color == color)
    }

    /// Distinct colors in order of first appearance.
    pub fn colors(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = Vec::new();
        for property in &self.properties {
            if !colors.contains(&property.color.as_str()) {
                colors.push(&property.color);
            }
        }
        colors
    }
}
