use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "other";

#[derive(Debug, Error, PartialEq)]
pub enum PantryValidationError {
    #[error("Item name is required")]
    EmptyName,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub category: Option<String>,
}

impl AddItemRequest {
    /// Trimmed `(name, category)`.
    pub fn normalized(&self) -> Result<(String, String), PantryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PantryValidationError::EmptyName);
        }
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        Ok((name.to_string(), category.to_lowercase()))
    }
}
