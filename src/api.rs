//! Response envelopes of the category service and their decoding.
//!
//! The service answers `GET /categories` with
//! `{ "success": true, "categories": [...] }` and the mutation endpoints
//! (`POST`, `PUT`, `DELETE /categories/:id`) with
//! `{ "success": bool, "message"?: string, "category"?: {...} }`.
//! Decoding turns `success: false` into [`Error::ApiFailure`] so callers
//! only ever see data or an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::model::Category;

const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl CategoryMutationResponse {
    /// The category echoed back by a successful create/update.
    pub fn into_category(self) -> Result<Category> {
        self.category.ok_or(Error::MissingCategory)
    }
}

/// Decodes a category listing, envelope or bare array.
///
/// `name` labels the source in diagnostics (usually the file name).
pub fn decode_categories(name: &str, text: &str) -> Result<Vec<Category>> {
    // Shape errors are reported by a second, typed parse so they keep the
    // line/column of the offending record.
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::json(name, text, &e))?;

    if value.is_array() {
        return serde_json::from_str(text).map_err(|e| Error::json(name, text, &e));
    }

    let response: CategoriesResponse =
        serde_json::from_str(text).map_err(|e| Error::json(name, text, &e))?;
    if !response.success {
        return Err(Error::ApiFailure {
            message: response
                .message
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        });
    }
    Ok(response.categories)
}

/// Decodes the response of a create, update or delete call.
pub fn decode_mutation(name: &str, text: &str) -> Result<CategoryMutationResponse> {
    let response: CategoryMutationResponse =
        serde_json::from_str(text).map_err(|e| Error::json(name, text, &e))?;
    if !response.success {
        return Err(Error::ApiFailure {
            message: response
                .message
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        });
    }
    Ok(response)
}

/// Reads and decodes a category listing from disk.
pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let categories = decode_categories(&path.display().to_string(), &text)?;
    tracing::debug!(path = %path.display(), count = categories.len(), "loaded categories");
    Ok(categories)
}
