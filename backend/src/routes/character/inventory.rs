//! Inventory sub-resource of a character

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension};
use character_types::{Item, ItemReference};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    character_sheet::CharacterSheets,
    types::{ApiJson, AppError, ValidatedQuery},
};

/// Query for removing an item from the inventory
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemQuery {
    /// Catalog ID of the item to remove
    #[validate(length(min = 1))]
    pub item_id: String,
}

/// Add an item to a character's inventory
///
/// The body is either a full item or `{"item_id": ...}`. A full item without an
/// ID is stored in the item catalog first.
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Malformed item
/// - `404 NOT_FOUND` - Character, or the referenced catalog item, does not exist
/// - `409 CONFLICT` - Character was modified concurrently
pub async fn add_item(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ApiJson(item): ApiJson<ItemReference>,
) -> Result<StatusCode, AppError> {
    sheets.add_inventory_item(&id, item).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Replace an item in a character's inventory
///
/// Every equipment slot holding the same item is updated too.
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Item has no ID, or the character does not carry it
/// - `404 NOT_FOUND` - Character does not exist
/// - `409 CONFLICT` - Character was modified concurrently
pub async fn replace_item(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ApiJson(item): ApiJson<Item>,
) -> Result<StatusCode, AppError> {
    sheets.replace_inventory_item(&id, item).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove every copy of an item from a character's inventory
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Missing `itemId`
/// - `404 NOT_FOUND` - Character does not exist
pub async fn remove_item(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<RemoveItemQuery>,
) -> Result<StatusCode, AppError> {
    sheets.remove_inventory_item(&id, &query.item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
