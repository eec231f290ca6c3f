//! Equipment slots of a character

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use character_types::{Equipment, Item};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    character_sheet::CharacterSheets,
    types::{ApiJson, AppError, ValidatedQuery},
};

/// Query for clearing an equipment slot
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct UnequipQuery {
    /// Slot to clear, e.g. `head`
    #[validate(length(min = 1))]
    pub slot: String,
}

/// Equip an item
///
/// The item goes into its own `slot`, or `main_hand` for weapons and `body`
/// for armor. Whatever was in that slot is replaced.
///
/// # Returns
///
/// Returns `200 OK` with the character's equipment
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Item has no slot to go into
/// - `404 NOT_FOUND` - Character does not exist
/// - `409 CONFLICT` - Character was modified concurrently
pub async fn equip_item(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ApiJson(item): ApiJson<Item>,
) -> Result<Json<Equipment>, AppError> {
    Ok(Json(sheets.equip(&id, item).await?))
}

/// Clear an equipment slot
///
/// Clearing an empty slot is not an error.
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Missing `slot`
/// - `404 NOT_FOUND` - Character does not exist
pub async fn unequip_item(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<UnequipQuery>,
) -> Result<StatusCode, AppError> {
    sheets.unequip(&id, &query.slot).await?;

    Ok(StatusCode::NO_CONTENT)
}
