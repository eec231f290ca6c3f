//! Known spells of a character

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use character_types::Spell;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    character_sheet::CharacterSheets,
    types::{ApiJson, AppError, ValidatedQuery},
};

/// Query for forgetting a spell
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSpellQuery {
    /// Catalog ID of the spell to remove
    #[validate(length(min = 1))]
    pub spell_id: String,
}

/// Teach a character a spell
///
/// A spell without an ID is stored in the spell catalog first; a spell with
/// an ID must already be in the catalog.
///
/// # Returns
///
/// Returns `200 OK` with the catalog copy of the spell
///
/// # Errors
///
/// Returns an error if:
/// - `404 NOT_FOUND` - Character, or the referenced catalog spell, does not exist
/// - `409 CONFLICT` - Character was modified concurrently
pub async fn add_spell(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ApiJson(spell): ApiJson<Spell>,
) -> Result<Json<Spell>, AppError> {
    Ok(Json(sheets.add_spell(&id, spell).await?))
}

/// Remove every copy of a spell from a character
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Missing `spellId`
/// - `404 NOT_FOUND` - Character does not exist
pub async fn remove_spell(
    Extension(sheets): Extension<Arc<CharacterSheets>>,
    Path(id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<RemoveSpellQuery>,
) -> Result<StatusCode, AppError> {
    sheets.remove_spell(&id, &query.spell_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
