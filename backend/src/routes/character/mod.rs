//! `/character` routes
//!
//! Whole-document operations live here; inventory, spells and equipment are
//! sub-resources resolved through [`crate::character_sheet::CharacterSheets`].

pub mod equipment;
pub mod inventory;
pub mod spells;

use std::collections::HashMap;
use std::sync::Arc;

use aide::axum::{
    routing::{get, put},
    ApiRouter,
};
use axum::{extract::Path, http::StatusCode, Extension, Json};
use character_storage::character::{CharacterStorage, CharacterStorageError};
use character_types::{AbilitySummary, Character, CharacterPatch};
use serde_json::Value;

use crate::types::{ApiJson, AppError};

/// Creates the router for characters and their sub-resources
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/character", get(list_characters).post(create_character))
        .api_route(
            "/character/{id}",
            get(get_character)
                .put(replace_character)
                .patch(patch_character)
                .delete(delete_character),
        )
        .api_route("/character/{id}/abilities", get(get_abilities))
        .api_route(
            "/character/{id}/inventory",
            put(inventory::replace_item)
                .post(inventory::add_item)
                .delete(inventory::remove_item),
        )
        .api_route(
            "/character/{id}/spells",
            put(spells::add_spell).delete(spells::remove_spell),
        )
        .api_route(
            "/character/{id}/equipment",
            put(equipment::equip_item).delete(equipment::unequip_item),
        )
}

/// List every character in the party
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the character table cannot be scanned
pub async fn list_characters(
    Extension(characters): Extension<Arc<CharacterStorage>>,
) -> Result<Json<Vec<Character>>, AppError> {
    Ok(Json(characters.list().await?))
}

/// Get a character by ID
///
/// # Errors
///
/// Returns `404 NOT_FOUND` if the character does not exist
pub async fn get_character(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    Path(id): Path<String>,
) -> Result<Json<Character>, AppError> {
    let character = characters
        .get_one(&id)
        .await?
        .ok_or(CharacterStorageError::CharacterNotFound(id))?;

    Ok(Json(character))
}

/// Get the ability scores of a character with their modifiers
///
/// # Errors
///
/// Returns `404 NOT_FOUND` if the character does not exist
pub async fn get_abilities(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AbilitySummary>>, AppError> {
    let character = characters
        .get_one(&id)
        .await?
        .ok_or(CharacterStorageError::CharacterNotFound(id))?;

    Ok(Json(character.abilities.summary()))
}

/// Create a character
///
/// The server assigns the character ID; any ID in the body is ignored.
///
/// # Returns
///
/// Returns `201 CREATED` with the stored character
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed body
pub async fn create_character(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    ApiJson(character): ApiJson<Character>,
) -> Result<(StatusCode, Json<Character>), AppError> {
    let created = characters.create(character).await?;
    tracing::info!("Created character {}", created.character_id);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a character
///
/// The stored ID is always the one in the path.
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed body
pub async fn replace_character(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    Path(id): Path<String>,
    ApiJson(character): ApiJson<Character>,
) -> Result<Json<Character>, AppError> {
    Ok(Json(characters.replace(&id, character).await?))
}

/// Update individual fields of a character
///
/// The body maps field names (`abilities.<name>` for ability scores) to new
/// values. Fields not named are left untouched.
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns an error if:
/// - `400 BAD_REQUEST` - Unknown field or value of the wrong kind
/// - `404 NOT_FOUND` - Character does not exist
pub async fn patch_character(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<HashMap<String, Value>>,
) -> Result<StatusCode, AppError> {
    let patch = CharacterPatch::from_fields(fields)?;
    characters.patch(&id, &patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a character
///
/// Deleting a character that does not exist is not an error.
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the delete fails
pub async fn delete_character(
    Extension(characters): Extension<Arc<CharacterStorage>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    characters.delete(&id).await?;
    tracing::info!("Deleted character {id}");

    Ok(StatusCode::NO_CONTENT)
}
