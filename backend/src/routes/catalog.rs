//! Item and spell catalog routes

use std::sync::Arc;

use aide::axum::{routing::get, ApiRouter};
use axum::{extract::Path, http::StatusCode, Extension, Json};
use character_storage::{item::ItemStorage, spell::SpellStorage};
use character_types::{Item, Spell};

use crate::types::{ApiJson, AppError};

/// Creates the router for the item and spell catalogs
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/item", get(list_items).post(create_item))
        .api_route("/item/{id}", get(get_item).delete(delete_item))
        .api_route("/spells", get(list_spells).post(create_spell))
        .api_route("/spells/{id}", get(get_spell).delete(delete_spell))
}

fn item_not_found() -> AppError {
    AppError::new(
        StatusCode::NOT_FOUND,
        "item_not_found",
        "Item not found",
        false,
    )
}

fn spell_not_found() -> AppError {
    AppError::new(
        StatusCode::NOT_FOUND,
        "spell_not_found",
        "Spell not found",
        false,
    )
}

/// List the item catalog
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the catalog cannot be scanned
pub async fn list_items(
    Extension(items): Extension<Arc<ItemStorage>>,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(items.list().await?))
}

/// Add an item to the catalog
///
/// # Returns
///
/// Returns `201 CREATED` with the stored item and its new ID
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed item
pub async fn create_item(
    Extension(items): Extension<Arc<ItemStorage>>,
    ApiJson(item): ApiJson<Item>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let created = items.create(item).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a catalog item
///
/// # Errors
///
/// Returns `404 NOT_FOUND` if the item does not exist
pub async fn get_item(
    Extension(items): Extension<Arc<ItemStorage>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    items
        .get_one(&id)
        .await?
        .map(Json)
        .ok_or_else(item_not_found)
}

/// Remove an item from the catalog
///
/// Characters keep their copies.
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the delete fails
pub async fn delete_item(
    Extension(items): Extension<Arc<ItemStorage>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    items.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the spell catalog
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the catalog cannot be scanned
pub async fn list_spells(
    Extension(spells): Extension<Arc<SpellStorage>>,
) -> Result<Json<Vec<Spell>>, AppError> {
    Ok(Json(spells.list().await?))
}

/// Add a spell to the catalog
///
/// # Returns
///
/// Returns `201 CREATED` with the stored spell and its new ID
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed spell
pub async fn create_spell(
    Extension(spells): Extension<Arc<SpellStorage>>,
    ApiJson(spell): ApiJson<Spell>,
) -> Result<(StatusCode, Json<Spell>), AppError> {
    let created = spells.create(spell).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a catalog spell
///
/// # Errors
///
/// Returns `404 NOT_FOUND` if the spell does not exist
pub async fn get_spell(
    Extension(spells): Extension<Arc<SpellStorage>>,
    Path(id): Path<String>,
) -> Result<Json<Spell>, AppError> {
    spells
        .get_one(&id)
        .await?
        .map(Json)
        .ok_or_else(spell_not_found)
}

/// Remove a spell from the catalog
///
/// # Errors
///
/// Returns `503 SERVICE_UNAVAILABLE` if the delete fails
pub async fn delete_spell(
    Extension(spells): Extension<Arc<SpellStorage>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    spells.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
