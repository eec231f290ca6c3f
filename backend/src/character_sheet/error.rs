//! Error types for character sheet operations

use character_storage::{
    character::CharacterStorageError, item::ItemStorageError, spell::SpellStorageError,
};
use character_types::SheetError;
use thiserror::Error;

/// Result type for character sheet operations
pub type CharacterSheetResult<T> = Result<T, CharacterSheetError>;

/// Errors that can occur while resolving and splicing sub-resources
#[derive(Error, Debug)]
pub enum CharacterSheetError {
    /// The character does not exist
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    /// The referenced item is not in the catalog
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The referenced spell is not in the catalog
    #[error("Spell not found: {0}")]
    SpellNotFound(String),

    /// The mutation is not valid for this character
    #[error(transparent)]
    InvalidOperation(#[from] SheetError),

    /// Character table failure
    #[error(transparent)]
    CharacterStorage(#[from] CharacterStorageError),

    /// Item catalog failure
    #[error(transparent)]
    ItemStorage(#[from] ItemStorageError),

    /// Spell catalog failure
    #[error(transparent)]
    SpellStorage(#[from] SpellStorageError),
}
