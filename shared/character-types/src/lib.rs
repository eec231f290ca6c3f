//! Character sheet data model
//!
//! Types shared between the storage layer, the backend and the client: characters,
//! catalog items and spells, and the in-memory mutations applied to a character
//! document before it is written back.

mod ability;
mod character;
mod item;
mod patch;
mod spell;

pub use ability::{Ability, AbilityScores, AbilitySummary};
pub use character::{Character, Equipment, SheetError};
pub use item::{Armor, CatalogItemId, Gear, Item, ItemReference, Weapon};
pub use patch::{CharacterPatch, PatchError, PatchField, PatchValue, ValueKind};
pub use spell::Spell;

/// Treats an empty identifier the same as a missing one
pub(crate) fn present_id(id: Option<&String>) -> Option<&str> {
    id.map(String::as_str).filter(|id| !id.is_empty())
}
