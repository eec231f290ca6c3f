use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AbilityScores, Item, Spell};

/// Sparse mapping from equipment slot name to the item worn there
pub type Equipment = BTreeMap<String, Item>;

/// Invalid operations on a character sheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Replacing an inventory entry requires the item ID
    #[error("Item does not contain an item id")]
    MissingItemId,

    /// The character does not carry the referenced item
    #[error("Character does not have item {0}")]
    ItemNotInInventory(String),

    /// The item has no slot it could be equipped to
    #[error("Item {0} cannot be equipped, it has no slot")]
    NoEquipmentSlot(String),
}

/// A character document
///
/// Stored as a single record keyed by `character_id`; inventory, spells and
/// equipment are embedded copies of catalog entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Character {
    /// Primary key, assigned by the server on creation
    pub character_id: String,
    /// Character name
    pub name: String,
    /// Race, e.g. `Half-Elf`
    pub race: String,
    /// Class, e.g. `Wizard`
    pub class_name: String,
    /// Alignment, e.g. `Chaotic Good`
    pub alignment: String,
    /// Background, e.g. `Sage`
    pub background: String,
    /// Character level
    pub level: i32,
    /// Experience points
    pub experience: i64,
    /// Current hit points
    pub hit_points: i32,
    /// Maximum hit points
    pub max_hit_points: i32,
    /// Armor class
    pub armor_class: i32,
    /// Walking speed in feet
    pub speed: i32,
    /// Gold pieces
    pub gold: i64,
    /// Ability scores
    pub abilities: AbilityScores,
    /// Carried items, in acquisition order
    pub inventory: Vec<Item>,
    /// Known spells, in the order they were learned
    pub spells: Vec<Spell>,
    /// Equipped items by slot
    pub equipment: Equipment,
    /// Creation timestamp (unix seconds)
    pub created_at: i64,
    /// Token rotated on every write, used for conditional updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Character {
    /// Replaces an inventory entry in place, keeping equipped copies in sync
    ///
    /// # Errors
    ///
    /// Returns `SheetError::MissingItemId` if the item has no ID and
    /// `SheetError::ItemNotInInventory` if the character does not carry it.
    pub fn replace_item(&mut self, item: Item) -> Result<(), SheetError> {
        let item_id = item.id().ok_or(SheetError::MissingItemId)?.to_string();

        let entry = self
            .inventory
            .iter_mut()
            .find(|entry| entry.id() == Some(item_id.as_str()))
            .ok_or_else(|| SheetError::ItemNotInInventory(item_id.clone()))?;
        entry.clone_from(&item);

        self.update_equipment(&item);
        Ok(())
    }

    /// Refreshes every equipped copy of the given item
    pub fn update_equipment(&mut self, item: &Item) {
        let Some(item_id) = item.id() else {
            return;
        };

        for equipped in self.equipment.values_mut() {
            if equipped.id() == Some(item_id) {
                equipped.clone_from(item);
            }
        }
    }

    /// Removes every inventory entry with the given ID, returning how many were removed
    pub fn remove_items(&mut self, item_id: &str) -> usize {
        let before = self.inventory.len();
        self.inventory.retain(|item| item.id() != Some(item_id));
        before - self.inventory.len()
    }

    /// Removes every known spell with the given ID, returning how many were removed
    pub fn remove_spells(&mut self, spell_id: &str) -> usize {
        let before = self.spells.len();
        self.spells.retain(|spell| spell.id() != Some(spell_id));
        before - self.spells.len()
    }

    /// Puts the item into its slot, replacing whatever was there
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NoEquipmentSlot` if the item has no target slot.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, SheetError> {
        let slot = item
            .target_slot()
            .ok_or_else(|| SheetError::NoEquipmentSlot(item.name().to_string()))?
            .to_string();

        Ok(self.equipment.insert(slot, item))
    }

    /// Clears a slot, returning the item that was worn there
    pub fn unequip(&mut self, slot: &str) -> Option<Item> {
        self.equipment.remove(slot)
    }
}
