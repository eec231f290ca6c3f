//! Item, spell and equipment sub-resources of a character
//!
//! Each operation loads the character document, resolves the referenced
//! catalog entity (looking it up by ID, or storing it when it has none),
//! splices it into the document and writes the document back guarded by the
//! revision that was read.

mod error;

use std::sync::Arc;

use character_storage::{character::CharacterStorage, item::ItemStorage, spell::SpellStorage};
use character_types::{Character, Equipment, Item, ItemReference, SheetError, Spell};

pub use error::{CharacterSheetError, CharacterSheetResult};

/// Resolver for the inventory, spells and equipment of characters
pub struct CharacterSheets {
    characters: Arc<CharacterStorage>,
    items: Arc<ItemStorage>,
    spells: Arc<SpellStorage>,
}

impl CharacterSheets {
    /// Creates a new resolver over the character table and both catalogs
    #[must_use]
    pub const fn new(
        characters: Arc<CharacterStorage>,
        items: Arc<ItemStorage>,
        spells: Arc<SpellStorage>,
    ) -> Self {
        Self {
            characters,
            items,
            spells,
        }
    }

    /// Adds an item to the character's inventory
    ///
    /// An item without an ID is stored in the catalog first; an item with an
    /// ID must already exist there. The catalog copy is what gets appended.
    /// A catalog entry created here is removed again if the character write fails.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` or `ItemNotFound` for missing entities, and
    /// storage errors (including revision conflicts) from the writes
    #[tracing::instrument(skip(self, item))]
    pub async fn add_inventory_item(
        &self,
        character_id: &str,
        item: ItemReference,
    ) -> CharacterSheetResult<Item> {
        let mut character = self.load(character_id).await?;

        let (item, created) = match item {
            ItemReference::Full(item) if item.id().is_none() => {
                (self.items.create(item).await?, true)
            }
            reference => {
                let item_id = reference.id().ok_or(SheetError::MissingItemId)?;
                let item = self
                    .items
                    .get_one(item_id)
                    .await?
                    .ok_or_else(|| CharacterSheetError::ItemNotFound(item_id.to_string()))?;
                (item, false)
            }
        };

        character.inventory.push(item.clone());
        if let Err(err) = self.characters.update(&character).await {
            if created {
                self.discard_item(&item).await;
            }
            return Err(err.into());
        }

        tracing::debug!("Added item {:?} to character {character_id}", item.id());
        Ok(item)
    }

    /// Replaces an inventory entry, refreshing every equipped copy of it
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the item has no ID or the character does
    /// not carry it, `CharacterNotFound` if the character does not exist
    #[tracing::instrument(skip(self, item))]
    pub async fn replace_inventory_item(
        &self,
        character_id: &str,
        item: Item,
    ) -> CharacterSheetResult<()> {
        let mut character = self.load(character_id).await?;

        character.replace_item(item)?;
        self.characters.update(&character).await?;

        Ok(())
    }

    /// Removes every inventory entry with the given item ID
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist
    #[tracing::instrument(skip(self))]
    pub async fn remove_inventory_item(
        &self,
        character_id: &str,
        item_id: &str,
    ) -> CharacterSheetResult<()> {
        let mut character = self.load(character_id).await?;

        if character.remove_items(item_id) > 0 {
            self.characters.update(&character).await?;
        }

        Ok(())
    }

    /// Teaches the character a spell, returning the catalog copy
    ///
    /// Resolved against the spell catalog the same way as inventory items.
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` or `SpellNotFound` for missing entities
    #[tracing::instrument(skip(self, spell))]
    pub async fn add_spell(&self, character_id: &str, spell: Spell) -> CharacterSheetResult<Spell> {
        let mut character = self.load(character_id).await?;

        let (spell, created) = match spell.id().map(str::to_string) {
            Some(spell_id) => {
                let spell = self
                    .spells
                    .get_one(&spell_id)
                    .await?
                    .ok_or(CharacterSheetError::SpellNotFound(spell_id))?;
                (spell, false)
            }
            None => (self.spells.create(spell).await?, true),
        };

        character.spells.push(spell.clone());
        if let Err(err) = self.characters.update(&character).await {
            if created {
                self.discard_spell(&spell).await;
            }
            return Err(err.into());
        }

        Ok(spell)
    }

    /// Removes every known spell with the given spell ID
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist
    #[tracing::instrument(skip(self))]
    pub async fn remove_spell(&self, character_id: &str, spell_id: &str) -> CharacterSheetResult<()> {
        let mut character = self.load(character_id).await?;

        if character.remove_spells(spell_id) > 0 {
            self.characters.update(&character).await?;
        }

        Ok(())
    }

    /// Puts the item into its slot and returns the resulting equipment
    ///
    /// Only the equipment attribute is written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the item has no slot, `CharacterNotFound`
    /// if the character does not exist
    #[tracing::instrument(skip(self, item))]
    pub async fn equip(&self, character_id: &str, item: Item) -> CharacterSheetResult<Equipment> {
        let mut character = self.load(character_id).await?;

        if let Some(previous) = character.equip(item)? {
            tracing::debug!("Replaced {} in character {character_id}", previous.name());
        }
        self.characters
            .update_equipment(
                character_id,
                &character.equipment,
                character.revision.as_deref(),
            )
            .await?;

        Ok(character.equipment)
    }

    /// Clears an equipment slot
    ///
    /// # Errors
    ///
    /// Returns `CharacterNotFound` if the character does not exist
    #[tracing::instrument(skip(self))]
    pub async fn unequip(&self, character_id: &str, slot: &str) -> CharacterSheetResult<()> {
        let mut character = self.load(character_id).await?;

        if character.unequip(slot).is_some() {
            self.characters
                .update_equipment(
                    character_id,
                    &character.equipment,
                    character.revision.as_deref(),
                )
                .await?;
        }

        Ok(())
    }

    async fn discard_item(&self, item: &Item) {
        let Some(item_id) = item.id() else {
            return;
        };
        if let Err(err) = self.items.delete(item_id).await {
            tracing::warn!("Failed to remove catalog item {item_id} after a failed write: {err}");
        }
    }

    async fn discard_spell(&self, spell: &Spell) {
        let Some(spell_id) = spell.id() else {
            return;
        };
        if let Err(err) = self.spells.delete(spell_id).await {
            tracing::warn!("Failed to remove catalog spell {spell_id} after a failed write: {err}");
        }
    }

    async fn load(&self, character_id: &str) -> CharacterSheetResult<Character> {
        self.characters
            .get_one(character_id)
            .await?
            .ok_or_else(|| CharacterSheetError::CharacterNotFound(character_id.to_string()))
    }
}
