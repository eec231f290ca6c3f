use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::present_id;

/// Slot a weapon goes to when it does not name one
const DEFAULT_WEAPON_SLOT: &str = "main_hand";

/// Slot armor goes to when it does not name one
const DEFAULT_ARMOR_SLOT: &str = "body";

/// An item, either standalone in the catalog or embedded in a character
///
/// The `type` field selects the subtype before the rest of the body is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// Melee or ranged weapon
    Weapon(Weapon),
    /// Wearable armor, shields and helmets
    Armor(Armor),
    /// Anything else: tools, potions, rings
    Gear(Gear),
}

/// Weapon fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Weapon {
    /// Catalog ID, absent for an item that was never stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Weight in pounds
    pub weight: f64,
    /// Cost in copper pieces
    pub cost: i64,
    /// Equipment slot, defaults to `main_hand`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Damage dice, e.g. `1d8`
    pub damage: String,
    /// Damage type, e.g. `slashing`
    pub damage_type: String,
}

/// Armor fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Armor {
    /// Catalog ID, absent for an item that was never stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Weight in pounds
    pub weight: f64,
    /// Cost in copper pieces
    pub cost: i64,
    /// Equipment slot, defaults to `body`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Armor class granted while worn
    pub armor_class: i32,
}

/// General gear fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Gear {
    /// Catalog ID, absent for an item that was never stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Weight in pounds
    pub weight: f64,
    /// Cost in copper pieces
    pub cost: i64,
    /// Equipment slot; gear without one cannot be equipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Stack size
    pub quantity: i64,
}

impl Item {
    /// Catalog ID, if the item carries a non-empty one
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        present_id(match self {
            Self::Weapon(weapon) => weapon.item_id.as_ref(),
            Self::Armor(armor) => armor.item_id.as_ref(),
            Self::Gear(gear) => gear.item_id.as_ref(),
        })
    }

    /// Assigns the catalog ID
    pub fn set_id(&mut self, id: String) {
        let item_id = match self {
            Self::Weapon(weapon) => &mut weapon.item_id,
            Self::Armor(armor) => &mut armor.item_id,
            Self::Gear(gear) => &mut gear.item_id,
        };
        *item_id = Some(id);
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(weapon) => &weapon.name,
            Self::Armor(armor) => &armor.name,
            Self::Gear(gear) => &gear.name,
        }
    }

    /// Slot the item occupies when equipped
    #[must_use]
    pub fn target_slot(&self) -> Option<&str> {
        match self {
            Self::Weapon(weapon) => Some(weapon.slot.as_deref().unwrap_or(DEFAULT_WEAPON_SLOT)),
            Self::Armor(armor) => Some(armor.slot.as_deref().unwrap_or(DEFAULT_ARMOR_SLOT)),
            Self::Gear(gear) => gear.slot.as_deref(),
        }
        .filter(|slot| !slot.is_empty())
    }
}

/// Body of an "add to inventory" request
///
/// Either a full item, or only the ID of an item already in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ItemReference {
    /// A full item body, new when it has no ID
    Full(Item),
    /// Reference to an existing catalog item
    ById(CatalogItemId),
}

/// Bare `{ "item_id": ... }` body
///
/// Any other key, `type` included, means the body was meant as a full item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CatalogItemId {
    /// Catalog ID
    pub item_id: String,
}

impl ItemReference {
    /// Reference to a catalog item by ID
    #[must_use]
    pub const fn by_id(item_id: String) -> Self {
        Self::ById(CatalogItemId { item_id })
    }

    /// Catalog ID the reference points at, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Full(item) => item.id(),
            Self::ById(reference) => present_id(Some(&reference.item_id)),
        }
    }
}

impl From<Item> for ItemReference {
    fn from(item: Item) -> Self {
        Self::Full(item)
    }
}
