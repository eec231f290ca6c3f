//! DynamoDB storage for the character sheet service
//!
//! One table per entity: characters keyed by `character_id`, and the item and
//! spell catalogs keyed by `item_id` and `spell_id`. Documents are stored as
//! nested maps mirroring the in-memory shape.

mod conditional;

pub mod character;
pub mod item;
pub mod spell;
