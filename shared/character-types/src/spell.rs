use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::present_id;

/// A spell, either standalone in the catalog or known by a character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Spell {
    /// Catalog ID, absent for a spell that was never stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_id: Option<String>,
    /// Display name
    pub name: String,
    /// Spell level, 0 for cantrips
    pub level: i32,
    /// School of magic
    pub school: String,
    /// Casting time, e.g. `1 action`
    pub casting_time: String,
    /// Range, e.g. `120 feet`
    pub range: String,
    /// Components, e.g. `V, S, M`
    pub components: String,
    /// Duration, e.g. `Instantaneous`
    pub duration: String,
    /// Free-form description
    pub description: String,
}

impl Spell {
    /// Catalog ID, if the spell carries a non-empty one
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        present_id(self.spell_id.as_ref())
    }
}
