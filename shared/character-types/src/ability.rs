use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The six ability scores
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Ability {
    /// Strength
    Strength,
    /// Dexterity
    Dexterity,
    /// Constitution
    Constitution,
    /// Intelligence
    Intelligence,
    /// Wisdom
    Wisdom,
    /// Charisma
    Charisma,
}

impl Ability {
    /// Three letter abbreviation shown on the sheet
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }
}

/// Ability scores of a character
///
/// Scores are stored as given, no range is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AbilityScores {
    /// Strength score
    pub strength: i32,
    /// Dexterity score
    pub dexterity: i32,
    /// Constitution score
    pub constitution: i32,
    /// Intelligence score
    pub intelligence: i32,
    /// Wisdom score
    pub wisdom: i32,
    /// Charisma score
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl AbilityScores {
    /// Returns the score for an ability
    #[must_use]
    pub const fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Overwrites the score for an ability
    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    /// Ability modifier, rounded towards negative infinity (8-9 is -1, 12-13 is +1)
    #[must_use]
    pub const fn modifier(&self, ability: Ability) -> i32 {
        (self.get(ability) - 10).div_euclid(2)
    }

    /// The ability block as printed on the sheet, in `STR` to `CHA` order
    #[must_use]
    pub fn summary(&self) -> Vec<AbilitySummary> {
        Ability::iter()
            .map(|ability| AbilitySummary {
                ability,
                abbreviation: ability.abbreviation().to_string(),
                score: self.get(ability),
                modifier: self.modifier(ability),
            })
            .collect()
    }
}

/// One ability with its score and derived modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AbilitySummary {
    /// Ability
    pub ability: Ability,
    /// Three letter abbreviation, e.g. `DEX`
    pub abbreviation: String,
    /// Raw score
    pub score: i32,
    /// Modifier added to rolls
    pub modifier: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_modifier_rounds_down() {
        let mut scores = AbilityScores::default();
        for (score, expected) in [(1, -5), (8, -1), (9, -1), (10, 0), (11, 0), (12, 1), (20, 5)] {
            scores.set(Ability::Wisdom, score);
            assert_eq!(scores.modifier(Ability::Wisdom), expected, "score {score}");
        }
    }

    #[test]
    fn test_ability_names_round_trip_through_strum() {
        for ability in Ability::iter() {
            assert_eq!(Ability::from_str(&ability.to_string()).unwrap(), ability);
        }
        assert_eq!(Ability::Constitution.to_string(), "constitution");
        assert_eq!(Ability::Constitution.abbreviation(), "CON");
    }

    #[test]
    fn test_missing_scores_default_to_ten() {
        let scores: AbilityScores = serde_json::from_str(r#"{"strength": 18}"#).unwrap();
        assert_eq!(scores.strength, 18);
        assert_eq!(scores.charisma, 10);
    }

    #[test]
    fn test_summary_lists_every_ability_in_sheet_order() {
        let scores = AbilityScores {
            strength: 8,
            dexterity: 17,
            ..AbilityScores::default()
        };

        let summary = scores.summary();

        let abbreviations: Vec<&str> = summary.iter().map(|row| row.abbreviation.as_str()).collect();
        assert_eq!(abbreviations, ["STR", "DEX", "CON", "INT", "WIS", "CHA"]);
        assert_eq!(
            summary[1],
            AbilitySummary {
                ability: Ability::Dexterity,
                abbreviation: "DEX".to_string(),
                score: 17,
                modifier: 3,
            }
        );
        assert_eq!(summary[0].modifier, -1);
    }
}
