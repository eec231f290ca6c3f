//! Partial updates of a character document
//!
//! A patch arrives as a loose map of field name to JSON value. Only the scalar
//! fields listed in [`PatchField`] may be patched; identifiers, embedded
//! collections and bookkeeping fields are rewritten through their own operations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::Ability;

/// Prefix for patching a single ability score, e.g. `abilities.strength`
const ABILITIES_PREFIX: &str = "abilities.";

/// Value kind expected by a patchable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text
    Text,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Int32 => f.write_str("32-bit integer"),
            Self::Int64 => f.write_str("64-bit integer"),
        }
    }
}

/// Fields that may be written by a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatchField {
    /// `name`
    Name,
    /// `race`
    Race,
    /// `class_name`
    ClassName,
    /// `alignment`
    Alignment,
    /// `background`
    Background,
    /// `level`
    Level,
    /// `experience`
    Experience,
    /// `hit_points`
    HitPoints,
    /// `max_hit_points`
    MaxHitPoints,
    /// `armor_class`
    ArmorClass,
    /// `speed`
    Speed,
    /// `gold`
    Gold,
    /// `abilities.<ability>`
    Ability(Ability),
}

impl PatchField {
    /// Kind of value the field holds
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Race | Self::ClassName | Self::Alignment | Self::Background => {
                ValueKind::Text
            }
            Self::Level
            | Self::HitPoints
            | Self::MaxHitPoints
            | Self::ArmorClass
            | Self::Speed
            | Self::Ability(_) => ValueKind::Int32,
            Self::Experience | Self::Gold => ValueKind::Int64,
        }
    }

    /// Attribute path of the field in the stored document
    #[must_use]
    pub fn path(self) -> Vec<String> {
        match self {
            Self::Name => vec!["name".to_string()],
            Self::Race => vec!["race".to_string()],
            Self::ClassName => vec!["class_name".to_string()],
            Self::Alignment => vec!["alignment".to_string()],
            Self::Background => vec!["background".to_string()],
            Self::Level => vec!["level".to_string()],
            Self::Experience => vec!["experience".to_string()],
            Self::HitPoints => vec!["hit_points".to_string()],
            Self::MaxHitPoints => vec!["max_hit_points".to_string()],
            Self::ArmorClass => vec!["armor_class".to_string()],
            Self::Speed => vec!["speed".to_string()],
            Self::Gold => vec!["gold".to_string()],
            Self::Ability(ability) => vec!["abilities".to_string(), ability.to_string()],
        }
    }
}

impl fmt::Display for PatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path().join("."))
    }
}

impl FromStr for PatchField {
    type Err = PatchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some(ability) = name.strip_prefix(ABILITIES_PREFIX) {
            return Ability::from_str(ability)
                .map(Self::Ability)
                .map_err(|_| PatchError::UnknownField(name.to_string()));
        }

        let field = match name {
            "name" => Self::Name,
            "race" => Self::Race,
            "class_name" => Self::ClassName,
            "alignment" => Self::Alignment,
            "background" => Self::Background,
            "level" => Self::Level,
            "experience" => Self::Experience,
            "hit_points" => Self::HitPoints,
            "max_hit_points" => Self::MaxHitPoints,
            "armor_class" => Self::ArmorClass,
            "speed" => Self::Speed,
            "gold" => Self::Gold,
            _ => return Err(PatchError::UnknownField(name.to_string())),
        };
        Ok(field)
    }
}

/// A validated patch value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
}

/// Errors raised while validating a patch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The field is not part of the patchable schema
    #[error("Field `{0}` cannot be patched")]
    UnknownField(String),

    /// The value cannot be read as the field's kind
    #[error("Field `{field}` expects a {expected} value")]
    InvalidValue {
        /// Field name
        field: String,
        /// Expected kind
        expected: ValueKind,
    },
}

/// A set of validated field writes for one character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPatch {
    fields: BTreeMap<PatchField, PatchValue>,
}

impl CharacterPatch {
    /// Validates a raw field map against the patchable schema
    ///
    /// Integer fields also accept numeric strings.
    ///
    /// # Errors
    ///
    /// Returns `PatchError` for the first unknown field or mistyped value.
    pub fn from_fields(fields: HashMap<String, Value>) -> Result<Self, PatchError> {
        let mut patch = Self::default();
        for (name, value) in fields {
            let field = PatchField::from_str(&name)?;
            let value = coerce(field.kind(), &value).ok_or_else(|| PatchError::InvalidValue {
                field: name,
                expected: field.kind(),
            })?;
            patch.fields.insert(field, value);
        }
        Ok(patch)
    }

    /// Adds a single field write
    #[must_use]
    pub fn with(mut self, field: PatchField, value: PatchValue) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Iterates over the writes in field order
    pub fn iter(&self) -> impl Iterator<Item = (PatchField, &PatchValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }
}

fn coerce(kind: ValueKind, value: &Value) -> Option<PatchValue> {
    match kind {
        ValueKind::Text => match value {
            Value::String(text) => Some(PatchValue::Text(text.clone())),
            Value::Number(number) => Some(PatchValue::Text(number.to_string())),
            Value::Bool(flag) => Some(PatchValue::Text(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        },
        ValueKind::Int32 => integer(value)
            .filter(|number| i32::try_from(*number).is_ok())
            .map(PatchValue::Integer),
        ValueKind::Int64 => integer(value).map(PatchValue::Integer),
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
