//! Character storage module for `DynamoDB` operations
//!
//! Every character is a single item keyed by `character_id`. Read-modify-write
//! paths go through [`CharacterStorage::update`] and
//! [`CharacterStorage::update_equipment`], which only succeed if the stored
//! `revision` still matches the one that was read.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use character_types::{Character, CharacterPatch, Equipment, PatchValue};
pub use error::{CharacterStorageError, CharacterStorageResult};
use serde_dynamo::{from_items, to_attribute_value, to_item};
use strum::Display;
use uuid::Uuid;

use crate::conditional::is_conditional_check_failure;

/// `DynamoDB` attribute names for the character table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CharacterAttribute {
    /// Primary key - character ID (UUID v4)
    CharacterId,
    /// Equipped items by slot
    Equipment,
    /// Token rotated on every write
    Revision,
}

/// Storage client for character operations
pub struct CharacterStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl CharacterStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for characters
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Lists every character, following scan pagination until exhausted
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError` if the `DynamoDB` scan fails or an item cannot be parsed
    pub async fn list(&self) -> CharacterStorageResult<Vec<Character>> {
        let mut characters = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;

            let items = response.items.unwrap_or_default();
            characters.extend(from_items::<_, Character>(items)?);

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(characters)
    }

    /// Get a single character by ID
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError` if the `DynamoDB` get operation fails
    pub async fn get_one(&self, character_id: &str) -> CharacterStorageResult<Option<Character>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                CharacterAttribute::CharacterId.to_string(),
                AttributeValue::S(character_id.to_string()),
            )
            .send()
            .await?;

        response
            .item()
            .map(|item| {
                serde_dynamo::from_item(item.clone())
                    .map_err(|e| CharacterStorageError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    /// Create a new character with a generated UUID
    ///
    /// Any ID or revision on the payload is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError` if the `DynamoDB` put operation fails
    pub async fn create(&self, character: Character) -> CharacterStorageResult<Character> {
        let character = Character {
            character_id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().timestamp(),
            revision: Some(new_revision()),
            ..character
        };

        let item = to_item(&character)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", CharacterAttribute::CharacterId.to_string())
            .send()
            .await
            .map_err(|err| {
                if is_conditional_check_failure(&err) {
                    CharacterStorageError::CharacterExists
                } else {
                    err.into()
                }
            })?;

        Ok(character)
    }

    /// Overwrites the stored character, forcing its ID to `character_id`
    ///
    /// This is an unconditional write: it wins over any concurrent update.
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError` if the `DynamoDB` put operation fails
    pub async fn replace(
        &self,
        character_id: &str,
        character: Character,
    ) -> CharacterStorageResult<Character> {
        let character = Character {
            character_id: character_id.to_string(),
            revision: Some(new_revision()),
            ..character
        };

        let item = to_item(&character)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(character)
    }

    /// Writes only the patched fields of an existing character
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError::CharacterNotFound` if the character does not exist,
    /// or another `CharacterStorageError` if the `DynamoDB` update fails
    pub async fn patch(
        &self,
        character_id: &str,
        patch: &CharacterPatch,
    ) -> CharacterStorageResult<()> {
        let mut assignments = vec!["#revision = :revision".to_string()];
        let mut request = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(
                CharacterAttribute::CharacterId.to_string(),
                AttributeValue::S(character_id.to_string()),
            )
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", CharacterAttribute::CharacterId.to_string())
            .expression_attribute_names("#revision", CharacterAttribute::Revision.to_string())
            .expression_attribute_values(":revision", AttributeValue::S(new_revision()));

        for (index, (field, value)) in patch.iter().enumerate() {
            let mut path = Vec::new();
            for (depth, segment) in field.path().into_iter().enumerate() {
                let placeholder = format!("#f{index}_{depth}");
                request = request.expression_attribute_names(&placeholder, segment);
                path.push(placeholder);
            }

            let value_placeholder = format!(":v{index}");
            request = request.expression_attribute_values(&value_placeholder, patch_value(value));
            assignments.push(format!("{} = {value_placeholder}", path.join(".")));
        }

        request
            .update_expression(format!("SET {}", assignments.join(", ")))
            .send()
            .await
            .map_err(|err| {
                if is_conditional_check_failure(&err) {
                    CharacterStorageError::CharacterNotFound(character_id.to_string())
                } else {
                    err.into()
                }
            })?;

        Ok(())
    }

    /// Rewrites the whole character if nobody else wrote it since it was read
    ///
    /// Returns the character as stored, carrying its new revision.
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError::RevisionConflict` if the stored revision no longer
    /// matches `character.revision` (or the character was deleted), or another
    /// `CharacterStorageError` if the `DynamoDB` put operation fails
    pub async fn update(&self, character: &Character) -> CharacterStorageResult<Character> {
        let updated = Character {
            revision: Some(new_revision()),
            ..character.clone()
        };

        let item = to_item(&updated)?;
        let (condition, expected_revision) = revision_condition(character.revision.as_deref());

        let mut request = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(condition)
            .expression_attribute_names("#pk", CharacterAttribute::CharacterId.to_string())
            .expression_attribute_names("#revision", CharacterAttribute::Revision.to_string());
        if let Some(expected_revision) = expected_revision {
            request = request.expression_attribute_values(":expected_revision", expected_revision);
        }

        request.send().await.map_err(|err| {
            if is_conditional_check_failure(&err) {
                tracing::debug!("Revision conflict on character {}", character.character_id);
                CharacterStorageError::RevisionConflict(character.character_id.clone())
            } else {
                err.into()
            }
        })?;

        Ok(updated)
    }

    /// Writes only the equipment of a character, guarded by its revision
    ///
    /// Returns the new revision.
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError::RevisionConflict` if the stored revision no longer
    /// matches `expected_revision`, or another `CharacterStorageError` if the `DynamoDB`
    /// update fails
    pub async fn update_equipment(
        &self,
        character_id: &str,
        equipment: &Equipment,
        expected_revision: Option<&str>,
    ) -> CharacterStorageResult<String> {
        let next_revision = new_revision();
        let equipment: AttributeValue = to_attribute_value(equipment)?;
        let (condition, expected_revision) = revision_condition(expected_revision);

        let mut request = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(
                CharacterAttribute::CharacterId.to_string(),
                AttributeValue::S(character_id.to_string()),
            )
            .update_expression("SET #equipment = :equipment, #revision = :next_revision")
            .condition_expression(condition)
            .expression_attribute_names("#pk", CharacterAttribute::CharacterId.to_string())
            .expression_attribute_names("#equipment", CharacterAttribute::Equipment.to_string())
            .expression_attribute_names("#revision", CharacterAttribute::Revision.to_string())
            .expression_attribute_values(":equipment", equipment)
            .expression_attribute_values(":next_revision", AttributeValue::S(next_revision.clone()));
        if let Some(expected_revision) = expected_revision {
            request = request.expression_attribute_values(":expected_revision", expected_revision);
        }

        request.send().await.map_err(|err| {
            if is_conditional_check_failure(&err) {
                tracing::debug!("Revision conflict on character {character_id} equipment");
                CharacterStorageError::RevisionConflict(character_id.to_string())
            } else {
                err.into()
            }
        })?;

        Ok(next_revision)
    }

    /// Delete a character by ID
    ///
    /// # Errors
    ///
    /// Returns `CharacterStorageError` if the `DynamoDB` delete operation fails
    pub async fn delete(&self, character_id: &str) -> CharacterStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                CharacterAttribute::CharacterId.to_string(),
                AttributeValue::S(character_id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }
}

fn new_revision() -> String {
    Uuid::new_v4().to_string()
}

/// Condition expression guarding a write on the revision that was read
///
/// Documents written before revisions existed have no `revision` attribute.
fn revision_condition(expected: Option<&str>) -> (&'static str, Option<AttributeValue>) {
    match expected {
        Some(revision) => (
            "attribute_exists(#pk) AND #revision = :expected_revision",
            Some(AttributeValue::S(revision.to_string())),
        ),
        None => (
            "attribute_exists(#pk) AND attribute_not_exists(#revision)",
            None,
        ),
    }
}

fn patch_value(value: &PatchValue) -> AttributeValue {
    match value {
        PatchValue::Text(text) => AttributeValue::S(text.clone()),
        PatchValue::Integer(number) => AttributeValue::N(number.to_string()),
    }
}
