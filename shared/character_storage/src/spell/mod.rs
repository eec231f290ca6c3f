//! Spell catalog storage module for `DynamoDB` operations

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use character_types::Spell;
pub use error::{SpellStorageError, SpellStorageResult};
use serde_dynamo::{from_items, to_item};
use strum::Display;

use crate::conditional::is_conditional_check_failure;

/// `DynamoDB` attribute names for the spell catalog table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SpellAttribute {
    /// Primary key - spell ID (UUID v4)
    SpellId,
}

/// Storage client for spell catalog operations
pub struct SpellStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl SpellStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for catalog spells
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Lists every catalog spell
    ///
    /// # Errors
    ///
    /// Returns `SpellStorageError` if the `DynamoDB` scan fails or an item cannot be parsed
    pub async fn list(&self) -> SpellStorageResult<Vec<Spell>> {
        let mut spells = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;

            spells.extend(from_items::<_, Spell>(response.items.unwrap_or_default())?);

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(spells)
    }

    /// Get a single catalog spell by ID
    ///
    /// # Errors
    ///
    /// Returns `SpellStorageError` if the `DynamoDB` get operation fails
    pub async fn get_one(&self, spell_id: &str) -> SpellStorageResult<Option<Spell>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                SpellAttribute::SpellId.to_string(),
                AttributeValue::S(spell_id.to_string()),
            )
            .send()
            .await?;

        response
            .item()
            .map(|item| {
                serde_dynamo::from_item(item.clone())
                    .map_err(|e| SpellStorageError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    /// Stores a new catalog spell under a generated UUID
    ///
    /// # Errors
    ///
    /// Returns `SpellStorageError` if the `DynamoDB` put operation fails
    pub async fn create(&self, spell: Spell) -> SpellStorageResult<Spell> {
        let spell = Spell {
            spell_id: Some(uuid::Uuid::new_v4().to_string()),
            ..spell
        };

        let item = to_item(&spell)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", SpellAttribute::SpellId.to_string())
            .send()
            .await
            .map_err(|err| {
                if is_conditional_check_failure(&err) {
                    SpellStorageError::SpellExists
                } else {
                    err.into()
                }
            })?;

        Ok(spell)
    }

    /// Delete a catalog spell by ID
    ///
    /// # Errors
    ///
    /// Returns `SpellStorageError` if the `DynamoDB` delete operation fails
    pub async fn delete(&self, spell_id: &str) -> SpellStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                SpellAttribute::SpellId.to_string(),
                AttributeValue::S(spell_id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }
}
