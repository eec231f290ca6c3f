//! Item catalog storage module for `DynamoDB` operations
//!
//! Catalog items exist independently of characters; characters embed copies.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use character_types::Item;
pub use error::{ItemStorageError, ItemStorageResult};
use serde_dynamo::{from_items, to_item};
use strum::Display;

use crate::conditional::is_conditional_check_failure;

/// `DynamoDB` attribute names for the item catalog table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ItemAttribute {
    /// Primary key - item ID (UUID v4)
    ItemId,
}

/// Storage client for item catalog operations
pub struct ItemStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl ItemStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for catalog items
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Lists every catalog item
    ///
    /// # Errors
    ///
    /// Returns `ItemStorageError` if the `DynamoDB` scan fails or an item cannot be parsed
    pub async fn list(&self) -> ItemStorageResult<Vec<Item>> {
        let mut items = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;

            items.extend(from_items::<_, Item>(response.items.unwrap_or_default())?);

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Get a single catalog item by ID
    ///
    /// # Errors
    ///
    /// Returns `ItemStorageError` if the `DynamoDB` get operation fails
    pub async fn get_one(&self, item_id: &str) -> ItemStorageResult<Option<Item>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                ItemAttribute::ItemId.to_string(),
                AttributeValue::S(item_id.to_string()),
            )
            .send()
            .await?;

        response
            .item()
            .map(|item| {
                serde_dynamo::from_item(item.clone())
                    .map_err(|e| ItemStorageError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    /// Stores a new catalog item under a generated UUID
    ///
    /// # Errors
    ///
    /// Returns `ItemStorageError` if the `DynamoDB` put operation fails
    pub async fn create(&self, mut item: Item) -> ItemStorageResult<Item> {
        item.set_id(uuid::Uuid::new_v4().to_string());

        let record = to_item(&item)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", ItemAttribute::ItemId.to_string())
            .send()
            .await
            .map_err(|err| {
                if is_conditional_check_failure(&err) {
                    ItemStorageError::ItemExists
                } else {
                    err.into()
                }
            })?;

        tracing::debug!("Created catalog item {} ({})", item.name(), item.id().unwrap_or_default());

        Ok(item)
    }

    /// Delete a catalog item by ID
    ///
    /// Characters keep their embedded copies.
    ///
    /// # Errors
    ///
    /// Returns `ItemStorageError` if the `DynamoDB` delete operation fails
    pub async fn delete(&self, item_id: &str) -> ItemStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                ItemAttribute::ItemId.to_string(),
                AttributeValue::S(item_id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }
}
