//! Error types for item catalog storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, get_item::GetItemError, put_item::PutItemError,
    scan::ScanError,
};
use thiserror::Error;

/// Result type alias for storage operations
pub type ItemStorageResult<T> = Result<T, ItemStorageError>;

/// Storage error types for item catalog operations
#[derive(Debug, Error)]
pub enum ItemStorageError {
    /// Failed to insert item into `DynamoDB`
    #[error("Failed to insert item into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to get item from `DynamoDB`
    #[error("Failed to get item from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to scan items from `DynamoDB`
    #[error("Failed to scan items from DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to delete item from `DynamoDB`
    #[error("Failed to delete item from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// An item with the generated ID already exists
    #[error("Item already exists")]
    ItemExists,

    /// Failed to convert item to or from a `DynamoDB` item
    #[error("Failed to parse item: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for ItemStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
