//! Error types for spell catalog storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, get_item::GetItemError, put_item::PutItemError,
    scan::ScanError,
};
use thiserror::Error;

/// Result type alias for storage operations
pub type SpellStorageResult<T> = Result<T, SpellStorageError>;

/// Storage error types for spell catalog operations
#[derive(Debug, Error)]
pub enum SpellStorageError {
    /// Failed to insert spell into `DynamoDB`
    #[error("Failed to insert spell into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to get spell from `DynamoDB`
    #[error("Failed to get spell from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to scan spells from `DynamoDB`
    #[error("Failed to scan spells from DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to delete spell from `DynamoDB`
    #[error("Failed to delete spell from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// A spell with the generated ID already exists
    #[error("Spell already exists")]
    SpellExists,

    /// Failed to convert spell to or from a `DynamoDB` item
    #[error("Failed to parse spell: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for SpellStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
