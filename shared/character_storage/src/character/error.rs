//! Error types for character storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, get_item::GetItemError, put_item::PutItemError,
    scan::ScanError, update_item::UpdateItemError,
};
use thiserror::Error;

/// Result type alias for storage operations
pub type CharacterStorageResult<T> = Result<T, CharacterStorageError>;

/// Storage error types for character operations
#[derive(Debug, Error)]
pub enum CharacterStorageError {
    /// Failed to write character into `DynamoDB`
    #[error("Failed to write character into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to get character from `DynamoDB`
    #[error("Failed to get character from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to scan characters from `DynamoDB`
    #[error("Failed to scan characters from DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to update character in `DynamoDB`
    #[error("Failed to update character in DynamoDB: {0:?}")]
    DynamoDbUpdateError(#[from] SdkError<UpdateItemError>),

    /// Failed to delete character from `DynamoDB`
    #[error("Failed to delete character from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// A character with the generated ID already exists
    #[error("Character already exists")]
    CharacterExists,

    /// The character to update does not exist
    #[error("Character {0} not found")]
    CharacterNotFound(String),

    /// The stored revision changed since the character was read
    #[error("Character {0} was modified concurrently")]
    RevisionConflict(String),

    /// Failed to convert character to or from a `DynamoDB` item
    #[error("Failed to parse character: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for CharacterStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
