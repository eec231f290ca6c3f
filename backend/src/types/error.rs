//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use character_storage::{
    character::CharacterStorageError, item::ItemStorageError, spell::SpellStorageError,
};
use character_types::{PatchError, SheetError};
use schemars::JsonSchema;
use serde::Serialize;

use crate::character_sheet::CharacterSheetError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// Status code the error is rendered with
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }

    const fn character_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "character_not_found",
            "Character not found",
            false,
        )
    }

    const fn database_error() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "database_error",
            "Database service temporarily unavailable",
            true,
        )
    }

    const fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
            false,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

impl From<CharacterStorageError> for AppError {
    fn from(err: CharacterStorageError) -> Self {
        use CharacterStorageError::{
            CharacterExists, CharacterNotFound, DynamoDbDeleteError, DynamoDbGetError,
            DynamoDbPutError, DynamoDbScanError, DynamoDbUpdateError, RevisionConflict,
            SerializationError,
        };

        match &err {
            CharacterNotFound(id) => {
                tracing::debug!("Character not found: {id}");
                Self::character_not_found()
            }
            RevisionConflict(id) => {
                tracing::info!("Concurrent modification of character {id}");
                Self::new(
                    StatusCode::CONFLICT,
                    "concurrent_modification",
                    "Character was modified by another request",
                    true,
                )
            }
            CharacterExists => {
                tracing::error!("Generated character ID collided with an existing one");
                Self::new(
                    StatusCode::CONFLICT,
                    "already_exists",
                    "Character already exists",
                    true,
                )
            }
            DynamoDbPutError(_)
            | DynamoDbGetError(_)
            | DynamoDbScanError(_)
            | DynamoDbUpdateError(_)
            | DynamoDbDeleteError(_) => {
                tracing::error!("DynamoDB error: {err}");
                Self::database_error()
            }
            SerializationError(msg) => {
                tracing::error!("Serialization/Parse error: {msg}");
                Self::internal_error()
            }
        }
    }
}

impl From<ItemStorageError> for AppError {
    fn from(err: ItemStorageError) -> Self {
        use ItemStorageError::{
            DynamoDbDeleteError, DynamoDbGetError, DynamoDbPutError, DynamoDbScanError,
            ItemExists, SerializationError,
        };

        match &err {
            ItemExists => {
                tracing::error!("Generated item ID collided with an existing one");
                Self::new(
                    StatusCode::CONFLICT,
                    "already_exists",
                    "Item already exists",
                    true,
                )
            }
            DynamoDbPutError(_)
            | DynamoDbGetError(_)
            | DynamoDbScanError(_)
            | DynamoDbDeleteError(_) => {
                tracing::error!("DynamoDB error: {err}");
                Self::database_error()
            }
            SerializationError(msg) => {
                tracing::error!("Serialization/Parse error: {msg}");
                Self::internal_error()
            }
        }
    }
}

impl From<SpellStorageError> for AppError {
    fn from(err: SpellStorageError) -> Self {
        use SpellStorageError::{
            DynamoDbDeleteError, DynamoDbGetError, DynamoDbPutError, DynamoDbScanError,
            SerializationError, SpellExists,
        };

        match &err {
            SpellExists => {
                tracing::error!("Generated spell ID collided with an existing one");
                Self::new(
                    StatusCode::CONFLICT,
                    "already_exists",
                    "Spell already exists",
                    true,
                )
            }
            DynamoDbPutError(_)
            | DynamoDbGetError(_)
            | DynamoDbScanError(_)
            | DynamoDbDeleteError(_) => {
                tracing::error!("DynamoDB error: {err}");
                Self::database_error()
            }
            SerializationError(msg) => {
                tracing::error!("Serialization/Parse error: {msg}");
                Self::internal_error()
            }
        }
    }
}

impl From<SheetError> for AppError {
    fn from(err: SheetError) -> Self {
        tracing::debug!("Invalid sheet operation: {err}");
        match err {
            SheetError::MissingItemId => Self::new(
                StatusCode::BAD_REQUEST,
                "missing_item_id",
                "Item does not contain an item id",
                false,
            ),
            SheetError::ItemNotInInventory(_) => Self::new(
                StatusCode::BAD_REQUEST,
                "item_not_in_inventory",
                "Character does not have this item",
                false,
            ),
            SheetError::NoEquipmentSlot(_) => Self::new(
                StatusCode::BAD_REQUEST,
                "missing_equipment_slot",
                "Item has no equipment slot",
                false,
            ),
        }
    }
}

impl From<PatchError> for AppError {
    fn from(err: PatchError) -> Self {
        tracing::debug!("Rejected patch: {err}");
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_patch",
            "Patch contains a field that cannot be written",
            false,
        )
    }
}

impl From<CharacterSheetError> for AppError {
    fn from(err: CharacterSheetError) -> Self {
        match err {
            CharacterSheetError::CharacterNotFound(id) => {
                tracing::debug!("Character not found: {id}");
                Self::character_not_found()
            }
            CharacterSheetError::ItemNotFound(id) => {
                tracing::debug!("Item not found: {id}");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "item_not_found",
                    "Item not found",
                    false,
                )
            }
            CharacterSheetError::SpellNotFound(id) => {
                tracing::debug!("Spell not found: {id}");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "spell_not_found",
                    "Spell not found",
                    false,
                )
            }
            CharacterSheetError::InvalidOperation(err) => err.into(),
            CharacterSheetError::CharacterStorage(err) => err.into(),
            CharacterSheetError::ItemStorage(err) => err.into(),
            CharacterSheetError::SpellStorage(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_conflict_is_retryable_conflict() {
        let err: AppError = CharacterStorageError::RevisionConflict("c1".to_string()).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "concurrent_modification");
        assert!(err.inner.allow_retry);
    }

    #[test]
    fn test_sheet_errors_are_bad_requests() {
        for (sheet_err, code) in [
            (SheetError::MissingItemId, "missing_item_id"),
            (
                SheetError::ItemNotInInventory("i1".to_string()),
                "item_not_in_inventory",
            ),
            (
                SheetError::NoEquipmentSlot("Torch".to_string()),
                "missing_equipment_slot",
            ),
        ] {
            let err: AppError = CharacterSheetError::InvalidOperation(sheet_err).into();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_not_found_errors() {
        let err: AppError = CharacterSheetError::ItemNotFound("i1".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "item_not_found");

        let err: AppError =
            CharacterStorageError::CharacterNotFound("c1".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "character_not_found");
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = AppError::new(StatusCode::BAD_REQUEST, "invalid_json", "Bad", false);
        let body = serde_json::to_value(&err.inner).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "allowRetry": false,
                "error": {"code": "invalid_json", "message": "Bad"}
            })
        );
    }
}
