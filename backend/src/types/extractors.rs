//! Custom extractors that reject with the API error envelope

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use axum_valid::{Valid, ValidRejection};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::types::error::AppError;

/// JSON request body
///
/// Same as [`Json`], but malformed bodies (including an unknown item `type`)
/// are reported as `invalid_json` and a missing content type as `invalid_content_type`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| {
                tracing::debug!("Rejected JSON body: {err}");
                match err {
                    JsonRejection::MissingJsonContentType(_) => AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_content_type",
                        "Missing Content-Type: application/json header",
                        false,
                    ),
                    _ => AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_json",
                        "Invalid JSON payload",
                        false,
                    ),
                }
            })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for ApiJson<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}

/// Query string validated with `validator`
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Query(query)) = Valid::<Query<T>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                match rejection {
                    ValidRejection::Valid(errors) => {
                        tracing::debug!("Query validation failed: {errors}");
                    }
                    ValidRejection::Inner(err) => {
                        tracing::debug!("Rejected query string: {err}");
                    }
                }
                AppError::new(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "Invalid query parameters",
                    false,
                )
            })?;

        Ok(Self(query))
    }
}

impl<T> OperationInput for ValidatedQuery<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Query::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}
