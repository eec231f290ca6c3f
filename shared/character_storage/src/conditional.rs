//! Detection of failed `DynamoDB` condition expressions

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{put_item::PutItemError, update_item::UpdateItemError};

/// Operation errors that can report a failed condition expression
pub trait ConditionalCheck {
    /// Whether the service rejected the write because its condition was false
    fn is_conditional_check_failed(&self) -> bool;
}

impl ConditionalCheck for PutItemError {
    fn is_conditional_check_failed(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

impl ConditionalCheck for UpdateItemError {
    fn is_conditional_check_failed(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

/// Whether a write failed on its condition expression rather than on the service call
pub fn is_conditional_check_failure<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ConditionalCheck,
{
    matches!(err, SdkError::ServiceError(svc) if svc.err().is_conditional_check_failed())
}
