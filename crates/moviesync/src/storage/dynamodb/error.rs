//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `moviesync_core::keyvalue`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use moviesync_core::keyvalue::StoreError;

/// Transport failures never reached the service.
fn transport_error<E: Debug, R: Debug>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::DispatchFailure(failure) => {
            Some(StoreError::ConnectionFailed(format!("{:?}", failure)))
        }
        SdkError::TimeoutError(_) => {
            Some(StoreError::ConnectionFailed("Request timed out".to_string()))
        }
        _ => None,
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    if let Some(err) = transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StoreError {
    if let Some(err) = transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    key: &str,
) -> StoreError {
    if let Some(err) = transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        err => StoreError::QueryFailed(format!("GetItem {} failed: {:?}", key, err)),
    }
}

/// Map a BatchWriteItem SDK error to StoreError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
) -> StoreError {
    if let Some(err) = transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => {
            StoreError::WriteFailed("Table not found".to_string())
        }
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::WriteFailed("Throughput exceeded, please retry".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            StoreError::WriteFailed("Request limit exceeded, please retry".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            StoreError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::WriteFailed(format!("BatchWriteItem failed: {:?}", err)),
    }
}
