//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use waitline_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const NOT_IN_QUEUE: i32 = 4004;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        AppError::NotFound(msg) => ErrorObjectOwned::owned(code::NOT_FOUND, msg, None::<()>),
        AppError::NotInQueue(msg) => ErrorObjectOwned::owned(code::NOT_IN_QUEUE, msg, None::<()>),
        AppError::Conflict(msg) => ErrorObjectOwned::owned(code::CONFLICT, msg, None::<()>),
        AppError::Database(msg) => ErrorObjectOwned::owned(code::DB_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Domain(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Io(e) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, e.to_string(), None::<()>),
        AppError::Serialization(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_queue_maps_to_4004() {
        let err = to_rpc_error(AppError::NotInQueue("100 is not in queue Q1".into()));
        assert_eq!(err.code(), code::NOT_IN_QUEUE);
    }

    #[test]
    fn test_write_conflict_maps_to_4002() {
        let err = to_rpc_error(AppError::Conflict(
            "Database locked (SQLITE_BUSY): database is locked".into(),
        ));
        assert_eq!(err.code(), code::CONFLICT);
    }

    #[test]
    fn test_invalid_status_maps_to_validation() {
        let err = to_rpc_error(AppError::Domain(
            waitline_core::domain::DomainError::InvalidStatus("done".into()),
        ));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
    }
}
