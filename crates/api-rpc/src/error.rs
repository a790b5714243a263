//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.
//!
//! Command-level failures are not RPC errors: they travel inside a
//! successful response as `{topic: "ERROR", payload: "..."}`.

use jsonrpsee::types::ErrorObjectOwned;
use gembird_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const CONFIG_ERROR: i32 = 5001;
    pub const DEVICE_FAULT: i32 = 5002;
    pub const UNAVAILABLE: i32 = 5003;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Domain(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Tool(e) => ErrorObjectOwned::owned(code::DEVICE_FAULT, e.to_string(), None::<()>),
        AppError::Fault(msg) => ErrorObjectOwned::owned(code::DEVICE_FAULT, msg, None::<()>),
        AppError::Unavailable(msg) => ErrorObjectOwned::owned(code::UNAVAILABLE, msg, None::<()>),
        AppError::Config(msg) => ErrorObjectOwned::owned(code::CONFIG_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembird_core::port::ToolError;

    #[test]
    fn test_tool_fault_keeps_indicator_text() {
        let err = to_rpc_error(AppError::Tool(ToolError::NotFound {
            program: "sispmctl".to_string(),
        }));
        assert_eq!(err.code(), code::DEVICE_FAULT);
        assert_eq!(err.message(), "sispmctl not found");
    }

    #[test]
    fn test_unavailable() {
        let err = to_rpc_error(AppError::Unavailable("device worker stopped".to_string()));
        assert_eq!(err.code(), code::UNAVAILABLE);
    }
}
