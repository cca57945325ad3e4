//! Centralized error handling
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - RPC_xxx: chain client errors
//! - SRC_xxx: block-explorer source errors
//! - API_xxx: API errors
//! - CFG_xxx: configuration errors
//! - TOKEN_xxx: token validation errors
//!
//! Acquisition failures (a reverted probe, an unverified contract, an
//! unreachable price feed) never surface through this type - they degrade
//! locally to `Unknown` slots. This type covers run-level failures only.

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // RPC errors
    /// RPC connection failed
    RpcConnectionFailed,
    /// RPC request timeout
    RpcTimeout,
    /// RPC rate limited (HTTP 429)
    RpcRateLimited,
    /// RPC returned error response
    RpcError,
    /// No RPC endpoint reachable at all - aborts the whole analysis
    RpcUnreachable,
    /// Invalid RPC response
    RpcInvalidResponse,

    // Source explorer errors
    /// Explorer request failed
    SourceFetchFailed,
    /// Contract source not verified
    SourceNotVerified,

    // API errors
    /// Invalid request format
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,
    /// Resource not found
    ApiNotFound,

    // Configuration errors
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,

    // Token validation errors
    /// Malformed token address
    TokenInvalidAddress,
    /// Address carries no deployed code
    TokenNotAContract,

    /// Unknown error
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RpcConnectionFailed => "RPC_CONNECTION_FAILED",
            Self::RpcTimeout => "RPC_TIMEOUT",
            Self::RpcRateLimited => "RPC_RATE_LIMITED",
            Self::RpcError => "RPC_ERROR",
            Self::RpcUnreachable => "RPC_UNREACHABLE",
            Self::RpcInvalidResponse => "RPC_INVALID_RESPONSE",

            Self::SourceFetchFailed => "SRC_FETCH_FAILED",
            Self::SourceNotVerified => "SRC_NOT_VERIFIED",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiNotFound => "API_NOT_FOUND",

            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::TokenInvalidAddress => "TOKEN_INVALID_ADDRESS",
            Self::TokenNotAContract => "TOKEN_NOT_A_CONTRACT",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::TokenInvalidAddress | Self::ConfigInvalidValue => 400,
            Self::ApiNotFound | Self::TokenNotAContract => 404,
            Self::RpcRateLimited => 429,
            Self::RpcUnreachable | Self::RpcTimeout => 502,
            _ => 500,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RpcTimeout | Self::RpcRateLimited | Self::RpcConnectionFailed
        )
    }
}

// Convenience constructors

impl AppError {
    /// Malformed token address
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenInvalidAddress, msg)
    }

    /// Address has no deployed code
    pub fn not_a_contract(address: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::TokenNotAContract,
            format!("No contract code at {}", address),
        )
    }

    /// Chain cannot be reached at all
    pub fn rpc_unreachable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RpcUnreachable, msg)
    }

    /// Invalid configuration value
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// Conversion from common error types

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::RpcTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::RpcConnectionFailed, "Connection failed")
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::RpcInvalidResponse, "JSON parse error", err)
    }
}
