//! Typed error handling for bartab
//!
//! Every failure a request can hit is one of three kinds:
//!
//! - [`Rejection`]: the submitted form was not acceptable (missing customer
//!   name, duplicate category, unparseable price, ...). These are user-facing
//!   and non-fatal; the user fixes the form and submits again.
//! - [`StorageError`]: the persisted document could not be read or written.
//! - [`ReportError`]: the PDF export could not be produced.
//!
//! [`BarTabError`] wraps all of them and knows how to turn itself into an
//! HTTP response.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.add_category("Bier").await {
//!     Ok(()) => println!("added"),
//!     Err(BarTabError::Rejected(r)) => println!("{} ({})", r, r.severity()),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for bartab
#[derive(Debug)]
pub enum BarTabError {
    /// The request was understood but its input was rejected
    Rejected(Rejection),

    /// Persistence failures
    Storage(StorageError),

    /// PDF export failures
    Report(ReportError),

    /// Should not happen in normal operation
    Internal(String),
}

impl fmt::Display for BarTabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarTabError::Rejected(e) => write!(f, "{}", e),
            BarTabError::Storage(e) => write!(f, "{}", e),
            BarTabError::Report(e) => write!(f, "{}", e),
            BarTabError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BarTabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BarTabError::Rejected(e) => Some(e),
            BarTabError::Storage(e) => Some(e),
            BarTabError::Report(e) => Some(e),
            BarTabError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// How loudly a view layer should show the message
    pub level: Severity,
}

impl BarTabError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BarTabError::Rejected(e) => e.status_code(),
            BarTabError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BarTabError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BarTabError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BarTabError::Rejected(e) => e.error_code(),
            BarTabError::Storage(_) => "STORAGE_ERROR",
            BarTabError::Report(_) => "REPORT_ERROR",
            BarTabError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Severity shown to the user
    pub fn severity(&self) -> Severity {
        match self {
            BarTabError::Rejected(e) => e.severity(),
            _ => Severity::Danger,
        }
    }

    /// Whether this error is a recoverable form rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, BarTabError::Rejected(_))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            level: self.severity(),
        }
    }
}

impl IntoResponse for BarTabError {
    fn into_response(self) -> Response {
        if self.is_rejection() {
            tracing::warn!(code = self.error_code(), "{}", self);
        } else {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Level of a user-visible message, named after the classes a view layer
/// typically styles them with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Rejections
// =============================================================================

/// Form input that was refused; the state is left untouched
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Neither an existing customer was selected nor a new name typed
    MissingCustomerName,

    EmptyCustomerName,

    DuplicateCustomer {
        name: String,
    },

    CustomerNotFound,

    EmptyCategoryName,

    DuplicateCategory {
        name: String,
    },

    /// The drink form named no category, or one that does not exist
    UnknownCategory,

    EmptyDrinkName,

    /// Price did not parse as a finite, non-negative number
    InvalidPrice {
        value: String,
    },

    /// More copies of an item than one submission may add
    QuantityTooLarge {
        value: String,
        max: u32,
    },

    /// The settings form carried an action we do not know
    UnknownAction {
        action: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingCustomerName => write!(f, "No customer name given!"),
            Rejection::EmptyCustomerName => write!(f, "Enter a customer name."),
            Rejection::DuplicateCustomer { name } => {
                write!(f, "Customer '{}' already exists.", name)
            }
            Rejection::CustomerNotFound => write!(f, "Customer not found."),
            Rejection::EmptyCategoryName => write!(f, "Enter a category name."),
            Rejection::DuplicateCategory { name } => {
                write!(f, "Category '{}' already exists.", name)
            }
            Rejection::UnknownCategory => write!(f, "Select a valid category."),
            Rejection::EmptyDrinkName => write!(f, "Enter a drink name."),
            Rejection::InvalidPrice { value } => {
                write!(f, "Enter a valid price (got '{}').", value)
            }
            Rejection::QuantityTooLarge { value, max } => {
                write!(f, "At most {} at a time (got '{}').", max, value)
            }
            Rejection::UnknownAction { action } => write!(f, "Invalid action '{}'.", action),
        }
    }
}

impl std::error::Error for Rejection {}

impl Rejection {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Rejection::DuplicateCustomer { .. } | Rejection::DuplicateCategory { .. } => {
                StatusCode::CONFLICT
            }
            Rejection::CustomerNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Rejection::MissingCustomerName => "MISSING_CUSTOMER_NAME",
            Rejection::EmptyCustomerName => "EMPTY_CUSTOMER_NAME",
            Rejection::DuplicateCustomer { .. } => "DUPLICATE_CUSTOMER",
            Rejection::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Rejection::EmptyCategoryName => "EMPTY_CATEGORY_NAME",
            Rejection::DuplicateCategory { .. } => "DUPLICATE_CATEGORY",
            Rejection::UnknownCategory => "UNKNOWN_CATEGORY",
            Rejection::EmptyDrinkName => "EMPTY_DRINK_NAME",
            Rejection::InvalidPrice { .. } => "INVALID_PRICE",
            Rejection::QuantityTooLarge { .. } => "QUANTITY_TOO_LARGE",
            Rejection::UnknownAction { .. } => "UNKNOWN_ACTION",
        }
    }

    /// Duplicates are warnings; everything else is a hard "fix the form"
    pub fn severity(&self) -> Severity {
        match self {
            Rejection::DuplicateCustomer { .. } | Rejection::DuplicateCategory { .. } => {
                Severity::Warning
            }
            _ => Severity::Danger,
        }
    }
}

impl From<Rejection> for BarTabError {
    fn from(err: Rejection) -> Self {
        BarTabError::Rejected(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a [`StateStore`](crate::core::store::StateStore)
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in store: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not have the expected shape
    #[error("Corrupt store document: {0}")]
    Corrupt(String),

    #[error("Failed to acquire {0} lock on in-memory store")]
    Poisoned(&'static str),
}

impl From<StorageError> for BarTabError {
    fn from(err: StorageError) -> Self {
        BarTabError::Storage(err)
    }
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors raised while producing the PDF export
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to write PDF: {0}")]
    Write(String),
}

impl From<ReportError> for BarTabError {
    fn from(err: ReportError) -> Self {
        BarTabError::Report(err)
    }
}
