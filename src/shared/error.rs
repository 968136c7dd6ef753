use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Scripts driving the admin CLI can tell a missing product apart from
/// infrastructure failures without parsing the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested operation completed
    Success = 0,
    /// The requested product does not exist in the record store
    ProductNotFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (record store, upload, configuration, I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps an error returned by a use case onto the exit code reported by the CLI
    pub fn from_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<CatalogError>() {
            Some(CatalogError::ProductNotFound { .. }) => ExitCode::ProductNotFound,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ProductNotFound => write!(f, "Product Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the product asset lifecycle.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Only record-store, validation and upload failures ever reach the caller;
/// remote cleanup failures are reported through outcomes instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {id}")]
    ProductNotFound { id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Record store failure during {stage}: {details}\n\n💡 Hint: The product catalog was not modified by this step")]
    RecordStore { stage: String, details: String },

    #[error("Image upload failed ({failed} of {total} uploads): {details}\n\n💡 Hint: No product was created; retry once the storage provider is reachable")]
    UploadFailed {
        failed: usize,
        total: usize,
        details: String,
    },

    #[error("Failed to read image file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    PayloadRead { path: PathBuf, details: String },

    #[error("Failed to access product store: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the store file contains valid JSON and is writable")]
    StoreFile { path: PathBuf, details: String },

    #[error("Failed to write output file: {path}\nDetails: {details}\n\n💡 Hint: Please check write permissions and available disk space")]
    FileWrite { path: PathBuf, details: String },

    #[error("Missing credential: environment variable {variable} is not set\n\n💡 Hint: Export {variable} before running storefront-assets")]
    MissingCredential { variable: String },
}

impl CatalogError {
    /// Wraps any record-store error with the workflow stage that produced it
    pub fn record_store(stage: impl Into<String>, error: impl fmt::Display) -> Self {
        CatalogError::RecordStore {
            stage: stage.into(),
            details: error.to_string(),
        }
    }
}
