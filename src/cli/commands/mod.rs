//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod formats;
pub mod init;
pub mod validate;

use crate::domain::GeodataError;
use crate::log_error_with_context;

/// Report a failed command and map it to its exit code
pub(crate) fn report_failure(error: &GeodataError, context: &str) -> i32 {
    log_error_with_context!(error, context);
    eprintln!("{}: {}", error.kind(), error);
    error.exit_code()
}
