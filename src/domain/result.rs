//! Result type alias for geodatabr
//!
//! This module provides a convenient Result type alias that uses
//! [`GeodataError`] as the error type.

use super::errors::GeodataError;

/// Result type alias for geodatabr operations
///
/// # Examples
///
/// ```
/// use geodatabr::domain::result::Result;
/// use geodatabr::domain::errors::GeodataError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GeodataError::Configuration("Unsupported output format".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GeodataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::GeodataError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(GeodataError::DataIntegrity("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
