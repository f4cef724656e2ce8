//! Result type alias for fraudshare

use super::errors::FraudShareError;

/// Result type alias for fraudshare operations
///
/// # Examples
///
/// ```
/// use fraudshare::domain::result::Result;
/// use fraudshare::domain::errors::FraudShareError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FraudShareError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FraudShareError>;
