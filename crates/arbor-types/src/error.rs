//! Unified error-code convention for Arbor crates.
//!
//! Every Arbor error type implements [`ErrorCode`] so callers can branch
//! on a stable machine-readable code instead of matching display text,
//! and so retry logic can ask whether an error is worth retrying at all.

/// Machine-readable code and recoverability for an error type.
///
/// # Code Format
///
/// - UPPER_SNAKE_CASE, prefixed by the owning crate's domain
///   (e.g. `RESOLVE_MAX_DEPTH_EXCEEDED`)
/// - Stable once defined; changing a code is a breaking change
///
/// # Example
///
/// ```
/// use arbor_types::ErrorCode;
///
/// #[derive(Debug)]
/// enum StoreError {
///     Unavailable,
///     Corrupt,
/// }
///
/// impl ErrorCode for StoreError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Unavailable => "STORE_UNAVAILABLE",
///             Self::Corrupt => "STORE_CORRUPT",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Unavailable)
///     }
/// }
///
/// assert_eq!(StoreError::Corrupt.code(), "STORE_CORRUPT");
/// assert!(!StoreError::Corrupt.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the stable machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error's code follows the Arbor convention.
///
/// Checks that the code is non-empty, UPPER_SNAKE_CASE, and carries the
/// expected domain prefix.
///
/// # Panics
///
/// Panics with a descriptive message if any check fails. Intended for
/// use in tests.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();
    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'",
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE",
    );
}

/// Asserts the code convention for every variant of an error enum.
///
/// # Panics
///
/// Panics if any variant fails [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
