//! Internal helper macros.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but yields `Err($error)` from the enclosing function instead of
/// panicking.
///
/// ```ignore
/// ensure!(http_name == "HTTP", ParseError::invalid_version(http_name));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
