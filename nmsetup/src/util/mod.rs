//! Internal helpers shared by the core modules.

pub(crate) mod timeout;
pub(crate) mod validation;

/// Unwraps a `Result`, or logs the error and returns `None` from the
/// enclosing function.
///
/// For lookups whose failure should not abort the caller.
#[macro_export]
macro_rules! try_log {
    ($result:expr, $context:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}: {:?}", $context, e);
                return None;
            }
        }
    };
}
