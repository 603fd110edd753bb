//! Generic error handling utilities
//!
//! Every error enum in the crate implements [`ContextualError`] so the two
//! places that decide how failures are reported (the fail-soft analysis
//! wrappers and the binary's startup) share one logging policy.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` returns
/// `Some(message)` the user can act on (a bad config value, an unsupported
/// repository kind). System errors return `None` and are reported with the
/// operation context instead.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Log a recoverable error at `error` level
///
/// User-actionable errors show their own message; system errors show the
/// error's display text after the operation context. Debug details follow at
/// `debug` level.
///
/// # Examples
/// ```rust,no_run
/// # use repostate::core::error_handling::log_error_with_context;
/// # use repostate::analysis::api::AnalysisError;
/// # use repostate::model::RepoKind;
/// let err = AnalysisError::Unsupported { kind: RepoKind::Git };
/// log_error_with_context(&err, "Computing relationship for alice");
/// // Logs: "Computing relationship for alice: no state checker registered for git repositories"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("{}", describe(error, operation_context));
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Log an error that ends the process
pub fn log_fatal_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", describe(error, operation_context));
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Text shown for an error: its user message if it has one, else context plus display
pub fn describe<E: ContextualError + std::fmt::Display>(error: &E, operation_context: &str) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            format!("{}: {}", operation_context, user_msg)
        }
        _ => format!("{}: {}", operation_context, error),
    }
}

/// Text carried by a caught panic payload
///
/// `panic!` payloads are a `&str` or a `String`; anything else is reported
/// generically.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
