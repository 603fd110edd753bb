//! Analysis Error Types

use crate::model::{DataSource, RepoKind};

/// Failure reported by a state checker
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Generic { message: String },
}

impl CheckerError {
    pub fn generic(message: impl Into<String>) -> Self {
        CheckerError::Generic {
            message: message.into(),
        }
    }
}

pub type CheckerResult<T> = Result<T, CheckerError>;

/// Why a computation produced no classification
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no state checker registered for {kind} repositories")]
    Unsupported { kind: RepoKind },

    #[error("state checker I/O failure for {data_source}: {cause}")]
    CheckerIo {
        data_source: DataSource,
        #[source]
        cause: std::io::Error,
    },

    #[error("state checker failed for {data_source}: {message}")]
    CheckerGeneric {
        data_source: DataSource,
        message: String,
    },
}

impl AnalysisError {
    pub(crate) fn from_checker(data_source: DataSource, error: CheckerError) -> Self {
        match error {
            CheckerError::Io(cause) => AnalysisError::CheckerIo { data_source, cause },
            CheckerError::Generic { message } => AnalysisError::CheckerGeneric {
                data_source,
                message,
            },
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl crate::core::error_handling::ContextualError for AnalysisError {
    fn is_user_actionable(&self) -> bool {
        false // Checker failures and missing checkers are reported with context
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
