use crate::schema::Schema;
use std::fmt;
use thiserror::Error as ThisError;

///
/// StageError
///
/// Structured pipeline error with a stable class + origin classification.
/// Upstream failures keep the original error reachable through `source`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct StageError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,

    /// Upstream error this one was raised on behalf of.
    pub source: Option<Box<StageError>>,
}

impl StageError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Construct an invalid-argument error for a specific origin.
    pub fn invalid_argument(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, origin, message)
    }

    /// Construct an internal error for a specific origin.
    pub fn internal(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, origin, message)
    }

    /// Construct a filter-origin schema mismatch for one upstream stage.
    pub(crate) fn upstream_schema_mismatch(
        stage_index: usize,
        expected: &Schema,
        found: &Schema,
    ) -> Self {
        Self {
            class: ErrorClass::SchemaMismatch,
            origin: ErrorOrigin::Filter,
            message: format!(
                "schema mismatch at upstream stage {stage_index}: expected {expected}, found {found}"
            ),
            detail: Some(ErrorDetail::SchemaMismatch {
                stage_index: Some(stage_index),
                expected: expected.clone(),
                found: found.clone(),
            }),
            source: None,
        }
    }

    /// Construct a cursor-origin schema mismatch between a stage and a caller buffer.
    pub(crate) fn buffer_schema_mismatch(expected: &Schema, found: &Schema) -> Self {
        Self {
            class: ErrorClass::SchemaMismatch,
            origin: ErrorOrigin::Cursor,
            message: format!("buffer schema mismatch: expected {expected}, found {found}"),
            detail: Some(ErrorDetail::SchemaMismatch {
                stage_index: None,
                expected: expected.clone(),
                found: found.clone(),
            }),
            source: None,
        }
    }

    /// Wrap a failure raised while opening an upstream cursor.
    pub(crate) fn upstream_open(stage_index: usize, source: Self) -> Self {
        Self::upstream(ErrorClass::UpstreamOpenFailure, "open", stage_index, source)
    }

    /// Wrap a failure raised while reading or skipping through an upstream cursor.
    pub(crate) fn upstream_read(stage_index: usize, source: Self) -> Self {
        Self::upstream(ErrorClass::UpstreamReadFailure, "read", stage_index, source)
    }

    fn upstream(class: ErrorClass, verb: &str, stage_index: usize, source: Self) -> Self {
        Self {
            class,
            origin: ErrorOrigin::Cursor,
            message: format!(
                "failed to {verb} upstream stage {stage_index}: {}",
                source.display_with_class()
            ),
            detail: Some(ErrorDetail::Upstream { stage_index }),
            source: Some(Box::new(source)),
        }
    }

    /// Construct the error returned by a cursor that already failed.
    pub(crate) fn cursor_terminated(class: ErrorClass) -> Self {
        Self::new(
            class,
            ErrorOrigin::Cursor,
            "cursor is terminated after an earlier upstream failure",
        )
    }

    #[must_use]
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::SchemaMismatch)
    }

    /// Return the index of the upstream stage this error is attributed to, if any.
    #[must_use]
    pub const fn stage_index(&self) -> Option<usize> {
        match &self.detail {
            Some(ErrorDetail::Upstream { stage_index }) => Some(*stage_index),
            Some(ErrorDetail::SchemaMismatch { stage_index, .. }) => *stage_index,
            None => None,
        }
    }

    /// Return the innermost error of an upstream chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(source) = current.source.as_deref() {
            current = source;
        }

        current
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, class-specific error detail carried by [`StageError`].
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorDetail {
    SchemaMismatch {
        stage_index: Option<usize>,
        expected: Schema,
        found: Schema,
    },
    Upstream {
        stage_index: usize,
    },
}

///
/// ErrorClass
/// Error taxonomy for pipeline classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidArgument,
    SchemaMismatch,
    UpstreamOpenFailure,
    UpstreamReadFailure,
    Internal,
    Config,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::SchemaMismatch => "schema_mismatch",
            Self::UpstreamOpenFailure => "upstream_open_failure",
            Self::UpstreamReadFailure => "upstream_read_failure",
            Self::Internal => "internal",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Component that raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Stage,
    Filter,
    Cursor,
    Buffer,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stage => "stage",
            Self::Filter => "filter",
            Self::Cursor => "cursor",
            Self::Buffer => "buffer",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
