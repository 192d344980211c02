use derive_more::Display;
use pointflow_core::error::{
    ErrorClass as CoreErrorClass, ErrorOrigin as CoreErrorOrigin, StageError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
/// The upstream chain of a core error is flattened into `causes`, outermost first.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
    pub causes: Vec<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            causes: Vec::new(),
        }
    }
}

impl From<StageError> for Error {
    fn from(err: StageError) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source.as_deref();
        while let Some(inner) = source {
            causes.push(inner.display_with_class());
            source = inner.source.as_deref();
        }

        Self {
            kind: err.class.into(),
            origin: err.origin.into(),
            message: err.message,
            causes,
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for pipeline owners.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Input list or value rejected before any work was done.
    InvalidArgument,

    /// Stages or buffers disagree on the point layout.
    SchemaMismatch,

    /// An upstream cursor could not be created.
    UpstreamOpenFailure,

    /// An upstream cursor failed while producing points.
    UpstreamReadFailure,

    /// Settings could not be parsed or validated.
    Config,

    /// The caller cannot remediate this.
    Internal,
}

impl From<CoreErrorClass> for ErrorKind {
    fn from(class: CoreErrorClass) -> Self {
        match class {
            CoreErrorClass::InvalidArgument => Self::InvalidArgument,
            CoreErrorClass::SchemaMismatch => Self::SchemaMismatch,
            CoreErrorClass::UpstreamOpenFailure => Self::UpstreamOpenFailure,
            CoreErrorClass::UpstreamReadFailure => Self::UpstreamReadFailure,
            CoreErrorClass::Config => Self::Config,
            CoreErrorClass::Internal => Self::Internal,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for pipeline owners.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Buffer,
    Config,
    Cursor,
    Filter,
    Stage,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Buffer => Self::Buffer,
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Cursor => Self::Cursor,
            CoreErrorOrigin::Filter => Self::Filter,
            CoreErrorOrigin::Stage => Self::Stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointflow_core::{
        filters::MosaicFilter,
        schema::Schema,
        stage::{CursorBox, SequentialCursor, Stage, StageProperties},
    };

    struct Unopenable {
        properties: StageProperties,
    }

    impl Stage for Unopenable {
        fn name(&self) -> &str {
            "unopenable"
        }

        fn properties(&self) -> &StageProperties {
            &self.properties
        }

        fn create_cursor(&self) -> Result<CursorBox<'_>, StageError> {
            Err(StageError::internal(CoreErrorOrigin::Stage, "device offline"))
        }
    }

    #[test]
    fn empty_mosaic_maps_to_invalid_argument() {
        let err: Error = MosaicFilter::new(Vec::new())
            .expect_err("empty list must be rejected")
            .into();

        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(err.origin, ErrorOrigin::Filter);
        assert!(err.causes.is_empty());
    }

    #[test]
    fn upstream_chain_is_flattened_into_causes() {
        let stage = Unopenable {
            properties: StageProperties::new(Schema::xyz(), Default::default(), 1),
        };
        let mosaic = MosaicFilter::new(vec![&stage as &dyn Stage]).expect("metadata is valid");
        let mut cursor = mosaic.create_cursor().expect("mosaic cursor opens lazily");

        let err: Error = cursor
            .skip(1)
            .expect_err("upstream cannot be opened")
            .into();

        assert_eq!(err.kind, ErrorKind::UpstreamOpenFailure);
        assert_eq!(err.origin, ErrorOrigin::Cursor);
        assert_eq!(err.causes, vec!["stage:internal: device offline".to_string()]);
    }

    #[test]
    fn error_round_trips_through_json() {
        let err = Error::new(ErrorKind::SchemaMismatch, ErrorOrigin::Filter, "layout differs");
        let json = serde_json::to_string(&err).expect("error should serialize");
        let decoded: Error = serde_json::from_str(&json).expect("error should deserialize");

        assert_eq!(decoded, err);
        assert_eq!(decoded.kind.to_string(), "SchemaMismatch");
    }
}
