use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ConstrainError
pub type Result<T> = std::result::Result<T, ConstrainError>;

/// Boxed lower-level cause carried by [`ConstrainError`]
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure of a load surfaces as a [`ConstrainError`] with one of these
/// kinds. Each kind maps to a stable error code that tests and callers can
/// match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstrainErrorKind {
    // Model construction
    /// A required field was supplied with an empty value
    EmptyField,
    /// A constraint was finalized before every required field was supplied
    MissingField,
    /// A region that may appear at most once appeared again
    DuplicateRegion,
    /// A region started outside of its required parent region
    NestingViolation,
    /// Constraints were not in non-decreasing order of their derived key
    SortOrderViolation,

    // Document level
    /// The input is not well-formed for its encoding
    MalformedDocument,
    /// The input contained no content at all
    EmptyDocument,
    /// One or more schema rules failed
    SchemaViolation,
    /// The top-level format version is not the supported literal
    UnsupportedVersion,
    /// The input differs from its canonical rendering
    FormattingViolation,

    // Loader
    /// More than one constraints file is present in the same directory
    AmbiguousSource,
    /// Loader configuration could not be read or is invalid
    Config,
    /// Underlying read failure
    Io,
    /// File-identifying wrapper applied by the loader facade
    LoadFailed,

    // Internal
    Internal,
}

impl ConstrainErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ConstrainErrorKind::EmptyField => "ERR_EMPTY_FIELD",
            ConstrainErrorKind::MissingField => "ERR_MISSING_FIELD",
            ConstrainErrorKind::DuplicateRegion => "ERR_DUPLICATE_REGION",
            ConstrainErrorKind::NestingViolation => "ERR_NESTING_VIOLATION",
            ConstrainErrorKind::SortOrderViolation => "ERR_SORT_ORDER_VIOLATION",
            ConstrainErrorKind::MalformedDocument => "ERR_MALFORMED_DOCUMENT",
            ConstrainErrorKind::EmptyDocument => "ERR_EMPTY_DOCUMENT",
            ConstrainErrorKind::SchemaViolation => "ERR_SCHEMA_VIOLATION",
            ConstrainErrorKind::UnsupportedVersion => "ERR_UNSUPPORTED_VERSION",
            ConstrainErrorKind::FormattingViolation => "ERR_FORMATTING_VIOLATION",
            ConstrainErrorKind::AmbiguousSource => "ERR_AMBIGUOUS_SOURCE",
            ConstrainErrorKind::Config => "ERR_CONFIG",
            ConstrainErrorKind::Io => "ERR_IO",
            ConstrainErrorKind::LoadFailed => "ERR_LOAD_FAILED",
            ConstrainErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind, optional operation and file context, a
/// human-readable message and an optional wrapped cause. Wrapping never
/// discards the cause: it stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug)]
pub struct ConstrainError {
    kind: ConstrainErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    message: String,
    source: Option<BoxedCause>,
}

impl ConstrainError {
    /// Create a new error with the specified kind
    pub fn new(kind: ConstrainErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: impl Into<BoxedCause>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ConstrainErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the wrapped cause if it is itself a `ConstrainError`
    pub fn source_error(&self) -> Option<&ConstrainError> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<ConstrainError>())
    }

    /// Kinds of this error and every `ConstrainError` below it, outermost first
    pub fn kinds(&self) -> Vec<ConstrainErrorKind> {
        let mut kinds = vec![self.kind];
        let mut current = self.source_error();
        while let Some(err) = current {
            kinds.push(err.kind);
            current = err.source_error();
        }
        kinds
    }

    /// The innermost `ConstrainError` in the cause chain
    pub fn innermost(&self) -> &ConstrainError {
        let mut current = self;
        while let Some(next) = current.source_error() {
            current = next;
        }
        current
    }

    /// Render this error and its full cause chain, one cause per paragraph
    pub fn render_chain(&self) -> String {
        let mut out = self.to_string();
        let mut cause = StdError::source(self);
        while let Some(err) = cause {
            out.push_str("\nCaused by: ");
            out.push_str(&err.to_string());
            cause = err.source();
        }
        out
    }
}

impl std::fmt::Display for ConstrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl StdError for ConstrainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for ConstrainError {
    fn from(err: std::io::Error) -> Self {
        ConstrainError::new(ConstrainErrorKind::Io)
            .with_message(err.to_string())
            .with_source(err)
    }
}

// ========== End Error Facility ==========

/// Failures raised by the constraint model builders
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A setter received an empty or whitespace-only value
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },

    /// `build()` was called before a required field was supplied
    #[error("Invalid dependency constraints file: <{field}> tag must appear under the <{region}> tag")]
    MissingField {
        field: &'static str,
        region: &'static str,
    },

    /// Strict set construction found constraints out of order
    #[error(
        "Constraints were not sorted by group:name:suggestedVersion in lexicographical order:\n{report}"
    )]
    Unsorted { report: String },
}

impl From<ModelError> for ConstrainError {
    fn from(err: ModelError) -> Self {
        let (kind, op) = match &err {
            ModelError::EmptyField { .. } => (ConstrainErrorKind::EmptyField, "build_constraint"),
            ModelError::MissingField { .. } => {
                (ConstrainErrorKind::MissingField, "build_constraint")
            }
            ModelError::Unsorted { .. } => (
                ConstrainErrorKind::SortOrderViolation,
                "build_constraint_set",
            ),
        };
        ConstrainError::new(kind)
            .with_op(op)
            .with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_message() {
        let err = ConstrainError::new(ConstrainErrorKind::SchemaViolation)
            .with_op("read_json")
            .with_message("bad shape");

        assert_eq!(
            err.to_string(),
            "[ERR_SCHEMA_VIOLATION] in operation 'read_json': bad shape"
        );
    }

    #[test]
    fn test_display_without_op() {
        let err = ConstrainError::new(ConstrainErrorKind::EmptyDocument).with_message("File is empty");
        assert_eq!(err.to_string(), "[ERR_EMPTY_DOCUMENT]: File is empty");
    }

    #[test]
    fn test_io_conversion_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConstrainError = io.into();

        assert_eq!(err.kind(), ConstrainErrorKind::Io);
        let source = StdError::source(&err).expect("io cause");
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn test_model_error_conversion() {
        let err: ConstrainError = ModelError::MissingField {
            field: "group",
            region: "constraint",
        }
        .into();

        assert_eq!(err.kind(), ConstrainErrorKind::MissingField);
        assert_eq!(err.op(), Some("build_constraint"));
        assert!(err
            .message()
            .contains("<group> tag must appear under the <constraint> tag"));
    }
}
