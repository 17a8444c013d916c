use std::fmt;
use std::ops::Range;

use endo::parser::ParseError;

#[derive(Debug)]
pub enum RuntimeError {
    /// `print(name)` on a name with no entry in the store.
    UndefinedVariable(String),
    /// Indexing a name that is missing or holds text.
    NotAnArray(String),
    /// Index token that is non-numeric or outside `0..len`.
    IndexOutOfBounds(String),
    /// A statement that failed to classify. Fatal.
    Syntax(ParseError),
    /// Writing to the output sink failed. Fatal.
    Io(String),
}

impl RuntimeError {
    /// Whether the run may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RuntimeError::UndefinedVariable(_)
                | RuntimeError::NotAnArray(_)
                | RuntimeError::IndexOutOfBounds(_)
        )
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "Error: Variable '{}' is not defined.", name)
            }
            RuntimeError::NotAnArray(name) => write!(f, "Variable '{}' is not an array", name),
            RuntimeError::IndexOutOfBounds(index) => write!(f, "Index out of bounds: {}", index),
            RuntimeError::Syntax(err) => write!(f, "{}", err),
            RuntimeError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io(err.to_string())
    }
}

/// A runtime error enriched with source location information.
#[derive(Debug)]
pub struct DiagnosticError {
    pub error: RuntimeError,
    pub span: Option<Range<usize>>,
    pub source_id: usize,
    pub is_warning: bool,
}

impl DiagnosticError {
    /// A recoverable error attributed to the statement at `span`.
    pub fn warning(error: RuntimeError, span: Range<usize>, source_id: usize) -> Self {
        DiagnosticError {
            error,
            span: Some(span),
            source_id,
            is_warning: true,
        }
    }
}

impl From<RuntimeError> for DiagnosticError {
    fn from(error: RuntimeError) -> Self {
        DiagnosticError {
            error,
            span: None,
            source_id: 0,
            is_warning: false,
        }
    }
}

impl From<ParseError> for DiagnosticError {
    fn from(err: ParseError) -> Self {
        DiagnosticError {
            span: Some(err.span.clone()),
            source_id: err.file_id,
            error: RuntimeError::Syntax(err),
            is_warning: false,
        }
    }
}

impl From<std::io::Error> for DiagnosticError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::from(err).into()
    }
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for DiagnosticError {}
