//! Parse errors.
//!
//! A parse either produces a complete [`Operation`](crate::ast::Operation) or
//! exactly one [`ParseError`]; the first failure aborts the whole parse.

use thiserror::Error;

use crate::ast::Location;

/// A single parse diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub location: Location,

    /// End of the offending token, set for errors spanning a malformed literal
    pub end: Option<Location>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        ParseError {
            kind,
            location,
            end: None,
        }
    }

    pub fn spanning(kind: ErrorKind, location: Location, end: Location) -> Self {
        ParseError {
            kind,
            location,
            end: Some(end),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unexpected end of file, expected {0}")]
    UnexpectedEof(&'static str),

    #[error("unexpected token, expected {0}")]
    UnexpectedToken(&'static str),

    #[error("empty selection set")]
    EmptySelectionSet,

    #[error("empty argument list")]
    EmptyArgumentList,

    #[error("empty input object")]
    EmptyObject,

    #[error("invalid number")]
    InvalidNumber,

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("nesting deeper than {} levels", crate::scanner::MAX_DEPTH)]
    NestingTooDeep,

    #[error("max limit must be greater than zero")]
    InvalidMaxLimit,

    #[error("undefined variable ${0}")]
    UndefinedVariable(String),

    #[error("redeclared variable ${0}")]
    RedeclaredVariable(String),

    #[error("redeclared argument {0}")]
    RedeclaredArgument(String),

    #[error("redeclared object field {0}")]
    RedeclaredObjectField(String),
}

impl ErrorKind {
    /// Whether this is a token-level mismatch.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnexpectedEof(_) | ErrorKind::UnexpectedToken(_)
        )
    }
}
