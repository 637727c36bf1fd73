// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Error types for the oitab crate.

Only structural problems are errors: a table whose *contents* violate its
schema produces [`crate::verify::Finding`] values instead.

*/

use oitab_core::CoreError;
use thiserror::Error;

use crate::schema::FormatVersion;
use crate::value::TypeTag;

/// A value could not be represented in a column type without losing
/// information.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot represent {value} as {to}")]
pub struct CastError {
    /// The offending value, formatted for display.
    pub value: String,

    /// The type that was requested.
    pub to: TypeTag,
}

/// A structural error: the operation cannot produce a meaningful result.
#[derive(Error, Debug)]
pub enum OiError {
    #[error("no schema for extension {extname} revision {revision}")]
    UnknownSchema { extname: String, revision: u8 },

    #[error("extension {extname} does not exist in OIFITS {format}")]
    NotInFormat {
        extname: String,
        format: FormatVersion,
    },

    #[error("table {extname} has no column {column}")]
    NoSuchColumn { extname: String, column: String },

    #[error("column {column} of {extname} holds {found} values, expected {expected}")]
    UnexpectedType {
        extname: String,
        column: String,
        expected: &'static str,
        found: TypeTag,
    },

    #[error("duplicate column {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {found} rows but the table has {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column {column}: cell shape {found:?} does not match {expected:?}")]
    ShapeMismatch {
        column: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("cannot merge FITS extensions {0} with {1}")]
    KindMismatch(String, String),

    #[error("nothing to merge")]
    NoInputs,

    #[error("cannot merge tables with different {card} ({first:?} and {other:?})")]
    HeaderConflict {
        card: String,
        first: String,
        other: String,
    },

    #[error("no unused identifier left for column {0}")]
    IdentifierExhausted(String),

    #[error("{0}")]
    AmbiguousReference(String),

    #[error("{extname} tables named {name:?} differ and cannot be merged")]
    InconsistentReference { extname: String, name: String },

    #[error("cannot convert column {column}")]
    Cast {
        column: String,
        #[source]
        source: CastError,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl OiError {
    pub(crate) fn cast(column: impl Into<String>, source: CastError) -> Self {
        OiError::Cast {
            column: column.into(),
            source,
        }
    }
}

/// A `Result` whose error type is [`OiError`].
pub type Result<T> = std::result::Result<T, OiError>;
