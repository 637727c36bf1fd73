// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
The core error types used by oitab crates.

Errors specific to a single crate live in that crate; the variants here are
the ones that more than one crate needs to produce or match on.

*/

use thiserror::Error;

/// A framework-level error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An array did not have the expected dimensionality.
    #[error("expected {expected}-dimensional array but found one that was {actual}-dimensional")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Strict verification finished with problems that it could not repair.
    #[error("verification left {0} unfixed problem(s)")]
    UnfixedFindings(usize),
}

/// A `Result` whose error type is [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
