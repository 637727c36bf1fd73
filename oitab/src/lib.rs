// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

/*!
Schema verification and merging of OIFITS interferometry tables.

The tables of an OIFITS file each follow a versioned schema from the
[`schema`] registry. This crate checks tables against those schemas and
repairs what it can ([`verify`]), looks up foreign keys across tables
([`xmatch`]), merges tables of one kind while renumbering colliding
identifiers ([`merge`]), moves tables between revisions ([`revision`]), and
does all of that for whole files at once ([`dataset`]).

Reading and writing the FITS container is left to other crates: a [`Table`]
is built from already-decoded columns. Column data are stored as `ndarray`
arrays, with `num-complex` for complex cells; those two crates are pinned to
the versions the container readers use, so that decoded arrays can be handed
over without conversion.

*/

pub mod column;
pub mod dataset;
pub mod errors;
pub mod header;
pub mod merge;
pub mod revision;
pub mod schema;
pub mod table;
pub mod value;
pub mod verify;
pub mod xmatch;

#[cfg(test)]
mod testing;

pub use column::{Column, ColumnData};
pub use dataset::{Dataset, DatasetReport};
pub use errors::{CastError, OiError, Result};
pub use header::{Card, Header};
pub use merge::{IdMap, MergeOptions, Merged};
pub use num_complex::Complex;
pub use schema::{FormatVersion, TableKind};
pub use table::{Row, Table};
pub use value::{TypeTag, Value};
pub use verify::{Finding, Severity, VerifyMode, VerifyOptions, VerifyPolicy};
