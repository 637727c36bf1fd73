// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

//! Core types shared by the oitab crates.
//!
//! This crate holds the framework-level error type and the notification
//! system used to tell users what verification and merging did to their
//! tables.

pub mod errors;
pub mod notify;

pub use errors::{CoreError, Result};
