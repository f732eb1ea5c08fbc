// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the regroup pipeline.
//!
//! Every abort path except [`StaleReference`] fires before the first
//! transaction, leaving the document untouched. Stale references are the
//! accepted partial-failure case: they are collected per group inside the
//! transform outcome rather than failing the whole operation.

use grouplift_core::ElementKey;

use crate::selection::SelectionError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or executing a regroup transform.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The selection was empty or contained a non-group element.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The document is a detached copy and the actor has no override.
    #[error("document is a detached copy and {actor:?} is not an authorized override identity")]
    DetachedDocument { actor: String },

    /// Nested instances exist among the target's same-named groups.
    #[error("group type {type_name:?} has nested instances; flattening nested groups is not supported")]
    UnsafeNested { type_name: String },

    /// Audit record serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A document-level mutation failed.
    #[error(transparent)]
    Core(#[from] grouplift_core::Error),
}

/// A snapshotted member id no longer resolved to a live element at rebuild
/// time. The affected group stays flattened; independent groups that were
/// already rebuilt are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stale reference: member {member:?} of group {group_name:?} no longer resolves")]
pub struct StaleReference {
    pub group_name: String,
    pub member: ElementKey,
}
