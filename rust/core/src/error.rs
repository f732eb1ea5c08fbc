// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document operations.

use crate::keys::{ElementKey, GroupTypeKey};

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating or querying the document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced element is not live in the document.
    #[error("element not found: {0:?}")]
    ElementNotFound(ElementKey),

    /// The element exists but is not a group instance.
    #[error("element is not a group instance: {0:?}")]
    NotAGroup(ElementKey),

    /// A group must have at least one member.
    #[error("group must have at least one member")]
    EmptyGroup,

    /// The element already belongs to a group.
    #[error("element already belongs to a group: {0:?}")]
    AlreadyGrouped(ElementKey),

    /// The referenced group type is not registered.
    #[error("group type not found: {0:?}")]
    GroupTypeNotFound(GroupTypeKey),
}
