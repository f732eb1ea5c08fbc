// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection validation at the resolver boundary.
//!
//! Interactive element picking lives outside the engine; what arrives here
//! is a plain key collection. Validation enforces the group-container
//! category constraint before anything downstream runs. An element with no
//! resolvable category counts as non-matching, never as a fault.

use grouplift_core::{Document, ElementKey};

/// Errors reported back to the caller for an unusable selection.
///
/// No mutation has occurred when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Nothing was selected.
    #[error("selection is empty")]
    Empty,

    /// A selected element is not a model group container.
    #[error("selected element is not a model group container: {element:?}")]
    NotAGroupContainer { element: ElementKey },
}

/// Validates a picked element set as regroup targets.
///
/// Every element must be live and carry the group container category.
pub fn resolve_selection(
    doc: &Document,
    picked: &[ElementKey],
) -> std::result::Result<Vec<ElementKey>, SelectionError> {
    if picked.is_empty() {
        return Err(SelectionError::Empty);
    }
    for &key in picked {
        let is_container = doc
            .category(key)
            .map(|c| c.is_group_container())
            .unwrap_or(false);
        if !is_container {
            return Err(SelectionError::NotAGroupContainer { element: key });
        }
    }
    Ok(picked.to_vec())
}
