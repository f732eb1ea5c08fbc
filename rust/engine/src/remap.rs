// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure member-id remapping between old and rebuilt container identities.
//!
//! An ancestor's snapshot references a target by the container key it had
//! before flattening. By rebuild time that key is dead and the target lives
//! under a fresh key. Remapping substitutes the new key wherever an old one
//! appears, leaving every other entry and the relative order untouched. The
//! input snapshot list is never mutated.

use rustc_hash::FxHashMap;

use grouplift_core::ElementKey;

/// Maps a member-id list through an old-key → new-key table.
///
/// Ids absent from the table pass through unchanged.
pub fn remap_member_ids(
    members: &[ElementKey],
    mapping: &FxHashMap<ElementKey, ElementKey>,
) -> Vec<ElementKey> {
    members
        .iter()
        .map(|id| mapping.get(id).copied().unwrap_or(*id))
        .collect()
}
