// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Phase transactions over the document.
//!
//! Each mutating phase of an operation runs inside a named transaction.
//! A failure inside the closure rolls back only that phase's mutations;
//! phases that already committed stay committed. This mirrors the host's
//! transactional boundaries: there is no cross-phase atomicity and no
//! locking — the document is assumed exclusively held for the duration.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::document::{Document, ElementData, GroupTypeData};
use crate::keys::{ElementKey, GroupTypeKey};

/// Pre-transaction copy of the document's mutable storage.
struct SavedState {
    elements: SlotMap<ElementKey, ElementData>,
    group_types: SlotMap<GroupTypeKey, GroupTypeData>,
    dependents: FxHashMap<ElementKey, FxHashSet<ElementKey>>,
}

impl Document {
    /// Runs `f` inside a named transaction.
    ///
    /// On `Ok` the mutations commit; on `Err` the document's element and
    /// group-type storage is restored to its pre-transaction state and the
    /// error is passed through. Slot map generation counters are part of the
    /// restored state, so keys allocated inside a rolled-back transaction
    /// stay dead.
    pub fn transaction<T, E, F>(&mut self, name: &str, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Document) -> std::result::Result<T, E>,
    {
        debug!(transaction = name, "begin");
        let saved = self.save_state();
        match f(self) {
            Ok(value) => {
                debug!(transaction = name, "commit");
                Ok(value)
            }
            Err(err) => {
                warn!(transaction = name, "rollback");
                self.restore_state(saved);
                Err(err)
            }
        }
    }

    fn save_state(&self) -> SavedState {
        SavedState {
            elements: self.elements.clone(),
            group_types: self.group_types.clone(),
            dependents: self.dependents.clone(),
        }
    }

    fn restore_state(&mut self, saved: SavedState) {
        self.elements = saved.elements;
        self.group_types = saved.group_types;
        self.dependents = saved.dependents;
    }
}
