// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based document storage.
//!
//! Every placed element and every group type gets a unique, type-safe key
//! for O(1) lookup in the document. Keys are created by `slotmap::SlotMap`
//! and are generational: once an element is removed its key is dead forever
//! and will never be reissued for a later element. A group rebuilt after an
//! ungroup therefore always carries a fresh identity.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a placed element (including group instances).
    pub struct ElementKey;

    /// Key for a group type (the named template shared by placed instances).
    pub struct GroupTypeKey;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn removed_key_is_never_reissued() {
        let mut map: SlotMap<ElementKey, u32> = SlotMap::with_key();
        let first = map.insert(1);
        map.remove(first);
        let second = map.insert(2);

        assert_ne!(first, second);
        assert!(!map.contains_key(first));
        assert!(map.contains_key(second));
    }

    #[test]
    fn element_and_type_keys_are_distinct_types() {
        let mut elements: SlotMap<ElementKey, ()> = SlotMap::with_key();
        let mut types: SlotMap<GroupTypeKey, ()> = SlotMap::with_key();
        let e = elements.insert(());
        let t = types.insert(());
        assert!(elements.contains_key(e));
        assert!(types.contains_key(t));
    }
}
