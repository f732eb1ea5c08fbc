// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pre-mutation snapshots and the rebuild naming convention.
//!
//! Snapshots are captured strictly before the first transaction opens and
//! are read-only from then on. The rebuild phases consume them; nothing
//! else writes to them. An ancestor records only its name and membership;
//! a target additionally records its type and centerpoint so the rebuilt
//! group can reproduce both exactly.

use grouplift_core::{Document, ElementKey, GroupTypeKey, Point3};

use crate::error::Result;

/// Suffix appended to rebuilt group type names, so automation-produced
/// duplicates are distinguishable from hand-authored ones.
pub const REBUILD_SUFFIX: &str = " AUTOMATICALLY";

/// Immutable pre-mutation record of a target group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSnapshot {
    pub name: String,
    pub group_type: GroupTypeKey,
    pub centerpoint: Point3<f64>,
    pub member_ids: Vec<ElementKey>,
}

/// Immutable pre-mutation record of an enclosing parent group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorSnapshot {
    pub name: String,
    pub member_ids: Vec<ElementKey>,
}

/// Captures a target group's snapshot.
pub fn capture_target(doc: &Document, group: ElementKey) -> Result<GroupSnapshot> {
    let data = checked_group_data(doc, group)?;
    let name = doc
        .group_type_name(data.group_type)
        .ok_or(grouplift_core::Error::GroupTypeNotFound(data.group_type))?
        .to_owned();
    Ok(GroupSnapshot {
        name,
        group_type: data.group_type,
        centerpoint: data.centerpoint,
        member_ids: data.members.to_vec(),
    })
}

/// Captures an ancestor group's snapshot.
pub fn capture_ancestor(doc: &Document, group: ElementKey) -> Result<AncestorSnapshot> {
    let data = checked_group_data(doc, group)?;
    let name = doc
        .group_type_name(data.group_type)
        .ok_or(grouplift_core::Error::GroupTypeNotFound(data.group_type))?
        .to_owned();
    Ok(AncestorSnapshot {
        name,
        member_ids: data.members.to_vec(),
    })
}

/// Returns the type name a rebuilt group carries.
///
/// The suffix is applied to the original captured name; a name that already
/// carries it is returned unchanged, so re-running the transform never
/// doubles it.
pub fn rebuilt_name(original: &str) -> String {
    if original.ends_with(REBUILD_SUFFIX) {
        original.to_owned()
    } else {
        format!("{original}{REBUILD_SUFFIX}")
    }
}

fn checked_group_data<'d>(
    doc: &'d Document,
    group: ElementKey,
) -> Result<&'d grouplift_core::GroupData> {
    if !doc.contains(group) {
        return Err(grouplift_core::Error::ElementNotFound(group).into());
    }
    doc.group_data(group)
        .ok_or_else(|| grouplift_core::Error::NotAGroup(group).into())
}
