// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchy extraction: from target groups to an ordered ungroup plan.
//!
//! Each target's enclosing parent group (if any) becomes an ancestor.
//! Ancestors must be flattened before their contents are touched: an
//! ancestor's member list still references a target by its container key,
//! and that key dies the moment the target is ungrouped.
//!
//! Only one level of enclosure is modeled. Deeper nesting is rejected
//! upstream by hazard classification before any plan executes.

use rustc_hash::FxHashSet;

use grouplift_core::{Document, ElementKey};

/// The ordered ungroup sequence: ancestors first, then targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngroupPlan {
    /// Distinct enclosing parent groups, in first-seen order.
    pub ancestors: Vec<ElementKey>,
    /// Distinct target groups, in selection order.
    pub targets: Vec<ElementKey>,
}

impl UngroupPlan {
    /// Total number of groups the plan will ungroup.
    pub fn len(&self) -> usize {
        self.ancestors.len() + self.targets.len()
    }

    /// Returns `true` if the plan touches nothing.
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty() && self.targets.is_empty()
    }
}

/// Builds the ungroup plan for the given targets.
///
/// Targets are deduplicated in order. A target whose enclosing container is
/// dead counts as top-level and contributes no ancestor.
pub fn extract(doc: &Document, targets: &[ElementKey]) -> UngroupPlan {
    let mut seen_targets = FxHashSet::default();
    let mut plan_targets = Vec::new();
    for &t in targets {
        if seen_targets.insert(t) {
            plan_targets.push(t);
        }
    }

    let mut seen_ancestors = FxHashSet::default();
    let mut ancestors = Vec::new();
    for &t in &plan_targets {
        if let Some(parent) = doc.parent_group(t) {
            if seen_ancestors.insert(parent) {
                ancestors.push(parent);
            }
        }
    }

    UngroupPlan {
        ancestors,
        targets: plan_targets,
    }
}
