// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hazard classification for a set of regroup targets.
//!
//! Classification is a pure read pass over the document. The outcomes:
//!
//! - **Proceed** — every target's type is placed exactly once, nothing
//!   nested.
//! - **Warn** — a target's type name is shared by multiple placed
//!   instances, so edits after ungrouping will propagate to the siblings;
//!   escalated to a dimension risk when any member of any same-named
//!   instance carries a dimension dependent that could silently break.
//! - **AbortUnsafe** — nesting is present anywhere among same-named
//!   instances. Flattening nested groups is unsupported; the whole
//!   operation must stop with zero mutations.
//!
//! Warnings do not block the transform. An abort supersedes everything,
//! including the one-level ancestor handling the hierarchy extractor
//! models.

use rustc_hash::FxHashSet;
use tracing::debug;

use grouplift_core::{Category, Document, ElementKey};

/// A non-fatal hazard surfaced to the user before the transform runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Multiple placed instances share the type; member edits propagate.
    MemberModificationRisk {
        type_name: String,
        placed_instances: usize,
    },
    /// Same, but members carry dimension constraints that may break.
    DimensionRisk {
        type_name: String,
        dimension_count: usize,
    },
}

/// Overall classification for one regroup operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hazard {
    /// No shared types, no nesting.
    Proceed,
    /// Shared-type hazards present; the transform may still run.
    Warn(Vec<Warning>),
    /// Nesting present among same-named instances; abort with no mutations.
    AbortUnsafe { type_name: String },
}

/// Classifies the given targets against the document.
///
/// Instance counting matches group type *names*, not type keys: duplicated
/// types with the same user-facing name behave as one shared template for
/// propagation purposes.
pub fn classify(doc: &Document, targets: &[ElementKey]) -> Hazard {
    let mut warnings = Vec::new();
    let mut seen_names = FxHashSet::default();

    for &target in targets {
        let Some(ty) = doc.group_type_of(target) else {
            continue;
        };
        let Some(name) = doc.group_type_name(ty).map(str::to_owned) else {
            continue;
        };
        if !seen_names.insert(name.clone()) {
            continue;
        }

        let instances = doc.group_instances_named(&name);

        if instances.iter().any(|&g| doc.parent_group(g).is_some()) {
            debug!(type_name = %name, "nested instance among same-named groups");
            return Hazard::AbortUnsafe { type_name: name };
        }

        if instances.len() > 1 {
            let dimension_count = count_dimension_dependents(doc, &instances);
            debug!(
                type_name = %name,
                placed_instances = instances.len(),
                dimension_count,
                "shared type"
            );
            if dimension_count > 0 {
                warnings.push(Warning::DimensionRisk {
                    type_name: name,
                    dimension_count,
                });
            } else {
                warnings.push(Warning::MemberModificationRisk {
                    type_name: name,
                    placed_instances: instances.len(),
                });
            }
        }
    }

    if warnings.is_empty() {
        Hazard::Proceed
    } else {
        Hazard::Warn(warnings)
    }
}

/// Counts distinct dimension annotations referencing any given instance or
/// any of its members.
fn count_dimension_dependents(doc: &Document, instances: &[ElementKey]) -> usize {
    let mut seen = FxHashSet::default();
    for &inst in instances {
        for dep in doc.dependents(inst) {
            if doc.category(dep) == Some(Category::Dimension) {
                seen.insert(dep);
            }
        }
        for &member in doc.group_members(inst).unwrap_or(&[]) {
            for dep in doc.dependents(member) {
                if doc.category(dep) == Some(Category::Dimension) {
                    seen.insert(dep);
                }
            }
        }
    }
    seen.len()
}
