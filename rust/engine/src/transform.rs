// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The flatten/rebuild transform engine.
//!
//! State sequence:
//!
//! `Idle → Snapshot → Ungroup → RebuildChildren → Remap → RebuildParents → Done`
//!
//! or `Aborted` before `Snapshot` on a pre-flight rejection. Snapshot and
//! Remap are pure; every other stage runs in its own named transaction, so
//! a failure rolls back that stage alone. A stale member reference fails
//! only the affected group's rebuild — groups already rebuilt stay rebuilt,
//! and the engine neither retries nor rolls back committed phases. That
//! partially-applied state is terminal and reported, never masked.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use grouplift_core::{Document, ElementKey};

use crate::audit::{self, AuditRecord, AuditSink};
use crate::error::{Error, Result, StaleReference};
use crate::guard::{check_document, GuardPolicy, Identity};
use crate::hazard::{classify, Hazard, Warning};
use crate::hierarchy::{extract, UngroupPlan};
use crate::remap::remap_member_ids;
use crate::selection::resolve_selection;
use crate::snapshot::{
    capture_ancestor, capture_target, rebuilt_name, AncestorSnapshot, GroupSnapshot,
};

/// Operation name stamped on audit records.
pub const OPERATION_NAME: &str = "Ungroup-Regroup";

// Host-side transaction labels.
const TXN_UNGROUP: &str = "Ungroup";
const TXN_REGROUP: &str = "Regroup";
const TXN_REGROUP_PARENTS: &str = "Regroup the parents";

/// One group that was flattened and rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuiltGroup {
    /// Container identity before the transform (dead afterwards).
    pub original: ElementKey,
    /// Freshly allocated container identity.
    pub rebuilt: ElementKey,
    /// Name carried by the rebuilt group's type.
    pub type_name: String,
}

/// Result of one transform attempt.
#[derive(Debug)]
pub struct TransformOutcome {
    pub rebuilt: Vec<RebuiltGroup>,
    pub rebuilt_parents: Vec<RebuiltGroup>,
    pub warnings: Vec<Warning>,
    /// Per-group rebuild failures. Non-empty means the document ended in a
    /// partially-applied state requiring manual recovery.
    pub failures: Vec<StaleReference>,
    pub audit: AuditRecord,
}

impl TransformOutcome {
    /// Returns `true` if every requested group was rebuilt.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Executes the snapshot → ungroup → rebuild → remap → rebuild sequence
/// against one exclusively-held document.
pub struct TransformEngine<'d> {
    doc: &'d mut Document,
}

impl<'d> TransformEngine<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        Self { doc }
    }

    /// Runs the fully gated pipeline: selection → guard → hazard → execute.
    ///
    /// Every rejection fires before the first transaction; the document is
    /// untouched on any `Err`. Hazard warnings do not block.
    pub fn run(
        &mut self,
        picked: &[ElementKey],
        identity: &dyn Identity,
        policy: &GuardPolicy,
    ) -> Result<TransformOutcome> {
        let targets = resolve_selection(self.doc, picked)?;
        check_document(self.doc, identity, policy)?;

        let warnings = match classify(self.doc, &targets) {
            Hazard::AbortUnsafe { type_name } => {
                warn!(type_name = %type_name, "aborting: nested instances present");
                return Err(Error::UnsafeNested { type_name });
            }
            Hazard::Warn(warnings) => {
                for warning in &warnings {
                    warn!(?warning, "hazard");
                }
                warnings
            }
            Hazard::Proceed => Vec::new(),
        };

        let plan = extract(self.doc, &targets);
        let mut outcome = self.execute(&plan, identity.display_name())?;
        outcome.warnings = warnings;
        Ok(outcome)
    }

    /// Runs the gated pipeline and hands the audit record to `sink`.
    ///
    /// A record is emitted for every attempt that reaches the transform,
    /// complete or partial; pre-flight rejections emit nothing.
    pub fn run_audited(
        &mut self,
        picked: &[ElementKey],
        identity: &dyn Identity,
        policy: &GuardPolicy,
        sink: &mut dyn AuditSink,
    ) -> Result<TransformOutcome> {
        let outcome = self.run(picked, identity, policy)?;
        sink.record(&outcome.audit);
        Ok(outcome)
    }

    /// Executes an ungroup plan without pre-flight gating.
    ///
    /// Callers are expected to classify hazards first; [`Self::run`] does.
    pub fn execute(&mut self, plan: &UngroupPlan, actor: &str) -> Result<TransformOutcome> {
        // Snapshot — strictly before any mutation.
        let ancestor_snaps: Vec<AncestorSnapshot> = plan
            .ancestors
            .iter()
            .map(|&k| capture_ancestor(self.doc, k))
            .collect::<Result<_>>()?;
        let target_snaps: Vec<GroupSnapshot> = plan
            .targets
            .iter()
            .map(|&k| capture_target(self.doc, k))
            .collect::<Result<_>>()?;

        info!(
            targets = plan.targets.len(),
            ancestors = plan.ancestors.len(),
            "starting transform"
        );

        // Ungroup — ancestors first, then targets: an ancestor's member
        // list still references each target by its live container key.
        self.doc.transaction(TXN_UNGROUP, |doc| {
            for &ancestor in &plan.ancestors {
                doc.ungroup(ancestor)?;
            }
            for &target in &plan.targets {
                doc.ungroup(target)?;
            }
            Ok::<_, Error>(())
        })?;

        // Rebuild children from the recorded member sets.
        let mut failures = Vec::new();
        let mut mapping: FxHashMap<ElementKey, ElementKey> = FxHashMap::default();
        let mut rebuilt = Vec::new();

        self.doc.transaction(TXN_REGROUP, |doc| {
            for (snap, &original) in target_snaps.iter().zip(&plan.targets) {
                match rebuild_from_members(doc, &snap.name, &snap.member_ids, Some(snap.centerpoint))
                {
                    Ok((key, type_name)) => {
                        mapping.insert(original, key);
                        rebuilt.push(RebuiltGroup {
                            original,
                            rebuilt: key,
                            type_name,
                        });
                    }
                    Err(Rebuild::Stale(member)) => failures.push(StaleReference {
                        group_name: snap.name.clone(),
                        member,
                    }),
                    Err(Rebuild::Other(e)) => return Err(e),
                }
            }
            Ok::<_, Error>(())
        })?;

        // Remap — pure. A target that failed rebuild has no mapping entry;
        // its dead key survives into the ancestor list, and the ancestor's
        // own rebuild then fails with its own stale reference.
        let remapped: Vec<Vec<ElementKey>> = ancestor_snaps
            .iter()
            .map(|snap| remap_member_ids(&snap.member_ids, &mapping))
            .collect();

        // Rebuild parents from the remapped member sets.
        let mut rebuilt_parents = Vec::new();
        self.doc.transaction(TXN_REGROUP_PARENTS, |doc| {
            for ((snap, members), &original) in
                ancestor_snaps.iter().zip(&remapped).zip(&plan.ancestors)
            {
                match rebuild_from_members(doc, &snap.name, members, None) {
                    Ok((key, type_name)) => rebuilt_parents.push(RebuiltGroup {
                        original,
                        rebuilt: key,
                        type_name,
                    }),
                    Err(Rebuild::Stale(member)) => failures.push(StaleReference {
                        group_name: snap.name.clone(),
                        member,
                    }),
                    Err(Rebuild::Other(e)) => return Err(e),
                }
            }
            Ok::<_, Error>(())
        })?;

        if failures.is_empty() {
            info!(rebuilt = rebuilt.len(), parents = rebuilt_parents.len(), "transform done");
        } else {
            warn!(
                failed = failures.len(),
                "transform finished with stale references; manual recovery required"
            );
        }

        let audit = build_audit(self.doc, actor, &target_snaps, &ancestor_snaps);
        Ok(TransformOutcome {
            rebuilt,
            rebuilt_parents,
            warnings: Vec::new(),
            failures,
            audit,
        })
    }
}

enum Rebuild {
    Stale(ElementKey),
    Other(Error),
}

/// Creates a fresh group type and instance from a recorded member set.
///
/// Member liveness is verified before anything is allocated, so a stale
/// group leaves no orphan type behind.
fn rebuild_from_members(
    doc: &mut Document,
    original_name: &str,
    members: &[ElementKey],
    centerpoint: Option<Point3<f64>>,
) -> std::result::Result<(ElementKey, String), Rebuild> {
    if let Some(&dead) = members.iter().find(|&&m| !doc.contains(m)) {
        return Err(Rebuild::Stale(dead));
    }

    let type_name = rebuilt_name(original_name);
    let ty = doc.add_group_type(type_name.clone());
    let key = match centerpoint {
        Some(cp) => doc.create_group_at(ty, members, cp),
        None => doc.create_group(ty, members),
    }
    .map_err(|e| Rebuild::Other(e.into()))?;

    debug!(name = %type_name, "rebuilt group");
    Ok((key, type_name))
}

fn build_audit(
    doc: &Document,
    actor: &str,
    targets: &[GroupSnapshot],
    ancestors: &[AncestorSnapshot],
) -> AuditRecord {
    AuditRecord {
        operation: OPERATION_NAME.to_owned(),
        actor: actor.to_owned(),
        document: audit::subject_document_name(doc.title()),
        group_names: targets.iter().map(|s| s.name.clone()).collect(),
        member_id_sets: targets
            .iter()
            .map(|s| s.member_ids.iter().copied().map(audit::element_id).collect())
            .collect(),
        parent_group_names: ancestors.iter().map(|s| s.name.clone()).collect(),
        parent_member_id_sets: ancestors
            .iter()
            .map(|s| s.member_ids.iter().copied().map(audit::element_id).collect())
            .collect(),
        group_type_ids: targets
            .iter()
            .map(|s| audit::group_type_id(s.group_type))
            .collect(),
        centerpoints: targets
            .iter()
            .map(|s| [s.centerpoint.x, s.centerpoint.y, s.centerpoint.z])
            .collect(),
    }
}
