// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Audit record construction at the persistence boundary.
//!
//! The engine emits one structured record per attempted transform; storage
//! format and destination belong to the consumer behind [`AuditSink`].
//! Arena keys are rendered as portable integers so records survive outside
//! the process that produced them.

use serde::Serialize;
use slotmap::Key;

use grouplift_core::{ElementKey, GroupTypeKey};

use crate::error::{Error, Result};

/// Structured before-state record of one transform attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub operation: String,
    pub actor: String,
    pub document: String,
    pub group_names: Vec<String>,
    pub member_id_sets: Vec<Vec<u64>>,
    pub parent_group_names: Vec<String>,
    pub parent_member_id_sets: Vec<Vec<u64>>,
    pub group_type_ids: Vec<u64>,
    pub centerpoints: Vec<[f64; 3]>,
}

impl AuditRecord {
    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// External persistence boundary for audit records.
pub trait AuditSink {
    fn record(&mut self, record: &AuditRecord);
}

/// An in-memory sink, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<AuditRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }
}

impl AuditSink for MemorySink {
    fn record(&mut self, record: &AuditRecord) {
        self.records.push(record.clone());
    }
}

/// Portable integer form of an element key.
pub fn element_id(key: ElementKey) -> u64 {
    key.data().as_ffi()
}

/// Portable integer form of a group type key.
pub fn group_type_id(key: GroupTypeKey) -> u64 {
    key.data().as_ffi()
}

/// Derives the subject document name from a document title.
///
/// Workshared central titles carry a trailing `_username` segment; the
/// final underscore-separated segment is stripped. A title with no
/// underscore is returned unchanged.
pub fn subject_document_name(title: &str) -> String {
    match title.rsplit_once('_') {
        Some((stem, _)) => stem.to_owned(),
        None => title.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AuditRecord {
        AuditRecord {
            operation: "Ungroup-Regroup".to_owned(),
            actor: "Jane Doe".to_owned(),
            document: "Office_Tower".to_owned(),
            group_names: vec!["Desk Set".to_owned()],
            member_id_sets: vec![vec![1, 2, 3]],
            parent_group_names: vec![],
            parent_member_id_sets: vec![],
            group_type_ids: vec![7],
            centerpoints: vec![[1.0, 2.0, 3.0]],
        }
    }

    #[test]
    fn document_name_strips_trailing_segment() {
        assert_eq!(subject_document_name("Office_Tower_jdoe"), "Office_Tower");
        assert_eq!(subject_document_name("A_B_C_D"), "A_B_C");
    }

    #[test]
    fn document_name_without_underscore_is_unchanged() {
        assert_eq!(subject_document_name("Office"), "Office");
    }

    #[test]
    fn record_serializes_to_json() {
        let json = sample_record().to_json().unwrap();
        assert!(json.contains("\"operation\""));
        assert!(json.contains("Desk Set"));
        assert!(json.contains("Office_Tower"));
    }

    #[test]
    fn memory_sink_collects_records() {
        let mut sink = MemorySink::new();
        sink.record(&sample_record());
        sink.record(&sample_record());
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.records()[0].actor, "Jane Doe");
    }
}
