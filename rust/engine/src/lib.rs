// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Grouplift Engine
//!
//! Ungroup/regroup transform engine for bulk-editing grouped BIM elements.
//!
//! Editing elements inside a placed group safely requires flattening the
//! grouping first and reconstructing the exact same structure afterwards,
//! with container identities remapped consistently. This crate implements
//! that transform over the [`grouplift_core`] document model:
//!
//! - **Selection** — validates the picked elements as group containers.
//! - **Hierarchy** — finds each target's enclosing parent and orders the
//!   ungroup sequence (parents before targets).
//! - **Hazard** — classifies the operation: proceed, warn on shared types
//!   or dimension constraints, or abort outright on nested groups.
//! - **Transform** — snapshot → ungroup → rebuild children → remap →
//!   rebuild parents, each mutating stage in its own transaction.
//! - **Audit** — one structured record per attempted transform, handed to
//!   an external sink.
//!
//! ## Quick Start
//!
//! ```
//! use grouplift_core::{Category, Document, Point3};
//! use grouplift_engine::{FixedIdentity, GuardPolicy, TransformEngine};
//!
//! let mut doc = Document::new("Office_Tower_jdoe");
//! let desk = doc.add_element(Category::Furniture, Point3::new(0.0, 0.0, 0.0));
//! let chair = doc.add_element(Category::Furniture, Point3::new(2.0, 0.0, 0.0));
//! let ty = doc.add_group_type("Desk Set");
//! let group = doc.create_group(ty, &[desk, chair]).unwrap();
//!
//! let identity = FixedIdentity::new("Jane Doe");
//! let outcome = TransformEngine::new(&mut doc)
//!     .run(&[group], &identity, &GuardPolicy::default())
//!     .unwrap();
//!
//! assert!(outcome.is_complete());
//! assert!(!doc.contains(group));
//! ```

pub mod audit;
pub mod error;
pub mod guard;
pub mod hazard;
pub mod hierarchy;
pub mod remap;
pub mod selection;
pub mod snapshot;
pub mod transform;

pub use audit::{AuditRecord, AuditSink, MemorySink};
pub use error::{Error, Result, StaleReference};
pub use guard::{FixedIdentity, GuardPolicy, Identity};
pub use hazard::{classify, Hazard, Warning};
pub use hierarchy::{extract, UngroupPlan};
pub use remap::remap_member_ids;
pub use selection::{resolve_selection, SelectionError};
pub use snapshot::{rebuilt_name, AncestorSnapshot, GroupSnapshot, REBUILD_SUFFIX};
pub use transform::{RebuiltGroup, TransformEngine, TransformOutcome, OPERATION_NAME};
