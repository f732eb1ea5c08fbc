// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Grouplift Core
//!
//! Arena-based element/group document model for BIM regrouping tools.
//!
//! This crate provides the shared document model the regroup engine operates
//! on: placed elements live in slot maps with stable, generational keys, and
//! group instances reference a named [`GroupTypeData`] template plus an
//! ordered member-key list. Nesting is represented by membership — a group's
//! member list may contain another group's key.
//!
//! Mutating phases run inside named [`Document::transaction`] boundaries:
//! a failure rolls back only that phase, matching the host's transactional
//! semantics. The model is single-threaded and performs no locking of its
//! own.
//!
//! ## Quick Start
//!
//! ```
//! use grouplift_core::{Category, Document, Point3};
//!
//! let mut doc = Document::new("Office_Tower_A");
//! let desk = doc.add_element(Category::Furniture, Point3::new(0.0, 0.0, 0.0));
//! let chair = doc.add_element(Category::Furniture, Point3::new(2.0, 0.0, 0.0));
//!
//! let ty = doc.add_group_type("Desk Set");
//! let group = doc.create_group(ty, &[desk, chair]).unwrap();
//!
//! let members = doc.ungroup(group).unwrap();
//! assert_eq!(members.len(), 2);
//! assert!(!doc.contains(group));
//! ```

pub mod category;
pub mod document;
pub mod error;
pub mod keys;
pub mod transaction;

pub use category::Category;
pub use document::{Document, ElementData, ElementKind, GroupData, GroupTypeData, MemberList};
pub use error::{Error, Result};
pub use keys::{ElementKey, GroupTypeKey};

/// Re-export of the math point type used for locations and centerpoints.
pub use nalgebra::Point3;
