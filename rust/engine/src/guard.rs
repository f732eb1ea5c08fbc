// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Environment guard and the identity collaborator boundary.
//!
//! The guard refuses to run against a detached/unauthoritative copy of a
//! document unless the acting identity appears in the override list. It
//! runs before any mutation. Identity resolution itself (OS account
//! lookup) lives outside the engine behind the [`Identity`] trait and is
//! treated as always available.

use serde::{Deserialize, Serialize};

use grouplift_core::Document;

use crate::error::{Error, Result};

/// Resolves the current actor's display name.
pub trait Identity {
    fn display_name(&self) -> &str;
}

/// An identity with a fixed display name, for embedding and tests.
#[derive(Debug, Clone)]
pub struct FixedIdentity(String);

impl FixedIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Identity for FixedIdentity {
    fn display_name(&self) -> &str {
        &self.0
    }
}

/// Which identities may operate on detached documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardPolicy {
    #[serde(default)]
    pub override_identities: Vec<String>,
}

impl GuardPolicy {
    /// Returns `true` if the identity is an authorized override.
    pub fn permits(&self, identity: &dyn Identity) -> bool {
        self.override_identities
            .iter()
            .any(|name| name == identity.display_name())
    }
}

/// Refuses detached documents for non-override identities.
pub fn check_document(
    doc: &Document,
    identity: &dyn Identity,
    policy: &GuardPolicy,
) -> Result<()> {
    if doc.detached() && !policy.permits(identity) {
        return Err(Error::DetachedDocument {
            actor: identity.display_name().to_owned(),
        });
    }
    Ok(())
}
