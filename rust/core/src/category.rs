// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element category tags.
//!
//! Categories are resolved once, when an element enters the document, into
//! an explicit tag. Downstream checks (group-container filtering, dimension
//! detection) match on the tag instead of comparing category name strings.
//! An element may carry no category at all; a missing category never matches
//! anything.

/// Host category of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A model group container instance.
    ModelGroup,
    /// A dimension or constraint annotation.
    Dimension,
    Wall,
    Door,
    Furniture,
    /// Any category the tool does not need to distinguish.
    Generic,
}

impl Category {
    /// Returns `true` for the group container category.
    ///
    /// Only elements of this category are valid regroup targets.
    pub fn is_group_container(&self) -> bool {
        matches!(self, Category::ModelGroup)
    }

    /// Returns `true` for dimension/constraint annotations.
    pub fn is_dimension(&self) -> bool {
        matches!(self, Category::Dimension)
    }

    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ModelGroup => "ModelGroup",
            Category::Dimension => "Dimension",
            Category::Wall => "Wall",
            Category::Door => "Door",
            Category::Furniture => "Furniture",
            Category::Generic => "Generic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
