// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the element/group document model.
//!
//! The [`Document`] is the central owner of all model data. Every placed
//! element (including group instances) lives inside a slot map with a stable,
//! generational key. A dimension-dependents index enables upward lookup
//! (element → which dimension annotations reference it), mirroring the way
//! hosts expose "dependent elements" on a member.
//!
//! Group nesting is represented purely by membership: a group's member list
//! may contain the key of another group, and the inner group's `group`
//! back-reference names its container. There is no separate nesting edge.

use nalgebra::Point3;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::keys::{ElementKey, GroupTypeKey};

/// Member keys of a group. Most groups hold a handful of elements.
pub type MemberList = SmallVec<[ElementKey; 8]>;

/// Data stored for a group type: the reusable named template.
#[derive(Debug, Clone)]
pub struct GroupTypeData {
    pub name: String,
}

/// Data stored for a placed group instance.
#[derive(Debug, Clone)]
pub struct GroupData {
    pub group_type: GroupTypeKey,
    pub members: MemberList,
    pub centerpoint: Point3<f64>,
}

/// What an element is, beyond its identity and placement.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// An ordinary model element.
    Plain,
    /// A group container instance.
    Group(GroupData),
    /// A dimension annotation constraining the referenced elements.
    Dimension { references: Vec<ElementKey> },
}

/// Data stored for a placed element.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub category: Option<Category>,
    pub location: Point3<f64>,
    /// Enclosing group, if this element is currently a member of one.
    pub group: Option<ElementKey>,
    pub kind: ElementKind,
}

/// The document that owns all elements, group types, and the dependents index.
///
/// # Example
///
/// ```
/// use grouplift_core::{Category, Document, Point3};
///
/// let mut doc = Document::new("Office_Tower_A");
/// let desk = doc.add_element(Category::Furniture, Point3::new(1.0, 0.0, 0.0));
/// let chair = doc.add_element(Category::Furniture, Point3::new(3.0, 0.0, 0.0));
///
/// let desk_set = doc.add_group_type("Desk Set");
/// let group = doc.create_group(desk_set, &[desk, chair]).unwrap();
/// assert_eq!(doc.group_members(group).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) elements: SlotMap<ElementKey, ElementData>,
    pub(crate) group_types: SlotMap<GroupTypeKey, GroupTypeData>,

    // Upward adjacency: element → dimension annotations referencing it
    pub(crate) dependents: FxHashMap<ElementKey, FxHashSet<ElementKey>>,

    title: String,
    detached: bool,
}

impl Document {
    /// Creates a new, empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            elements: SlotMap::with_key(),
            group_types: SlotMap::with_key(),
            dependents: FxHashMap::default(),
            title: title.into(),
            detached: false,
        }
    }

    // --- Document identity ---

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns `true` if this document is a detached/unauthoritative copy.
    pub fn detached(&self) -> bool {
        self.detached
    }

    /// Marks this document as a detached copy.
    pub fn mark_detached(&mut self) {
        self.detached = true;
    }

    // --- Element operations ---

    /// Adds a plain element with the given category and location.
    pub fn add_element(&mut self, category: Category, location: Point3<f64>) -> ElementKey {
        self.elements.insert(ElementData {
            category: Some(category),
            location,
            group: None,
            kind: ElementKind::Plain,
        })
    }

    /// Adds a plain element with no resolvable category.
    ///
    /// Such elements never match category checks; they are not faults.
    pub fn add_uncategorized_element(&mut self, location: Point3<f64>) -> ElementKey {
        self.elements.insert(ElementData {
            category: None,
            location,
            group: None,
            kind: ElementKind::Plain,
        })
    }

    /// Adds a dimension annotation constraining the referenced elements.
    ///
    /// The dimension is registered in the dependents index of every
    /// referenced element. Returns an error if any reference is dead.
    pub fn add_dimension(&mut self, references: &[ElementKey]) -> Result<ElementKey> {
        for &r in references {
            if !self.elements.contains_key(r) {
                return Err(Error::ElementNotFound(r));
            }
        }

        let key = self.elements.insert(ElementData {
            category: Some(Category::Dimension),
            location: Point3::origin(),
            group: None,
            kind: ElementKind::Dimension {
                references: references.to_vec(),
            },
        });

        for &r in references {
            self.link_dependent(r, key);
        }
        Ok(key)
    }

    /// Deletes an element outright, as a host-side deletion would.
    ///
    /// Any group that lists the element as a member keeps the now-dead key
    /// in its member list; resolving it later yields a stale reference.
    pub fn remove_element(&mut self, key: ElementKey) -> Result<()> {
        if self.elements.remove(key).is_none() {
            return Err(Error::ElementNotFound(key));
        }
        self.dependents.remove(&key);
        Ok(())
    }

    /// Returns the element data for the given key, or `None` if not found.
    pub fn element(&self, key: ElementKey) -> Option<&ElementData> {
        self.elements.get(key)
    }

    /// Returns `true` if the key references a live element.
    pub fn contains(&self, key: ElementKey) -> bool {
        self.elements.contains_key(key)
    }

    /// Returns the element's category tag, if it has one.
    pub fn category(&self, key: ElementKey) -> Option<Category> {
        self.elements.get(key).and_then(|e| e.category)
    }

    /// Returns the number of live elements (including group containers).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // --- Group type operations ---

    /// Registers a new group type with the given name.
    pub fn add_group_type(&mut self, name: impl Into<String>) -> GroupTypeKey {
        self.group_types.insert(GroupTypeData { name: name.into() })
    }

    /// Returns the group type data for the given key, or `None` if not found.
    pub fn group_type(&self, key: GroupTypeKey) -> Option<&GroupTypeData> {
        self.group_types.get(key)
    }

    /// Returns the name of a group type.
    pub fn group_type_name(&self, key: GroupTypeKey) -> Option<&str> {
        self.group_types.get(key).map(|t| t.name.as_str())
    }

    // --- Group operations ---

    /// Creates a group instance from the given members.
    ///
    /// Members must be live and not already grouped. The group's centerpoint
    /// is the centroid of the member locations. Each member's back-reference
    /// is set to the new container.
    pub fn create_group(
        &mut self,
        group_type: GroupTypeKey,
        members: &[ElementKey],
    ) -> Result<ElementKey> {
        let centerpoint = self.member_centroid(members)?;
        self.create_group_at(group_type, members, centerpoint)
    }

    /// Creates a group instance with an explicit centerpoint.
    ///
    /// Used when rebuilding a group whose original centerpoint must be
    /// preserved exactly.
    pub fn create_group_at(
        &mut self,
        group_type: GroupTypeKey,
        members: &[ElementKey],
        centerpoint: Point3<f64>,
    ) -> Result<ElementKey> {
        if !self.group_types.contains_key(group_type) {
            return Err(Error::GroupTypeNotFound(group_type));
        }
        if members.is_empty() {
            return Err(Error::EmptyGroup);
        }
        for &m in members {
            match self.elements.get(m) {
                None => return Err(Error::ElementNotFound(m)),
                Some(el) if el.group.is_some() => return Err(Error::AlreadyGrouped(m)),
                Some(_) => {}
            }
        }

        let key = self.elements.insert(ElementData {
            category: Some(Category::ModelGroup),
            location: centerpoint,
            group: None,
            kind: ElementKind::Group(GroupData {
                group_type,
                members: SmallVec::from_slice(members),
                centerpoint,
            }),
        });

        for &m in members {
            if let Some(el) = self.elements.get_mut(m) {
                el.group = Some(key);
            }
        }
        Ok(key)
    }

    /// Dissolves a group container, detaching its members.
    ///
    /// Members keep their keys, categories, and geometry; only their
    /// back-reference is cleared. The container key is dead afterwards and
    /// will never be reissued. Returns the detached member keys.
    pub fn ungroup(&mut self, group: ElementKey) -> Result<MemberList> {
        let data = match self.elements.get(group) {
            None => return Err(Error::ElementNotFound(group)),
            Some(el) => match &el.kind {
                ElementKind::Group(g) => g.clone(),
                _ => return Err(Error::NotAGroup(group)),
            },
        };

        self.elements.remove(group);
        for &m in &data.members {
            // A member may already be dead if it was removed out-of-band.
            if let Some(el) = self.elements.get_mut(m) {
                el.group = None;
            }
        }
        self.dependents.remove(&group);
        Ok(data.members)
    }

    // --- Group queries ---

    /// Returns `true` if the key references a live group instance.
    pub fn is_group(&self, key: ElementKey) -> bool {
        self.group_data(key).is_some()
    }

    /// Returns the group data for the given key, or `None` if the element
    /// is missing or not a group.
    pub fn group_data(&self, key: ElementKey) -> Option<&GroupData> {
        match self.elements.get(key) {
            Some(ElementData {
                kind: ElementKind::Group(g),
                ..
            }) => Some(g),
            _ => None,
        }
    }

    /// Returns the member keys of a group.
    pub fn group_members(&self, key: ElementKey) -> Option<&[ElementKey]> {
        self.group_data(key).map(|g| g.members.as_slice())
    }

    /// Returns the recorded centerpoint of a group.
    pub fn group_centerpoint(&self, key: ElementKey) -> Option<Point3<f64>> {
        self.group_data(key).map(|g| g.centerpoint)
    }

    /// Returns the type of a group instance.
    pub fn group_type_of(&self, key: ElementKey) -> Option<GroupTypeKey> {
        self.group_data(key).map(|g| g.group_type)
    }

    /// Returns the enclosing group of an element, if that container is live.
    ///
    /// A back-reference to a dead container counts as top-level.
    pub fn parent_group(&self, key: ElementKey) -> Option<ElementKey> {
        self.elements
            .get(key)
            .and_then(|e| e.group)
            .filter(|&g| self.elements.contains_key(g))
    }

    /// Iterates over all live group instances.
    pub fn groups(&self) -> impl Iterator<Item = (ElementKey, &GroupData)> {
        self.elements.iter().filter_map(|(k, el)| match &el.kind {
            ElementKind::Group(g) => Some((k, g)),
            _ => None,
        })
    }

    /// Returns the number of live group instances.
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    /// Returns every placed group whose type carries exactly the given name.
    ///
    /// Duplicated types with the same user-facing name count as the same
    /// name; this is how shared-type propagation is detected.
    pub fn group_instances_named(&self, name: &str) -> Vec<ElementKey> {
        self.groups()
            .filter(|(_, g)| self.group_type_name(g.group_type) == Some(name))
            .map(|(k, _)| k)
            .collect()
    }

    // --- Dependents index ---

    /// Iterates over the dimension annotations referencing an element.
    pub fn dependents(&self, key: ElementKey) -> impl Iterator<Item = ElementKey> + '_ {
        self.dependents.get(&key).into_iter().flatten().copied()
    }

    /// Returns `true` if any live dimension annotation references the element.
    pub fn has_dimension_dependent(&self, key: ElementKey) -> bool {
        self.dependents(key).any(|d| {
            matches!(
                self.elements.get(d),
                Some(ElementData {
                    kind: ElementKind::Dimension { .. },
                    ..
                })
            )
        })
    }

    /// Register that a dimension references an element (upward adjacency).
    pub(crate) fn link_dependent(&mut self, element: ElementKey, dimension: ElementKey) {
        self.dependents.entry(element).or_default().insert(dimension);
    }

    // --- Internal helpers ---

    fn member_centroid(&self, members: &[ElementKey]) -> Result<Point3<f64>> {
        if members.is_empty() {
            return Err(Error::EmptyGroup);
        }
        let mut sum = nalgebra::Vector3::zeros();
        for &m in members {
            let el = self.elements.get(m).ok_or(Error::ElementNotFound(m))?;
            sum += el.location.coords;
        }
        Ok(Point3::from(sum / members.len() as f64))
    }
}
