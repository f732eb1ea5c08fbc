// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests for the flatten/rebuild transform.

use approx::assert_relative_eq;
use grouplift_core::{Category, Document, ElementKey, Point3};
use grouplift_engine::{
    extract, FixedIdentity, GuardPolicy, TransformEngine, REBUILD_SUFFIX,
};
use rustc_hash::FxHashSet;

fn identity() -> FixedIdentity {
    FixedIdentity::new("Jane Doe")
}

fn member_set(doc: &Document, group: ElementKey) -> FxHashSet<ElementKey> {
    doc.group_members(group).unwrap().iter().copied().collect()
}

#[test]
fn round_trip_identity_for_top_level_group() {
    let mut doc = Document::new("Office_Tower_jdoe");
    let desk = doc.add_element(Category::Furniture, Point3::new(0.0, 0.0, 0.0));
    let chair = doc.add_element(Category::Furniture, Point3::new(2.0, 2.0, 0.0));
    let lamp = doc.add_element(Category::Furniture, Point3::new(4.0, 1.0, 3.0));
    let ty = doc.add_group_type("Desk Set");
    let group = doc.create_group(ty, &[desk, chair, lamp]).unwrap();
    let original_cp = doc.group_centerpoint(group).unwrap();

    let outcome = TransformEngine::new(&mut doc)
        .run(&[group], &identity(), &GuardPolicy::default())
        .unwrap();

    assert!(outcome.is_complete());
    assert!(outcome.warnings.is_empty());

    let rebuilt = outcome.rebuilt[0].rebuilt;
    assert_ne!(rebuilt, group);
    assert_eq!(
        member_set(&doc, rebuilt),
        [desk, chair, lamp].into_iter().collect()
    );

    let cp = doc.group_centerpoint(rebuilt).unwrap();
    assert_relative_eq!(cp.x, original_cp.x);
    assert_relative_eq!(cp.y, original_cp.y);
    assert_relative_eq!(cp.z, original_cp.z);

    // Members kept their identities and categories.
    assert_eq!(doc.category(desk), Some(Category::Furniture));
    assert_eq!(doc.parent_group(desk), Some(rebuilt));
}

#[test]
fn multiple_independent_groups_rebuild_in_one_pass() {
    let mut doc = Document::new("Test");
    let a = doc.add_element(Category::Furniture, Point3::origin());
    let b = doc.add_element(Category::Wall, Point3::origin());
    let ty_a = doc.add_group_type("Alpha");
    let ty_b = doc.add_group_type("Beta");
    let group_a = doc.create_group(ty_a, &[a]).unwrap();
    let group_b = doc.create_group(ty_b, &[b]).unwrap();

    let outcome = TransformEngine::new(&mut doc)
        .run(&[group_a, group_b], &identity(), &GuardPolicy::default())
        .unwrap();

    assert_eq!(outcome.rebuilt.len(), 2);
    assert!(outcome.rebuilt_parents.is_empty());
    assert_eq!(doc.group_count(), 2);
    assert_eq!(doc.parent_group(a), Some(outcome.rebuilt[0].rebuilt));
    assert_eq!(doc.parent_group(b), Some(outcome.rebuilt[1].rebuilt));
}

#[test]
fn parent_remap_replaces_only_the_target_id() {
    let mut doc = Document::new("Test");
    // Ancestor membership analog of [5, 7, 9] where 7 is the target group.
    let five = doc.add_element(Category::Wall, Point3::origin());
    let nine = doc.add_element(Category::Wall, Point3::origin());
    let inner_member = doc.add_element(Category::Furniture, Point3::origin());

    let inner_ty = doc.add_group_type("Inner");
    let outer_ty = doc.add_group_type("Outer");
    let seven = doc.create_group(inner_ty, &[inner_member]).unwrap();
    let outer = doc.create_group(outer_ty, &[five, seven, nine]).unwrap();

    let plan = extract(&doc, &[seven]);
    let outcome = TransformEngine::new(&mut doc)
        .execute(&plan, "Jane Doe")
        .unwrap();

    assert!(outcome.is_complete());
    let forty_two = outcome.rebuilt[0].rebuilt;
    let new_outer = outcome.rebuilt_parents[0].rebuilt;

    assert_eq!(
        member_set(&doc, new_outer),
        [five, forty_two, nine].into_iter().collect()
    );
    assert_eq!(doc.parent_group(five), Some(new_outer));
    assert_eq!(doc.parent_group(nine), Some(new_outer));
    assert_eq!(doc.parent_group(forty_two), Some(new_outer));
    assert!(!doc.contains(seven));
    assert!(!doc.contains(outer));
}

#[test]
fn rebuilt_type_names_carry_the_suffix_once() {
    let mut doc = Document::new("Test");
    let a = doc.add_element(Category::Furniture, Point3::origin());
    let ty = doc.add_group_type("Desk Set");
    let group = doc.create_group(ty, &[a]).unwrap();

    let outcome = TransformEngine::new(&mut doc)
        .run(&[group], &identity(), &GuardPolicy::default())
        .unwrap();
    let first = outcome.rebuilt[0].rebuilt;
    assert_eq!(outcome.rebuilt[0].type_name, "Desk Set AUTOMATICALLY");

    // Re-running on the already-suffixed group must not double the suffix.
    let outcome = TransformEngine::new(&mut doc)
        .run(&[first], &identity(), &GuardPolicy::default())
        .unwrap();
    assert_eq!(outcome.rebuilt[0].type_name, "Desk Set AUTOMATICALLY");

    let second = outcome.rebuilt[0].rebuilt;
    let ty = doc.group_type_of(second).unwrap();
    let name = doc.group_type_name(ty).unwrap();
    assert!(name.ends_with(REBUILD_SUFFIX));
    assert!(!name.ends_with(" AUTOMATICALLY AUTOMATICALLY"));
}

#[test]
fn partial_failure_isolates_the_stale_group() {
    let mut doc = Document::new("Test");
    let a1 = doc.add_element(Category::Furniture, Point3::origin());
    let a2 = doc.add_element(Category::Furniture, Point3::origin());
    let b1 = doc.add_element(Category::Furniture, Point3::origin());
    let b2 = doc.add_element(Category::Furniture, Point3::origin());
    let ty_a = doc.add_group_type("Alpha");
    let ty_b = doc.add_group_type("Beta");
    let group_a = doc.create_group(ty_a, &[a1, a2]).unwrap();
    let group_b = doc.create_group(ty_b, &[b1, b2]).unwrap();

    // a2 is deleted externally; its recorded id goes stale.
    doc.remove_element(a2).unwrap();

    let outcome = TransformEngine::new(&mut doc)
        .run(&[group_a, group_b], &identity(), &GuardPolicy::default())
        .unwrap();

    assert!(!outcome.is_complete());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].group_name, "Alpha");
    assert_eq!(outcome.failures[0].member, a2);

    // Beta's rebuild is intact.
    assert_eq!(outcome.rebuilt.len(), 1);
    let new_b = outcome.rebuilt[0].rebuilt;
    assert_eq!(member_set(&doc, new_b), [b1, b2].into_iter().collect());

    // Alpha's surviving member is left flattened, not silently regrouped.
    assert_eq!(doc.parent_group(a1), None);
    assert!(!doc.contains(group_a));
}

#[test]
fn stale_target_cascades_into_its_ancestor() {
    let mut doc = Document::new("Test");
    let inner_member = doc.add_element(Category::Furniture, Point3::origin());
    let sibling = doc.add_element(Category::Wall, Point3::origin());
    let inner_ty = doc.add_group_type("Inner");
    let outer_ty = doc.add_group_type("Outer");
    let inner = doc.create_group(inner_ty, &[inner_member]).unwrap();
    doc.create_group(outer_ty, &[inner, sibling]).unwrap();

    let plan = extract(&doc, &[inner]);

    // The inner group's only member dies before execution.
    doc.remove_element(inner_member).unwrap();

    let outcome = TransformEngine::new(&mut doc)
        .execute(&plan, "Jane Doe")
        .unwrap();

    // Inner fails on its dead member; the ancestor then fails on the dead
    // inner container id that was never remapped.
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[0].group_name, "Inner");
    assert_eq!(outcome.failures[1].group_name, "Outer");
    assert!(outcome.rebuilt.is_empty());
    assert!(outcome.rebuilt_parents.is_empty());

    // The sibling is left flattened.
    assert_eq!(doc.parent_group(sibling), None);
    assert!(doc.contains(sibling));
}
