//! Taxonomy construction tests

use std::collections::HashSet;

use beerburst::*;
use pretty_assertions::assert_eq;

fn names(taxonomy: &Taxonomy, ids: impl IntoIterator<Item = DescriptionId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| taxonomy.name(id).to_string())
        .collect()
}

fn child_names(taxonomy: &Taxonomy, name: &str) -> Vec<String> {
    let id = taxonomy.find(name).unwrap();
    names(taxonomy, taxonomy.children(id))
}

// ═══════════════════════════════════════════════════════════════════════
// Basic Shapes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_two_children_share_synthesized_parent() {
    let t = Taxonomy::from_records(&[
        DescriptionRecord::child("IPA", "Ale"),
        DescriptionRecord::child("Stout", "Ale"),
    ])
    .unwrap();

    assert_eq!(t.len(), 3);
    let mut registered: Vec<_> = t.names().collect();
    registered.sort();
    assert_eq!(registered, vec!["Ale", "IPA", "Stout"]);
    assert_eq!(child_names(&t, "Ale"), vec!["IPA", "Stout"]);
    assert_eq!(names(&t, t.roots().iter().copied()), vec!["Ale"]);
}

#[test]
fn test_single_root_without_children() {
    let t = Taxonomy::from_records(&[DescriptionRecord::root("Lager")]).unwrap();
    let lager = t.find("Lager").unwrap();
    assert_eq!(t.roots(), &[lager]);
    assert!(t.get(lager).is_leaf());
}

#[test]
fn test_empty_input() {
    let t = Taxonomy::from_records(&Vec::<DescriptionRecord>::new()).unwrap();
    assert!(t.is_empty());
    assert!(t.roots().is_empty());
}

#[test]
fn test_parent_declared_after_child() {
    let t = Taxonomy::from_records(&[
        DescriptionRecord::child("Pilsner", "Lager"),
        DescriptionRecord::root("Lager"),
    ])
    .unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(names(&t, t.roots().iter().copied()), vec!["Lager"]);
    assert_eq!(child_names(&t, "Lager"), vec!["Pilsner"]);
}

#[test]
fn test_parent_declared_with_its_own_parent_later() {
    let t = Taxonomy::from_records(&[
        DescriptionRecord::child("Doppelbock", "Bock"),
        DescriptionRecord::child("Bock", "Lager"),
    ])
    .unwrap();
    assert_eq!(names(&t, t.roots().iter().copied()), vec!["Lager"]);
    let doppel = t.find("Doppelbock").unwrap();
    assert_eq!(names(&t, t.ancestors(doppel)), vec!["Bock", "Lager"]);
}

#[test]
fn test_records_without_names_are_skipped() {
    let records = parse_records(
        r#"[{"name": "Ale"}, {"parent": "Ale"}, {"name": "", "parent": "Ale"}, {"name": "IPA", "parent": ""}]"#,
    )
    .unwrap();
    let t = Taxonomy::from_records(&records).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(names(&t, t.roots().iter().copied()), vec!["Ale", "IPA"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Registry Invariants
// ═══════════════════════════════════════════════════════════════════════

fn brewery_records() -> Vec<DescriptionRecord> {
    parse_records(
        r#"[
            {"name": "Ale"},
            {"name": "Pale Ale", "parent": "Ale"},
            {"name": "IPA", "parent": "Pale Ale"},
            {"name": "Hazy IPA", "parent": "IPA"},
            {"name": "Stout", "parent": "Ale"},
            {"name": "Pilsner", "parent": "Lager"},
            {"name": "Helles", "parent": "Lager"},
            {"name": "Sour", "parent": "Wild"},
            {"name": "Gose", "parent": "Sour"},
            {"name": "Cider"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_every_name_and_parent_registered_once() {
    let records = brewery_records();
    let t = Taxonomy::from_records(&records).unwrap();

    let mut expected = HashSet::new();
    for record in &records {
        expected.extend(record.name());
        expected.extend(record.parent());
    }
    let registered: Vec<_> = t.names().collect();
    let unique: HashSet<_> = registered.iter().copied().collect();

    assert_eq!(registered.len(), unique.len());
    assert_eq!(unique, expected);
    assert_eq!(t.len(), expected.len());
}

#[test]
fn test_roots_and_descendants_cover_registry() {
    let t = Taxonomy::from_records(&brewery_records()).unwrap();
    let mut covered = HashSet::new();
    for &root in t.roots() {
        covered.insert(root);
        covered.extend(t.descendants(root));
    }
    assert_eq!(covered.len(), t.len());
}

#[test]
fn test_roots_are_exactly_the_parentless() {
    let t = Taxonomy::from_records(&brewery_records()).unwrap();
    assert_eq!(
        names(&t, t.roots().iter().copied()),
        vec!["Ale", "Lager", "Wild", "Cider"]
    );
    for (id, description) in t.iter() {
        assert_eq!(t.roots().contains(&id), description.parents().is_empty());
    }
}

#[test]
fn test_child_and_parent_links_are_symmetric() {
    let t = Taxonomy::from_records(&brewery_records()).unwrap();
    for (id, description) in t.iter() {
        for (child_name, &child) in description.children() {
            assert_eq!(t.name(child), child_name);
            assert_eq!(t.get(child).parents().get(&description.name), Some(&id));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Parent Policies
// ═══════════════════════════════════════════════════════════════════════

fn reparented() -> Vec<DescriptionRecord> {
    vec![
        DescriptionRecord::child("Bock", "Ale"),
        DescriptionRecord::child("Bock", "Lager"),
    ]
}

#[test]
fn test_accumulate_keeps_both_parents() {
    let t = Taxonomy::from_records_with_policy(&reparented(), ParentPolicy::Accumulate).unwrap();
    let bock = t.find("Bock").unwrap();
    assert_eq!(names(&t, t.parents(bock)), vec!["Ale", "Lager"]);
    assert_eq!(child_names(&t, "Ale"), vec!["Bock"]);
    assert_eq!(child_names(&t, "Lager"), vec!["Bock"]);
    assert_eq!(names(&t, t.roots().iter().copied()), vec!["Ale", "Lager"]);
}

#[test]
fn test_replace_keeps_latest_parent() {
    let t = Taxonomy::from_records_with_policy(&reparented(), ParentPolicy::Replace).unwrap();
    let bock = t.find("Bock").unwrap();
    assert_eq!(names(&t, t.parents(bock)), vec!["Lager"]);
    assert!(child_names(&t, "Ale").is_empty());
    assert_eq!(child_names(&t, "Lager"), vec!["Bock"]);
}

#[test]
fn test_reject_fails_on_second_parent() {
    let err = Taxonomy::from_records_with_policy(&reparented(), ParentPolicy::Reject).unwrap_err();
    match err {
        BeerburstError::ConflictingParent {
            name,
            existing,
            requested,
        } => {
            assert_eq!(name, "Bock");
            assert_eq!(existing, "Ale");
            assert_eq!(requested, "Lager");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_cycle_link_is_refused() {
    let mut builder = TaxonomyBuilder::new();
    builder
        .extend(&[
            DescriptionRecord::child("B", "A"),
            DescriptionRecord::child("C", "B"),
            DescriptionRecord::child("A", "C"),
        ])
        .unwrap();
    assert_eq!(builder.refused(), 1);
    let t = builder.build();

    assert_eq!(names(&t, t.roots().iter().copied()), vec!["A"]);
    let a = t.find("A").unwrap();
    assert_eq!(t.descendants(a).len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/beer-descriptions.json");

#[test]
fn test_load_demo_file() {
    let records = load_records(DEMO).unwrap();
    assert_eq!(records.len(), 37);
    let t = Taxonomy::from_records(&records).unwrap();
    assert_eq!(
        names(&t, t.roots().iter().copied()),
        vec!["Ale", "Lager", "Sour", "Cider"]
    );
    assert_eq!(child_names(&t, "Lambic"), vec!["Gueuze", "Kriek"]);
}

#[test]
fn test_load_missing_file() {
    let err = load_records("no/such/descriptions.json").unwrap_err();
    assert!(matches!(err, BeerburstError::Io(_)));
}

#[test]
fn test_malformed_json() {
    let err = parse_records(r#"{"name": "Ale"}"#).unwrap_err();
    assert!(matches!(err, BeerburstError::Json(_)));
}
