use std::path::Path;

use dox2mpi_core::{Cardinality, ClassDescriptor, MemberDecl, MemoryDocSource, ResolveError};
use dox2mpi_resolve::{
    ForestResolver, Mode, ResolutionState, resolve_direct, used_instantiations,
};

/// Generic container over DIM, a class naming four concrete containers, and
/// documented Coord specializations for dimensions 2 and 3 only.
fn coord_source() -> MemoryDocSource {
    let mut source = MemoryDocSource::new();
    source.insert(
        ClassDescriptor::new("CoordContainer", "src/coordcontainer.h")
            .template_param("DIM")
            .member("pos", "Coord<DIM >", Cardinality::scalar()),
    );
    source.insert(
        ClassDescriptor::new("CoordContainerContainer", "src/coordcontainercontainer.h")
            .member("cargo1", "CoordContainer<1 >", Cardinality::scalar())
            .member("cargo2", "CoordContainer<2 >", Cardinality::scalar())
            .member("cargo3", "CoordContainer<3 >", Cardinality::scalar())
            .member("cargo4", "CoordContainer<4 >", Cardinality::scalar()),
    );
    source.insert(
        ClassDescriptor::new("Coord<2 >", "src/coord.h")
            .member("x", "int", Cardinality::scalar())
            .member("y", "int", Cardinality::scalar()),
    );
    source.insert(
        ClassDescriptor::new("Coord<3 >", "src/coord.h")
            .member("x", "int", Cardinality::scalar())
            .member("y", "int", Cardinality::scalar())
            .member("z", "int", Cardinality::scalar()),
    );
    source
}

#[test]
fn used_instantiations_reports_every_textual_use_in_scan_order() {
    let source = coord_source();
    let uses = used_instantiations(&source, "CoordContainer");
    assert_eq!(
        uses,
        vec![
            vec!["1".to_string()],
            vec!["2".to_string()],
            vec!["3".to_string()],
            vec!["4".to_string()],
        ]
    );
}

#[test]
fn used_instantiations_finds_nested_uses_and_keeps_duplicates() {
    let mut source = MemoryDocSource::new();
    source.insert(
        ClassDescriptor::new("Dummy", "src/dummy.h")
            .member("p1", "CoordPair<Coord<3>,Coord<2>>", Cardinality::scalar())
            .member("p2", "CoordPair<int,double >", Cardinality::scalar())
            .member("p3", "CoordPair<int,int >", Cardinality::scalar())
            .member("p4", "CoordPair<int,int >", Cardinality::scalar()),
    );

    assert_eq!(
        used_instantiations(&source, "CoordPair"),
        vec![
            vec!["Coord<3 >".to_string(), "Coord<2 >".to_string()],
            vec!["int".to_string(), "double".to_string()],
            vec!["int".to_string(), "int".to_string()],
            vec!["int".to_string(), "int".to_string()],
        ]
    );
    // Uses nested inside other argument lists are found too.
    assert_eq!(
        used_instantiations(&source, "Coord"),
        vec![vec!["3".to_string()], vec!["2".to_string()]]
    );
}

#[test]
fn used_instantiations_scans_parent_references() {
    let mut source = MemoryDocSource::new();
    source.insert(
        ClassDescriptor::new("FancyCoord", "src/fancycoord.h")
            .parent("Coord<3 >")
            .member("label", "int", Cardinality::scalar()),
    );
    assert_eq!(
        used_instantiations(&source, "Coord"),
        vec![vec!["3".to_string()]]
    );
}

#[test]
fn declared_specializations_resolve_through_their_descriptors() {
    let source = coord_source();
    let forest = ForestResolver::new(&source, Mode::Strict)
        .resolve_forest(["Coord<2 >", "Coord<3 >"])
        .expect("documented specializations resolve like any class");

    let coord2 = &forest.classes["Coord<2 >"];
    assert_eq!(coord2.len(), 2);
    for member in coord2.iter() {
        assert_eq!(member.datatype, "MPI::INT");
    }
    let coord3 = &forest.classes["Coord<3 >"];
    assert_eq!(coord3.len(), 3);
    assert_eq!(forest.datatypes.id("Coord<2 >"), Some("MPI::COORD_2_"));
    assert_eq!(forest.datatypes.id("Coord<3 >"), Some("MPI::COORD_3_"));
}

#[test]
fn lenient_mode_materializes_what_it_can_and_marks_the_rest_partial() {
    let source = coord_source();
    let forest = ForestResolver::new(&source, Mode::Lenient)
        .resolve_forest(["CoordContainerContainer"])
        .expect("lenient resolution should tolerate missing Coord<1>/Coord<4>");

    // Dimensions without a documented Coord lose their member and go partial.
    for dim in [1u64, 4] {
        let name = format!("CoordContainer<{dim} >");
        let class = &forest.classes[&name];
        assert!(class.is_empty(), "{name} should have dropped its member");
        let entry = forest.datatypes.get(&name).expect("entry exists");
        assert!(entry.partial);
        assert_eq!(entry.id, format!("MPI::COORDCONTAINER_{dim}__PARTIAL"));
    }
    // Dimensions with a documented Coord resolve fully.
    for dim in [2u64, 3] {
        let name = format!("CoordContainer<{dim} >");
        let class = &forest.classes[&name];
        let pos = class.get("pos").expect("pos member should survive");
        assert_eq!(pos.datatype, format!("MPI::COORD_{dim}_"));
        let entry = forest.datatypes.get(&name).expect("entry exists");
        assert!(!entry.partial);
    }

    // The outer container sees the partial identifiers of its members but is
    // itself fully resolved.
    let outer = &forest.classes["CoordContainerContainer"];
    assert_eq!(
        outer.get("cargo1").expect("cargo1 survives").datatype,
        "MPI::COORDCONTAINER_1__PARTIAL"
    );
    assert_eq!(
        outer.get("cargo2").expect("cargo2 survives").datatype,
        "MPI::COORDCONTAINER_2_"
    );
    assert!(!forest.datatypes.get("CoordContainerContainer").expect("entry").partial);
}

#[test]
fn strict_mode_rejects_unresolvable_specializations() {
    let source = coord_source();
    let err = ForestResolver::new(&source, Mode::Strict)
        .resolve_forest(["CoordContainerContainer"])
        .expect_err("strict resolution must fail on Coord<1>/Coord<4>");
    assert!(matches!(err, ResolveError::NonTerminatingClosure { .. }));
}

#[test]
fn bare_generic_roots_expand_to_their_used_specializations() {
    let source = coord_source();
    let forest = ForestResolver::new(&source, Mode::Lenient)
        .resolve_forest(["CoordContainer"])
        .expect("generic root expands to its used specializations");

    for dim in 1..=4u64 {
        assert!(forest.classes.contains_key(&format!("CoordContainer<{dim} >")));
    }
    // The uninstantiated template itself registers nothing.
    assert!(!forest.classes.contains_key("CoordContainer"));
    assert!(!forest.order.iter().any(|c| c == "CoordContainer"));
    assert!(!forest.datatypes.contains("CoordContainer"));
    assert_eq!(forest.classes.len(), forest.order.len());
}

#[test]
fn materialized_specializations_report_the_generic_header() {
    let source = coord_source();
    let forest = ForestResolver::new(&source, Mode::Lenient)
        .resolve_forest(["CoordContainerContainer"])
        .expect("lenient resolution should succeed");

    let idx = forest
        .position("CoordContainer<2 >")
        .expect("specialization resolved");
    assert_eq!(forest.headers[idx], Path::new("src/coordcontainer.h"));
}

#[test]
fn formal_parameters_substitute_into_cardinality_expressions() {
    let mut source = MemoryDocSource::new();
    source.insert(
        ClassDescriptor::new("FloatCoord", "src/floatcoord.h")
            .template_param("DIMENSIONS")
            .member(
                "vec",
                "float",
                Cardinality::Expr("DIMENSIONS".to_string()),
            ),
    );
    source.insert(
        ClassDescriptor::new("Helper", "src/helper.h")
            .member("fc1", "FloatCoord<1 >", Cardinality::scalar())
            .member("fc2", "FloatCoord<2 >", Cardinality::scalar())
            .member("fc4", "FloatCoord<4 >", Cardinality::scalar()),
    );

    let forest = ForestResolver::new(&source, Mode::Strict)
        .resolve_forest(["Helper"])
        .expect("float coords materialize for every used dimension");

    for dim in [1u64, 2, 4] {
        let name = format!("FloatCoord<{dim} >");
        let vec_member = forest.classes[&name].get("vec").expect("vec member");
        assert_eq!(vec_member.datatype, "MPI::FLOAT");
        assert_eq!(vec_member.cardinality, Cardinality::Literal(dim));
    }
    assert_eq!(forest.datatypes.id("FloatCoord<4 >"), Some("MPI::FLOATCOORD_4_"));
}

#[test]
fn direct_resolution_maps_supplied_members_without_a_descriptor() {
    let source = MemoryDocSource::new();
    let mut state = ResolutionState::new(&source);

    resolve_direct(
        &source,
        Mode::Strict,
        &mut state,
        "Coord<2>",
        vec![MemberDecl::scalar("x", "int"), MemberDecl::scalar("y", "int")],
        Vec::new(),
    )
    .expect("supplied members map straight through the datatype table");

    let coord = &state.classes["Coord<2 >"];
    for member in coord.iter() {
        assert_eq!(member.datatype, "MPI::INT");
    }
    assert_eq!(state.order, vec!["Coord<2 >".to_string()]);
    assert_eq!(state.datatypes.id("Coord<2 >"), Some("MPI::COORD_2_"));
}
