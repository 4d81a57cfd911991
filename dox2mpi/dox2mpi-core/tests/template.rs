use dox2mpi_core::{Cardinality, TemplateName, canonical_name, substitute_params};

#[test]
fn parse_splits_base_and_args() {
    let t = TemplateName::parse("Coord<2>").expect("instantiation should parse");
    assert_eq!(t.base, "Coord");
    assert_eq!(t.args, vec!["2"]);
}

#[test]
fn parse_keeps_nested_args_intact() {
    let t = TemplateName::parse("CoordPair<Coord<3 >,Coord<2 > >").expect("should parse");
    assert_eq!(t.base, "CoordPair");
    assert_eq!(t.args, vec!["Coord<3 >", "Coord<2 >"]);
}

#[test]
fn parse_rejects_plain_and_malformed_names() {
    assert!(TemplateName::parse("Car").is_none());
    assert!(TemplateName::parse("Car::NumWheels").is_none());
    assert!(TemplateName::parse("<2 >").is_none());
    assert!(TemplateName::parse("Coord<2").is_none());
    assert!(TemplateName::parse("Coord<>").is_none());
}

#[test]
fn canonical_spelling_is_stable_across_variants() {
    for spelling in ["Coord<2>", "Coord< 2 >", "Coord<2 >", " Coord<2> "] {
        assert_eq!(canonical_name(spelling), "Coord<2 >");
    }
}

#[test]
fn canonical_spelling_recurses_into_args() {
    assert_eq!(
        canonical_name("CoordPair<Coord<3>,Coord< 2 >>"),
        "CoordPair<Coord<3 >,Coord<2 > >"
    );
}

#[test]
fn canonical_name_trims_plain_names() {
    assert_eq!(canonical_name("  Car "), "Car");
}

#[test]
fn substitute_replaces_whole_identifiers_only() {
    let formals = vec!["DIM".to_string()];
    let args = vec!["2".to_string()];
    assert_eq!(substitute_params("Coord<DIM >", &formals, &args), "Coord<2 >");
    // DIMENSIONS must not be touched by the DIM formal
    assert_eq!(
        substitute_params("Coord<DIMENSIONS >", &formals, &args),
        "Coord<DIMENSIONS >"
    );
}

#[test]
fn substitute_maps_each_slot_independently() {
    let formals = vec!["A".to_string(), "B".to_string()];
    let args = vec!["int".to_string(), "double".to_string()];
    assert_eq!(substitute_params("A", &formals, &args), "int");
    assert_eq!(substitute_params("B", &formals, &args), "double");
    assert_eq!(
        substitute_params("CoordPair<A,B >", &formals, &args),
        "CoordPair<int,double >"
    );
}

#[test]
fn cardinality_token_parsing() {
    assert_eq!(Cardinality::from_token("6"), Cardinality::Literal(6));
    assert_eq!(
        Cardinality::from_token("Car::NumWheels"),
        Cardinality::Expr("Car::NumWheels".to_string())
    );
    assert_eq!(Cardinality::scalar(), Cardinality::Literal(1));
    assert_eq!(Cardinality::Literal(6).to_string(), "6");
    assert_eq!(
        Cardinality::Expr("DIMENSIONS".to_string()).to_string(),
        "DIMENSIONS"
    );
}
