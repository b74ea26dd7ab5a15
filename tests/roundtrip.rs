//! End-to-end tests over the public API: file parsing, byte-stable
//! serialization and the query flows a consumer would run.

use gedtree::{FamilyLink, FamilyMember, Parser, Relation};
use std::fs;

const SAMPLE: &str = "tests/fixtures/sample.ged";

fn parse_sample() -> Parser {
    let mut parser = Parser::new();
    parser.parse_file(SAMPLE, true).unwrap();
    parser
}

#[test]
fn parsing_then_serializing_is_byte_identical() {
    let original = fs::read(SAMPLE).unwrap();
    let parser = parse_sample();
    assert_eq!(parser.to_gedcom_string().as_bytes(), &original[..]);
}

#[test]
fn save_gedcom_matches_the_original_file() {
    let original = fs::read(SAMPLE).unwrap();
    let parser = parse_sample();
    let mut written = Vec::new();
    parser.save_gedcom(&mut written).unwrap();
    assert_eq!(written, original);
}

#[test]
fn the_sample_family_answers_the_expected_queries() {
    let parser = parse_sample();

    let elizabeth = parser.get_element_by_pointer("@I1@").unwrap();
    let paul = parser.get_element_by_pointer("@I2@").unwrap();
    let alice = parser.get_element_by_pointer("@I3@").unwrap();

    let daughter = parser.individual(elizabeth).unwrap();
    assert_eq!(
        daughter.get_name(),
        ("Elizabeth".to_string(), "Harmon".to_string())
    );
    assert_eq!(daughter.get_birth_year(), 1948);
    assert!(daughter.criteria_match("surname=Harmon:birth_range=1940-1950"));

    let birth = daughter.get_birth_data();
    assert_eq!(birth.date, "2 NOV 1948");
    assert_eq!(birth.place, "Lexington, Kentucky");
    assert_eq!(birth.sources, vec!["@S1@".to_string()]);

    let father = parser.individual(paul).unwrap();
    assert!(father.is_deceased());
    assert_eq!(father.get_death_year(), 1967);
    assert_eq!(father.get_occupation(), "Physicist");

    let parents = parser.get_parents(elizabeth, Relation::Natural).unwrap();
    assert_eq!(parents, vec![paul, alice]);

    let children = parser.get_children(paul, Relation::Natural).unwrap();
    assert_eq!(children, vec![elizabeth]);

    let marriages = parser.get_marriages(paul).unwrap();
    assert_eq!(
        marriages,
        vec![("12 JUN 1945".to_string(), "Boston, Massachusetts".to_string())]
    );
    assert_eq!(parser.get_marriage_years(paul).unwrap(), vec![1945]);

    let families = parser.get_families(elizabeth, FamilyLink::Child).unwrap();
    assert_eq!(families.len(), 1);
    let members = parser
        .get_family_members(families[0], FamilyMember::All)
        .unwrap();
    assert_eq!(members, vec![paul, alice, elizabeth]);

    let path = parser
        .find_path_to_ancestor(elizabeth, alice)
        .unwrap()
        .unwrap();
    assert_eq!(path, vec![elizabeth, alice]);
}

#[test]
fn continuation_fragments_reassemble_into_the_note_text() {
    let parser = parse_sample();
    let alice = parser.get_element_by_pointer("@I3@").unwrap();
    let note = parser
        .tree()
        .get(alice)
        .get_child_elements()
        .iter()
        .copied()
        .find(|&child| parser.tree().get(child).get_tag() == "NOTE")
        .unwrap();
    assert_eq!(
        parser.tree().get_multi_line_value(note),
        "A note that is continued across two lines."
    );
}

#[test]
fn lenient_parsing_recovers_an_embedded_line_break_end_to_end() {
    let source = "\
        0 @I5@ INDI\n\
        1 NOTE This is a note field\n\
        that is continued on the next line.\n\
        0 TRLR\n";
    let mut parser = Parser::new();
    parser.parse(source.split_inclusive('\n'), false).unwrap();

    let individual = parser.get_element_by_pointer("@I5@").unwrap();
    let note = parser.tree().get(individual).get_child_elements()[0];
    assert_eq!(
        parser.tree().get_multi_line_value(note),
        "This is a note fieldthat is continued on the next line."
    );

    // The recovered stream re-serializes as the repaired document.
    assert_eq!(
        parser.to_gedcom_string(),
        "\
        0 @I5@ INDI\n\
        1 NOTE This is a note field\n\
        2 CONC that is continued on the next line.\n\
        0 TRLR\n"
    );
}

#[test]
fn rewrapping_a_long_value_emits_conformant_lines() {
    let mut parser = Parser::new();
    parser
        .parse("0 @I1@ INDI\n1 NOTE placeholder\n".split_inclusive('\n'), true)
        .unwrap();

    let individual = parser.get_element_by_pointer("@I1@").unwrap();
    let note = parser.tree().get(individual).get_child_elements()[0];
    let long_value = "word ".repeat(120);
    parser.tree_mut().set_multi_line_value(note, &long_value);
    parser.invalidate_cache();

    for line in parser.to_gedcom_string().split_inclusive('\n') {
        assert!(line.trim_end_matches(['\r', '\n']).chars().count() <= 255);
    }
    assert_eq!(parser.tree().get_multi_line_value(note), long_value);
}
