//! Integration tests for roster import and shuffling.

use elimination_bracket::{
    build_bracket, parse_roster, read_roster_csv, shuffle_entrants, BracketError, BracketFormat,
    ErrorKind,
};
use std::collections::HashSet;

#[test]
fn pasted_roster_skips_blank_lines_and_trims_names() {
    let entrants = parse_roster("  Darts United \n\nBullseyes\n   \nTriple Twenty\n").unwrap();
    let names: Vec<&str> = entrants.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Darts United", "Bullseyes", "Triple Twenty"]);
    assert!(entrants.iter().all(|e| e.is_fresh()));
}

#[test]
fn duplicate_names_are_rejected_case_insensitively() {
    let err = parse_roster("Owls\nHawks\nowls").unwrap_err();
    assert_eq!(err, BracketError::DuplicateEntrantName("owls".to_string()));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn csv_roster_reads_the_name_column() {
    let data = "name,captain\nOwls, Ann\n Hawks ,Bo\nRavens,\n";
    let entrants = read_roster_csv(data.as_bytes()).unwrap();
    let names: Vec<&str> = entrants.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Owls", "Hawks", "Ravens"]);

    let bracket = build_bracket(entrants, BracketFormat::SingleElimination).unwrap();
    assert_eq!(bracket.entrant_count, 3);
}

#[test]
fn csv_without_a_name_column_is_invalid() {
    let err = read_roster_csv("team\nOwls\n".as_bytes()).unwrap_err();
    assert!(matches!(err, BracketError::InvalidRoster(_)));
}

#[test]
fn shuffle_keeps_every_entrant() {
    let text: String = (1..=16).map(|i| format!("Team {i}\n")).collect();
    let mut entrants = parse_roster(&text).unwrap();
    let before: HashSet<_> = entrants.iter().map(|e| e.id).collect();
    shuffle_entrants(&mut entrants);
    let after: HashSet<_> = entrants.iter().map(|e| e.id).collect();
    assert_eq!(entrants.len(), 16);
    assert_eq!(before, after);
}
