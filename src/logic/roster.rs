//! Roster import: build an entrant list from pasted text or a CSV file, and shuffle it.

use crate::models::{BracketError, Entrant};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
}

/// One team name per line. Blank lines are skipped and names are trimmed.
/// Names must be unique (case-insensitive).
pub fn parse_roster(text: &str) -> Result<Vec<Entrant>, BracketError> {
    let mut entrants = Vec::new();
    for line in text.lines() {
        push_unique(&mut entrants, line)?;
    }
    Ok(entrants)
}

/// CSV with a `name` column; other columns are ignored. Same rules as [`parse_roster`].
pub fn read_roster_csv<R: Read>(reader: R) -> Result<Vec<Entrant>, BracketError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut entrants = Vec::new();
    for row in rdr.deserialize::<RosterRow>() {
        let row = row.map_err(|e| BracketError::InvalidRoster(e.to_string()))?;
        push_unique(&mut entrants, &row.name)?;
    }
    Ok(entrants)
}

/// Randomise seeding order in place.
pub fn shuffle_entrants(entrants: &mut [Entrant]) {
    entrants.shuffle(&mut rand::thread_rng());
}

fn push_unique(entrants: &mut Vec<Entrant>, name: &str) -> Result<(), BracketError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    if entrants.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
        return Err(BracketError::DuplicateEntrantName(name.to_string()));
    }
    entrants.push(Entrant::new(name));
    Ok(())
}
