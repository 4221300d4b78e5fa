//! Connection wiring: where each match's winner advances and, under double elimination,
//! where its loser drops.

use crate::logic::topology::drop_in_round;
use crate::models::{Bracket, BracketFormat, MatchId};

/// Winner edge for winners-tree match `(round, position)`.
///
/// Inside the tree the winner moves to `(round + 1, position / 2)`. The last round is
/// terminal in single elimination and feeds the grand final otherwise.
pub fn winners_next(format: BracketFormat, rounds: usize, round: u32, position: u32) -> Option<MatchId> {
    if (round as usize) + 1 < rounds {
        Some(MatchId::winners(round + 1, position / 2))
    } else {
        match format {
            BracketFormat::SingleElimination => None,
            BracketFormat::DoubleElimination => Some(MatchId::grand_final()),
        }
    }
}

/// Loser edge for winners-tree match `(round, position)`.
///
/// First-round losers pair up two per losers-round-0 match. Losers of winners round
/// `k >= 1` drop into losers round `2k - 1`; odd `k` mirror the position so nobody meets
/// an opponent from their own quarter straight away.
pub fn loser_drop(losers_sizes: &[usize], round: u32, position: u32) -> Option<MatchId> {
    let target = drop_in_round(round);
    let size = *losers_sizes.get(target as usize)? as u32;
    if size == 0 {
        return None;
    }
    let slot = if round == 0 {
        position / 2
    } else if round % 2 == 1 {
        size.saturating_sub(position + 1)
    } else {
        position
    };
    Some(MatchId::losers(target, slot.min(size - 1)))
}

/// Winner edge for losers-tree match `(round, position)`.
///
/// Even rounds advance straight across into the drop-in round; odd rounds pair down.
/// The last losers round feeds the grand final.
pub fn losers_next(rounds: usize, round: u32, position: u32) -> MatchId {
    if (round as usize) + 1 >= rounds {
        MatchId::grand_final()
    } else if round % 2 == 0 {
        MatchId::losers(round + 1, position)
    } else {
        MatchId::losers(round + 1, position / 2)
    }
}

/// Set every forward edge. The grand final's edges point at the reset match and are
/// only followed when the losers-bracket champion takes the grand final.
pub fn wire(bracket: &mut Bracket) {
    let format = bracket.format;
    let winners_rounds = bracket.winners_rounds.len();
    let losers_rounds = bracket.losers_rounds.len();
    let losers_sizes: Vec<usize> = bracket.losers_rounds.iter().map(|r| r.matches.len()).collect();

    let mut edges: Vec<(MatchId, Option<MatchId>, Option<MatchId>)> = Vec::new();
    for id in bracket.winners_rounds.iter().flat_map(|r| r.matches.iter()) {
        let winner = winners_next(format, winners_rounds, id.round, id.position);
        let loser = match format {
            BracketFormat::SingleElimination => None,
            BracketFormat::DoubleElimination => loser_drop(&losers_sizes, id.round, id.position),
        };
        edges.push((*id, winner, loser));
    }
    for id in bracket.losers_rounds.iter().flat_map(|r| r.matches.iter()) {
        edges.push((*id, Some(losers_next(losers_rounds, id.round, id.position)), None));
    }
    if let (Some(gf), Some(reset)) = (bracket.grand_final, bracket.reset_match) {
        edges.push((gf, Some(reset), Some(reset)));
    }

    for (id, winner, loser) in edges {
        if let Some(m) = bracket.matches.get_mut(&id) {
            m.winner_next = winner;
            m.loser_next = loser;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::topology::losers_round_sizes;

    #[test]
    fn single_elimination_final_is_terminal() {
        let format = BracketFormat::SingleElimination;
        assert_eq!(winners_next(format, 3, 0, 3), Some(MatchId::winners(1, 1)));
        assert_eq!(winners_next(format, 3, 1, 0), Some(MatchId::winners(2, 0)));
        assert_eq!(winners_next(format, 3, 2, 0), None);
        assert_eq!(
            winners_next(BracketFormat::DoubleElimination, 3, 2, 0),
            Some(MatchId::grand_final())
        );
    }

    #[test]
    fn every_loser_drop_lands_in_its_drop_in_round() {
        let sizes = losers_round_sizes(16);
        assert_eq!(loser_drop(&sizes, 0, 0), Some(MatchId::losers(0, 0)));
        assert_eq!(loser_drop(&sizes, 0, 7), Some(MatchId::losers(0, 3)));
        // Winners round 1 (4 matches) drops mirrored into losers round 1.
        assert_eq!(loser_drop(&sizes, 1, 0), Some(MatchId::losers(1, 3)));
        assert_eq!(loser_drop(&sizes, 1, 3), Some(MatchId::losers(1, 0)));
        // Winners round 2 keeps positions.
        assert_eq!(loser_drop(&sizes, 2, 1), Some(MatchId::losers(3, 1)));
        // Winners final drops into the losers final.
        assert_eq!(loser_drop(&sizes, 3, 0), Some(MatchId::losers(5, 0)));
    }

    #[test]
    fn two_entrant_double_elimination_drops_into_the_only_losers_match() {
        let sizes = losers_round_sizes(2);
        assert_eq!(loser_drop(&sizes, 0, 0), Some(MatchId::losers(0, 0)));
    }

    #[test]
    fn losers_rounds_alternate_straight_and_pairing_down() {
        assert_eq!(losers_next(6, 0, 3), MatchId::losers(1, 3));
        assert_eq!(losers_next(6, 1, 3), MatchId::losers(2, 1));
        assert_eq!(losers_next(6, 4, 0), MatchId::losers(5, 0));
        assert_eq!(losers_next(6, 5, 0), MatchId::grand_final());
    }
}
