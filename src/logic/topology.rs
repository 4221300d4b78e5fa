//! Topology: round counts, per-round match counts and match allocation for each tree.

use crate::models::{
    Bracket, BracketError, BracketFormat, BracketOptions, BracketSide, GameMatch, MatchId, Round,
};

/// Winners rounds for `slots` (a power of two).
pub fn round_count(slots: usize) -> u32 {
    slots.max(2).trailing_zeros()
}

/// Reject brackets that would need more rounds or matches than `options` allow.
/// Returns the winners round count.
pub fn check_limits(slots: usize, options: &BracketOptions) -> Result<u32, BracketError> {
    let rounds = round_count(slots);
    if rounds > options.max_rounds {
        return Err(BracketError::TooManyRounds {
            rounds,
            max: options.max_rounds,
        });
    }
    if slots / 2 > options.max_round_matches {
        return Err(BracketError::TooManyMatches {
            matches: slots / 2,
            max: options.max_round_matches,
        });
    }
    Ok(rounds)
}

/// Match counts per winners round: `S / 2^(r+1)`.
pub fn winners_round_sizes(slots: usize) -> Vec<usize> {
    (0..round_count(slots)).map(|r| slots >> (r + 1)).collect()
}

/// Match counts per losers round.
///
/// Round 0 pairs the first-round losers (`S/4` matches). After that, odd rounds are
/// drop-in rounds sized like the winners round feeding them, and even rounds consolidate
/// the previous winners at half size. There are `2(R-1)` rounds, at least one.
pub fn losers_round_sizes(slots: usize) -> Vec<usize> {
    let rounds = round_count(slots) as usize;
    let count = (2 * rounds.saturating_sub(1)).max(1);
    (0..count)
        .map(|l| {
            if l == 0 {
                (slots / 4).max(1)
            } else if l % 2 == 1 {
                slots >> ((l + 1) / 2 + 1)
            } else {
                slots >> (l / 2 + 2)
            }
        })
        .collect()
}

/// Losers round that receives the losers of winners round `winners_round`.
pub fn drop_in_round(winners_round: u32) -> u32 {
    if winners_round == 0 {
        0
    } else {
        2 * winners_round - 1
    }
}

/// Display name for round `index` of `total` on `side`.
pub fn round_name(format: BracketFormat, side: BracketSide, index: usize, total: usize) -> String {
    let from_end = total.saturating_sub(index + 1);
    let base = match (side, from_end) {
        (_, 0) => "Final".to_string(),
        (_, 1) => "Semifinal".to_string(),
        (BracketSide::Winners, 2) => "Quarterfinal".to_string(),
        _ => format!("Round {}", index + 1),
    };
    match (format, side) {
        (BracketFormat::SingleElimination, _) => base,
        (_, BracketSide::Losers) => format!("Losers {}", base),
        _ => format!("Winners {}", base),
    }
}

/// Allocate empty matches for one tree and return its rounds.
pub fn allocate_rounds(
    bracket: &mut Bracket,
    side: BracketSide,
    sizes: &[usize],
) -> Vec<Round> {
    let format = bracket.format;
    sizes
        .iter()
        .enumerate()
        .map(|(r, &size)| {
            let ids: Vec<MatchId> = (0..size)
                .map(|p| MatchId {
                    side,
                    round: r as u32,
                    position: p as u32,
                })
                .collect();
            for id in &ids {
                bracket.matches.insert(*id, GameMatch::new(*id));
            }
            Round {
                side,
                index: r as u32,
                name: round_name(format, side, r, sizes.len()),
                matches: ids,
            }
        })
        .collect()
}

/// Allocate every match the format needs: winners tree, and for double elimination the
/// losers tree, grand final and (inactive) reset match.
pub fn build_topology(bracket: &mut Bracket) {
    let slots = bracket.total_slots;
    let winners = allocate_rounds(bracket, BracketSide::Winners, &winners_round_sizes(slots));
    bracket.winners_rounds = winners;

    if bracket.format == BracketFormat::DoubleElimination {
        let losers = allocate_rounds(bracket, BracketSide::Losers, &losers_round_sizes(slots));
        bracket.losers_rounds = losers;
        for id in [MatchId::grand_final(), MatchId::reset()] {
            bracket.matches.insert(id, GameMatch::new(id));
        }
        bracket.grand_final = Some(MatchId::grand_final());
        bracket.reset_match = Some(MatchId::reset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winners_rounds_halve_each_time() {
        assert_eq!(winners_round_sizes(2), vec![1]);
        assert_eq!(winners_round_sizes(8), vec![4, 2, 1]);
        assert_eq!(winners_round_sizes(32), vec![16, 8, 4, 2, 1]);
    }

    #[test]
    fn losers_rounds_alternate_drop_in_and_consolidation() {
        assert_eq!(losers_round_sizes(2), vec![1]);
        assert_eq!(losers_round_sizes(4), vec![1, 1]);
        assert_eq!(losers_round_sizes(8), vec![2, 2, 1, 1]);
        assert_eq!(losers_round_sizes(16), vec![4, 4, 2, 2, 1, 1]);
        for slots in [4usize, 8, 16, 32, 64] {
            let r = round_count(slots) as usize;
            assert_eq!(losers_round_sizes(slots).len(), 2 * (r - 1));
        }
    }

    #[test]
    fn drop_in_rounds_match_winners_round_sizes() {
        let slots = 32;
        let winners = winners_round_sizes(slots);
        let losers = losers_round_sizes(slots);
        for k in 1..winners.len() {
            assert_eq!(losers[drop_in_round(k as u32) as usize], winners[k]);
        }
    }

    #[test]
    fn limits_reject_oversized_brackets() {
        let options = BracketOptions::default();
        assert_eq!(check_limits(1024, &options), Ok(10));
        assert_eq!(
            check_limits(2048, &options),
            Err(BracketError::TooManyRounds { rounds: 11, max: 10 })
        );
        let tight = BracketOptions {
            max_round_matches: 4,
            ..BracketOptions::default()
        };
        assert!(matches!(
            check_limits(16, &tight),
            Err(BracketError::TooManyMatches { matches: 8, max: 4 })
        ));
    }

    #[test]
    fn round_names_count_back_from_the_final() {
        let single = BracketFormat::SingleElimination;
        let double = BracketFormat::DoubleElimination;
        assert_eq!(round_name(single, BracketSide::Winners, 3, 4), "Final");
        assert_eq!(round_name(single, BracketSide::Winners, 1, 4), "Quarterfinal");
        assert_eq!(round_name(single, BracketSide::Winners, 0, 4), "Round 1");
        assert_eq!(round_name(double, BracketSide::Winners, 2, 3), "Winners Final");
        assert_eq!(round_name(double, BracketSide::Losers, 2, 4), "Losers Semifinal");
        assert_eq!(round_name(double, BracketSide::Losers, 1, 4), "Losers Round 2");
    }
}
