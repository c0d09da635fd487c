/*
    skins-settlement
    Copyright (C) 2026 Moroya Sakamoto
*/

use std::collections::{HashMap, HashSet};

use crate::game::{GameConfig, Outcome, RoundOutcome};

/// Per-player skin counts for a completed game (or a prefix of one).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkinTally {
    counts: HashMap<u64, u32>,
}

impl SkinTally {
    /// Build a tally directly from `(player_id, skins)` pairs.
    ///
    /// Normally a tally is produced by [`accumulate`]; this constructor
    /// exists for callers that carry their own running counts.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u64, u32)>,
    {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Skins won by the given player. Unknown ids count as zero.
    #[inline(always)]
    pub fn skins(&self, player_id: u64) -> u32 {
        self.counts.get(&player_id).copied().unwrap_or(0)
    }

    /// Total skins awarded across all players.
    #[inline(always)]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Iterate over `(player_id, skins)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.counts.iter().map(|(&id, &skins)| (id, skins))
    }
}

/// Error returned when an outcome sequence violates the round-index
/// invariant or references an unknown player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidOutcome {
    /// The outcome sequence length differs from the configured round count.
    RoundCountMismatch { expected: u32, actual: usize },
    /// A round index is out of sequence. Indices must be exactly `1..=N`.
    RoundOutOfSequence { expected: u32, found: u32 },
    /// A winner id does not match any configured player.
    UnknownWinner { round: u32, player_id: u64 },
}

/// Walk the outcome sequence once and produce a per-player skin tally.
///
/// A carry-over counter starts at 1 ("one skin outstanding"). A halved
/// round increments it and awards nothing. A won round awards the counter
/// value to the winner — plus exactly one flat extra skin when the win was
/// a birdie and the config enables `birdie_doubles_value` — then resets
/// the counter to 1.
///
/// If the final round is halved, the carried skin is dropped: there is no
/// winner left to claim it.
///
/// The whole sequence is validated up front; on error no partial tally is
/// returned. Pure function of its inputs.
pub fn accumulate(
    config: &GameConfig,
    outcomes: &[RoundOutcome],
) -> Result<SkinTally, InvalidOutcome> {
    validate_outcomes(config, outcomes)?;

    let mut counts: HashMap<u64, u32> = config
        .players
        .iter()
        .map(|p| (p.player_id, 0))
        .collect();
    let mut carried: u32 = 1;

    for ro in outcomes {
        match ro.outcome {
            Outcome::Halved => carried += 1,
            Outcome::Win { winner_id, birdie } => {
                // Winner ids were verified by validate_outcomes above.
                if let Some(count) = counts.get_mut(&winner_id) {
                    *count += carried;
                    if birdie && config.birdie_doubles_value {
                        *count += 1;
                    }
                }
                carried = 1;
            }
        }
    }

    Ok(SkinTally { counts })
}

/// Skins riding on the next round given a (possibly partial) outcome
/// prefix: 1 plus the number of trailing halved rounds.
pub fn skins_at_stake(outcomes: &[RoundOutcome]) -> u32 {
    let trailing_halves = outcomes
        .iter()
        .rev()
        .take_while(|ro| ro.outcome == Outcome::Halved)
        .count();
    1 + trailing_halves as u32
}

/// Check the round-index invariant and winner-id membership for a full
/// outcome sequence.
pub(crate) fn validate_outcomes(
    config: &GameConfig,
    outcomes: &[RoundOutcome],
) -> Result<(), InvalidOutcome> {
    if outcomes.len() != config.round_count as usize {
        return Err(InvalidOutcome::RoundCountMismatch {
            expected: config.round_count,
            actual: outcomes.len(),
        });
    }

    let ids: HashSet<u64> = config.players.iter().map(|p| p.player_id).collect();

    for (i, ro) in outcomes.iter().enumerate() {
        let expected = i as u32 + 1;
        if ro.round != expected {
            return Err(InvalidOutcome::RoundOutOfSequence {
                expected,
                found: ro.round,
            });
        }
        if let Outcome::Win { winner_id, .. } = ro.outcome {
            if !ids.contains(&winner_id) {
                return Err(InvalidOutcome::UnknownWinner {
                    round: ro.round,
                    player_id: winner_id,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use proptest::prelude::*;

    fn make_config(player_count: usize, round_count: u32) -> GameConfig {
        GameConfig {
            players: (1..=player_count as u64)
                .map(|i| Player {
                    player_id: i,
                    name: format!("Player {}", i),
                })
                .collect(),
            skin_value: 1.0,
            birdie_doubles_value: false,
            round_count,
        }
    }

    fn win(round: u32, winner_id: u64) -> RoundOutcome {
        RoundOutcome {
            round,
            outcome: Outcome::Win {
                winner_id,
                birdie: false,
            },
        }
    }

    fn birdie_win(round: u32, winner_id: u64) -> RoundOutcome {
        RoundOutcome {
            round,
            outcome: Outcome::Win {
                winner_id,
                birdie: true,
            },
        }
    }

    fn halved(round: u32) -> RoundOutcome {
        RoundOutcome {
            round,
            outcome: Outcome::Halved,
        }
    }

    #[test]
    fn test_single_win() {
        let config = make_config(2, 1);
        let tally = accumulate(&config, &[win(1, 1)]).unwrap();
        assert_eq!(tally.skins(1), 1);
        assert_eq!(tally.skins(2), 0);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_carry_over_chain() {
        // Two halves carry into a win: 1 + 1 + 1 = 3 skins for the winner.
        let config = make_config(2, 3);
        let tally = accumulate(&config, &[halved(1), halved(2), win(3, 2)]).unwrap();
        assert_eq!(tally.skins(2), 3);
        assert_eq!(tally.skins(1), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_trailing_halve_is_dropped() {
        // A halved final round has no winner to claim the carried skin.
        let config = make_config(2, 2);
        let tally = accumulate(&config, &[win(1, 1), halved(2)]).unwrap();
        assert_eq!(tally.skins(1), 1);
        assert_eq!(tally.total(), 1);
    }

    #[test]
    fn test_all_halved_game_awards_nothing() {
        let config = make_config(2, 3);
        let tally = accumulate(&config, &[halved(1), halved(2), halved(3)]).unwrap();
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_birdie_adds_flat_skin() {
        let mut config = make_config(2, 1);
        config.birdie_doubles_value = true;
        let tally = accumulate(&config, &[birdie_win(1, 1)]).unwrap();
        // 1 carried + 1 birdie bonus.
        assert_eq!(tally.skins(1), 2);
    }

    #[test]
    fn test_birdie_bonus_is_flat_not_multiplied() {
        // Two halves carried into a birdie win: 3 carried + 1 bonus = 4.
        let mut config = make_config(2, 3);
        config.birdie_doubles_value = true;
        let tally = accumulate(&config, &[halved(1), halved(2), birdie_win(3, 1)]).unwrap();
        assert_eq!(tally.skins(1), 4);
    }

    #[test]
    fn test_birdie_ignored_when_disabled() {
        let config = make_config(2, 1);
        assert!(!config.birdie_doubles_value);
        let tally = accumulate(&config, &[birdie_win(1, 1)]).unwrap();
        assert_eq!(tally.skins(1), 1);
    }

    #[test]
    fn test_carry_resets_after_win() {
        let config = make_config(2, 4);
        let tally =
            accumulate(&config, &[halved(1), win(2, 1), halved(3), win(4, 2)]).unwrap();
        assert_eq!(tally.skins(1), 2); // rounds 1+2
        assert_eq!(tally.skins(2), 2); // rounds 3+4
    }

    #[test]
    fn test_round_count_mismatch() {
        let config = make_config(2, 3);
        let result = accumulate(&config, &[win(1, 1)]);
        assert_eq!(
            result,
            Err(InvalidOutcome::RoundCountMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_round_out_of_sequence() {
        let config = make_config(2, 2);
        let result = accumulate(&config, &[win(1, 1), win(3, 1)]);
        assert_eq!(
            result,
            Err(InvalidOutcome::RoundOutOfSequence {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_round_indices_must_start_at_one() {
        let config = make_config(2, 2);
        let result = accumulate(&config, &[win(2, 1), win(3, 1)]);
        assert_eq!(
            result,
            Err(InvalidOutcome::RoundOutOfSequence {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_unknown_winner() {
        let config = make_config(2, 2);
        let result = accumulate(&config, &[win(1, 1), win(2, 99)]);
        assert_eq!(
            result,
            Err(InvalidOutcome::UnknownWinner {
                round: 2,
                player_id: 99
            })
        );
    }

    #[test]
    fn test_unknown_winner_rejected_even_after_valid_rounds() {
        // Validation is eager: the bad round is late in the sequence but
        // no partial tally escapes.
        let config = make_config(2, 3);
        let result = accumulate(&config, &[win(1, 1), win(2, 2), win(3, 7)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_skins_at_stake_empty_prefix() {
        assert_eq!(skins_at_stake(&[]), 1);
    }

    #[test]
    fn test_skins_at_stake_after_win() {
        assert_eq!(skins_at_stake(&[win(1, 1)]), 1);
    }

    #[test]
    fn test_skins_at_stake_counts_trailing_halves() {
        assert_eq!(skins_at_stake(&[halved(1)]), 2);
        assert_eq!(skins_at_stake(&[win(1, 1), halved(2), halved(3)]), 3);
        // A win between halves resets the count.
        assert_eq!(skins_at_stake(&[halved(1), win(2, 1), halved(3)]), 2);
    }

    #[test]
    fn test_from_counts_round_trip() {
        let tally = SkinTally::from_counts([(1, 3), (2, 0), (3, 5)]);
        assert_eq!(tally.skins(1), 3);
        assert_eq!(tally.skins(3), 5);
        assert_eq!(tally.skins(42), 0);
        assert_eq!(tally.total(), 8);
    }

    // ── Property tests ─────────────────────────────────────────────────

    /// A random config plus a matching outcome sequence. Outcomes are
    /// encoded as `None` (halved) or `Some((player_index, birdie))`.
    fn game_inputs() -> impl Strategy<Value = (GameConfig, Vec<RoundOutcome>)> {
        (2usize..=8, any::<bool>(), 1usize..=18).prop_flat_map(
            |(player_count, birdie_doubles, round_count)| {
                let outcome = prop_oneof![
                    Just(None::<(usize, bool)>),
                    (0..player_count, any::<bool>()).prop_map(Some),
                ];
                prop::collection::vec(outcome, round_count).prop_map(move |raw| {
                    let outcomes: Vec<RoundOutcome> = raw
                        .into_iter()
                        .enumerate()
                        .map(|(i, o)| RoundOutcome {
                            round: i as u32 + 1,
                            outcome: match o {
                                None => Outcome::Halved,
                                Some((idx, birdie)) => Outcome::Win {
                                    winner_id: idx as u64 + 1,
                                    birdie,
                                },
                            },
                        })
                        .collect();
                    let mut config = make_config(player_count, outcomes.len() as u32);
                    config.birdie_doubles_value = birdie_doubles;
                    (config, outcomes)
                })
            },
        )
    }

    proptest! {
        /// Conservation: total skins equal the number of won rounds plus
        /// one per birdie win when the bonus is enabled. Halved rounds
        /// either carry into a later win or fall off the end.
        #[test]
        fn prop_conservation((config, outcomes) in game_inputs()) {
            let tally = accumulate(&config, &outcomes).unwrap();

            let won_rounds = outcomes
                .iter()
                .filter(|ro| matches!(ro.outcome, Outcome::Win { .. }))
                .count() as u32;
            let bonus_rounds = if config.birdie_doubles_value {
                outcomes
                    .iter()
                    .filter(|ro| matches!(ro.outcome, Outcome::Win { birdie: true, .. }))
                    .count() as u32
            } else {
                0
            };

            // Trailing halves drop their carried skins.
            let trailing = skins_at_stake(&outcomes) - 1;
            let halved_rounds = outcomes
                .iter()
                .filter(|ro| ro.outcome == Outcome::Halved)
                .count() as u32;

            prop_assert_eq!(
                tally.total(),
                won_rounds + bonus_rounds + halved_rounds - trailing
            );
        }

        /// Accumulation is pure: same inputs, same tally.
        #[test]
        fn prop_accumulate_is_deterministic((config, outcomes) in game_inputs()) {
            let a = accumulate(&config, &outcomes).unwrap();
            let b = accumulate(&config, &outcomes).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
