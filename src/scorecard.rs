// skins-settlement — Per-round scorecard breakdown
// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Moroya Sakamoto

use crate::game::{GameConfig, Outcome, RoundOutcome};
use crate::tally::{validate_outcomes, InvalidOutcome};

/// How a single round resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAward {
    /// Halved; the at-stake skins carry into the next round.
    Carried,
    /// Won outright.
    Won {
        /// The winning player.
        winner_id: u64,
        /// Skins awarded, including the birdie bonus when applied.
        skins: u32,
        /// True when one of the awarded skins is a birdie bonus.
        birdie_bonus: bool,
    },
}

/// One scorecard line: what a round was worth and who took it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorecardEntry {
    /// 1-based round index.
    pub round: u32,
    /// Skins riding on this round (1 plus preceding carried halves).
    pub at_stake: u32,
    /// How the round resolved.
    pub award: RoundAward,
}

/// Produce the per-round breakdown of a game.
///
/// One entry per round, in round order. Consistent with
/// [`crate::accumulate`]: the same validation applies, and summing the
/// `skins` of all `Won` awards equals the tally total.
pub fn scorecard(
    config: &GameConfig,
    outcomes: &[RoundOutcome],
) -> Result<Vec<ScorecardEntry>, InvalidOutcome> {
    validate_outcomes(config, outcomes)?;

    let mut entries = Vec::with_capacity(outcomes.len());
    let mut carried: u32 = 1;

    for ro in outcomes {
        let award = match ro.outcome {
            Outcome::Halved => RoundAward::Carried,
            Outcome::Win { winner_id, birdie } => {
                let birdie_bonus = birdie && config.birdie_doubles_value;
                RoundAward::Won {
                    winner_id,
                    skins: carried + birdie_bonus as u32,
                    birdie_bonus,
                }
            }
        };
        entries.push(ScorecardEntry {
            round: ro.round,
            at_stake: carried,
            award,
        });
        carried = match ro.outcome {
            Outcome::Halved => carried + 1,
            Outcome::Win { .. } => 1,
        };
    }

    Ok(entries)
}
