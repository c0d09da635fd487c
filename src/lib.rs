/*
    skins-settlement
    Copyright (C) 2026 Moroya Sakamoto
*/

//! # skins-settlement
//!
//! Scoring and settlement engine for the multi-round "skins" wagering
//! game: carry-over skin accumulation, net-winnings computation against an
//! equal-split baseline, and proportional peer-to-peer debt settlement.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`game`] | `Player`, `RoundOutcome`, and `GameConfig` value types |
//! | [`tally`] | Carry-over skin accumulation over a round sequence |
//! | [`settlement`] | Net winnings and proportional debt settlement |
//! | [`scorecard`] | Per-round breakdown of stakes and awards |
//!
//! The engine is pure: every operation is a function of its inputs with no
//! shared state, so callers may recompute results after each round by
//! re-running the full prefix.
//!
//! # Quick Start
//!
//! ```rust
//! use skins_settlement::{accumulate, settle, GameConfig, Outcome, Player, RoundOutcome};
//!
//! let config = GameConfig {
//!     players: vec![
//!         Player { player_id: 1, name: "Ada".to_string() },
//!         Player { player_id: 2, name: "Ben".to_string() },
//!     ],
//!     skin_value: 1.0,
//!     birdie_doubles_value: false,
//!     round_count: 2,
//! };
//! config.validate().unwrap();
//!
//! let outcomes = vec![
//!     RoundOutcome { round: 1, outcome: Outcome::Win { winner_id: 1, birdie: false } },
//!     RoundOutcome { round: 2, outcome: Outcome::Win { winner_id: 1, birdie: false } },
//! ];
//!
//! let tally = accumulate(&config, &outcomes).unwrap();
//! assert_eq!(tally.skins(1), 2);
//!
//! let results = settle(&config, &tally);
//! // Ben owes Ada his full $1 fair share.
//! assert_eq!(results[1].payments.len(), 1);
//! assert!((results[1].payments[0].amount - 1.00).abs() < 1e-9);
//! ```

pub mod game;
/// Per-round breakdown of stakes and awards.
pub mod scorecard;
pub mod settlement;
pub mod tally;

pub use game::{
    ConfigError, GameConfig, Outcome, Player, RoundOutcome, MAX_PLAYERS, MIN_PLAYERS,
};
pub use scorecard::{scorecard, RoundAward, ScorecardEntry};
pub use settlement::{
    settle, settlement_fingerprint, summarize, Payment, PlayerResult, PotSummary, MIN_PAYMENT,
};
pub use tally::{accumulate, skins_at_stake, InvalidOutcome, SkinTally};

/// FNV-1a hash (crate-internal shared utility).
#[inline(always)]
pub(crate) fn fnv1a(data: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in data {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}
