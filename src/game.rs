/*
    skins-settlement
    Copyright (C) 2026 Moroya Sakamoto
*/

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// A participant in the game.
///
/// The player set is fixed before the first round and never changes for
/// the duration of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique player identifier.
    pub player_id: u64,
    /// Display name.
    pub name: String,
}

/// What happened on a single round (hole).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One player won the hole outright.
    Win {
        /// Identifier of the winning player.
        winner_id: u64,
        /// True when the hole was won with a birdie.
        birdie: bool,
    },
    /// The hole was halved; its skin carries over to the next hole.
    Halved,
}

/// Outcome of one round, tagged with its 1-based round index.
///
/// A full game is an ordered sequence of these with indices exactly
/// `1..=round_count`, no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 1-based round index.
    pub round: u32,
    /// What happened on this round.
    pub outcome: Outcome,
}

/// Error returned when a game configuration is invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer than [`MIN_PLAYERS`] players.
    TooFewPlayers(usize),
    /// More than [`MAX_PLAYERS`] players.
    TooManyPlayers(usize),
    /// Two players share the same identifier.
    DuplicatePlayerId(u64),
    /// A player has an empty (or whitespace-only) display name.
    EmptyPlayerName(u64),
    /// The stake per skin must be a positive, finite amount.
    NonPositiveSkinValue(f64),
    /// The game must have at least one round.
    ZeroRoundCount,
}

/// Game parameters, fixed before the first round.
///
/// The reference domain plays 9 or 18 holes, but any positive round count
/// is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// The fixed player set, in seating order.
    pub players: Vec<Player>,
    /// Stake per skin in currency units.
    pub skin_value: f64,
    /// When true, a birdie win awards one extra flat skin.
    pub birdie_doubles_value: bool,
    /// Number of rounds in the game.
    pub round_count: u32,
}

impl GameConfig {
    /// Validate the configuration.
    ///
    /// Must be called before any accumulation or settlement work; both
    /// engines assume a validated configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(self.players.len()));
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(self.players.len()));
        }

        let mut seen = std::collections::HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if player.name.trim().is_empty() {
                return Err(ConfigError::EmptyPlayerName(player.player_id));
            }
            if !seen.insert(player.player_id) {
                return Err(ConfigError::DuplicatePlayerId(player.player_id));
            }
        }

        if !(self.skin_value > 0.0) || !self.skin_value.is_finite() {
            return Err(ConfigError::NonPositiveSkinValue(self.skin_value));
        }
        if self.round_count == 0 {
            return Err(ConfigError::ZeroRoundCount);
        }

        Ok(())
    }
}
