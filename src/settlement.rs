// skins-settlement — Net winnings and proportional debt settlement
// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Moroya Sakamoto

use crate::fnv1a;
use crate::game::GameConfig;
use crate::tally::SkinTally;

// ── Types ──────────────────────────────────────────────────────────────

/// Settlement granularity: one cent. Payments at or below this amount are
/// dropped as dust.
pub const MIN_PAYMENT: f64 = 0.01;

/// A directed payment from the owning loser to a winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    /// Player receiving the payment.
    pub to_player_id: u64,
    /// Display name of the receiving player.
    pub to_player_name: String,
    /// Amount in currency units, rounded to cents, always above
    /// [`MIN_PAYMENT`].
    pub amount: f64,
}

/// Final settlement line for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerResult {
    /// Player identifier.
    pub player_id: u64,
    /// Display name.
    pub player_name: String,
    /// Skins won over the whole game.
    pub skins_won: u32,
    /// `skins_won × skin_value`.
    pub expected_winnings: f64,
    /// Equal split of the total pot.
    pub fair_share: f64,
    /// `expected_winnings − fair_share`. Positive means the player is
    /// owed money; negative means the player owes.
    pub net_winnings: f64,
    /// Outgoing payments. Empty for winners and for players who broke even.
    pub payments: Vec<Payment>,
}

/// Pot totals derived from a tally.
#[derive(Debug, Clone, PartialEq)]
pub struct PotSummary {
    /// Total skins awarded across all players.
    pub total_skins: u32,
    /// `total_skins × skin_value`.
    pub total_pot: f64,
    /// `total_pot / player count` — the equal-division baseline.
    pub fair_share: f64,
}

// ── Settlement engine ──────────────────────────────────────────────────

/// Compute pot totals for a tally under the given config.
pub fn summarize(config: &GameConfig, tally: &SkinTally) -> PotSummary {
    let total_skins = tally.total();
    let total_pot = total_skins as f64 * config.skin_value;
    PotSummary {
        total_skins,
        total_pot,
        fair_share: total_pot / config.players.len() as f64,
    }
}

/// Convert a skin tally into per-player settlement lines.
///
/// Every player's net position is measured against the equal-split fair
/// share of the total pot. Net-negative players are then assigned directed
/// payments that clear their debt against the net-positive players,
/// proportionally to each winner's surplus.
///
/// Each loser's debt is split against the initial winner surplus
/// distribution; winner claims are never decremented as other losers pay,
/// so a winner may receive one payment per loser. This yields more
/// transactions than a minimum-cardinality matching would, in exchange for
/// a single-pass deterministic algorithm and an exact per-loser balance.
///
/// Results are returned in config player order. Never fails: a tally
/// produced by [`crate::accumulate`] with a matching config always
/// settles.
pub fn settle(config: &GameConfig, tally: &SkinTally) -> Vec<PlayerResult> {
    let pot = summarize(config, tally);

    let mut results: Vec<PlayerResult> = config
        .players
        .iter()
        .map(|p| {
            let skins_won = tally.skins(p.player_id);
            let expected_winnings = skins_won as f64 * config.skin_value;
            PlayerResult {
                player_id: p.player_id,
                player_name: p.name.clone(),
                skins_won,
                expected_winnings,
                fair_share: pot.fair_share,
                net_winnings: expected_winnings - pot.fair_share,
                payments: Vec::new(),
            }
        })
        .collect();

    allocate_payments(&mut results);
    results
}

/// Assign each loser's debt proportionally across the winners.
fn allocate_payments(results: &mut [PlayerResult]) {
    // Index lists keep `results` in player order. Stable sorts break
    // net-winnings ties by that order, so output is deterministic.
    let mut winners: Vec<usize> = (0..results.len())
        .filter(|&i| results[i].net_winnings > 0.0)
        .collect();
    winners.sort_by(|&a, &b| results[b].net_winnings.total_cmp(&results[a].net_winnings));

    let mut losers: Vec<usize> = (0..results.len())
        .filter(|&i| results[i].net_winnings < 0.0)
        .collect();
    losers.sort_by(|&a, &b| results[a].net_winnings.total_cmp(&results[b].net_winnings));

    if winners.is_empty() || losers.is_empty() {
        return;
    }

    // Initial surplus distribution; never decremented as losers pay.
    let surplus: f64 = winners.iter().map(|&i| results[i].net_winnings).sum();

    for &loser in &losers {
        let debt = -results[loser].net_winnings;
        let mut allocated = 0.0;
        let mut payments = Vec::new();

        for (pos, &winner) in winners.iter().enumerate() {
            let amount = if pos + 1 == winners.len() {
                // The last winner takes whatever the earlier shares left
                // unallocated, absorbing rounding residue and omitted dust
                // so the loser's payments sum exactly to the debt.
                round_to_cents(debt - allocated)
            } else {
                round_to_cents(debt * results[winner].net_winnings / surplus)
            };

            if amount > MIN_PAYMENT {
                payments.push(Payment {
                    to_player_id: results[winner].player_id,
                    to_player_name: results[winner].player_name.clone(),
                    amount,
                });
                allocated += amount;
            }
        }

        results[loser].payments = payments;
    }
}

/// Deterministic fingerprint of a settlement.
///
/// Hashes ids, skin counts, cent-quantized net winnings, and the full
/// payment list in order. Two [`settle`] calls over identical inputs yield
/// identical fingerprints.
pub fn settlement_fingerprint(results: &[PlayerResult]) -> u64 {
    let mut data = Vec::with_capacity(results.len() * 32);
    for r in results {
        data.extend_from_slice(&r.player_id.to_le_bytes());
        data.extend_from_slice(&(r.skins_won as u64).to_le_bytes());
        data.extend_from_slice(&to_cents(r.net_winnings).to_le_bytes());
        data.extend_from_slice(&(r.payments.len() as u64).to_le_bytes());
        for p in &r.payments {
            data.extend_from_slice(&p.to_player_id.to_le_bytes());
            data.extend_from_slice(&to_cents(p.amount).to_le_bytes());
        }
    }
    fnv1a(&data)
}

/// Round to whole cents, half away from zero.
#[inline(always)]
fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Quantize a currency amount to signed cents.
#[inline(always)]
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

// ── Tests ──────────────────────────────────────────────────────────────
