//! Resource shadow prices.
//!
//! Estimates how many victory points the active player could still realize
//! from banked resources. The estimate is a lower bound: it feeds an additive
//! bonus, so it must never overvalue resources that are hard to bank.

use crate::board::{Action, BoardQuery, Resource};

/// Player id assumed when the board does not name an active player.
pub const DEFAULT_PLAYER: &str = "you";

/// VP per monolith, bought with 10 materials.
const MONOLITH_VP: f64 = 3.0;
const MONOLITH_COST: i64 = 10;
/// Late-game tech-track VP per 4 science.
const TECH_VP: f64 = 0.2;
const TECH_SCIENCE: i64 = 4;
/// Rounds left at or below which science starts converting.
const TECH_WINDOW: u32 = 2;
/// VP-equivalent flexibility per money.
const LIQUIDITY_VP: f64 = 0.05;
/// Final round: share of leftover materials assumed liquidated, and VP per material.
const LIQUIDATION_SHARE: f64 = 0.7;
const LEFTOVER_VP: f64 = 0.20;

/// Banked resources of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bank {
    pub materials: i64,
    pub science: i64,
    pub money: i64,
}

impl Bank {
    /// Reads the active player's bank; every missing value reads as 0.
    pub fn of_active_player<S: BoardQuery + ?Sized>(state: &S) -> Bank {
        let pid = state
            .active_player()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PLAYER);
        let read = |kind| state.resource(pid, kind).unwrap_or(0);
        Bank {
            materials: read(Resource::Materials),
            science: read(Resource::Science),
            money: read(Resource::Money),
        }
    }
}

/// The four convertible-value components, kept apart for explanation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShadowPrice {
    pub monolith: f64,
    pub tech: f64,
    pub liquidity: f64,
    pub leftover: f64,
}

impl ShadowPrice {
    pub fn total(&self) -> f64 {
        self.monolith + self.tech + self.liquidity + self.leftover
    }
}

/// Prices a bank given the rounds remaining in the game.
pub fn price_bank(bank: Bank, rounds_left: u32) -> ShadowPrice {
    let monolith = MONOLITH_VP * bank.materials.div_euclid(MONOLITH_COST) as f64;

    let tech = if rounds_left <= TECH_WINDOW {
        TECH_VP * bank.science.div_euclid(TECH_SCIENCE) as f64
    } else {
        0.0
    };

    let liquidity = LIQUIDITY_VP * bank.money as f64;

    // Intentionally tiny coefficient: leftover materials rarely become VP.
    let leftover = if rounds_left == 0 {
        LIQUIDATION_SHARE * bank.materials.rem_euclid(MONOLITH_COST) as f64 * LEFTOVER_VP
    } else {
        0.0
    };

    ShadowPrice {
        monolith,
        tech,
        liquidity,
        leftover,
    }
}

/// Convertible VP for the active player at `round_idx` of `total_rounds`.
pub fn shadow_vp<S: BoardQuery + ?Sized>(
    state: &S,
    _action: &Action,
    total_rounds: u32,
    round_idx: u32,
) -> f64 {
    let bank = Bank::of_active_player(state);
    let rounds_left = total_rounds.saturating_sub(round_idx);
    price_bank(bank, rounds_left).total()
}

/// Current round as reported by the board, or `default_round`.
pub fn infer_round_idx<S: BoardQuery + ?Sized>(state: &S, default_round: u32) -> u32 {
    state
        .round_index()
        .filter(|&r| r >= 1)
        .unwrap_or(default_round)
}
