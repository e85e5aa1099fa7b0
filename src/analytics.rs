//! Profit analytics over settled bets.
//!
//! Converts American odds into a payout-on-win and sums each settled bet's
//! contribution per category. Pending bets never count. Results are exact
//! `Decimal`s; rounding for display happens in the renderer.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{Bet, BetResult, TrackerError};

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Built-in grouping keys for the profit breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Sport,
    League,
    BetType,
}

impl Category {
    pub const ALL: &'static [Category] = &[Category::Sport, Category::League, Category::BetType];

    /// The grouping key of `bet` under this category.
    pub fn key<'a>(&self, bet: &'a Bet) -> &'a str {
        match self {
            Category::Sport => &bet.sport,
            Category::League => &bet.league,
            Category::BetType => &bet.bet_type,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sport => write!(f, "Sport"),
            Category::League => write!(f, "League"),
            Category::BetType => write!(f, "Bet Type"),
        }
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "sport" | "sports" => Ok(Category::Sport),
            "league" | "leagues" => Ok(Category::League),
            "bet_type" | "type" | "bettype" => Ok(Category::BetType),
            _ => Err(TrackerError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Profit
// ---------------------------------------------------------------------------

/// Winnings a bet would pay if it won (stake not included).
///
/// Negative odds: `amount / (magnitude / 100)`.
/// Positive odds: `amount * (magnitude / 100)`.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn payout_on_win(bet: &Bet) -> Decimal {
    let ratio = Decimal::from(bet.odds.magnitude()) / HUNDRED;
    if bet.odds.is_negative() {
        bet.amount.checked_div(ratio).unwrap_or(Decimal::MAX)
    } else {
        bet.amount.saturating_mul(ratio)
    }
}

/// Signed effect of one bet on its category total. `None` while pending.
pub fn contribution(bet: &Bet) -> Option<Decimal> {
    match bet.result {
        BetResult::Pending => None,
        BetResult::Won => Some(payout_on_win(bet)),
        BetResult::Lost => Some(-bet.amount),
    }
}

/// Sum settled bets' contributions grouped by `category_of`.
///
/// Categories without a settled bet are absent rather than zero. Totals
/// saturate at the `Decimal` bounds.
pub fn profit_by_category<'a, I, F, K>(bets: I, category_of: F) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Bet>,
    F: Fn(&Bet) -> K,
    K: Into<String>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for bet in bets {
        if let Some(amount) = contribution(bet) {
            let total = totals.entry(category_of(bet).into()).or_insert(Decimal::ZERO);
            *total = total.saturating_add(amount);
        }
    }
    totals
}

/// Profit grouped by sport, the default breakdown.
pub fn profit_by_sport<'a, I>(bets: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Bet>,
{
    profit_by_category(bets, |bet| bet.sport.clone())
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline numbers across all bets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BetSummary {
    pub won: usize,
    pub lost: usize,
    pub pending: usize,
    pub net_profit: Decimal,
}

impl BetSummary {
    pub fn settled(&self) -> usize {
        self.won + self.lost
    }

    /// Win rate as a percentage. Returns 0.0 if nothing is settled.
    pub fn win_rate(&self) -> f64 {
        let settled = self.settled();
        if settled == 0 {
            0.0
        } else {
            (self.won as f64 / settled as f64) * 100.0
        }
    }
}

impl fmt::Display for BetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W{}/L{} ({} pending) | win_rate={:.1}% | net={:.2}",
            self.won,
            self.lost,
            self.pending,
            self.win_rate(),
            self.net_profit,
        )
    }
}

pub fn summarize<'a, I>(bets: I) -> BetSummary
where
    I: IntoIterator<Item = &'a Bet>,
{
    bets.into_iter().fold(BetSummary::default(), |mut s, bet| {
        match bet.result {
            BetResult::Pending => s.pending += 1,
            BetResult::Won => s.won += 1,
            BetResult::Lost => s.lost += 1,
        }
        if let Some(amount) = contribution(bet) {
            s.net_profit = s.net_profit.saturating_add(amount);
        }
        s
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
