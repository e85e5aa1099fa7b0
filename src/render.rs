//! Plain-text rendering for the terminal screens.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::analytics::{BetSummary, Category};
use crate::types::Bet;

pub const EMPTY_LIST: &str = "No bets saved yet.";
pub const NO_SETTLED: &str = "No completed bets yet.";

/// Two decimal places, half away from zero, with a currency prefix.
pub fn money(value: Decimal, currency: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency}{rounded:.2}")
}

/// One numbered card in the bet list.
pub fn bet_card(index: usize, bet: &Bet, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{index}  {} - {}\n", bet.sport, bet.league));
    out.push_str(&format!("    Date: {}\n", bet.date));
    out.push_str(&format!("    Match: {}\n", bet.match_description));
    out.push_str(&format!("    Type: {}\n", bet.bet_type));
    out.push_str(&format!("    Amount: {}\n", money(bet.amount, currency)));
    out.push_str(&format!("    Odds: {}\n", bet.odds));
    out.push_str(&format!("    Result: {}\n", bet.result));
    out.push_str(&format!("    ID: {}\n", bet.id));
    out
}

pub fn bet_list(bets: &[Bet], currency: &str) -> String {
    if bets.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }
    bets.iter()
        .enumerate()
        .map(|(i, bet)| bet_card(i + 1, bet, currency))
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Profit by <Category>" followed by one line per category.
pub fn profit_table(totals: &BTreeMap<String, Decimal>, category: Category, currency: &str) -> String {
    let mut out = format!("Profit by {category}\n");
    if totals.is_empty() {
        out.push_str(NO_SETTLED);
        out.push('\n');
        return out;
    }
    for (name, profit) in totals {
        out.push_str(&format!("{name}: {}\n", money(*profit, currency)));
    }
    out
}

pub fn summary_line(summary: &BetSummary, currency: &str) -> String {
    format!(
        "Won {} | Lost {} | Pending {} | Win rate {:.1}% | Net {}",
        summary.won,
        summary.lost,
        summary.pending,
        summary.win_rate(),
        money(summary.net_profit, currency),
    )
}
