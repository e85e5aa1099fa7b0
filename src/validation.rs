//! Bet entry drafts and the rules that gate their submission.
//!
//! A [`BetDraft`] holds raw form values. [`validate`] reports every field
//! that blocks saving; [`is_submittable`] is the boolean gate the form uses
//! to enable its save action. Nothing here panics on bad input: malformed
//! numbers are violations, not errors.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::str::FromStr;

use crate::config::FormConfig;
use crate::types::{Bet, BetId, BetResult, Odds, OddsSign};

/// Largest wager the form accepts.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single reason a draft cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    BlankMatchDescription,
    AmountNotNumeric,
    AmountNotPositive,
    AmountTooLarge,
    OddsNotNumeric,
    OddsNotPositive,
    InvalidDate,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BlankMatchDescription => write!(f, "match description must not be blank"),
            Violation::AmountNotNumeric => write!(f, "amount must be a number"),
            Violation::AmountNotPositive => write!(f, "amount must be greater than 0"),
            Violation::AmountTooLarge => write!(f, "amount must not exceed {MAX_AMOUNT}"),
            Violation::OddsNotNumeric => write!(f, "odds value must be a whole number"),
            Violation::OddsNotPositive => write!(f, "odds value must be greater than 0"),
            Violation::InvalidDate => write!(f, "date is not a valid calendar date"),
        }
    }
}

/// All violations found in a rejected draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// In-progress form values for a bet being entered or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetDraft {
    pub match_description: String,
    pub sport: String,
    pub league: String,
    pub bet_type: String,
    pub amount: String,
    pub odds_sign: OddsSign,
    pub odds_value: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub result: BetResult,
}

impl BetDraft {
    /// Form defaults for a new bet dated `today`.
    pub fn blank(today: NaiveDate, form: &FormConfig) -> Self {
        let first = |options: &[String]| options.first().cloned().unwrap_or_default();
        let (odds_sign, odds_value) = split_odds_text(&form.default_odds);

        Self {
            match_description: String::new(),
            sport: first(&form.sports),
            league: first(&form.leagues),
            bet_type: first(&form.bet_types),
            amount: form.default_amount.clone(),
            odds_sign,
            odds_value,
            year: today.year(),
            month: today.month(),
            day: today.day(),
            result: BetResult::Pending,
        }
    }

    /// Pre-fill the form from an existing bet for editing.
    pub fn from_bet(bet: &Bet) -> Self {
        Self {
            match_description: bet.match_description.clone(),
            sport: bet.sport.clone(),
            league: bet.league.clone(),
            bet_type: bet.bet_type.clone(),
            amount: bet.amount.normalize().to_string(),
            odds_sign: bet.odds.sign(),
            odds_value: bet.odds.magnitude().to_string(),
            year: bet.date.year(),
            month: bet.date.month(),
            day: bet.date.day(),
            result: bet.result,
        }
    }

    /// The combined odds text as it would be stored, e.g. `-110`.
    pub fn odds_text(&self) -> String {
        format!("{}{}", self.odds_sign, self.odds_value.trim())
    }

    /// Take odds as typed into a single field. A leading `+`/`-` sets the
    /// sign; bare digits keep the current sign.
    pub fn set_odds_text(&mut self, text: &str) {
        let text = text.trim();
        match text.chars().next().and_then(OddsSign::from_symbol) {
            Some(sign) => {
                self.odds_sign = sign;
                self.odds_value = text[1..].to_string();
            }
            None => self.odds_value = text.to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Build the bet record, or report every violation.
    pub fn build(&self, id: BetId) -> Result<Bet, ValidationError> {
        let checked = check(self);
        match checked {
            Checked {
                amount: Some(amount),
                magnitude: Some(magnitude),
                date: Some(date),
                violations,
            } if violations.is_empty() => {
                let odds = Odds::new(self.odds_sign, magnitude).map_err(|_| ValidationError {
                    violations: vec![Violation::OddsNotPositive],
                })?;
                Ok(Bet {
                    id,
                    date,
                    sport: self.sport.clone(),
                    league: self.league.clone(),
                    match_description: self.match_description.trim().to_string(),
                    bet_type: self.bet_type.clone(),
                    amount,
                    odds,
                    result: self.result,
                })
            }
            Checked { violations, .. } => Err(ValidationError { violations }),
        }
    }
}

/// Split `+110` / `-110` / `110` into sign and magnitude text. A missing or
/// unknown sign defaults to `+`.
fn split_odds_text(text: &str) -> (OddsSign, String) {
    let text = text.trim();
    match text.chars().next().and_then(OddsSign::from_symbol) {
        Some(sign) => (sign, text[1..].to_string()),
        None => (OddsSign::Plus, text.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

struct Checked {
    amount: Option<Decimal>,
    magnitude: Option<u32>,
    date: Option<NaiveDate>,
    violations: Vec<Violation>,
}

fn check(draft: &BetDraft) -> Checked {
    let mut violations = Vec::new();

    if draft.match_description.trim().is_empty() {
        violations.push(Violation::BlankMatchDescription);
    }

    let amount = match parse_amount(&draft.amount) {
        None => {
            violations.push(Violation::AmountNotNumeric);
            None
        }
        Some(a) if a <= Decimal::ZERO => {
            violations.push(Violation::AmountNotPositive);
            None
        }
        Some(a) if a > MAX_AMOUNT => {
            violations.push(Violation::AmountTooLarge);
            None
        }
        Some(a) => Some(a),
    };

    let magnitude = match draft.odds_value.trim().parse::<i64>() {
        Err(_) => {
            violations.push(Violation::OddsNotNumeric);
            None
        }
        Ok(n) if n <= 0 => {
            violations.push(Violation::OddsNotPositive);
            None
        }
        Ok(n) => match u32::try_from(n) {
            Ok(m) => Some(m),
            Err(_) => {
                violations.push(Violation::OddsNotNumeric);
                None
            }
        },
    };

    let date = draft.date();
    if date.is_none() {
        violations.push(Violation::InvalidDate);
    }

    Checked {
        amount,
        magnitude,
        date,
        violations,
    }
}

/// Parse a wager amount. Accepts plain (`50`, `12.5`) and scientific
/// (`1e2`) notation, surrounding whitespace ignored. Digit separators
/// (`1_000`) are rejected.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() || text.contains('_') {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Every rule the draft breaks, in field order. Empty means submittable.
pub fn validate(draft: &BetDraft) -> Vec<Violation> {
    check(draft).violations
}

/// Whether the form's save action should be enabled.
pub fn is_submittable(draft: &BetDraft) -> bool {
    validate(draft).is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
