//! Shared types for the bet tracker.
//!
//! The bet record and its typed fields live here so that validation,
//! analytics, the store, and the front end all agree on one data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Opaque bet identifier. Assigned once at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(Uuid);

impl BetId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BetId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Odds
// ---------------------------------------------------------------------------

/// Sign of an American odds quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OddsSign {
    /// Underdog: winnings per 100 staked.
    Plus,
    /// Favourite: stake needed to win 100.
    Minus,
}

impl OddsSign {
    pub fn symbol(&self) -> char {
        match self {
            OddsSign::Plus => '+',
            OddsSign::Minus => '-',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(OddsSign::Plus),
            '-' => Some(OddsSign::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for OddsSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// American odds, e.g. `+150` or `-110`.
///
/// The magnitude is non-zero by construction, so payout arithmetic never
/// divides by zero and no "unparseable odds" state exists past entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Odds {
    sign: OddsSign,
    magnitude: NonZeroU32,
}

impl Odds {
    pub fn new(sign: OddsSign, magnitude: u32) -> Result<Self, TrackerError> {
        let magnitude = NonZeroU32::new(magnitude)
            .ok_or_else(|| TrackerError::InvalidOdds(format!("{sign}0")))?;
        Ok(Self { sign, magnitude })
    }

    pub fn sign(&self) -> OddsSign {
        self.sign
    }

    /// Absolute value of the quote.
    pub fn magnitude(&self) -> u32 {
        self.magnitude.get()
    }

    pub fn is_negative(&self) -> bool {
        self.sign == OddsSign::Minus
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.magnitude)
    }
}

/// Parse a signed quote. The sign is mandatory and the magnitude must be
/// plain digits.
impl FromStr for Odds {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let sign = chars
            .next()
            .and_then(OddsSign::from_symbol)
            .ok_or_else(|| TrackerError::InvalidOdds(s.to_string()))?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackerError::InvalidOdds(s.to_string()));
        }
        let magnitude: u32 = digits
            .parse()
            .map_err(|_| TrackerError::InvalidOdds(s.to_string()))?;
        Odds::new(sign, magnitude).map_err(|_| TrackerError::InvalidOdds(s.to_string()))
    }
}

impl TryFrom<String> for Odds {
    type Error = TrackerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Odds> for String {
    fn from(odds: Odds) -> Self {
        odds.to_string()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Outcome of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetResult {
    Pending,
    Won,
    Lost,
}

impl BetResult {
    pub const ALL: &'static [BetResult] = &[BetResult::Pending, BetResult::Won, BetResult::Lost];

    /// Won or lost.
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetResult::Pending)
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Pending => write!(f, "Pending"),
            BetResult::Won => write!(f, "Won"),
            BetResult::Lost => write!(f, "Lost"),
        }
    }
}

/// Case-insensitive parse.
impl FromStr for BetResult {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BetResult::Pending),
            "won" | "win" => Ok(BetResult::Won),
            "lost" | "loss" => Ok(BetResult::Lost),
            _ => Err(TrackerError::InvalidResult(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet
// ---------------------------------------------------------------------------

/// A single wagered bet.
///
/// Never mutated in place once stored: edits and result changes build a new
/// record with the same id and replace the old one through the store.
/// Serialize-only: records are built from validated drafts, never decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bet {
    pub id: BetId,
    pub date: NaiveDate,
    pub sport: String,
    pub league: String,
    pub match_description: String,
    pub bet_type: String,
    pub amount: Decimal,
    pub odds: Odds,
    pub result: BetResult,
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} - {}] {} {} ${} @ {} ({}) [{}]",
            self.sport,
            self.league,
            self.date,
            self.match_description,
            self.amount,
            self.odds,
            self.result,
            self.id,
        )
    }
}

impl Bet {
    /// Copy of this bet with a different result, same id.
    pub fn with_result(&self, result: BetResult) -> Self {
        Self {
            result,
            ..self.clone()
        }
    }

    pub fn is_settled(&self) -> bool {
        self.result.is_settled()
    }

    /// Helper to build a test/sample bet with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        use rust_decimal_macros::dec;

        Bet {
            id: BetId::new(),
            date: NaiveDate::from_ymd_opt(2024, 9, 8).unwrap(),
            sport: "Football".to_string(),
            league: "NFL".to_string(),
            match_description: "Chiefs vs Ravens".to_string(),
            bet_type: "Moneyline".to_string(),
            amount: dec!(100),
            odds: "+150".parse().unwrap(),
            result: BetResult::Pending,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid bet: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bet already exists: {0}")]
    DuplicateId(BetId),

    #[error("Bet not found: {0}")]
    NotFound(BetId),

    #[error("Replacement carries id {found}, expected {expected}")]
    IdMismatch { expected: BetId, found: BetId },

    #[error("Invalid odds: {0:?} (expected +N or -N with N > 0)")]
    InvalidOdds(String),

    #[error("Unknown bet result: {0}")]
    InvalidResult(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
