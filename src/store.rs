//! In-memory bet store.
//!
//! Owns every bet record, keeps insertion order for listing, and is the
//! only place records are added, replaced, or removed. Readers get cloned
//! snapshots so nothing outside the store aliases its storage.

use tracing::{debug, warn};

use crate::types::{Bet, BetId, BetResult, TrackerError};

#[derive(Debug, Default)]
pub struct BetStore {
    bets: Vec<Bet>,
    revision: u64,
}

impl BetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bet. Rejects an id that is already stored.
    pub fn add(&mut self, bet: Bet) -> Result<(), TrackerError> {
        if self.position(&bet.id).is_some() {
            warn!(id = %bet.id, "Rejected add: duplicate id");
            return Err(TrackerError::DuplicateId(bet.id));
        }
        debug!(id = %bet.id, sport = %bet.sport, amount = %bet.amount, "Bet added");
        self.bets.push(bet);
        self.bump();
        Ok(())
    }

    /// Replace the bet with `id` by `new_bet`, keeping its position.
    /// Returns the replaced record. The store is untouched on error.
    pub fn update_by_id(&mut self, id: &BetId, new_bet: Bet) -> Result<Bet, TrackerError> {
        if new_bet.id != *id {
            warn!(expected = %id, found = %new_bet.id, "Rejected update: id mismatch");
            return Err(TrackerError::IdMismatch {
                expected: *id,
                found: new_bet.id,
            });
        }
        let index = self.position(id).ok_or_else(|| {
            warn!(%id, "Rejected update: not found");
            TrackerError::NotFound(*id)
        })?;
        let old = std::mem::replace(&mut self.bets[index], new_bet);
        debug!(%id, result = %self.bets[index].result, "Bet replaced");
        self.bump();
        Ok(old)
    }

    /// Remove the bet with `id`. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: &BetId) -> Option<Bet> {
        let index = self.position(id)?;
        let removed = self.bets.remove(index);
        debug!(%id, "Bet removed");
        self.bump();
        Some(removed)
    }

    /// Settle (or re-open) a bet by replacing it with a copy carrying `result`.
    pub fn mark_result(&mut self, id: &BetId, result: BetResult) -> Result<Bet, TrackerError> {
        let updated = self
            .get(id)
            .ok_or(TrackerError::NotFound(*id))?
            .with_result(result);
        self.update_by_id(id, updated.clone())?;
        Ok(updated)
    }

    /// Snapshot of all bets in insertion order.
    pub fn list_all(&self) -> Vec<Bet> {
        self.bets.clone()
    }

    pub fn get(&self, id: &BetId) -> Option<&Bet> {
        self.bets.iter().find(|b| b.id == *id)
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Incremented on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: &BetId) -> Option<usize> {
        self.bets.iter().position(|b| b.id == *id)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
