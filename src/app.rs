//! Screen controller.
//!
//! Tracks which screen is showing and which bet (if any) the form is
//! editing, and routes every user action to the [`BetStore`]. Screens read
//! snapshots from here and never touch the store directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::info;

use crate::analytics::{self, BetSummary, Category};
use crate::config::FormConfig;
use crate::store::BetStore;
use crate::types::{Bet, BetId, BetResult, TrackerError};
use crate::validation::BetDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    AddBet,
    ViewBets,
    Analytics,
}

pub struct App {
    store: BetStore,
    screen: Screen,
    editing: Option<BetId>,
    form: FormConfig,
    category: Category,
}

impl App {
    pub fn new(form: FormConfig, category: Category) -> Self {
        Self {
            store: BetStore::new(),
            screen: Screen::Home,
            editing: None,
            form,
            category,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Id of the bet the form is editing, if any.
    pub fn editing(&self) -> Option<BetId> {
        self.editing
    }

    pub fn form(&self) -> &FormConfig {
        &self.form
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Switch screens. Any screen other than the form drops the edit target.
    pub fn navigate(&mut self, screen: Screen) {
        if screen != Screen::AddBet {
            self.editing = None;
        }
        self.screen = screen;
    }

    /// Open a blank form for a new bet, dropping any edit target.
    pub fn new_bet(&mut self) {
        self.editing = None;
        self.screen = Screen::AddBet;
    }

    /// Open the form pre-filled with an existing bet.
    pub fn begin_edit(&mut self, id: &BetId) -> Result<BetDraft, TrackerError> {
        let bet = self.store.get(id).ok_or(TrackerError::NotFound(*id))?;
        let draft = BetDraft::from_bet(bet);
        self.editing = Some(*id);
        self.screen = Screen::AddBet;
        Ok(draft)
    }

    /// The draft the form should start from: the edit target's values, or
    /// blank defaults dated `today`.
    pub fn draft(&self, today: NaiveDate) -> BetDraft {
        self.editing
            .and_then(|id| self.store.get(&id))
            .map(BetDraft::from_bet)
            .unwrap_or_else(|| BetDraft::blank(today, &self.form))
    }

    /// Validate and save the draft: a new bet with a fresh id, or a full
    /// replacement of the bet being edited.
    pub fn submit(&mut self, draft: &BetDraft) -> Result<Bet, TrackerError> {
        match self.editing {
            Some(id) => {
                let bet = draft.build(id)?;
                self.store.update_by_id(&id, bet.clone())?;
                info!(%id, "Bet updated");
                Ok(bet)
            }
            None => {
                let bet = draft.build(BetId::new())?;
                self.store.add(bet.clone())?;
                info!(id = %bet.id, sport = %bet.sport, "Bet saved");
                Ok(bet)
            }
        }
    }

    pub fn delete(&mut self, id: &BetId) -> Option<Bet> {
        let removed = self.store.remove_by_id(id);
        if removed.is_some() {
            info!(%id, "Bet deleted");
            if self.editing == Some(*id) {
                self.editing = None;
            }
        }
        removed
    }

    pub fn mark_result(&mut self, id: &BetId, result: BetResult) -> Result<Bet, TrackerError> {
        let bet = self.store.mark_result(id, result)?;
        info!(%id, %result, "Bet result marked");
        Ok(bet)
    }

    /// Snapshot for the list screen.
    pub fn bets(&self) -> Vec<Bet> {
        self.store.list_all()
    }

    /// Profit breakdown under the active category.
    pub fn profit(&self) -> BTreeMap<String, Decimal> {
        let category = self.category;
        let bets = self.store.list_all();
        analytics::profit_by_category(&bets, |bet| category.key(bet).to_string())
    }

    pub fn summary(&self) -> BetSummary {
        analytics::summarize(&self.store.list_all())
    }

    pub fn store(&self) -> &BetStore {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
