//! Line-oriented terminal front end.
//!
//! Renders the current screen, reads one command, and hands it to the
//! [`App`] controller. Generic over its input and output so tests can drive
//! a whole session through in-memory buffers. End of input quits.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::analytics::Category;
use crate::app::{App, Screen};
use crate::render;
use crate::types::{BetId, BetResult};
use crate::validation::{self, BetDraft};

pub struct Shell<R, W> {
    app: App,
    input: R,
    output: W,
    currency: String,
    today: NaiveDate,
}

/// What a screen handler wants the loop to do next.
enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(app: App, input: R, output: W, currency: &str, today: NaiveDate) -> Self {
        Self {
            app,
            input,
            output,
            currency: currency.to_string(),
            today,
        }
    }

    /// Run until the user quits or input ends. Returns the controller so
    /// callers can inspect the final state.
    pub fn run(mut self) -> Result<App> {
        loop {
            let flow = match self.app.screen() {
                Screen::Home => self.home()?,
                Screen::AddBet => self.form()?,
                Screen::ViewBets => self.list()?,
                Screen::Analytics => self.analytics()?,
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        self.output.flush().context("Failed to flush output")?;
        info!(bets = self.app.store().len(), "Session ended");
        Ok(self.app)
    }

    // -- Screens ---------------------------------------------------------

    fn home(&mut self) -> Result<Flow> {
        self.say("\nWelcome to Sports Bet Tracker!")?;
        self.say("  1) Add New Bet\n  2) View Bet History\n  3) View Analytics\n  q) Quit")?;
        let Some(choice) = self.prompt("> ")? else {
            return Ok(Flow::Quit);
        };
        match choice.as_str() {
            "1" | "a" | "add" => self.app.navigate(Screen::AddBet),
            "2" | "v" | "view" => self.app.navigate(Screen::ViewBets),
            "3" | "s" | "stats" => self.app.navigate(Screen::Analytics),
            "q" | "quit" | "exit" => return Ok(Flow::Quit),
            other => self.say(&format!("Unknown option: {other}"))?,
        }
        Ok(Flow::Continue)
    }

    fn form(&mut self) -> Result<Flow> {
        let editing = self.app.editing();
        let back = if editing.is_some() { Screen::ViewBets } else { Screen::Home };
        let mut draft = self.app.draft(self.today);

        loop {
            self.say(if editing.is_some() { "\nEdit Bet" } else { "\nEnter Bet Details" })?;
            self.say("(press Enter to keep the value in brackets)")?;
            if !self.fill(&mut draft)? {
                return Ok(Flow::Quit);
            }

            let violations = validation::validate(&draft);
            if violations.is_empty() {
                match self.app.submit(&draft) {
                    Ok(bet) => self.say(&format!("Bet saved. [{}]", bet.id))?,
                    Err(e) => {
                        warn!(error = %e, "Save rejected");
                        self.say(&format!("Could not save: {e}"))?;
                        self.app.navigate(back);
                        return Ok(Flow::Continue);
                    }
                }
                let Some(choice) = self.prompt("a) add another  v) view history  b) back > ")? else {
                    return Ok(Flow::Quit);
                };
                match choice.as_str() {
                    "a" => self.app.new_bet(),
                    "v" => self.app.navigate(Screen::ViewBets),
                    _ => self.app.navigate(back),
                }
                return Ok(Flow::Continue);
            }

            self.say("Cannot save this bet:")?;
            for v in &violations {
                self.say(&format!("  - {v}"))?;
            }
            debug!(count = violations.len(), "Draft rejected");
            let Some(choice) = self.prompt("r) retry  v) view history  b) back > ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "r" | "retry" => {}
                "v" => {
                    self.app.navigate(Screen::ViewBets);
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.app.navigate(back);
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    fn list(&mut self) -> Result<Flow> {
        let bets = self.app.bets();
        self.say("\nBet List")?;
        let listing = render::bet_list(&bets, &self.currency);
        self.write_raw(&listing)?;
        self.say("e N) edit  d N) delete  w N) mark won  l N) mark lost  j) json  b) back")?;
        let Some(line) = self.prompt("> ")? else {
            return Ok(Flow::Quit);
        };

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let target = parts.next().and_then(|n| n.parse::<usize>().ok());
        let pick = |n: Option<usize>| -> Option<BetId> {
            n.filter(|&n| n >= 1).and_then(|n| bets.get(n - 1)).map(|b| b.id)
        };

        match cmd {
            "b" | "back" => self.app.navigate(Screen::Home),
            "j" | "json" => {
                let json = serde_json::to_string_pretty(&bets).context("Failed to serialise bets")?;
                self.say(&json)?;
            }
            "e" | "edit" | "d" | "delete" | "w" | "won" | "l" | "lost" => {
                let Some(id) = pick(target) else {
                    self.say("Pick a bet by its number, e.g. `w 1`.")?;
                    return Ok(Flow::Continue);
                };
                let outcome = match cmd {
                    "e" | "edit" => self.app.begin_edit(&id).map(|_| ()),
                    "d" | "delete" => {
                        self.app.delete(&id);
                        Ok(())
                    }
                    "w" | "won" => self.app.mark_result(&id, BetResult::Won).map(|_| ()),
                    _ => self.app.mark_result(&id, BetResult::Lost).map(|_| ()),
                };
                if let Err(e) = outcome {
                    self.say(&format!("Error: {e}"))?;
                }
            }
            "" => {}
            other => self.say(&format!("Unknown command: {other}"))?,
        }
        Ok(Flow::Continue)
    }

    fn analytics(&mut self) -> Result<Flow> {
        let table = render::profit_table(&self.app.profit(), self.app.category(), &self.currency);
        let summary = render::summary_line(&self.app.summary(), &self.currency);
        self.say("")?;
        self.write_raw(&table)?;
        self.say(&summary)?;
        self.say("g sport|league|type) regroup  b) back")?;
        let Some(line) = self.prompt("> ")? else {
            return Ok(Flow::Quit);
        };

        let mut parts = line.splitn(2, char::is_whitespace);
        match parts.next().unwrap_or("") {
            "b" | "back" => self.app.navigate(Screen::Home),
            "g" | "group" => match parts.next().unwrap_or("").parse::<Category>() {
                Ok(category) => self.app.set_category(category),
                Err(e) => self.say(&e.to_string())?,
            },
            "" => {}
            other => self.say(&format!("Unknown command: {other}"))?,
        }
        Ok(Flow::Continue)
    }

    // -- Form fields -----------------------------------------------------

    /// Walk every field of the draft. Returns false on end of input.
    fn fill(&mut self, draft: &mut BetDraft) -> Result<bool> {
        let Some(desc) = self.field("Match Description", &draft.match_description)? else {
            return Ok(false);
        };
        draft.match_description = desc;

        let date = format!("{:04}-{:02}-{:02}", draft.year, draft.month, draft.day);
        loop {
            let Some(text) = self.field("Date (YYYY-MM-DD)", &date)? else {
                return Ok(false);
            };
            match parse_ymd(&text) {
                Some((y, m, d)) => {
                    draft.year = y;
                    draft.month = m;
                    draft.day = d;
                    break;
                }
                None => self.say("Date must look like YYYY-MM-DD.")?,
            }
        }

        let options = self.app.form().sports.clone();
        let Some(sport) = self.choice("Sport", &options, &draft.sport)? else {
            return Ok(false);
        };
        draft.sport = sport;

        let options = self.app.form().leagues.clone();
        let Some(league) = self.choice("League", &options, &draft.league)? else {
            return Ok(false);
        };
        draft.league = league;

        let options = self.app.form().bet_types.clone();
        let Some(bet_type) = self.choice("Bet Type", &options, &draft.bet_type)? else {
            return Ok(false);
        };
        draft.bet_type = bet_type;

        let Some(amount) = self.field("Amount Wagered", &draft.amount)? else {
            return Ok(false);
        };
        draft.amount = amount;

        let Some(odds) = self.field("Odds (+N / -N)", &draft.odds_text())? else {
            return Ok(false);
        };
        draft.set_odds_text(&odds);

        let results: Vec<String> = BetResult::ALL.iter().map(|r| r.to_string()).collect();
        loop {
            let Some(text) = self.choice("Result", &results, &draft.result.to_string())? else {
                return Ok(false);
            };
            match text.parse::<BetResult>() {
                Ok(result) => {
                    draft.result = result;
                    break;
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }
        Ok(true)
    }

    /// Free-text field. Empty input keeps `current`.
    fn field(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        let answer = self.prompt(&format!("{label} [{current}]: "))?;
        Ok(answer.map(|a| if a.is_empty() { current.to_string() } else { a }))
    }

    /// Suggestion field: a number picks from `options`, anything else is
    /// taken as typed.
    fn choice(&mut self, label: &str, options: &[String], current: &str) -> Result<Option<String>> {
        let menu: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}={o}", i + 1))
            .collect();
        self.say(&format!("  {}", menu.join("  ")))?;
        let answer = self.field(label, current)?;
        Ok(answer.map(|a| match a.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => options[n - 1].clone(),
            _ => a,
        }))
    }

    // -- I/O -------------------------------------------------------------

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("Failed to write output")
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}").context("Failed to write output")
    }

    /// Print `label`, read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("Failed to write output")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Split `YYYY-MM-DD` into numbers without checking the calendar; the
/// validator reports impossible dates.
fn parse_ymd(text: &str) -> Option<(i32, u32, u32)> {
    let mut parts = text.trim().splitn(3, '-');
    let y = parts.next()?.parse().ok()?;
    let m = parts.next()?.parse().ok()?;
    let d = parts.next()?.parse().ok()?;
    Some((y, m, d))
}
