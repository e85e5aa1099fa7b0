//! Scripted terminal sessions over in-memory I/O.

use chrono::NaiveDate;
use std::io::Cursor;

use bet_tracker::analytics::Category;
use bet_tracker::app::App;
use bet_tracker::config::FormConfig;
use bet_tracker::shell::Shell;
use bet_tracker::types::BetResult;

fn session(script: &str) -> (App, String) {
    let app = App::new(FormConfig::default(), Category::Sport);
    let mut out = Vec::new();
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let app = Shell::new(app, Cursor::new(script.to_string().into_bytes()), &mut out, "$", today)
        .run()
        .unwrap();
    (app, String::from_utf8(out).unwrap())
}

/// Form answers for one bet: description, date, sport, league, type,
/// amount, odds, result, then back to the home menu.
fn add_bet(desc: &str, sport: &str, amount: &str, odds: &str, result: &str) -> String {
    format!("1\n{desc}\n2025-02-01\n{sport}\n\n\n{amount}\n{odds}\n{result}\nb\n")
}

#[test]
fn test_add_view_settle_analytics() {
    let mut script = String::new();
    script += &add_bet("Chiefs vs Ravens", "Football", "100", "+150", "Pending");
    script += &add_bet("Bruins vs Leafs", "Hockey", "50", "+200", "Pending");
    // view history, settle both, go back
    script += "2\nw 1\nl 2\nb\n";
    // analytics, back, quit
    script += "3\nb\nq\n";

    let (app, out) = session(&script);
    let bets = app.bets();
    assert_eq!(bets.len(), 2);
    assert_eq!(bets[0].result, BetResult::Won);
    assert_eq!(bets[1].result, BetResult::Lost);

    assert!(out.contains("Profit by Sport"));
    assert!(out.contains("Football: $150.00"));
    assert!(out.contains("Hockey: $-50.00"));
    assert!(out.contains("Won 1 | Lost 1 | Pending 0"));
}

#[test]
fn test_empty_screens() {
    let (_, out) = session("2\nb\n3\nb\nq\n");
    assert!(out.contains("No bets saved yet."));
    assert!(out.contains("No completed bets yet."));
}

#[test]
fn test_edit_from_list() {
    let mut script = add_bet("Original", "Tennis", "30", "-120", "Pending");
    // edit bet 1: new description, keep everything else, back to list, home, quit
    script += "2\ne 1\nRenamed\n\n\n\n\n\n\n\nb\nb\nq\n";

    let (app, out) = session(&script);
    let bets = app.bets();
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].match_description, "Renamed");
    assert_eq!(bets[0].sport, "Tennis");
    assert_eq!(bets[0].odds.to_string(), "-120");
    assert!(out.contains("Edit Bet"));
}

#[test]
fn test_delete_and_bad_index() {
    let mut script = add_bet("Doomed", "MMA", "10", "+100", "Pending");
    script += "2\nd 5\nd 1\nb\nq\n";
    let (app, out) = session(&script);
    assert!(app.bets().is_empty());
    assert!(out.contains("Pick a bet by its number"));
}

#[test]
fn test_regroup_analytics() {
    let mut script = add_bet("Game", "Baseball", "10", "+100", "Won");
    script += "3\ng league\nb\nq\n";
    let (_, out) = session(&script);
    assert!(out.contains("Baseball: $10.00"));
    assert!(out.contains("Profit by League"));
    assert!(out.contains("NFL: $10.00"));
}

#[test]
fn test_invalid_date_retry() {
    // Feb 30 is rejected by the validator; retry with a real date.
    let script = "1\nGame\n2024-02-30\n\n\n\n\n\n\nr\n\n2024-02-29\n\n\n\n\n\n\nb\nq\n";
    let (app, out) = session(script);
    assert!(out.contains("date is not a valid calendar date"));
    let bets = app.bets();
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[test]
fn test_json_dump() {
    let mut script = add_bet("Game", "Soccer", "12.5", "-105", "Lost");
    script += "2\nj\nb\nq\n";
    let (_, out) = session(&script);
    assert!(out.contains("\"match_description\": \"Game\""));
    assert!(out.contains("\"odds\": \"-105\""));
    assert!(out.contains("\"result\": \"Lost\""));
}

#[test]
fn test_view_history_after_save() {
    let script = "1\nCeltics vs Heat\n\n2\n\n\n25\n\n\nv\nw 1\nb\nq\n";
    let (app, out) = session(script);
    let bets = app.bets();
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].result, BetResult::Won);
    assert!(out.contains("a) add another  v) view history  b) back"));
    assert!(out[out.find("Bet saved.").unwrap()..].contains("Bet List"));
}

#[test]
fn test_add_another_keeps_order() {
    let script = "1\nFirst\n\n\n\n\n\n\n\na\nSecond\n\n\n\n\n\n\n\nb\nq\n";
    let (app, _) = session(script);
    let descs: Vec<_> = app.bets().into_iter().map(|b| b.match_description).collect();
    assert_eq!(descs, vec!["First", "Second"]);
}
