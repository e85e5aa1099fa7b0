//! Sports Bet Tracker
//!
//! Library crate exposing the bet model, validation, analytics, store and
//! terminal front end for use by integration tests and the binary.

pub mod config;
pub mod types;
pub mod validation;
pub mod analytics;
pub mod store;
pub mod app;
pub mod render;
pub mod shell;
