// src/lib.rs

//! NSZU Archive Watcher Library
//!
//! Fetches the NSZU document archive page, extracts published items with
//! best-effort heuristics, filters out items already delivered using a
//! persistent fingerprint ledger, and forwards the rest to Telegram.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod utils;
