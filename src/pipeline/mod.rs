// src/pipeline/mod.rs

//! Pipeline entry point for one watch run.
//!
//! `run_watch`: fetch the archive page, extract items, filter against the
//! ledger, deliver the new ones, and record what was sent.

mod run;

pub use run::{RunReport, run_watch};
