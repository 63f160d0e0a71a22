// src/models/mod.rs

//! Domain models for the watcher application.

mod item;

pub use item::{DATE_UNKNOWN, NewsItem};
