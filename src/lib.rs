pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{Error, Result};
pub use models::{Card, Collection, Deck, Quality, ReviewRecord, StudySession};

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
