//! Application settings. Defaults can be overridden through environment
//! variables so a second profile or a test database needs no rebuild.
use log::warn;
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub window_title: &'static str,
    pub window_width: f32,
    pub window_height: f32,
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Flashcards App",
            window_width: 560.0,
            window_height: 760.0,
            database_path: PathBuf::from("flashcards.sqlite3"),
        }
    }
}

impl Config {
    /// Defaults, overridden by `FLASHCARDS_DB`, `FLASHCARDS_WINDOW_WIDTH` and
    /// `FLASHCARDS_WINDOW_HEIGHT` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("FLASHCARDS_DB") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(width) = parse_size(&lookup, "FLASHCARDS_WINDOW_WIDTH") {
            config.window_width = width;
        }
        if let Some(height) = parse_size(&lookup, "FLASHCARDS_WINDOW_HEIGHT") {
            config.window_height = height;
        }

        config
    }
}

fn parse_size(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f32> {
    let raw = lookup(key)?;
    match raw.parse::<f32>() {
        Ok(size) if size > 0.0 => Some(size),
        _ => {
            warn!("Ignoring {}={:?}: expected a positive number", key, raw);
            None
        }
    }
}
