pub mod db;

pub use db::{Repository, SqliteRepository, load_or_default};
