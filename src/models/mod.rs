pub mod card;
pub mod collection;
pub mod deck;
pub mod quality;
pub mod review_record;
pub mod sm2;
pub mod stats;
pub mod study_session;

pub use card::Card;
pub use collection::Collection;
pub use deck::Deck;
pub use quality::Quality;
pub use review_record::ReviewRecord;
pub use study_session::StudySession;

/// Fresh identifier for a deck or card.
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
