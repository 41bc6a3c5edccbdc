//! Card is a pair <front, back> plus its SM-2 scheduling state
use super::sm2::{ReviewOutcome, SchedulingState};
use serde::{Deserialize, Serialize};

pub const INITIAL_EASE_FACTOR: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: i64,
    /// `None` until the first review; marks the card as new.
    pub last_review_date: Option<i64>,
}

impl Card {
    /// Creates a card that is reviewable immediately.
    pub fn new(deck_id: &str, front: &str, back: &str, now: i64) -> Self {
        Self {
            id: super::new_id(),
            deck_id: deck_id.to_string(),
            front: front.to_string(),
            back: back.to_string(),
            created_at: now,
            updated_at: now,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review_date: now,
            last_review_date: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.last_review_date.is_none()
    }

    pub fn scheduling_state(&self) -> SchedulingState {
        SchedulingState {
            ease_factor: self.ease_factor,
            interval: self.interval,
            repetitions: self.repetitions,
        }
    }

    /// Writes a review result back. The four scheduling fields change together
    /// and `last_review_date` is stamped with the review time.
    pub(crate) fn apply_review(&mut self, outcome: &ReviewOutcome, now: i64) {
        self.ease_factor = outcome.ease_factor;
        self.interval = outcome.interval;
        self.repetitions = outcome.repetitions;
        self.next_review_date = outcome.next_review_date;
        self.last_review_date = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("deck-1", "cześć", "hello", 1_000);

        assert_eq!(card.deck_id, "deck-1");
        assert_eq!(card.front, "cześć");
        assert_eq!(card.back, "hello");
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.interval, 0);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.next_review_date, 1_000);
        assert!(card.is_new());
    }

    #[test]
    fn test_card_ids_are_unique() {
        let card1 = Card::new("deck-1", "a", "b", 0);
        let card2 = Card::new("deck-1", "a", "b", 0);
        assert_ne!(card1.id, card2.id);
    }

    #[test]
    fn test_apply_review_stamps_last_review() {
        let mut card = Card::new("deck-1", "a", "b", 0);
        let outcome = ReviewOutcome {
            ease_factor: 2.6,
            interval: 1,
            repetitions: 1,
            next_review_date: 86_400_000 + 500,
        };

        card.apply_review(&outcome, 500);

        assert_eq!(card.scheduling_state().ease_factor, 2.6);
        assert_eq!(card.interval, 1);
        assert_eq!(card.repetitions, 1);
        assert_eq!(card.next_review_date, 86_400_500);
        assert_eq!(card.last_review_date, Some(500));
        assert!(!card.is_new());
    }

    #[test]
    fn test_serializes_camel_case_with_null_last_review() {
        let card = Card::new("deck-1", "a", "b", 7);
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["deckId"], "deck-1");
        assert_eq!(json["easeFactor"], 2.5);
        assert_eq!(json["nextReviewDate"], 7);
        assert!(json["lastReviewDate"].is_null());
    }
}
