//! Study session management for spaced repetition practice.
//! Walks one queue of due and new cards, grading each with SM-2.

use super::sm2::build_session_queue;
use super::{Card, Collection, Quality, ReviewRecord};
use crate::error::Result;

/// One sitting over the cards that are due or new at the time it starts.
///
/// Cards are referenced by id; the collection stays the single owner of card
/// state and is passed in whenever a card is graded.
pub struct StudySession {
    pub deck_id: Option<String>,
    queue: Vec<String>,
    current_index: usize,
    pub show_answer: bool,
}

impl StudySession {
    /// Builds the queue for `deck_id` (or every deck): due cards that have
    /// been reviewed before, interleaved with new cards.
    ///
    /// New cards are due from the moment they are created, so they are taken
    /// out of the due list to keep each card in the queue once.
    pub fn new(collection: &Collection, deck_id: Option<&str>, now: i64) -> Self {
        let due: Vec<String> = collection
            .due_cards(now, deck_id)
            .into_iter()
            .filter(|c| !c.is_new())
            .map(|c| c.id.clone())
            .collect();
        let new: Vec<String> = collection
            .new_cards(deck_id)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();

        Self {
            deck_id: deck_id.map(str::to_string),
            queue: build_session_queue(&due, &new),
            current_index: 0,
            show_answer: false,
        }
    }

    /// Drops queued cards that have been deleted from the collection since the
    /// session started. Cards already graded are kept for the counts.
    pub fn retain_existing(&mut self, collection: &Collection) {
        let pending = self.queue.split_off(self.current_index);
        self.queue
            .extend(pending.into_iter().filter(|id| collection.card(id).is_some()));
    }

    pub fn current_card<'a>(&self, collection: &'a Collection) -> Option<&'a Card> {
        self.queue
            .get(self.current_index)
            .and_then(|id| collection.card(id))
    }

    pub fn reveal_answer(&mut self) {
        self.show_answer = true;
    }

    /// Grades the current card and moves to the next one.
    ///
    /// Returns `Ok(None)` when the session is already complete.
    pub fn grade(
        &mut self,
        collection: &mut Collection,
        quality: Quality,
        now: i64,
    ) -> Result<Option<ReviewRecord>> {
        self.retain_existing(collection);
        let Some(card_id) = self.queue.get(self.current_index) else {
            return Ok(None);
        };

        let record = collection.review_card(card_id, quality, now)?;
        self.current_index += 1;
        self.show_answer = false;
        Ok(Some(record))
    }

    pub fn reviewed_count(&self) -> usize {
        self.current_index
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.reviewed_count()
    }

    /// Fraction of the queue already graded; an empty session counts as done.
    pub fn progress(&self) -> f32 {
        if self.queue.is_empty() {
            1.0
        } else {
            self.current_index as f32 / self.queue.len() as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.queue.len()
    }
}
