//! Container for all decks, cards and the review log.
//!
//! This is the state the application owns and persists. Every mutation goes
//! through a method here; scheduling fields of a card only change in
//! [`Collection::review_card`].

use super::sm2::{self, compute_review};
use super::{Card, Deck, Quality, ReviewRecord};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub decks: Vec<Deck>,
    pub cards: Vec<Card>,
    pub review_history: Vec<ReviewRecord>,
}

impl Collection {
    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn add_deck(&mut self, name: &str, description: &str, now: i64) -> &Deck {
        let deck = Deck::new(name, description, now);
        debug!("Adding deck '{}' ({})", deck.name, deck.id);
        self.decks.push(deck);
        &self.decks[self.decks.len() - 1]
    }

    /// Renames and/or re-describes a deck; `None` leaves a field as it is.
    pub fn update_deck(
        &mut self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        now: i64,
    ) -> Result<()> {
        let deck = self
            .decks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::DeckNotFound(id.to_string()))?;

        if let Some(name) = name {
            deck.name = name.to_string();
        }
        if let Some(description) = description {
            deck.description = description.to_string();
        }
        deck.updated_at = now;
        Ok(())
    }

    /// Removes a deck together with its cards and their review records.
    pub fn delete_deck(&mut self, id: &str) -> Result<()> {
        if self.deck(id).is_none() {
            return Err(Error::DeckNotFound(id.to_string()));
        }

        self.decks.retain(|d| d.id != id);
        self.cards.retain(|c| c.deck_id != id);
        self.review_history.retain(|r| r.deck_id != id);
        debug!("Deleted deck {}", id);
        Ok(())
    }

    pub fn add_card(&mut self, deck_id: &str, front: &str, back: &str, now: i64) -> Result<&Card> {
        if self.deck(deck_id).is_none() {
            return Err(Error::DeckNotFound(deck_id.to_string()));
        }

        self.cards.push(Card::new(deck_id, front, back, now));
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Edits card content. Scheduling state is left untouched.
    pub fn update_card(
        &mut self,
        id: &str,
        front: Option<&str>,
        back: Option<&str>,
        now: i64,
    ) -> Result<()> {
        let card = self.card_mut(id)?;

        if let Some(front) = front {
            card.front = front.to_string();
        }
        if let Some(back) = back {
            card.back = back.to_string();
        }
        card.updated_at = now;
        Ok(())
    }

    /// Removes a card and its review records.
    pub fn delete_card(&mut self, id: &str) -> Result<()> {
        if self.card(id).is_none() {
            return Err(Error::CardNotFound(id.to_string()));
        }

        self.cards.retain(|c| c.id != id);
        self.review_history.retain(|r| r.card_id != id);
        Ok(())
    }

    /// Applies one review to a card and appends it to the review log.
    pub fn review_card(&mut self, card_id: &str, quality: Quality, now: i64) -> Result<ReviewRecord> {
        let card = self.card_mut(card_id)?;

        let previous_interval = card.interval;
        let outcome = compute_review(&card.scheduling_state(), quality.into(), now);
        card.apply_review(&outcome, now);

        let record = ReviewRecord {
            card_id: card.id.clone(),
            deck_id: card.deck_id.clone(),
            timestamp: now,
            quality: quality.value(),
            previous_interval,
            new_interval: outcome.interval,
        };
        debug!(
            "Reviewed card {} with quality {}: interval {} -> {}, ease {:.2}",
            record.card_id, record.quality, previous_interval, outcome.interval, outcome.ease_factor
        );

        self.review_history.push(record.clone());
        Ok(record)
    }

    pub fn cards_for_deck(&self, deck_id: &str) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.deck_id == deck_id).collect()
    }

    pub fn due_cards(&self, now: i64, deck_id: Option<&str>) -> Vec<&Card> {
        sm2::select_due(&self.cards, now, deck_id)
    }

    pub fn new_cards(&self, deck_id: Option<&str>) -> Vec<&Card> {
        sm2::select_new(&self.cards, deck_id)
    }

    pub fn review_history_for_deck(&self, deck_id: &str) -> Vec<&ReviewRecord> {
        self.review_history
            .iter()
            .filter(|r| r.deck_id == deck_id)
            .collect()
    }

    fn card_mut(&mut self, id: &str) -> Result<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::CardNotFound(id.to_string()))
    }
}
