//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an ease factor (EF) that adjusts based on performance
//! - Quality grades 0-2: interval goes back to 1 day and repetitions to 0
//! - Quality grades 3-5: interval grows 1 day → 6 days → previous interval × EF
//! - EF is adjusted after every review, failed or not, and never drops below 1.3
//!
//! Besides the formula this module selects due and new cards and interleaves
//! them into a study queue. Everything here is pure: the current time is
//! always passed in by the caller as epoch milliseconds.

use super::Card;

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Due cards emitted before each new card when building a session queue.
pub const DUE_PER_NEW: usize = 3;

/// Scheduling fields the formula reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
}

/// Scheduling fields after a review.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewOutcome {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: i64,
}

/// Calculates new scheduling state according to the SM-2 algorithm.
///
/// `quality` is clamped to 0-5 (0 = complete blackout, 5 = perfect response).
/// Both the interval growth and the new ease factor use the ease factor the
/// card had before this review. Intervals are rounded half away from zero.
pub fn compute_review(state: &SchedulingState, quality: i32, now: i64) -> ReviewOutcome {
    let q = quality.clamp(0, 5);

    let (interval, repetitions) = if q < 3 {
        (1, 0)
    } else {
        let interval = match state.repetitions {
            0 => 1,
            1 => 6,
            _ => (state.interval as f64 * state.ease_factor).round() as u32,
        };
        (interval, state.repetitions + 1)
    };

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let miss = (5 - q) as f64;
    let ease_factor =
        (state.ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR);

    ReviewOutcome {
        ease_factor,
        interval,
        repetitions,
        next_review_date: now + interval as i64 * DAY_MS,
    }
}

pub fn is_due(card: &Card, now: i64) -> bool {
    now >= card.next_review_date
}

fn in_deck(card: &Card, deck_filter: Option<&str>) -> bool {
    deck_filter.is_none_or(|deck_id| card.deck_id == deck_id)
}

/// Cards due at `now`, earliest scheduled first.
///
/// The sort is stable, so cards scheduled for the same instant keep their
/// collection order.
pub fn select_due<'a>(cards: &'a [Card], now: i64, deck_filter: Option<&str>) -> Vec<&'a Card> {
    let mut due: Vec<&Card> = cards
        .iter()
        .filter(|card| in_deck(card, deck_filter) && is_due(card, now))
        .collect();
    due.sort_by_key(|card| card.next_review_date);
    due
}

/// Never-reviewed cards, oldest first.
pub fn select_new<'a>(cards: &'a [Card], deck_filter: Option<&str>) -> Vec<&'a Card> {
    let mut new: Vec<&Card> = cards
        .iter()
        .filter(|card| in_deck(card, deck_filter) && card.is_new())
        .collect();
    new.sort_by_key(|card| card.created_at);
    new
}

/// Interleaves `DUE_PER_NEW` due items with one new item until both lists
/// run out. Whatever is left in the longer list is appended in order.
pub fn build_session_queue<T: Clone>(due: &[T], new: &[T]) -> Vec<T> {
    let mut queue = Vec::with_capacity(due.len() + new.len());
    let mut due_iter = due.iter();
    let mut new_iter = new.iter();

    loop {
        let before = queue.len();
        queue.extend(due_iter.by_ref().take(DUE_PER_NEW).cloned());
        queue.extend(new_iter.next().cloned());
        if queue.len() == before {
            break;
        }
    }

    queue
}
