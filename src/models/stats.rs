//! Counts shown on the deck list and the statistics screen.
use super::sm2::{self, DAY_MS};
use super::{Collection, ReviewRecord, card::INITIAL_EASE_FACTOR};
use chrono::{Local, TimeZone};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckStats {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub reviewed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverallStats {
    pub total_cards: usize,
    pub total_decks: usize,
    pub due_cards: usize,
    pub new_cards: usize,
    pub total_reviews: usize,
    pub avg_ease_factor: f64,
    pub reviews_today: usize,
    pub streak: u32,
}

pub fn deck_stats(collection: &Collection, deck_id: &str, now: i64) -> DeckStats {
    let cards = collection.cards_for_deck(deck_id);
    DeckStats {
        total: cards.len(),
        due: cards.iter().filter(|c| sm2::is_due(c, now)).count(),
        new: cards.iter().filter(|c| c.is_new()).count(),
        reviewed: cards.iter().filter(|c| !c.is_new()).count(),
    }
}

pub fn overall_stats(collection: &Collection, now: i64) -> OverallStats {
    let total_cards = collection.cards.len();
    let avg_ease_factor = if total_cards > 0 {
        collection.cards.iter().map(|c| c.ease_factor).sum::<f64>() / total_cards as f64
    } else {
        INITIAL_EASE_FACTOR
    };

    let today_start = local_midnight(now);
    let reviews_today = collection
        .review_history
        .iter()
        .filter(|r| r.timestamp >= today_start)
        .count();

    OverallStats {
        total_cards,
        total_decks: collection.decks.len(),
        due_cards: collection.due_cards(now, None).len(),
        new_cards: collection.new_cards(None).len(),
        total_reviews: collection.review_history.len(),
        avg_ease_factor,
        reviews_today,
        streak: streak(&collection.review_history, now),
    }
}

/// Consecutive review days ending today or yesterday. Days are UTC calendar
/// days.
pub fn streak(reviews: &[ReviewRecord], now: i64) -> u32 {
    let days: BTreeSet<i64> = reviews
        .iter()
        .map(|r| r.timestamp.div_euclid(DAY_MS))
        .collect();

    let today = now.div_euclid(DAY_MS);
    let mut days = days.into_iter().rev();
    let Some(mut last) = days.next() else {
        return 0;
    };
    if last < today - 1 {
        return 0;
    }

    let mut streak = 1;
    for day in days {
        if last - day != 1 {
            break;
        }
        streak += 1;
        last = day;
    }
    streak
}

/// Start of the local calendar day containing `now`, in epoch milliseconds.
fn local_midnight(now: i64) -> i64 {
    Local
        .timestamp_millis_opt(now)
        .single()
        .and_then(|t| t.date_naive().and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.timestamp_millis())
        .unwrap_or(now - now.rem_euclid(DAY_MS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quality;

    const NOW: i64 = 1_700_000_000_000;

    fn review_at(timestamp: i64) -> ReviewRecord {
        ReviewRecord {
            card_id: "c".to_string(),
            deck_id: "d".to_string(),
            timestamp,
            quality: 4,
            previous_interval: 0,
            new_interval: 1,
        }
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(streak(&[], NOW), 0);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let reviews = vec![
            review_at(NOW),
            review_at(NOW - 10),
            review_at(NOW - DAY_MS),
            review_at(NOW - 2 * DAY_MS),
            review_at(NOW - 4 * DAY_MS),
        ];
        assert_eq!(streak(&reviews, NOW), 3);
    }

    #[test]
    fn test_streak_survives_until_tomorrow() {
        let reviews = vec![review_at(NOW - DAY_MS), review_at(NOW - 2 * DAY_MS)];
        assert_eq!(streak(&reviews, NOW), 2);
    }

    #[test]
    fn test_streak_broken() {
        let reviews = vec![review_at(NOW - 2 * DAY_MS), review_at(NOW - 3 * DAY_MS)];
        assert_eq!(streak(&reviews, NOW), 0);
    }

    #[test]
    fn test_deck_stats() {
        let mut collection = Collection::default();
        let deck_id = collection.add_deck("Deck", "", 0).id.clone();
        let first = collection.add_card(&deck_id, "a", "b", 0).unwrap().id.clone();
        collection.add_card(&deck_id, "c", "d", 0).unwrap();
        collection.review_card(&first, Quality::Perfect, 10).unwrap();

        let stats = deck_stats(&collection, &deck_id, 10);
        assert_eq!(
            stats,
            DeckStats {
                total: 2,
                due: 1,
                new: 1,
                reviewed: 1,
            }
        );
        assert_eq!(deck_stats(&collection, "missing", 10), DeckStats::default());
    }

    #[test]
    fn test_overall_stats_empty() {
        let stats = overall_stats(&Collection::default(), NOW);
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.avg_ease_factor, 2.5);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_overall_stats() {
        let mut collection = Collection::default();
        let deck_id = collection.add_deck("Deck", "", 0).id.clone();
        let first = collection.add_card(&deck_id, "a", "b", 0).unwrap().id.clone();
        let second = collection.add_card(&deck_id, "c", "d", 0).unwrap().id.clone();
        collection
            .review_card(&first, Quality::CompleteBlackout, NOW - 3 * DAY_MS)
            .unwrap();
        collection.review_card(&second, Quality::Perfect, NOW).unwrap();

        let stats = overall_stats(&collection, NOW);
        assert_eq!(stats.total_cards, 2);
        assert_eq!(stats.total_decks, 1);
        assert_eq!(stats.due_cards, 1);
        assert_eq!(stats.new_cards, 0);
        assert_eq!(stats.total_reviews, 2);
        assert_eq!(stats.reviews_today, 1);
        assert_eq!(stats.streak, 1);
        assert!((stats.avg_ease_factor - (1.7 + 2.6) / 2.0).abs() < 1e-9);
    }
}
