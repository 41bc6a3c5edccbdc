//! One entry of the append-only review log
use super::Quality;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub card_id: String,
    pub deck_id: String,
    pub timestamp: i64,
    /// Out-of-range or fractional values in imported logs are rounded and
    /// clamped to 0-5.
    #[serde(deserialize_with = "clamped_quality")]
    pub quality: u8,
    pub previous_interval: u32,
    pub new_interval: u32,
}

fn clamped_quality<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let score = f64::deserialize(deserializer)?;
    Ok(Quality::from_score(score.round() as i32).value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_quality(quality: &str) -> ReviewRecord {
        let json = format!(
            r#"{{"cardId":"c1","deckId":"d1","timestamp":1,"quality":{quality},"previousInterval":0,"newInterval":1}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_quality_in_range_is_kept() {
        assert_eq!(record_with_quality("3").quality, 3);
    }

    #[test]
    fn test_quality_out_of_range_is_clamped() {
        assert_eq!(record_with_quality("9").quality, 5);
        assert_eq!(record_with_quality("1000").quality, 5);
        assert_eq!(record_with_quality("-2").quality, 0);
        assert_eq!(record_with_quality("3.6").quality, 4);
    }

    #[test]
    fn test_non_numeric_quality_is_rejected() {
        let json = r#"{"cardId":"c1","deckId":"d1","timestamp":1,"quality":"good","previousInterval":0,"newInterval":1}"#;
        assert!(serde_json::from_str::<ReviewRecord>(json).is_err());
    }
}
