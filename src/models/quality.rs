//! Self-rated recall quality, the single input of the SM-2 formula.
use std::fmt;

/// Six fixed recall levels, 0 (complete blackout) to 5 (perfect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    CompleteBlackout,
    IncorrectButRemembered,
    IncorrectButEasy,
    CorrectWithDifficulty,
    CorrectWithHesitation,
    Perfect,
}

impl Quality {
    pub const ALL: [Quality; 6] = [
        Quality::CompleteBlackout,
        Quality::IncorrectButRemembered,
        Quality::IncorrectButEasy,
        Quality::CorrectWithDifficulty,
        Quality::CorrectWithHesitation,
        Quality::Perfect,
    ];

    /// Maps any integer score onto a level, clamping to 0..=5.
    pub fn from_score(score: i32) -> Self {
        Self::ALL[score.clamp(0, 5) as usize]
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::CompleteBlackout => "Complete Blackout",
            Quality::IncorrectButRemembered => "Incorrect (Remembered)",
            Quality::IncorrectButEasy => "Incorrect (Seemed Easy)",
            Quality::CorrectWithDifficulty => "Correct (Difficult)",
            Quality::CorrectWithHesitation => "Correct (Hesitation)",
            Quality::Perfect => "Perfect",
        }
    }

    /// Recall counts as a success from 3 upwards.
    pub fn is_success(self) -> bool {
        self >= Quality::CorrectWithDifficulty
    }
}

impl From<Quality> for i32 {
    fn from(quality: Quality) -> Self {
        quality.value() as i32
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_ordered() {
        for (i, quality) in Quality::ALL.iter().enumerate() {
            assert_eq!(quality.value() as usize, i);
        }
    }

    #[test]
    fn test_from_score_clamps() {
        assert_eq!(Quality::from_score(-4), Quality::CompleteBlackout);
        assert_eq!(Quality::from_score(3), Quality::CorrectWithDifficulty);
        assert_eq!(Quality::from_score(42), Quality::Perfect);
    }

    #[test]
    fn test_success_boundary() {
        assert!(!Quality::IncorrectButEasy.is_success());
        assert!(Quality::CorrectWithDifficulty.is_success());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Quality::CompleteBlackout.to_string(), "Complete Blackout");
        assert_eq!(Quality::Perfect.label(), "Perfect");
    }
}
