//! Final score aggregation and qualitative tiers.

/// Qualitative bucket for a final percentage. The presentation layer maps
/// tiers to study-tip text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    NeedsReview,
}

impl Tier {
    /// Bucket a percentage using the fixed thresholds 90 / 75 / 50.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Tier::Excellent
        } else if percentage >= 75.0 {
            Tier::Good
        } else if percentage >= 50.0 {
            Tier::Fair
        } else {
            Tier::NeedsReview
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Fair => "fair",
            Tier::NeedsReview => "needs review",
        }
    }
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub correct: usize,
    /// Denominator for the percentage. Unattempted trailing questions still
    /// count here, so skipping questions cannot inflate the score.
    pub attempted_for_scoring: usize,
    pub percentage: f64,
    pub tier: Tier,
}

impl Summary {
    pub(crate) fn new(correct: usize, attempted: usize, total_questions: usize) -> Self {
        let attempted_for_scoring = attempted.max(total_questions);
        let percentage = if attempted_for_scoring == 0 {
            0.0
        } else {
            correct as f64 * 100.0 / attempted_for_scoring as f64
        };

        Summary {
            correct,
            attempted_for_scoring,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_percentage(100.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(90.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(89.9), Tier::Good);
        assert_eq!(Tier::from_percentage(75.0), Tier::Good);
        assert_eq!(Tier::from_percentage(74.9), Tier::Fair);
        assert_eq!(Tier::from_percentage(50.0), Tier::Fair);
        assert_eq!(Tier::from_percentage(49.9), Tier::NeedsReview);
        assert_eq!(Tier::from_percentage(0.0), Tier::NeedsReview);
    }

    #[test]
    fn test_summary_three_of_five() {
        let summary = Summary::new(3, 5, 5);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.attempted_for_scoring, 5);
        assert_eq!(summary.percentage, 60.0);
        assert_eq!(summary.tier, Tier::Fair);
    }

    #[test]
    fn test_summary_counts_skipped_questions() {
        // Only 2 attempted out of 10: the denominator stays 10.
        let summary = Summary::new(2, 2, 10);
        assert_eq!(summary.attempted_for_scoring, 10);
        assert_eq!(summary.percentage, 20.0);
        assert_eq!(summary.tier, Tier::NeedsReview);
    }

    #[test]
    fn test_summary_empty_session() {
        let summary = Summary::new(0, 0, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.tier, Tier::NeedsReview);
    }

    #[test]
    fn test_summary_percentage_bounds() {
        for correct in 0..=10 {
            let summary = Summary::new(correct, 10, 10);
            assert!(summary.percentage >= 0.0);
            assert!(summary.percentage <= 100.0);
        }
    }
}
