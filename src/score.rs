//! Session score counter.
//!
//! [`ScoreTracker`] is plain data: it knows nothing about text nodes or fonts.
//! The HUD keeps its label in sync by listening for
//! [`crate::encounter::EncounterEvent::ScoreChanged`].

/// Render a score the way every label in the game shows it.
pub fn format_score(score: u64) -> String {
    format!("Score: {score}")
}

/// Holds the current score and its cached display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    label: String,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            score: 0,
            label: format_score(0),
        }
    }
}

impl ScoreTracker {
    /// Increase the score by `points` and refresh the display string.
    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
        self.label = format_score(self.score);
    }

    #[inline]
    pub fn current_score(&self) -> u64 {
        self.score
    }

    /// The cached `"Score: N"` string.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let score = ScoreTracker::default();
        assert_eq!(score.current_score(), 0);
        assert_eq!(score.label(), "Score: 0");
    }

    #[test]
    fn score_is_the_sum_of_all_additions() {
        let mut score = ScoreTracker::default();
        let points = [10, 10, 0, 25, 7, 10];
        for p in points {
            score.add(p);
        }
        assert_eq!(score.current_score(), points.iter().map(|&p| u64::from(p)).sum());
        assert_eq!(score.label(), "Score: 62");
    }

    #[test]
    fn add_saturates_instead_of_wrapping() {
        let mut score = ScoreTracker {
            score: u64::MAX - 1,
            label: String::new(),
        };
        score.add(10);
        assert_eq!(score.current_score(), u64::MAX);
    }
}
