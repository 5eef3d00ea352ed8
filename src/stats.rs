//! Final-score statistics and the four-band score breakdown.
//!
//! Both are derived in a single pass over the raw numeric score list
//! produced by the student-row scan. Every aggregate has an explicit
//! zero-value result for empty input, so the derivation is total.

use serde::{Deserialize, Serialize};

use crate::analyzers::utility::{max_of, mean, min_of};

/// Threshold a score must reach to count as a pass.
pub const PASSING_SCORE: f64 = 10.0;

/// Summary statistics over the scanned students' first-exam scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalScoreStats {
    pub student_count: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub average_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub pass_percentage: f64,
    pub fail_percentage: f64,
}

impl FinalScoreStats {
    /// Derives the summary from the raw numeric score list.
    ///
    /// `student_count` is the number of scanned student rows, which can
    /// exceed `scores.len()` when some score cells did not parse. The
    /// fail count is `student_count - pass_count`, so students without a
    /// parseable score land on the fail side of the split.
    pub fn from_scores(scores: &[f64], student_count: usize) -> Self {
        let pass_count = scores.iter().filter(|s| **s >= PASSING_SCORE).count();
        let fail_count = student_count - pass_count;

        FinalScoreStats {
            student_count,
            pass_count,
            fail_count,
            average_score: mean(scores),
            max_score: max_of(scores),
            min_score: min_of(scores),
            pass_percentage: pct(pass_count, student_count),
            fail_percentage: pct(fail_count, student_count),
        }
    }
}

/// Percentage of `part` in `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Counts of scores falling into the four reporting bands.
///
/// The bands are `(0,5)`, `[5,10)`, `[10,15)` and `[15,20]`, checked in
/// that order with first match winning. A score of exactly 0 matches no
/// band, so the bucketed total can be less than the score count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub range_0_to_5: usize,
    pub range_5_to_10: usize,
    pub range_10_to_15: usize,
    pub range_15_to_20: usize,
}

impl ScoreBreakdown {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut breakdown = ScoreBreakdown::default();

        for &score in scores {
            if score > 0.0 && score < 5.0 {
                breakdown.range_0_to_5 += 1;
            } else if score >= 5.0 && score < 10.0 {
                breakdown.range_5_to_10 += 1;
            } else if score >= 10.0 && score < 15.0 {
                breakdown.range_10_to_15 += 1;
            } else if score >= 15.0 && score <= 20.0 {
                breakdown.range_15_to_20 += 1;
            }
        }

        breakdown
    }

    /// Total number of scores that landed in any band.
    pub fn total_bucketed(&self) -> usize {
        self.range_0_to_5 + self.range_5_to_10 + self.range_10_to_15 + self.range_15_to_20
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(50, 100), 50.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_empty_scores_all_zero() {
        let stats = FinalScoreStats::from_scores(&[], 0);

        assert_eq!(stats.student_count, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.max_score, 0.0);
        assert_eq!(stats.min_score, 0.0);
        assert_eq!(stats.pass_percentage, 0.0);
        assert_eq!(stats.fail_percentage, 0.0);
    }

    #[test]
    fn test_pass_fail_split() {
        let scores = [12.0, 9.5, 10.0, 4.0, 18.0];
        let stats = FinalScoreStats::from_scores(&scores, 5);

        assert_eq!(stats.pass_count, 3);
        assert_eq!(stats.fail_count, 2);
        assert_eq!(stats.pass_percentage, 60.0);
        assert_eq!(stats.fail_percentage, 40.0);
        assert_eq!(stats.max_score, 18.0);
        assert_eq!(stats.min_score, 4.0);
    }

    #[test]
    fn test_pass_fail_conservation() {
        // pass + fail always equals the student count, whatever the scores
        let cases: [(&[f64], usize); 4] = [
            (&[], 0),
            (&[10.0, 10.0], 2),
            (&[0.0, 20.0, 9.99], 3),
            (&[15.0], 4),
        ];

        for (scores, count) in cases {
            let stats = FinalScoreStats::from_scores(scores, count);
            assert_eq!(stats.pass_count + stats.fail_count, stats.student_count);
        }
    }

    #[test]
    fn unparsable_scores_land_on_the_fail_side() {
        // Five students scanned, only three parseable scores. The two
        // students without a numeric score are counted as failing even
        // though they contribute nothing to average/min/max. Intentional:
        // the fail count is derived from the student count, not from a
        // count of scores below the threshold.
        let scores = [12.0, 15.0, 8.0];
        let stats = FinalScoreStats::from_scores(&scores, 5);

        assert_eq!(stats.pass_count, 2);
        assert_eq!(stats.fail_count, 3);
        assert_eq!(stats.average_score, (12.0 + 15.0 + 8.0) / 3.0);
    }

    #[test]
    fn test_breakdown_boundaries_exact() {
        let scores = [0.0, 4.999, 5.0, 9.999, 10.0, 14.999, 15.0, 20.0];
        let breakdown = ScoreBreakdown::from_scores(&scores);

        assert_eq!(breakdown.range_0_to_5, 1); // 4.999 only; 0 matches no band
        assert_eq!(breakdown.range_5_to_10, 2); // 5 and 9.999
        assert_eq!(breakdown.range_10_to_15, 2); // 10 and 14.999
        assert_eq!(breakdown.range_15_to_20, 2); // 15 and 20
        assert_eq!(breakdown.total_bucketed(), 7);
    }

    #[test]
    fn test_breakdown_zero_matches_no_band() {
        let breakdown = ScoreBreakdown::from_scores(&[0.0]);
        assert_eq!(breakdown.total_bucketed(), 0);
    }

    #[test]
    fn test_breakdown_empty() {
        let breakdown = ScoreBreakdown::from_scores(&[]);
        assert_eq!(breakdown, ScoreBreakdown::default());
    }
}
