use serde::Serialize;

use super::series::TrendEngine;

pub const RISK_WINDOW_DAYS: u32 = 30;
const BASELINE_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Self::Low
        } else if score < 70.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// Presentation label read off the absolute score, not a delta over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl RiskTrend {
    fn from_score(score: f64) -> Self {
        if score > 60.0 {
            Self::Increasing
        } else if score < 40.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskTrajectory {
    pub score: f64,
    pub category: RiskCategory,
    pub trend: RiskTrend,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / f64::from(count))
}

impl TrendEngine<'_> {
    /// Heuristic 0-100 score from a month of blood pressure and activity.
    pub fn risk_trajectory(&self) -> RiskTrajectory {
        let vitals = self.vitals(RISK_WINDOW_DAYS);
        let activity = self.activity(RISK_WINDOW_DAYS);

        let systolic = mean(vitals.iter().filter_map(|d| d.systolic));
        let diastolic = mean(vitals.iter().filter_map(|d| d.diastolic));
        let total_minutes: u64 = activity.iter().map(|d| d.duration_minutes).sum();
        let avg_minutes = total_minutes as f64 / f64::from(RISK_WINDOW_DAYS);

        let mut score = BASELINE_SCORE;
        if let (Some(sys), Some(dia)) = (systolic, diastolic) {
            if sys > 140.0 || dia > 90.0 {
                score += 20.0;
            } else if sys < 120.0 && dia < 80.0 {
                score -= 10.0;
            }
        }
        if avg_minutes >= 30.0 {
            score -= 15.0;
        } else if avg_minutes < 15.0 {
            score += 10.0;
        }
        let score = score.clamp(0.0, 100.0);

        RiskTrajectory {
            score,
            category: RiskCategory::from_score(score),
            trend: RiskTrend::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::repo_types::LogSnapshot;
    use crate::trends::series::tests::{bp, workout, TODAY};
    use time::UtcOffset;

    fn risk(logs: &LogSnapshot) -> RiskTrajectory {
        TrendEngine::new(logs, TODAY, UtcOffset::UTC).risk_trajectory()
    }

    #[test]
    fn high_pressure_and_inactivity_is_high_risk() {
        let logs = LogSnapshot {
            vitals: (0..30).map(|d| bp(d, 150.0, 95.0)).collect(),
            activities: (0..30).map(|d| workout(d, 5, 40.0)).collect(),
            ..Default::default()
        };
        let r = risk(&logs);
        assert_eq!(r.score, 80.0);
        assert_eq!(r.category, RiskCategory::High);
        assert_eq!(r.trend, RiskTrend::Increasing);
    }

    #[test]
    fn normal_pressure_and_active_is_low_risk() {
        let logs = LogSnapshot {
            vitals: (0..30).map(|d| bp(d, 110.0, 70.0)).collect(),
            activities: (0..30).map(|d| workout(d, 45, 400.0)).collect(),
            ..Default::default()
        };
        let r = risk(&logs);
        assert_eq!(r.score, 25.0);
        assert_eq!(r.category, RiskCategory::Low);
        assert_eq!(r.trend, RiskTrend::Decreasing);
    }

    #[test]
    fn no_data_counts_only_inactivity() {
        let r = risk(&LogSnapshot::default());
        assert_eq!(r.score, 60.0);
        assert_eq!(r.category, RiskCategory::Moderate);
        assert_eq!(r.trend, RiskTrend::Stable);
    }

    #[test]
    fn sparse_readings_average_over_reported_days() {
        // two readings averaging 140/85 are neither high nor normal
        let logs = LogSnapshot {
            vitals: vec![bp(1, 150.0, 90.0), bp(20, 130.0, 80.0)],
            activities: (0..30).map(|d| workout(d, 20, 150.0)).collect(),
            ..Default::default()
        };
        let r = risk(&logs);
        assert_eq!(r.score, 50.0);
        assert_eq!(r.trend, RiskTrend::Stable);
    }

    #[test]
    fn high_pressure_alone_lands_on_high_boundary() {
        let logs = LogSnapshot {
            vitals: (0..30).map(|d| bp(d, 150.0, 95.0)).collect(),
            activities: (0..30).map(|d| workout(d, 20, 150.0)).collect(),
            ..Default::default()
        };
        let r = risk(&logs);
        assert_eq!(r.score, 70.0);
        assert_eq!(r.category, RiskCategory::High);
    }

    #[test]
    fn category_and_trend_boundaries() {
        assert_eq!(RiskCategory::from_score(29.9), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(30.0), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(69.9), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(70.0), RiskCategory::High);
        assert_eq!(RiskTrend::from_score(60.0), RiskTrend::Stable);
        assert_eq!(RiskTrend::from_score(40.0), RiskTrend::Stable);
    }

    #[test]
    fn oversized_activity_history_still_scores() {
        let logs = LogSnapshot {
            activities: vec![workout(0, u32::MAX, 0.0), workout(1, u32::MAX, 0.0)],
            ..Default::default()
        };
        let r = risk(&logs);
        assert_eq!(r.score, 35.0);
        assert_eq!(r.category, RiskCategory::Moderate);
    }
}
