use serde::Serialize;

use super::{risk::RISK_WINDOW_DAYS, series::TrendEngine};

const MIN_PAIRED_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub title: &'static str,
    pub description: &'static str,
    pub strength: CorrelationStrength,
}

const INSUFFICIENT_DATA: Correlation = Correlation {
    title: "Insufficient Data",
    description: "Continue logging your health data to discover meaningful correlations.",
    strength: CorrelationStrength::Unknown,
};

/// Substitutes the "Insufficient Data" statement for an empty list.
pub fn with_default(correlations: Vec<Correlation>) -> Vec<Correlation> {
    if correlations.is_empty() {
        vec![INSUFFICIENT_DATA]
    } else {
        correlations
    }
}

/// Share of day pairs where more activity goes with lower systolic pressure.
fn concordance(pairs: &[(u64, f64)]) -> f64 {
    let mut matching = 0usize;
    let mut total = 0usize;
    for (i, &(minutes_a, systolic_a)) in pairs.iter().enumerate() {
        for &(minutes_b, systolic_b) in &pairs[i + 1..] {
            total += 1;
            if (minutes_a > minutes_b && systolic_a < systolic_b)
                || (minutes_a < minutes_b && systolic_a > systolic_b)
            {
                matching += 1;
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64
    }
}

impl TrendEngine<'_> {
    /// Activity vs. blood pressure over the last month. Empty when there are
    /// fewer than five days with both a systolic reading and some activity.
    pub fn correlations(&self) -> Vec<Correlation> {
        let vitals = self.vitals(RISK_WINDOW_DAYS);
        let activity = self.activity(RISK_WINDOW_DAYS);

        let pairs: Vec<(u64, f64)> = vitals
            .iter()
            .zip(&activity)
            .filter(|(_, a)| a.duration_minutes > 0)
            .filter_map(|(v, a)| v.systolic.map(|s| (a.duration_minutes, s)))
            .collect();
        if pairs.len() < MIN_PAIRED_DAYS {
            return Vec::new();
        }

        let strength = concordance(&pairs);
        if strength > 0.6 {
            vec![Correlation {
                title: "Activity and Blood Pressure",
                description: "Your data suggests that increased physical activity is associated with lower blood pressure readings.",
                strength: CorrelationStrength::Strong,
            }]
        } else if strength > 0.4 {
            vec![Correlation {
                title: "Activity and Blood Pressure",
                description: "Your data suggests a moderate association between physical activity and blood pressure.",
                strength: CorrelationStrength::Moderate,
            }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::repo_types::LogSnapshot;
    use crate::trends::series::tests::{bp, workout, TODAY};
    use time::UtcOffset;

    fn engine_result(days: &[(u32, f64)]) -> Vec<Correlation> {
        let logs = LogSnapshot {
            vitals: days
                .iter()
                .enumerate()
                .map(|(d, &(_, s))| bp(d as i64, s, 80.0))
                .collect(),
            activities: days
                .iter()
                .enumerate()
                .map(|(d, &(m, _))| workout(d as i64, m, 100.0))
                .collect(),
            ..Default::default()
        };
        TrendEngine::new(&logs, TODAY, UtcOffset::UTC).correlations()
    }

    #[test]
    fn fewer_than_five_pairs_is_empty() {
        let result = engine_result(&[(10, 130.0), (20, 125.0), (30, 120.0), (40, 115.0)]);
        assert!(result.is_empty());
        assert_eq!(with_default(result), vec![INSUFFICIENT_DATA]);
    }

    #[test]
    fn monotonic_inverse_relation_is_strong() {
        let result = engine_result(&[
            (10, 140.0),
            (20, 135.0),
            (30, 130.0),
            (40, 125.0),
            (50, 120.0),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].strength, CorrelationStrength::Strong);
    }

    #[test]
    fn positive_relation_yields_nothing() {
        let result = engine_result(&[
            (10, 110.0),
            (20, 115.0),
            (30, 120.0),
            (40, 125.0),
            (50, 130.0),
        ]);
        assert!(result.is_empty());
    }

    #[test]
    fn concordance_counts_unordered_pairs() {
        // 6 of 10 pairs concordant
        let pairs = [
            (10, 140.0),
            (20, 130.0),
            (30, 135.0),
            (40, 120.0),
            (50, 138.0),
        ];
        assert!((concordance(&pairs) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn strength_of_exactly_point_six_is_moderate() {
        let result = engine_result(&[
            (10, 140.0),
            (20, 130.0),
            (30, 135.0),
            (40, 120.0),
            (50, 138.0),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].strength, CorrelationStrength::Moderate);
    }

    #[test]
    fn half_concordant_pairs_are_moderate() {
        // 5 of 10 pairs concordant
        let result = engine_result(&[
            (10, 140.0),
            (20, 130.0),
            (30, 135.0),
            (40, 120.0),
            (50, 145.0),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].strength, CorrelationStrength::Moderate);
    }

    #[test]
    fn inactive_days_are_not_paired() {
        let result = engine_result(&[
            (0, 140.0),
            (0, 135.0),
            (30, 130.0),
            (40, 125.0),
            (50, 120.0),
        ]);
        assert!(result.is_empty());
    }

    #[test]
    fn non_empty_list_is_kept() {
        let strong = Correlation {
            title: "Activity and Blood Pressure",
            description: "",
            strength: CorrelationStrength::Strong,
        };
        assert_eq!(with_default(vec![strong.clone()]), vec![strong]);
    }
}
