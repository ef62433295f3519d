use serde::Serialize;

use super::series::{TrendEngine, VitalsPoint, DEFAULT_WINDOW_DAYS};

const WEEKLY_SURPLUS_KCAL: f64 = 3500.0;
const HIGH_SYSTOLIC: f64 = 140.0;
const HIGH_DIASTOLIC: f64 = 90.0;
const HIGH_GLUCOSE: f64 = 140.0;
const LOW_ACTIVE_DAYS: usize = 3;
const CONSISTENT_ACTIVE_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Alert,
    Suggestion,
    Positive,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Insight {
    const fn new(kind: InsightKind, title: &'static str, description: &'static str) -> Self {
        Self {
            kind,
            title,
            description,
        }
    }
}

const CALORIE_SURPLUS: Insight = Insight::new(
    InsightKind::Warning,
    "Calorie Surplus",
    "You have consumed more calories than you burned this week. Consider increasing your activity level.",
);
const CALORIE_DEFICIT: Insight = Insight::new(
    InsightKind::Warning,
    "Calorie Deficit",
    "You have a significant calorie deficit this week. Ensure you are getting adequate nutrition.",
);
const ELEVATED_BP: Insight = Insight::new(
    InsightKind::Alert,
    "Elevated Blood Pressure",
    "Your blood pressure readings have been elevated. Consider consulting with a healthcare provider.",
);
const ELEVATED_GLUCOSE: Insight = Insight::new(
    InsightKind::Alert,
    "Elevated Glucose",
    "Your glucose readings have been elevated. Monitor your carbohydrate intake and consider consulting with a healthcare provider.",
);
const INCREASE_ACTIVITY: Insight = Insight::new(
    InsightKind::Suggestion,
    "Increase Activity",
    "You have been active on less than 3 days this week. Try to incorporate more physical activity into your routine.",
);
const CONSISTENT_ACTIVITY: Insight = Insight::new(
    InsightKind::Positive,
    "Consistent Activity",
    "Great job staying active on 5 or more days this week!",
);
const KEEP_LOGGING: Insight = Insight::new(
    InsightKind::Info,
    "Keep Logging",
    "Continue logging your meals, activities, and vitals to receive personalized insights.",
);

impl TrendEngine<'_> {
    /// Rule-based statements over the last week. Every rule is checked on
    /// its own, in a fixed order; the result is never empty.
    pub fn insights(&self) -> Vec<Insight> {
        let days = DEFAULT_WINDOW_DAYS;
        let balance = self.calorie_balance(days);
        let vitals = self.vitals(days);
        let activity = self.activity(days);

        let week_has_data = balance.iter().any(|d| d.intake > 0.0 || d.burned > 0.0)
            || activity.iter().any(|d| d.duration_minutes > 0)
            || vitals.iter().any(VitalsPoint::has_reading);
        if !week_has_data {
            return vec![KEEP_LOGGING];
        }

        let net: f64 = balance.iter().map(|d| d.net).sum();
        let high_bp = vitals.iter().any(|d| {
            d.systolic.is_some_and(|s| s > HIGH_SYSTOLIC)
                || d.diastolic.is_some_and(|v| v > HIGH_DIASTOLIC)
        });
        let high_glucose = vitals
            .iter()
            .any(|d| d.glucose.is_some_and(|g| g > HIGH_GLUCOSE));
        let active_days = activity.iter().filter(|d| d.duration_minutes > 0).count();

        let rules = [
            (net > WEEKLY_SURPLUS_KCAL, CALORIE_SURPLUS),
            (net < -WEEKLY_SURPLUS_KCAL, CALORIE_DEFICIT),
            (high_bp, ELEVATED_BP),
            (high_glucose, ELEVATED_GLUCOSE),
            (active_days < LOW_ACTIVE_DAYS, INCREASE_ACTIVITY),
            (active_days >= CONSISTENT_ACTIVE_DAYS, CONSISTENT_ACTIVITY),
        ];
        let insights: Vec<Insight> = rules
            .into_iter()
            .filter_map(|(fires, insight)| fires.then_some(insight))
            .collect();

        if insights.is_empty() {
            vec![KEEP_LOGGING]
        } else {
            insights
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::repo_types::{LogSnapshot, VitalLogEntry};
    use crate::trends::series::tests::{bp, meal, vitals, workout, TODAY};
    use time::UtcOffset;

    fn titles(logs: &LogSnapshot) -> Vec<&'static str> {
        TrendEngine::new(logs, TODAY, UtcOffset::UTC)
            .insights()
            .into_iter()
            .map(|i| i.title)
            .collect()
    }

    #[test]
    fn empty_history_keeps_logging() {
        let insights = TrendEngine::new(&LogSnapshot::default(), TODAY, UtcOffset::UTC).insights();
        assert_eq!(insights, vec![KEEP_LOGGING]);
    }

    #[test]
    fn surplus_and_low_activity() {
        let logs = LogSnapshot {
            meals: (0..7).map(|d| meal(d, 2600.0)).collect(),
            activities: vec![workout(1, 30, 300.0)],
            ..Default::default()
        };
        assert_eq!(titles(&logs), vec!["Calorie Surplus", "Increase Activity"]);
    }

    #[test]
    fn deficit_with_consistent_activity() {
        let logs = LogSnapshot {
            meals: vec![meal(0, 1000.0)],
            activities: (0..5).map(|d| workout(d, 60, 1000.0)).collect(),
            ..Default::default()
        };
        assert_eq!(titles(&logs), vec!["Calorie Deficit", "Consistent Activity"]);
    }

    #[test]
    fn vitals_alerts_fire_on_any_day() {
        let logs = LogSnapshot {
            vitals: vec![
                bp(2, 132.0, 92.0),
                VitalLogEntry {
                    glucose: Some(155.0),
                    ..vitals(5, 9)
                },
            ],
            activities: (0..3).map(|d| workout(d, 20, 100.0)).collect(),
            ..Default::default()
        };
        assert_eq!(
            titles(&logs),
            vec!["Elevated Blood Pressure", "Elevated Glucose"]
        );
    }

    #[test]
    fn readings_outside_the_week_are_ignored() {
        let logs = LogSnapshot {
            vitals: vec![bp(10, 180.0, 110.0)],
            activities: (0..4).map(|d| workout(d, 20, 100.0)).collect(),
            ..Default::default()
        };
        assert_eq!(titles(&logs), vec!["Keep Logging"]);
    }

    #[test]
    fn any_vitals_field_counts_as_logged() {
        let only = |entry: VitalLogEntry| LogSnapshot {
            vitals: vec![entry],
            ..Default::default()
        };
        let cases = [
            VitalLogEntry { triglycerides: Some(180.0), ..vitals(1, 8) },
            VitalLogEntry { ggt: Some(40.0), ..vitals(1, 8) },
            VitalLogEntry { waist_circumference: Some(92.0), ..vitals(1, 8) },
            VitalLogEntry { waist_to_hip_ratio: Some(0.9), ..vitals(1, 8) },
        ];
        for entry in cases {
            assert_eq!(titles(&only(entry)), vec!["Increase Activity"]);
        }
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(CALORIE_SURPLUS).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["title"], "Calorie Surplus");
    }
}
