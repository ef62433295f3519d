use serde::Serialize;
use time::{Date, UtcOffset};

use super::buckets::{group_by_date, trailing_dates};
use crate::logs::repo_types::{LogSnapshot, VitalLogEntry};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const MAX_WINDOW_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieIntakePoint {
    pub date: Date,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPoint {
    pub date: Date,
    pub calories_burned: f64,
    pub duration_minutes: u64,
}

/// Latest reading of each field on that day, `None` when nothing was logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsPoint {
    pub date: Date,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub glucose: Option<f64>,
    pub weight: Option<f64>,
    pub triglycerides: Option<f64>,
    pub ggt: Option<f64>,
    pub waist_circumference: Option<f64>,
    pub waist_to_hip_ratio: Option<f64>,
}

impl VitalsPoint {
    pub fn has_reading(&self) -> bool {
        [
            self.systolic,
            self.diastolic,
            self.glucose,
            self.weight,
            self.triglycerides,
            self.ggt,
            self.waist_circumference,
            self.waist_to_hip_ratio,
        ]
        .iter()
        .any(Option::is_some)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieBalancePoint {
    pub date: Date,
    pub intake: f64,
    pub burned: f64,
    pub net: f64,
}

/// Derives day-bucketed views over a log snapshot. `today` and the local
/// offset are fixed at construction so results are reproducible.
pub struct TrendEngine<'a> {
    pub(super) logs: &'a LogSnapshot,
    pub(super) today: Date,
    pub(super) offset: UtcOffset,
}

impl<'a> TrendEngine<'a> {
    pub fn new(logs: &'a LogSnapshot, today: Date, offset: UtcOffset) -> Self {
        Self {
            logs,
            today,
            offset,
        }
    }

    pub fn calorie_intake(&self, days: u32) -> Vec<CalorieIntakePoint> {
        let grouped = group_by_date(&self.logs.meals, self.offset);
        trailing_dates(self.today, days)
            .into_iter()
            .map(|date| CalorieIntakePoint {
                date,
                calories: grouped
                    .get(&date)
                    .map(|day| day.iter().map(|m| m.total_calories).sum())
                    .unwrap_or(0.0),
            })
            .collect()
    }

    pub fn activity(&self, days: u32) -> Vec<ActivityPoint> {
        let grouped = group_by_date(&self.logs.activities, self.offset);
        trailing_dates(self.today, days)
            .into_iter()
            .map(|date| {
                let day = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
                ActivityPoint {
                    date,
                    calories_burned: day.iter().map(|a| a.calories_burned).sum(),
                    duration_minutes: day
                        .iter()
                        .map(|a| u64::from(a.duration_minutes))
                        .sum(),
                }
            })
            .collect()
    }

    pub fn vitals(&self, days: u32) -> Vec<VitalsPoint> {
        let grouped = group_by_date(&self.logs.vitals, self.offset);
        trailing_dates(self.today, days)
            .into_iter()
            .map(|date| {
                let day = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
                // entries are newest first, so the first reading found wins
                let latest = |field: fn(&VitalLogEntry) -> Option<f64>| {
                    day.iter().find_map(|v| field(v))
                };
                VitalsPoint {
                    date,
                    systolic: latest(|v| v.systolic),
                    diastolic: latest(|v| v.diastolic),
                    glucose: latest(|v| v.glucose),
                    weight: latest(|v| v.weight),
                    triglycerides: latest(|v| v.triglycerides),
                    ggt: latest(|v| v.ggt),
                    waist_circumference: latest(|v| v.waist_circumference),
                    waist_to_hip_ratio: latest(|v| v.waist_to_hip_ratio),
                }
            })
            .collect()
    }

    pub fn calorie_balance(&self, days: u32) -> Vec<CalorieBalancePoint> {
        self.calorie_intake(days)
            .into_iter()
            .zip(self.activity(days))
            .map(|(intake, activity)| CalorieBalancePoint {
                date: intake.date,
                intake: intake.calories,
                burned: activity.calories_burned,
                net: intake.calories - activity.calories_burned,
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logs::repo_types::{ActivityLogEntry, Intensity, MealLogEntry, MealType};
    use time::{macros::date, Duration, OffsetDateTime, Time};
    use uuid::Uuid;

    pub(crate) const TODAY: Date = date!(2024-06-30);

    pub(crate) fn at(days_ago: i64, hour: u8) -> OffsetDateTime {
        (TODAY - Duration::days(days_ago))
            .with_time(Time::from_hms(hour, 0, 0).unwrap())
            .assume_utc()
    }

    pub(crate) fn meal(days_ago: i64, calories: f64) -> MealLogEntry {
        MealLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(days_ago, 12),
            meal_type: MealType::Lunch,
            foods: vec![],
            total_calories: calories,
            notes: None,
        }
    }

    pub(crate) fn workout(days_ago: i64, minutes: u32, burned: f64) -> ActivityLogEntry {
        ActivityLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(days_ago, 7),
            activity_type: "Running".into(),
            duration_minutes: minutes,
            intensity: Intensity::High,
            calories_burned: burned,
            notes: None,
        }
    }

    pub(crate) fn vitals(days_ago: i64, hour: u8) -> VitalLogEntry {
        VitalLogEntry {
            id: Uuid::new_v4(),
            timestamp: at(days_ago, hour),
            systolic: None,
            diastolic: None,
            glucose: None,
            weight: None,
            triglycerides: None,
            ggt: None,
            waist_circumference: None,
            waist_to_hip_ratio: None,
            notes: None,
        }
    }

    pub(crate) fn bp(days_ago: i64, systolic: f64, diastolic: f64) -> VitalLogEntry {
        VitalLogEntry {
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            ..vitals(days_ago, 8)
        }
    }

    #[test]
    fn intake_sums_per_day_and_zero_fills() {
        let logs = LogSnapshot {
            meals: vec![meal(0, 500.0), meal(0, 700.0), meal(2, 300.0)],
            ..Default::default()
        };
        let engine = TrendEngine::new(&logs, TODAY, UtcOffset::UTC);
        let series = engine.calorie_intake(3);
        let calories: Vec<f64> = series.iter().map(|p| p.calories).collect();
        assert_eq!(calories, vec![300.0, 0.0, 1200.0]);
        assert_eq!(series[2].date, TODAY);
    }

    #[test]
    fn balance_subtracts_burned_from_intake() {
        let logs = LogSnapshot {
            meals: vec![meal(0, 2000.0)],
            activities: vec![workout(0, 30, 300.0)],
            ..Default::default()
        };
        let engine = TrendEngine::new(&logs, TODAY, UtcOffset::UTC);
        let balance = engine.calorie_balance(7);
        assert_eq!(balance.len(), 7);
        let today = balance.last().unwrap();
        assert_eq!((today.intake, today.burned, today.net), (2000.0, 300.0, 1700.0));
        assert!(balance[..6].iter().all(|d| d.net == 0.0));
    }

    #[test]
    fn activity_sums_minutes_and_calories() {
        let logs = LogSnapshot {
            activities: vec![workout(1, 20, 240.0), workout(1, 25, 300.0)],
            ..Default::default()
        };
        let series = TrendEngine::new(&logs, TODAY, UtcOffset::UTC).activity(2);
        assert_eq!(series[0].duration_minutes, 45);
        assert_eq!(series[0].calories_burned, 540.0);
        assert_eq!(series[1].duration_minutes, 0);
    }

    #[test]
    fn huge_stored_durations_do_not_overflow() {
        let logs = LogSnapshot {
            activities: vec![workout(0, u32::MAX, 0.0), workout(0, u32::MAX, 0.0)],
            ..Default::default()
        };
        let series = TrendEngine::new(&logs, TODAY, UtcOffset::UTC).activity(1);
        assert_eq!(series[0].duration_minutes, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn vitals_take_latest_reading_per_field() {
        let logs = LogSnapshot {
            vitals: vec![
                VitalLogEntry {
                    weight: Some(71.0),
                    ..vitals(0, 20)
                },
                bp(0, 128.0, 84.0),
                VitalLogEntry {
                    weight: Some(72.5),
                    systolic: Some(135.0),
                    ..vitals(0, 6)
                },
            ],
            ..Default::default()
        };
        let series = TrendEngine::new(&logs, TODAY, UtcOffset::UTC).vitals(2);
        assert_eq!(series[0].systolic, None);
        let today = &series[1];
        assert_eq!(today.weight, Some(71.0));
        assert_eq!(today.systolic, Some(128.0));
        assert_eq!(today.diastolic, Some(84.0));
        assert_eq!(today.glucose, None);
    }
}
