use std::collections::BTreeMap;

use time::{Date, Duration, UtcOffset};

use super::dto::{Achievement, Level, LevelProgress, Progress, Quest};
use crate::logs::repo_types::LogSnapshot;
use crate::trends::buckets::local_date;

const LEVEL_UP_AT: u64 = 1000;

const fn achievement(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    points: u64,
    category: &'static str,
) -> Achievement {
    Achievement {
        id,
        title,
        description,
        points,
        category,
        unlocked: false,
    }
}

const FIRST_LOG: Achievement = achievement("first-log", "First Steps", "Log your first health data", 50, "logging");
const STREAK_3: Achievement = achievement("streak-3", "Consistency Starter", "Maintain a 3-day streak", 100, "streak");
const STREAK_7: Achievement = achievement("streak-7", "Week Warrior", "Maintain a 7-day streak", 200, "streak");
const MEALS_10: Achievement = achievement("meals-10", "Nutrition Tracker", "Log 10 meals", 150, "logging");
const VITALS_10: Achievement = achievement("vitals-10", "Health Monitor", "Log 10 vital measurements", 150, "logging");
const ACTIVITY_10: Achievement = achievement("activity-10", "Active Lifestyle", "Log 10 physical activities", 150, "logging");
const LEVEL_UP: Achievement = achievement("level-up-first", "Level Up", "Reach your first level promotion", 250, "progression");
const PERFECT_WEEK: Achievement = achievement("perfect-week", "Perfect Week", "Complete all daily quests for a full week", 300, "quests");

const fn quest(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    points: u64,
    target: u32,
) -> Quest {
    Quest {
        id,
        title,
        description,
        points,
        category: "logging",
        progress: 0,
        target,
        completed: false,
    }
}

const LOG_MEAL: Quest = quest("log-meal", "Log a Meal", "Record what you ate today", 20, 1);
const LOG_VITALS: Quest = quest("log-vitals", "Check Your Vitals", "Record at least one vital measurement", 20, 1);
const LOG_ACTIVITY: Quest = quest("log-activity", "Stay Active", "Log a physical activity", 20, 1);
const LOG_ALL_MEALS: Quest = quest("log-all-meals", "Complete Meal Tracking", "Log at least 10 meals this week", 100, 10);
const ACTIVITY_STREAK: Quest = quest("activity-streak", "Activity Streak", "Log physical activities for 5 days this week", 150, 5);
const MAINTAIN_STREAK: Quest = quest("maintain-streak", "Maintain Your Streak", "Log something on every day of the week", 200, 7);

fn tracked(quest: Quest, count: u32) -> Quest {
    Quest {
        progress: count.min(quest.target),
        completed: count >= quest.target,
        ..quest
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DayCounts {
    meals: u32,
    vitals: u32,
    activities: u32,
}

impl DayCounts {
    fn kinds(&self) -> u32 {
        [self.meals, self.vitals, self.activities]
            .iter()
            .filter(|n| **n > 0)
            .count() as u32
    }

    fn logged(&self) -> bool {
        self.kinds() > 0
    }

    /// All three daily logging quests done.
    fn complete(&self) -> bool {
        self.kinds() == 3
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct WeekTally {
    meals: u32,
    activity_days: u32,
    logged_days: u32,
}

fn weekly_quests(week: &WeekTally) -> Vec<Quest> {
    vec![
        tracked(LOG_ALL_MEALS, week.meals),
        tracked(ACTIVITY_STREAK, week.activity_days),
        tracked(MAINTAIN_STREAK, week.logged_days),
    ]
}

/// Weeks start on Sunday.
fn week_start(date: Date) -> Date {
    let back = i64::from(date.weekday().number_days_from_sunday());
    date.checked_sub(Duration::days(back)).unwrap_or(date)
}

/// Per-day log counts in local dates, with `today` fixed at construction.
pub struct Scoreboard {
    days: BTreeMap<Date, DayCounts>,
    today: Date,
}

impl Scoreboard {
    pub fn new(logs: &LogSnapshot, today: Date, offset: UtcOffset) -> Self {
        let mut days: BTreeMap<Date, DayCounts> = BTreeMap::new();
        for m in &logs.meals {
            days.entry(local_date(m.timestamp, offset)).or_default().meals += 1;
        }
        for v in &logs.vitals {
            days.entry(local_date(v.timestamp, offset)).or_default().vitals += 1;
        }
        for a in &logs.activities {
            days.entry(local_date(a.timestamp, offset)).or_default().activities += 1;
        }
        Self { days, today }
    }

    fn day(&self, date: Date) -> DayCounts {
        self.days.get(&date).copied().unwrap_or_default()
    }

    fn totals(&self) -> DayCounts {
        self.days.values().fold(DayCounts::default(), |acc, d| DayCounts {
            meals: acc.meals + d.meals,
            vitals: acc.vitals + d.vitals,
            activities: acc.activities + d.activities,
        })
    }

    fn weeks(&self) -> BTreeMap<Date, WeekTally> {
        let mut weeks: BTreeMap<Date, WeekTally> = BTreeMap::new();
        for (date, counts) in &self.days {
            let week = weeks.entry(week_start(*date)).or_default();
            week.meals += counts.meals;
            week.activity_days += u32::from(counts.activities > 0);
            week.logged_days += u32::from(counts.logged());
        }
        weeks
    }

    /// Consecutive logged days ending today, or ending yesterday while
    /// nothing has been logged today yet.
    pub fn current_streak(&self) -> u32 {
        let mut cursor = if self.day(self.today).logged() {
            Some(self.today)
        } else {
            self.today.previous_day()
        };
        let mut streak = 0;
        while let Some(date) = cursor.filter(|d| self.day(*d).logged()) {
            streak += 1;
            cursor = date.previous_day();
        }
        streak
    }

    fn longest_run(&self, keep: impl Fn(&DayCounts) -> bool) -> u32 {
        let (mut best, mut run) = (0, 0);
        let mut prev: Option<Date> = None;
        for (date, counts) in &self.days {
            if !keep(counts) {
                run = 0;
                continue;
            }
            run = if prev.and_then(Date::next_day) == Some(*date) && run > 0 {
                run + 1
            } else {
                1
            };
            prev = Some(*date);
            best = best.max(run);
        }
        best
    }

    pub fn daily_quests(&self) -> Vec<Quest> {
        let today = self.day(self.today);
        vec![
            tracked(LOG_MEAL, today.meals),
            tracked(LOG_VITALS, today.vitals),
            tracked(LOG_ACTIVITY, today.activities),
        ]
    }

    pub fn weekly_quests(&self) -> Vec<Quest> {
        let week = self
            .weeks()
            .get(&week_start(self.today))
            .copied()
            .unwrap_or_default();
        weekly_quests(&week)
    }

    /// Daily quest points for every logged day plus every completed weekly quest.
    fn quest_points(&self) -> u64 {
        let daily: u64 = self.days.values().map(|d| u64::from(d.kinds()) * 20).sum();
        let weekly: u64 = self
            .weeks()
            .values()
            .flat_map(weekly_quests)
            .filter(|q| q.completed)
            .map(|q| q.points)
            .sum();
        daily + weekly
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        let totals = self.totals();
        let longest = self.longest_run(DayCounts::logged);
        let mut earned = vec![
            (FIRST_LOG, totals.logged()),
            (STREAK_3, longest >= 3),
            (STREAK_7, longest >= 7),
            (MEALS_10, totals.meals >= 10),
            (VITALS_10, totals.vitals >= 10),
            (ACTIVITY_10, totals.activities >= 10),
            (PERFECT_WEEK, self.longest_run(DayCounts::complete) >= 7),
        ];
        let before_level_up = self.quest_points()
            + earned
                .iter()
                .filter(|(_, unlocked)| *unlocked)
                .map(|(a, _)| a.points)
                .sum::<u64>();
        earned.insert(6, (LEVEL_UP, before_level_up >= LEVEL_UP_AT));

        earned
            .into_iter()
            .map(|(a, unlocked)| Achievement { unlocked, ..a })
            .collect()
    }

    pub fn points(&self) -> u64 {
        let achievements: u64 = self
            .achievements()
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.points)
            .sum();
        self.quest_points() + achievements
    }

    pub fn progress(&self) -> Progress {
        let points = self.points();
        Progress {
            points,
            level: Level::for_points(points),
            level_progress: LevelProgress::for_points(points),
            streak: self.current_streak(),
            longest_streak: self.longest_run(DayCounts::logged),
        }
    }
}
