use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u64,
    pub category: &'static str,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u64,
    pub category: &'static str,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    #[serde(rename = "Wellness Novice")]
    Novice,
    #[serde(rename = "Wellness Explorer")]
    Explorer,
    #[serde(rename = "Wellness Champion")]
    Champion,
    #[serde(rename = "Wellness Master")]
    Master,
}

impl Level {
    pub fn for_points(points: u64) -> Self {
        match points {
            p if p >= 5000 => Self::Master,
            p if p >= 2500 => Self::Champion,
            p if p >= 1000 => Self::Explorer,
            _ => Self::Novice,
        }
    }

    /// Points where this level starts and the target shown for it.
    fn band(self) -> (u64, u64) {
        match self {
            Self::Novice => (0, 1000),
            Self::Explorer => (1000, 2500),
            Self::Champion => (2500, 5000),
            Self::Master => (5000, 10000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub current: u64,
    pub target: u64,
    pub percentage: u64,
}

impl LevelProgress {
    /// `current` counts from the level floor; `target` is the next threshold.
    pub fn for_points(points: u64) -> Self {
        let (floor, target) = Level::for_points(points).band();
        let current = points - floor;
        Self {
            current,
            target,
            percentage: (current.saturating_mul(100) / target).min(100),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub points: u64,
    pub level: Level,
    pub level_progress: LevelProgress,
    pub streak: u32,
    pub longest_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(Level::for_points(0), Level::Novice);
        assert_eq!(Level::for_points(999), Level::Novice);
        assert_eq!(Level::for_points(1000), Level::Explorer);
        assert_eq!(Level::for_points(2499), Level::Explorer);
        assert_eq!(Level::for_points(2500), Level::Champion);
        assert_eq!(Level::for_points(5000), Level::Master);
    }

    #[test]
    fn progress_counts_from_level_floor() {
        assert_eq!(
            LevelProgress::for_points(400),
            LevelProgress { current: 400, target: 1000, percentage: 40 }
        );
        assert_eq!(
            LevelProgress::for_points(1670),
            LevelProgress { current: 670, target: 2500, percentage: 26 }
        );
        assert_eq!(LevelProgress::for_points(12_000).percentage, 70);
        assert_eq!(LevelProgress::for_points(20_000).percentage, 100);
    }

    #[test]
    fn level_serializes_with_display_name() {
        let json = serde_json::to_value(Level::Champion).unwrap();
        assert_eq!(json, "Wellness Champion");
    }
}
