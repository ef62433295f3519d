use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealFood {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    pub name: String,
    /// kcal per serving
    pub calories: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLogEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub meal_type: MealType,
    pub foods: Vec<MealFood>,
    pub total_calories: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalLogEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub triglycerides: Option<f64>,
    #[serde(default)]
    pub ggt: Option<f64>,
    #[serde(default)]
    pub waist_circumference: Option<f64>,
    #[serde(default)]
    pub waist_to_hip_ratio: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub activity_type: String,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub calories_burned: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A log list persisted under its own store key.
pub trait LogEntry: Serialize + serde::de::DeserializeOwned + Clone + Send + Sync {
    const STORE_KEY: &'static str;

    fn timestamp(&self) -> OffsetDateTime;
}

impl LogEntry for MealLogEntry {
    const STORE_KEY: &'static str = "mealLogs";

    fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

impl LogEntry for VitalLogEntry {
    const STORE_KEY: &'static str = "vitalLogs";

    fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

impl LogEntry for ActivityLogEntry {
    const STORE_KEY: &'static str = "activityLogs";

    fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// Point-in-time copy of all three log lists, newest first.
#[derive(Debug, Clone, Default)]
pub struct LogSnapshot {
    pub meals: Vec<MealLogEntry>,
    pub vitals: Vec<VitalLogEntry>,
    pub activities: Vec<ActivityLogEntry>,
}
