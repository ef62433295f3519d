use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::{Intensity, MealFood, MealType};

#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub meal_type: MealType,
    pub foods: Vec<MealFood>,
    /// Computed from the foods when absent.
    #[serde(default)]
    pub total_calories: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogVitalsRequest {
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
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    pub activity_type: String,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    /// Estimated from the activity table when absent.
    #[serde(default)]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ParseMealRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivitySuggestion {
    pub name: &'static str,
    pub calories_per_minute: f64,
    pub intensity: Intensity,
}

#[derive(Debug, Serialize)]
pub struct ParsedMeal {
    pub meal_type: MealType,
    pub foods: Vec<MealFood>,
    pub total_calories: f64,
}
