use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{
        ActivitySuggestion, LogActivityRequest, LogMealRequest, LogVitalsRequest, ParsedMeal,
    },
    repo::LogBook,
    repo_types::{ActivityLogEntry, Intensity, MealFood, MealLogEntry, MealType, VitalLogEntry},
};
use crate::foods::{curated::curated_foods, repo_types::FoodRecord};

pub const RECENT_MEALS: usize = 5;
/// One day; longer single entries are rejected.
pub const MAX_ACTIVITY_MINUTES: u32 = 24 * 60;
const DEFAULT_CALORIES_PER_MINUTE: f64 = 5.0;

const ACTIVITIES: &[ActivitySuggestion] = &[
    ActivitySuggestion { name: "Walking", calories_per_minute: 4.0, intensity: Intensity::Low },
    ActivitySuggestion { name: "Jogging", calories_per_minute: 8.0, intensity: Intensity::Moderate },
    ActivitySuggestion { name: "Running", calories_per_minute: 12.0, intensity: Intensity::High },
    ActivitySuggestion { name: "Cycling", calories_per_minute: 7.0, intensity: Intensity::Moderate },
    ActivitySuggestion { name: "Swimming", calories_per_minute: 9.0, intensity: Intensity::Moderate },
    ActivitySuggestion { name: "Yoga", calories_per_minute: 3.0, intensity: Intensity::Low },
    ActivitySuggestion { name: "Weight Training", calories_per_minute: 6.0, intensity: Intensity::Moderate },
    ActivitySuggestion { name: "Dancing", calories_per_minute: 6.0, intensity: Intensity::Moderate },
    ActivitySuggestion { name: "Gardening", calories_per_minute: 4.0, intensity: Intensity::Low },
    ActivitySuggestion { name: "Household Chores", calories_per_minute: 3.0, intensity: Intensity::Low },
];

/// Rejected log input; surfaces as 400.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub fn activity_suggestions() -> &'static [ActivitySuggestion] {
    ACTIVITIES
}

pub fn calculate_meal_calories(foods: &[MealFood]) -> f64 {
    foods
        .iter()
        .map(|f| f.calories * f64::from(f.quantity.max(1)))
        .sum()
}

pub fn calculate_activity_calories(activity: &str, duration_minutes: u32) -> f64 {
    let rate = ACTIVITIES
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(activity.trim()))
        .map(|a| a.calories_per_minute)
        .unwrap_or(DEFAULT_CALORIES_PER_MINUTE);
    rate * f64::from(duration_minutes)
}

fn non_negative(field: &str, v: Option<f64>) -> Result<(), LogError> {
    match v {
        Some(n) if !n.is_finite() || n < 0.0 => {
            Err(LogError::Invalid(format!("{} must be a non-negative number", field)))
        }
        _ => Ok(()),
    }
}

pub async fn log_meal(book: &LogBook, req: LogMealRequest) -> Result<MealLogEntry, LogError> {
    if req.foods.is_empty() {
        return Err(LogError::Invalid("foods must be non-empty".into()));
    }
    if let Some(f) = req.foods.iter().find(|f| f.quantity < 1) {
        return Err(LogError::Invalid(format!("quantity for {} must be at least 1", f.name)));
    }
    for food in &req.foods {
        non_negative(&format!("calories for {}", food.name), Some(food.calories))?;
    }
    non_negative("total_calories", req.total_calories)?;

    let total_calories = req
        .total_calories
        .unwrap_or_else(|| calculate_meal_calories(&req.foods));
    let entry = MealLogEntry {
        id: Uuid::new_v4(),
        timestamp: req.timestamp.unwrap_or_else(OffsetDateTime::now_utc),
        meal_type: req.meal_type,
        foods: req.foods,
        total_calories,
        notes: req.notes,
    };
    let entry = book.append(entry).await?;
    info!(id = %entry.id, meal_type = ?entry.meal_type, total_calories, "meal logged");
    Ok(entry)
}

pub async fn log_vitals(book: &LogBook, req: LogVitalsRequest) -> Result<VitalLogEntry, LogError> {
    let fields = [
        ("systolic", req.systolic),
        ("diastolic", req.diastolic),
        ("glucose", req.glucose),
        ("weight", req.weight),
        ("triglycerides", req.triglycerides),
        ("ggt", req.ggt),
        ("waist_circumference", req.waist_circumference),
        ("waist_to_hip_ratio", req.waist_to_hip_ratio),
    ];
    if fields.iter().all(|(_, v)| v.is_none()) {
        return Err(LogError::Invalid("at least one vital measurement is required".into()));
    }
    for (name, v) in fields {
        non_negative(name, v)?;
    }

    let entry = VitalLogEntry {
        id: Uuid::new_v4(),
        timestamp: req.timestamp.unwrap_or_else(OffsetDateTime::now_utc),
        systolic: req.systolic,
        diastolic: req.diastolic,
        glucose: req.glucose,
        weight: req.weight,
        triglycerides: req.triglycerides,
        ggt: req.ggt,
        waist_circumference: req.waist_circumference,
        waist_to_hip_ratio: req.waist_to_hip_ratio,
        notes: req.notes,
    };
    let entry = book.append(entry).await?;
    info!(id = %entry.id, "vitals logged");
    Ok(entry)
}

pub async fn log_activity(
    book: &LogBook,
    req: LogActivityRequest,
) -> Result<ActivityLogEntry, LogError> {
    let activity_type = req.activity_type.trim().to_string();
    if activity_type.is_empty() {
        return Err(LogError::Invalid("activity_type is required".into()));
    }
    if req.duration_minutes > MAX_ACTIVITY_MINUTES {
        return Err(LogError::Invalid(format!(
            "duration_minutes must be at most {}",
            MAX_ACTIVITY_MINUTES
        )));
    }
    non_negative("calories_burned", req.calories_burned)?;

    let calories_burned = req
        .calories_burned
        .unwrap_or_else(|| calculate_activity_calories(&activity_type, req.duration_minutes));
    let entry = ActivityLogEntry {
        id: Uuid::new_v4(),
        timestamp: req.timestamp.unwrap_or_else(OffsetDateTime::now_utc),
        activity_type,
        duration_minutes: req.duration_minutes,
        intensity: req.intensity,
        calories_burned,
        notes: req.notes,
    };
    let entry = book.append(entry).await?;
    info!(id = %entry.id, activity = %entry.activity_type, minutes = entry.duration_minutes, "activity logged");
    Ok(entry)
}

pub async fn recent_meals(book: &LogBook) -> anyhow::Result<Vec<MealLogEntry>> {
    let mut meals = book.list::<MealLogEntry>().await?;
    meals.truncate(RECENT_MEALS);
    Ok(meals)
}

lazy_static! {
    static ref MEAL_KEYWORDS: [(Regex, MealType); 3] = [
        (Regex::new(r"(?i)\bbreakfast\b").unwrap(), MealType::Breakfast),
        (Regex::new(r"(?i)\blunch\b").unwrap(), MealType::Lunch),
        (Regex::new(r"(?i)\bdinner\b").unwrap(), MealType::Dinner),
    ];
    /// Lower-cased curated name and a `<count> <name>` pattern per curated food.
    static ref FOOD_PATTERNS: Vec<(&'static FoodRecord, String, Regex)> = curated_foods()
        .iter()
        .map(|food| {
            let name = food.name.to_lowercase();
            let quantity = Regex::new(&format!(r"(\d+)\s+{}", regex::escape(&name))).unwrap();
            (food, name, quantity)
        })
        .collect();
}

/// Picks curated foods out of free text such as "2 roti and dal for lunch".
/// Dinner outranks lunch outranks breakfast when several are mentioned;
/// no keyword means a snack.
pub fn parse_meal_text(text: &str) -> ParsedMeal {
    let lower = text.to_lowercase();

    let meal_type = MEAL_KEYWORDS
        .iter()
        .filter(|(re, _)| re.is_match(&lower))
        .map(|(_, t)| *t)
        .last()
        .unwrap_or(MealType::Snack);

    let mut foods = Vec::new();
    for (food, name, quantity_re) in FOOD_PATTERNS.iter() {
        if !lower.contains(name.as_str()) {
            continue;
        }
        let quantity = quantity_re
            .captures(&lower)
            .and_then(|c| c[1].parse::<u32>().ok())
            .filter(|q| *q >= 1)
            .unwrap_or(1);
        foods.push(MealFood {
            food_id: Some(food.id.clone()),
            name: food.name.clone(),
            calories: food.calories_per_serving,
            quantity,
        });
    }

    let total_calories = calculate_meal_calories(&foods);
    ParsedMeal {
        meal_type,
        foods,
        total_calories,
    }
}
