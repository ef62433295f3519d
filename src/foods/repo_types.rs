use serde::{Deserialize, Serialize};

/// Macronutrients in grams, per 100g for dataset foods and per serving for curated ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroNutrients {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingMacros {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Minerals in mg, vitamins in mg or ug as the column names say.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicroNutrients {
    pub calcium_mg: f64,
    pub phosphorus_mg: f64,
    pub magnesium_mg: f64,
    pub sodium_mg: f64,
    pub potassium_mg: f64,
    pub iron_mg: f64,
    pub zinc_mg: f64,
    pub vitamin_a_ug: f64,
    pub vitamin_c_mg: f64,
    pub vitamin_d2_ug: f64,
    pub vitamin_d3_ug: f64,
    pub vitamin_b1_mg: f64,
    pub vitamin_b2_mg: f64,
    pub vitamin_b3_mg: f64,
    pub vitamin_b6_mg: f64,
    pub folate_ug: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: String,
    pub food_code: String,
    pub name: String,
    pub category: String,
    pub serving_label: String,
    pub calories_per_serving: f64,
    pub calories_per_100_unit: f64,
    pub macros: MacroNutrients,
    pub serving_macros: ServingMacros,
    pub micros: MicroNutrients,
    pub search_terms: Vec<String>,
}

impl FoodRecord {
    /// Protein and fiber minus sugar; higher is denser.
    pub fn nutrient_density(&self) -> f64 {
        self.macros.protein + self.macros.fiber - self.macros.sugar
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    Database,
    Local,
}

/// A search hit together with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct FoodMatch {
    #[serde(flatten)]
    pub food: FoodRecord,
    pub source: FoodSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
