use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::{
    catalog::DatasetError,
    repo_types::{FoodRecord, MacroNutrients, MicroNutrients, ServingMacros},
};

const KJ_TO_KCAL: f64 = 0.239;
const DEFAULT_SERVING: &str = "100g";

/// One CSV row as it appears in the dataset; every column is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatasetRow {
    food_code: Option<String>,
    food_name: Option<String>,
    energy_kj: Option<String>,
    energy_kcal: Option<String>,
    carb_g: Option<String>,
    protein_g: Option<String>,
    fat_g: Option<String>,
    fibre_g: Option<String>,
    freesugar_g: Option<String>,
    calcium_mg: Option<String>,
    phosphorus_mg: Option<String>,
    magnesium_mg: Option<String>,
    sodium_mg: Option<String>,
    potassium_mg: Option<String>,
    iron_mg: Option<String>,
    zinc_mg: Option<String>,
    vita_ug: Option<String>,
    vitc_mg: Option<String>,
    vitd2_ug: Option<String>,
    vitd3_ug: Option<String>,
    vitb1_mg: Option<String>,
    vitb2_mg: Option<String>,
    vitb3_mg: Option<String>,
    vitb6_mg: Option<String>,
    folate_ug: Option<String>,
    servings_unit: Option<String>,
    unit_serving_energy_kcal: Option<String>,
    unit_serving_energy_kj: Option<String>,
    unit_serving_carb_g: Option<String>,
    unit_serving_protein_g: Option<String>,
    unit_serving_fat_g: Option<String>,
}

fn num(v: &Option<String>) -> f64 {
    v.as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// kcal column, or the kJ column converted when kcal is zero or missing.
fn energy(kcal: &Option<String>, kj: &Option<String>) -> f64 {
    let kcal = num(kcal);
    if kcal != 0.0 {
        kcal
    } else {
        num(kj) * KJ_TO_KCAL
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl DatasetRow {
    fn into_record(self, index: usize) -> Option<FoodRecord> {
        let name = non_empty(self.food_name.clone())?;
        Some(FoodRecord {
            id: format!("csv_{}", index),
            food_code: non_empty(self.food_code.clone()).unwrap_or_default(),
            category: categorize_food(&name).to_string(),
            search_terms: generate_search_terms(&name),
            serving_label: non_empty(self.servings_unit.clone())
                .unwrap_or_else(|| DEFAULT_SERVING.to_string()),
            calories_per_serving: energy(
                &self.unit_serving_energy_kcal,
                &self.unit_serving_energy_kj,
            ),
            calories_per_100_unit: energy(&self.energy_kcal, &self.energy_kj),
            macros: MacroNutrients {
                carbs: num(&self.carb_g),
                protein: num(&self.protein_g),
                fat: num(&self.fat_g),
                fiber: num(&self.fibre_g),
                sugar: num(&self.freesugar_g),
            },
            serving_macros: ServingMacros {
                carbs: num(&self.unit_serving_carb_g),
                protein: num(&self.unit_serving_protein_g),
                fat: num(&self.unit_serving_fat_g),
            },
            micros: MicroNutrients {
                calcium_mg: num(&self.calcium_mg),
                phosphorus_mg: num(&self.phosphorus_mg),
                magnesium_mg: num(&self.magnesium_mg),
                sodium_mg: num(&self.sodium_mg),
                potassium_mg: num(&self.potassium_mg),
                iron_mg: num(&self.iron_mg),
                zinc_mg: num(&self.zinc_mg),
                vitamin_a_ug: num(&self.vita_ug),
                vitamin_c_mg: num(&self.vitc_mg),
                vitamin_d2_ug: num(&self.vitd2_ug),
                vitamin_d3_ug: num(&self.vitd3_ug),
                vitamin_b1_mg: num(&self.vitb1_mg),
                vitamin_b2_mg: num(&self.vitb2_mg),
                vitamin_b3_mg: num(&self.vitb3_mg),
                vitamin_b6_mg: num(&self.vitb6_mg),
                folate_ug: num(&self.folate_ug),
            },
            name,
        })
    }
}

/// Parses the nutrition CSV. Ids follow row order, nameless rows are dropped
/// after numbering so ids stay stable across dataset revisions.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<FoodRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<DatasetRow>().enumerate() {
        let row = row.map_err(|e| DatasetError::Parse(format!("row {}: {}", index + 1, e)))?;
        if let Some(record) = row.into_record(index) {
            records.push(record);
        }
    }
    Ok(records)
}

const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "Grains & Cereals",
        &["rice", "wheat", "flour", "bread", "roti", "chapati"],
    ),
    (
        "Vegetables",
        &[
            "vegetable",
            "tomato",
            "onion",
            "potato",
            "carrot",
            "spinach",
            "cabbage",
            "cauliflower",
            "brinjal",
        ],
    ),
    (
        "Fruits",
        &["fruit", "apple", "banana", "orange", "mango", "grape"],
    ),
    (
        "Dairy",
        &["milk", "curd", "cheese", "paneer", "butter", "ghee"],
    ),
    (
        "Legumes & Pulses",
        &["dal", "lentil", "bean", "pea", "chickpea", "gram"],
    ),
    (
        "Meat & Fish",
        &["chicken", "mutton", "fish", "meat", "egg"],
    ),
    (
        "Nuts & Seeds",
        &["nut", "seed", "almond", "cashew", "groundnut"],
    ),
    ("Oils & Fats", &["oil", "fat"]),
    (
        "Spices & Condiments",
        &["spice", "masala", "powder", "paste", "sauce"],
    ),
    (
        "Beverages",
        &["tea", "coffee", "juice", "drink", "water"],
    ),
    (
        "Sweets & Desserts",
        &["sweet", "sugar", "jaggery", "honey", "dessert"],
    ),
];

/// First matching keyword group wins.
pub fn categorize_food(name: &str) -> &'static str {
    let name = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or("Other")
}

const SYNONYMS: &[(&str, &[&str])] = &[
    ("rice", &["chawal", "bhat"]),
    ("wheat", &["gehun", "atta"]),
    ("milk", &["doodh"]),
    ("water", &["paani", "jal"]),
    ("oil", &["tel"]),
    ("sugar", &["cheeni", "shakkar"]),
    ("salt", &["namak"]),
    ("onion", &["pyaz"]),
    ("potato", &["aloo"]),
    ("tomato", &["tamatar"]),
    ("lentil", &["dal", "daal"]),
    ("chicken", &["murgi"]),
    ("fish", &["machli", "machhli"]),
    ("egg", &["anda"]),
];

lazy_static! {
    static ref WORD_SPLIT: Regex = Regex::new(r"[\s,.\-]+").unwrap();
}

pub fn generate_search_terms(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let mut terms = vec![lower.clone()];

    for (english, local) in SYNONYMS {
        if lower.contains(english) {
            terms.extend(local.iter().map(|s| s.to_string()));
        }
        for word in local.iter() {
            if lower.contains(word) {
                terms.push(english.to_string());
            }
        }
    }

    terms.extend(
        WORD_SPLIT
            .split(&lower)
            .filter(|w| w.chars().count() > 2)
            .map(str::to_string),
    );

    let mut seen = std::collections::HashSet::new();
    terms.retain(|t| seen.insert(t.clone()));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
food_code,food_name,energy_kj,energy_kcal,carb_g,protein_g,fat_g,fibre_g,freesugar_g,servings_unit,unit_serving_energy_kcal,unit_serving_energy_kj
A001,Hot tea (Garam Chai),,16.14,2.58,0.39,0.53,0,2.58,tea cup (ml),,100
A002,,100,24,1,1,1,1,1,,,
A003,Instant coffee,200,n/a,x,1.5,,0.2,,,25,
";

    #[test]
    fn parses_rows_and_drops_nameless() {
        let foods = parse_dataset(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].id, "csv_0");
        assert_eq!(foods[1].id, "csv_2");
        assert_eq!(foods[0].name, "Hot tea (Garam Chai)");
        assert_eq!(foods[0].category, "Beverages");
        assert_eq!(foods[0].serving_label, "tea cup (ml)");
    }

    #[test]
    fn malformed_numbers_default_to_zero() {
        let foods = parse_dataset(SAMPLE.as_bytes()).expect("parse");
        let coffee = &foods[1];
        assert_eq!(coffee.macros.carbs, 0.0);
        assert_eq!(coffee.macros.fat, 0.0);
        assert_eq!(coffee.macros.protein, 1.5);
        assert_eq!(coffee.serving_label, "100g");
        assert_eq!(coffee.calories_per_serving, 25.0);
    }

    #[test]
    fn kilojoules_fill_in_missing_kcal() {
        let foods = parse_dataset(SAMPLE.as_bytes()).expect("parse");
        assert!((foods[1].calories_per_100_unit - 200.0 * 0.239).abs() < 1e-9);
        assert!((foods[0].calories_per_serving - 23.9).abs() < 1e-9);
        assert!((foods[0].calories_per_100_unit - 16.14).abs() < 1e-9);
    }

    #[test]
    fn missing_columns_are_tolerated() {
        let foods = parse_dataset(b"food_name\nPlain rice\n").expect("parse");
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].calories_per_100_unit, 0.0);
        assert_eq!(foods[0].category, "Grains & Cereals");
    }

    #[test]
    fn categorize_uses_first_matching_group() {
        assert_eq!(categorize_food("Potato curry with rice"), "Grains & Cereals");
        assert_eq!(categorize_food("Spinach soup"), "Vegetables");
        assert_eq!(categorize_food("Egg bhurji"), "Meat & Fish");
        assert_eq!(categorize_food("Idli"), "Other");
    }

    #[test]
    fn search_terms_include_synonyms_and_words() {
        let terms = generate_search_terms("Boiled rice, plain");
        assert_eq!(terms[0], "boiled rice, plain");
        assert!(terms.contains(&"chawal".to_string()));
        assert!(terms.contains(&"bhat".to_string()));
        assert!(terms.contains(&"boiled".to_string()));
        assert!(terms.contains(&"plain".to_string()));

        let reverse = generate_search_terms("Aloo paratha");
        assert!(reverse.contains(&"potato".to_string()));
    }

    #[test]
    fn search_terms_are_deduplicated() {
        let terms = generate_search_terms("Rice");
        assert_eq!(terms.iter().filter(|t| *t == "rice").count(), 1);
        assert!(!terms.iter().any(|t| t.len() <= 2));
    }
}
