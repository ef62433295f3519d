use lazy_static::lazy_static;

use super::{
    dataset::generate_search_terms,
    repo_types::{FoodRecord, MacroNutrients, ServingMacros},
};

const LOCAL_RESULT_LIMIT: usize = 10;

// name, kcal, carbs, protein, fat, serving, category
type Row = (&'static str, f64, f64, f64, f64, &'static str, &'static str);

const CURATED: &[Row] = &[
    ("Chapati", 120.0, 20.0, 3.0, 3.0, "1 piece", "Breads"),
    ("Roti", 110.0, 18.0, 3.0, 2.5, "1 piece", "Breads"),
    ("Paratha", 180.0, 25.0, 4.0, 8.0, "1 piece", "Breads"),
    ("Naan", 200.0, 30.0, 5.0, 6.0, "1 piece", "Breads"),
    ("Puri", 85.0, 10.0, 2.0, 4.0, "1 piece", "Breads"),
    ("Rice", 200.0, 45.0, 4.0, 0.5, "1 cup cooked", "Grains"),
    ("Brown Rice", 220.0, 45.0, 5.0, 1.8, "1 cup cooked", "Grains"),
    ("Biryani", 400.0, 50.0, 15.0, 18.0, "1 cup", "Rice Dishes"),
    ("Pulao", 320.0, 45.0, 8.0, 12.0, "1 cup", "Rice Dishes"),
    ("Dal", 150.0, 22.0, 9.0, 2.0, "1 cup", "Lentils"),
    ("Moong Dal", 140.0, 20.0, 10.0, 1.5, "1 cup", "Lentils"),
    ("Toor Dal", 160.0, 24.0, 8.0, 2.0, "1 cup", "Lentils"),
    ("Chana Dal", 170.0, 25.0, 9.0, 2.5, "1 cup", "Lentils"),
    ("Masoor Dal", 145.0, 22.0, 9.0, 1.8, "1 cup", "Lentils"),
    ("Rajma", 220.0, 35.0, 12.0, 3.0, "1 cup", "Legumes"),
    ("Chole", 210.0, 35.0, 10.0, 5.0, "1 cup", "Legumes"),
    ("Sambar", 140.0, 20.0, 5.0, 5.0, "1 cup", "Lentils"),
    ("Idli", 80.0, 15.0, 2.0, 0.5, "1 piece", "South Indian"),
    ("Dosa", 150.0, 25.0, 3.0, 4.0, "1 piece", "South Indian"),
    ("Uttapam", 180.0, 28.0, 4.0, 5.0, "1 piece", "South Indian"),
    ("Vada", 120.0, 12.0, 3.0, 7.0, "1 piece", "South Indian"),
    ("Upma", 160.0, 28.0, 4.0, 4.0, "1 cup", "South Indian"),
    ("Poha", 170.0, 30.0, 3.0, 5.0, "1 cup", "South Indian"),
    ("Aloo Gobi", 180.0, 30.0, 5.0, 6.0, "1 cup", "Vegetables"),
    ("Palak Paneer", 220.0, 10.0, 12.0, 15.0, "1 cup", "Vegetables"),
    ("Bhindi Masala", 140.0, 18.0, 4.0, 6.0, "1 cup", "Vegetables"),
    ("Baingan Bharta", 160.0, 20.0, 3.0, 8.0, "1 cup", "Vegetables"),
    ("Aloo Jeera", 150.0, 25.0, 3.0, 5.0, "1 cup", "Vegetables"),
    ("Cabbage Sabzi", 120.0, 15.0, 3.0, 5.0, "1 cup", "Vegetables"),
    ("Karela Sabzi", 100.0, 12.0, 2.0, 4.0, "1 cup", "Vegetables"),
    ("Paneer", 260.0, 3.0, 18.0, 20.0, "100g", "Paneer"),
    ("Paneer Butter Masala", 280.0, 12.0, 15.0, 20.0, "1 cup", "Paneer"),
    ("Paneer Tikka", 200.0, 5.0, 14.0, 14.0, "100g", "Paneer"),
    ("Matar Paneer", 240.0, 15.0, 12.0, 16.0, "1 cup", "Paneer"),
    ("Chicken Curry", 250.0, 8.0, 25.0, 14.0, "1 cup", "Non-Veg"),
    ("Butter Chicken", 350.0, 10.0, 30.0, 20.0, "1 cup", "Non-Veg"),
    ("Chicken Tikka", 180.0, 2.0, 25.0, 8.0, "100g", "Non-Veg"),
    ("Fish Curry", 200.0, 6.0, 22.0, 10.0, "1 cup", "Non-Veg"),
    ("Mutton Curry", 300.0, 8.0, 28.0, 18.0, "1 cup", "Non-Veg"),
    ("Coconut Chutney", 60.0, 4.0, 1.0, 5.0, "2 tbsp", "Chutneys"),
    ("Mint Chutney", 25.0, 3.0, 1.0, 1.0, "2 tbsp", "Chutneys"),
    ("Coriander Chutney", 30.0, 4.0, 1.0, 1.5, "2 tbsp", "Chutneys"),
    ("Tamarind Chutney", 45.0, 11.0, 0.5, 0.2, "2 tbsp", "Chutneys"),
    ("Tomato Chutney", 35.0, 7.0, 1.0, 1.0, "2 tbsp", "Chutneys"),
    ("Peanut Chutney", 80.0, 5.0, 3.0, 6.0, "2 tbsp", "Chutneys"),
    ("Ginger Chutney", 40.0, 8.0, 1.0, 1.0, "2 tbsp", "Chutneys"),
    ("Onion Chutney", 50.0, 10.0, 1.0, 1.5, "2 tbsp", "Chutneys"),
    ("Samosa", 180.0, 20.0, 3.0, 10.0, "1 piece", "Snacks"),
    ("Pakora", 120.0, 12.0, 3.0, 7.0, "3 pieces", "Snacks"),
    ("Dhokla", 90.0, 15.0, 3.0, 2.0, "1 piece", "Snacks"),
    ("Kachori", 200.0, 22.0, 4.0, 11.0, "1 piece", "Snacks"),
    ("Bhel Puri", 160.0, 25.0, 4.0, 5.0, "1 cup", "Snacks"),
    ("Pani Puri", 25.0, 4.0, 1.0, 1.0, "1 piece", "Snacks"),
    ("Lassi", 150.0, 15.0, 5.0, 8.0, "1 glass", "Beverages"),
    ("Buttermilk", 60.0, 8.0, 3.0, 2.0, "1 glass", "Beverages"),
    ("Masala Chai", 80.0, 12.0, 3.0, 3.0, "1 cup", "Beverages"),
    ("Milk", 150.0, 12.0, 8.0, 8.0, "1 cup", "Dairy"),
    ("Curd", 100.0, 8.0, 6.0, 5.0, "1 cup", "Dairy"),
    ("Raita", 80.0, 6.0, 3.0, 5.0, "1/2 cup", "Dairy"),
    ("Gulab Jamun", 180.0, 25.0, 3.0, 8.0, "1 piece", "Sweets"),
    ("Rasgulla", 120.0, 20.0, 4.0, 3.0, "1 piece", "Sweets"),
    ("Kheer", 200.0, 30.0, 5.0, 7.0, "1/2 cup", "Sweets"),
    ("Halwa", 250.0, 35.0, 4.0, 10.0, "1/2 cup", "Sweets"),
    ("Khichdi", 200.0, 35.0, 8.0, 4.0, "1 cup", "Mixed Dishes"),
    ("Pongal", 180.0, 30.0, 6.0, 5.0, "1 cup", "Mixed Dishes"),
    ("Pulihora", 220.0, 40.0, 4.0, 6.0, "1 cup", "Mixed Dishes"),
];

lazy_static! {
    static ref CURATED_FOODS: Vec<FoodRecord> = CURATED
        .iter()
        .enumerate()
        .map(|(i, &(name, kcal, carbs, protein, fat, serving, category))| FoodRecord {
            id: format!("local_{}", i),
            food_code: String::new(),
            name: name.to_string(),
            category: category.to_string(),
            serving_label: serving.to_string(),
            calories_per_serving: kcal,
            calories_per_100_unit: 0.0,
            macros: MacroNutrients {
                carbs,
                protein,
                fat,
                ..Default::default()
            },
            serving_macros: ServingMacros { carbs, protein, fat },
            micros: Default::default(),
            search_terms: generate_search_terms(name),
        })
        .collect();
}

/// The hardcoded list; values are per serving.
pub fn curated_foods() -> &'static [FoodRecord] {
    &CURATED_FOODS
}

/// Prefix matches, then substring matches, then category matches.
pub fn search_local(raw_query: &str) -> Vec<FoodRecord> {
    let q = raw_query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let foods = curated_foods();
    let prefix = foods.iter().filter(|f| f.name.to_lowercase().starts_with(&q));
    let partial = foods.iter().filter(|f| {
        let name = f.name.to_lowercase();
        name.contains(&q) && !name.starts_with(&q)
    });
    let by_category = foods.iter().filter(|f| {
        f.category.to_lowercase().contains(&q) && !f.name.to_lowercase().contains(&q)
    });

    let mut out: Vec<FoodRecord> = Vec::new();
    for food in prefix.chain(partial).chain(by_category) {
        if out.len() == LOCAL_RESULT_LIMIT {
            break;
        }
        if !out.iter().any(|f| f.name == food.name) {
            out.push(food.clone());
        }
    }
    out
}

/// Curated entries carry `local_` ids and are served without loading the dataset.
pub fn find_curated(id: &str) -> Option<&'static FoodRecord> {
    curated_foods().iter().find(|f| f.id == id)
}
