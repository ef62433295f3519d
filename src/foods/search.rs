//! Additive text scoring over food records.
//!
//! Every rule is evaluated independently and the points stack, so an exact
//! name match also collects the starts-with and contains points.

use super::repo_types::FoodRecord;

pub const DEFAULT_LIMIT: usize = 20;

const EXACT_NAME: f64 = 100.0;
const NAME_PREFIX: f64 = 80.0;
const NAME_CONTAINS: f64 = 60.0;
const TERM_EXACT: f64 = 70.0;
const TERM_PREFIX: f64 = 50.0;
const TERM_CONTAINS: f64 = 30.0;
const MULTI_WORD_MAX: f64 = 40.0;
const CATEGORY_CONTAINS: f64 = 20.0;

/// Lower-cased, trimmed query with its words; `None` for blank input.
#[derive(Debug, Clone)]
pub struct Query {
    pub text: String,
    pub words: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        let words = text.split_whitespace().map(str::to_string).collect();
        Some(Self { text, words })
    }
}

pub fn score(food: &FoodRecord, query: &Query) -> f64 {
    let q = query.text.as_str();
    let name = food.name.to_lowercase();
    let mut score = 0.0;

    if name == q {
        score += EXACT_NAME;
    }
    if name.starts_with(q) {
        score += NAME_PREFIX;
    }
    if name.contains(q) {
        score += NAME_CONTAINS;
    }

    for term in &food.search_terms {
        if term == q {
            score += TERM_EXACT;
        }
        if term.starts_with(q) {
            score += TERM_PREFIX;
        }
        if term.contains(q) {
            score += TERM_CONTAINS;
        }
    }

    if query.words.len() > 1 {
        let matched = query
            .words
            .iter()
            .filter(|w| {
                name.contains(w.as_str()) || food.search_terms.iter().any(|t| t.contains(w.as_str()))
            })
            .count();
        score += matched as f64 / query.words.len() as f64 * MULTI_WORD_MAX;
    }

    if !food.category.is_empty() && food.category.to_lowercase().contains(q) {
        score += CATEGORY_CONTAINS;
    }

    score
}

/// Scores every record, drops zero scores, sorts descending (stable, so
/// ties keep dataset order) and truncates to `limit`.
pub fn rank<'a>(foods: &'a [FoodRecord], raw_query: &str, limit: usize) -> Vec<(&'a FoodRecord, f64)> {
    let Some(query) = Query::parse(raw_query) else {
        return Vec::new();
    };

    let mut scored: Vec<(&FoodRecord, f64)> = foods
        .iter()
        .map(|f| (f, score(f, &query)))
        .filter(|(_, s)| *s > 0.0)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}
