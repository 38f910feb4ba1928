pub mod categories;
pub mod questions;
pub mod quizzes;

use serde_json::{json, Map, Value};

use crate::db::models::trivia::Category;

/// Wire format for category sets: an object keyed by id, e.g.
/// `{"1": "Science", "2": "Art"}`.
pub(crate) fn categories_map(categories: &[Category]) -> Value {
    let mut map = Map::new();
    for category in categories {
        map.insert(category.id.to_string(), json!(category.kind));
    }
    Value::Object(map)
}
