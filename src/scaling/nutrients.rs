//! Nutrition value scaling and display formatting
//!
//! Nutrition values are plain numbers keyed by nutrient name, so unlike
//! ingredient amounts there is no parsing step; scaling is a single
//! multiplication and display rounds to whole numbers.

use super::quantity::serving_ratio;

/// Display unit for a nutrient key (case-insensitive); empty for unknown keys
pub fn nutrient_unit(key: &str) -> &'static str {
    match key.to_lowercase().as_str() {
        "calories" => "cal",
        "protein" | "carbs" | "fat" | "fiber" | "sugar" => "g",
        "sodium" => "mg",
        _ => "",
    }
}

/// Scale a plain nutrition value by the serving ratio
pub fn scale_nutrition_value(value: f64, base_servings: f64, target_servings: f64) -> f64 {
    value * serving_ratio(base_servings, target_servings)
}

/// Format a nutrition value for display: scaled, rounded to a whole number,
/// unit appended with no space ("400cal", "5g", "200mg")
pub fn format_nutrition_value(
    key: &str,
    value: f64,
    base_servings: f64,
    target_servings: f64,
) -> String {
    let unit = nutrient_unit(key);
    let scaled = scale_nutrition_value(value, base_servings, target_servings).round();
    if unit.is_empty() {
        format!("{}", scaled as i64)
    } else {
        format!("{}{}", scaled as i64, unit)
    }
}
