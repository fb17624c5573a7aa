//! Per-serving nutrition data attached to a recipe
//!
//! Keys are fixed; values are optional so catalog entries can carry any
//! subset.

use serde::{Deserialize, Serialize};

/// Fixed nutrient display order
pub const NUTRIENT_KEYS: &[&str] = &[
    "calories", "protein", "carbs", "fat", "fiber", "sugar", "sodium",
];

/// Nutritional information per serving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub protein: Option<f64>, // grams
    pub carbs: Option<f64>,   // grams
    pub fat: Option<f64>,     // grams
    pub fiber: Option<f64>,   // grams
    pub sugar: Option<f64>,   // grams
    pub sodium: Option<f64>,  // milligrams
}

impl Nutrition {
    /// Present values in fixed display order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let values = [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar,
            self.sodium,
        ];
        NUTRIENT_KEYS
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (*key, v)))
            .collect()
    }

    /// True when no value is present
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// True when every present value is nonnegative
    pub fn is_valid(&self) -> bool {
        self.entries().iter().all(|(_, value)| *value >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_fixed_order() {
        let nutrition = Nutrition {
            calories: Some(320.0),
            protein: Some(12.0),
            sodium: Some(480.0),
            ..Default::default()
        };
        assert_eq!(
            nutrition.entries(),
            vec![("calories", 320.0), ("protein", 12.0), ("sodium", 480.0)]
        );
    }

    #[test]
    fn test_empty_and_validity() {
        assert!(Nutrition::default().is_empty());
        let negative = Nutrition {
            fat: Some(-1.0),
            ..Default::default()
        };
        assert!(!negative.is_valid());
        assert!(Nutrition::default().is_valid());
    }
}
