//! Quantity scaling module
//!
//! Scales ingredient amounts and nutrition values between serving counts.

pub mod nutrients;
pub mod quantity;

pub use nutrients::{format_nutrition_value, nutrient_unit, scale_nutrition_value};
pub use quantity::{format_number, parse_number, scale_amount, serving_ratio};
