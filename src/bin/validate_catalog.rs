//! Validate a recipe catalog file
//!
//! Loads the catalog, runs every recipe through schema validation, and
//! reports per-recipe results. Exits nonzero when anything fails, so it
//! can gate catalog edits.
//!
//! Usage: validate_catalog [path/to/catalog.json]

use std::path::PathBuf;
use std::process::ExitCode;

use chefmate::config::AppConfig;
use chefmate::models::Recipe;

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| AppConfig::from_env().catalog_path);

    println!("Validating catalog: {}", path.display());

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let catalog: Vec<Recipe> = match serde_json::from_str(&text) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to parse catalog JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0;
    for recipe in &catalog {
        match recipe.validate() {
            Ok(()) => println!(
                "  ok    {} \"{}\" ({} ingredients, {} steps)",
                recipe.id,
                recipe.name,
                recipe.ingredients.len(),
                recipe.steps.len()
            ),
            Err(e) => {
                failures += 1;
                println!("  FAIL  {} \"{}\": {}", recipe.id, recipe.name, e);
            }
        }
    }

    println!(
        "{} recipes checked, {} invalid",
        catalog.len(),
        failures
    );

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
