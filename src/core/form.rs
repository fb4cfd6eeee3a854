//! Form-data parsing and validation at the presentation boundary.
//!
//! The surface captures free text: newline-delimited ingredient and
//! instruction lines, comma-delimited tags, numeric strings. Everything
//! is parsed and validated here before it can reach the store.

use crate::core::error::CarnetError;
use crate::core::model::{Category, Difficulty, NewRecipe};

/// Raw form fields, exactly as captured.
#[derive(Debug, Clone)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    /// One ingredient per line; blank lines are dropped.
    pub ingredients: String,
    /// One step per line; blank lines are dropped.
    pub instructions: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub cooking_time: String,
    pub servings: String,
    /// Comma-delimited; blank tags are dropped.
    pub tags: String,
}

impl RecipeForm {
    /// Validate and convert. All problems are collected into a single
    /// `Validation` error so the user sees the full list at once. New
    /// recipes start unrated; `rate` adjusts the rating afterwards.
    pub fn parse(&self) -> Result<NewRecipe, CarnetError> {
        let mut problems = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            problems.push("title must not be empty".to_string());
        }

        let ingredients = split_lines(&self.ingredients);
        if ingredients.is_empty() {
            problems.push("at least one ingredient is required".to_string());
        }

        let instructions = split_lines(&self.instructions);
        if instructions.is_empty() {
            problems.push("at least one instruction step is required".to_string());
        }

        let cooking_time = match parse_positive("cooking time", &self.cooking_time) {
            Ok(v) => v,
            Err(msg) => {
                problems.push(msg);
                0
            }
        };
        let servings = match parse_positive("servings", &self.servings) {
            Ok(v) => v,
            Err(msg) => {
                problems.push(msg);
                0
            }
        };

        if !problems.is_empty() {
            return Err(CarnetError::Validation(problems.join("; ")));
        }

        Ok(NewRecipe {
            title,
            description: self.description.trim().to_string(),
            ingredients,
            instructions,
            category: self.category,
            cooking_time,
            servings,
            difficulty: self.difficulty,
            rating: 0.0,
            tags: split_tags(&self.tags),
        })
    }
}

/// Split newline-delimited text into trimmed, non-blank lines, keeping order.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split comma-delimited text into trimmed, non-blank tags, keeping order.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric form fields must parse to a positive integer.
pub fn parse_positive(field: &str, raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{} must be a positive number, got '{}'", field, raw.trim())),
    }
}
