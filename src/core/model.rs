//! Recipe data model shared by the store, the query engine, and the CLI.
//!
//! Serde names stay camelCase/kebab-case so the catalog file is
//! byte-compatible with payloads exported from the original web app.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Entrees,
    PlatsPrincipaux,
    Desserts,
    Boissons,
    Accompagnements,
    Sauces,
}

impl Category {
    /// Display label matching the catalog's French data.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Entrees => "Entrées",
            Category::PlatsPrincipaux => "Plats principaux",
            Category::Desserts => "Desserts",
            Category::Boissons => "Boissons",
            Category::Accompagnements => "Accompagnements",
            Category::Sauces => "Sauces",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facile,
    Moyen,
    Difficile,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Moyen => "Moyen",
            Difficulty::Difficile => "Difficile",
        }
    }
}

/// One catalog entry. `id` and both timestamps are stamped by the store,
/// never by callers; `ingredients` and `instructions` keep their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub category: Category,
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Case-insensitive substring match against title, description, or any tag.
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Create input: a recipe without id or timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub category: Category,
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub rating: f32,
    pub tags: Vec<String>,
}

/// Partial update merged onto an existing record by the store.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub category: Option<Category>,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub rating: Option<f32>,
    pub tags: Option<Vec<String>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.category.is_none()
            && self.cooking_time.is_none()
            && self.servings.is_none()
            && self.difficulty.is_none()
            && self.rating.is_none()
            && self.tags.is_none()
    }

    pub fn apply(self, recipe: &mut Recipe) {
        if let Some(title) = self.title {
            recipe.title = title;
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(category) = self.category {
            recipe.category = category;
        }
        if let Some(cooking_time) = self.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(rating) = self.rating {
            recipe.rating = rating;
        }
        if let Some(tags) = self.tags {
            recipe.tags = tags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn recipe() -> Recipe {
        Recipe {
            id: "01J0000000000000000000TEST".to_string(),
            title: "Risotto aux champignons".to_string(),
            description: "Un délicieux risotto crémeux".to_string(),
            ingredients: vec!["300g de riz arborio".to_string()],
            instructions: vec!["Faire chauffer le bouillon".to_string()],
            category: Category::PlatsPrincipaux,
            cooking_time: 35,
            servings: 4,
            difficulty: Difficulty::Moyen,
            rating: 4.5,
            tags: vec!["végétarien".to_string(), "italien".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn matches_text_covers_title_description_and_tags() {
        let r = recipe();
        assert!(r.matches_text("risotto"));
        assert!(r.matches_text("crémeux"));
        assert!(r.matches_text("italien"));
        assert!(!r.matches_text("citron"));
    }

    #[test]
    fn matches_text_is_case_insensitive() {
        let r = recipe();
        assert!(r.matches_text(&"RISOTTO".to_lowercase()));
    }

    #[test]
    fn wire_format_stays_compatible_with_the_web_export() {
        let value = serde_json::to_value(recipe()).unwrap();
        assert_eq!(value["category"], "plats-principaux");
        assert_eq!(value["difficulty"], "moyen");
        assert_eq!(value["cookingTime"], 35);
        assert!(value["createdAt"].is_string());
        assert!(value.get("cooking_time").is_none());
    }

    #[test]
    fn patch_apply_leaves_unspecified_fields_alone() {
        let mut r = recipe();
        let before = r.clone();
        RecipePatch {
            title: Some("Risotto".to_string()),
            ..Default::default()
        }
        .apply(&mut r);
        assert_eq!(r.title, "Risotto");
        assert_eq!(r.description, before.description);
        assert_eq!(r.rating, before.rating);
        assert_eq!(r.created_at, before.created_at);
    }
}
