//! Pure filter/search/sort over a recipe collection. Never mutates its
//! input; all sorts are stable so equal keys keep their relative order.

use crate::core::model::{Category, Recipe};
use clap::ValueEnum;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOption {
    /// Newest first (by creation date).
    #[default]
    Recent,
    /// Best rated first.
    Popular,
    /// Quickest first (by cooking time).
    Time,
    /// Alphabetical by title.
    Title,
}

#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Empty means no text filter.
    pub search: String,
    /// `None` means every category.
    pub category: Option<Category>,
    pub sort: SortOption,
}

/// Compute the visible subset: category filter, then text filter, then sort.
pub fn view(recipes: &[Recipe], opts: &ViewOptions) -> Vec<Recipe> {
    let needle = opts.search.trim().to_lowercase();
    let mut out: Vec<Recipe> = recipes
        .iter()
        .filter(|r| opts.category.is_none_or(|c| r.category == c))
        .filter(|r| needle.is_empty() || r.matches_text(&needle))
        .cloned()
        .collect();
    match opts.sort {
        SortOption::Recent => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Popular => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOption::Time => out.sort_by(|a, b| a.cooking_time.cmp(&b.cooking_time)),
        SortOption::Title => out.sort_by(|a, b| title_key(&a.title).cmp(&title_key(&b.title))),
    }
    out
}

// Accent-insensitive case-folded ordering: decompose, drop combining
// marks, lowercase. "Éclair" sorts with the E's, as localized ordering
// expects; full ICU collation is out of proportion here.
fn title_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
