//! The recipe store: sole owner of the in-memory collection and its
//! durable mirror. Every mutation passes through here and rewrites the
//! whole slot; the catalog is personal-scale, not bulk data.

use crate::core::error::CarnetError;
use crate::core::mirror::Mirror;
use crate::core::model::{Category, NewRecipe, Recipe, RecipePatch};
use crate::core::seed;
use crate::core::time::Clock;
use rustc_hash::FxHashSet;
use ulid::Ulid;

pub struct RecipeStore<M: Mirror, C: Clock> {
    recipes: Vec<Recipe>,
    mirror: M,
    clock: C,
    loaded: bool,
}

impl<M: Mirror, C: Clock> RecipeStore<M, C> {
    pub fn new(mirror: M, clock: C) -> Self {
        Self {
            recipes: Vec::new(),
            mirror,
            clock,
            loaded: false,
        }
    }

    /// Read the mirror once. An absent or empty slot seeds the built-in
    /// example set and writes it back; a corrupt or unreadable slot falls
    /// back to an empty collection. Load itself never fails.
    pub fn load(&mut self) -> &[Recipe] {
        match self.mirror.load() {
            Ok(Some(recipes)) if !recipes.is_empty() => {
                if unique_ids(&recipes) {
                    self.recipes = recipes;
                } else {
                    // Duplicate ids mean the slot was hand-edited or damaged.
                    self.recipes = Vec::new();
                }
            }
            Ok(_) => {
                self.recipes = seed::sample_recipes();
                // First-run write-back; a failure here surfaces on the next mutation.
                let _ = self.mirror.save(&self.recipes);
            }
            Err(_) => {
                self.recipes = Vec::new();
            }
        }
        self.loaded = true;
        &self.recipes
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Stamp a fresh id and both timestamps, append, persist.
    ///
    /// On a mirror failure the recipe stays in the collection and the
    /// error is returned; the next successful mutation rewrites the slot.
    pub fn create(&mut self, input: NewRecipe) -> Result<Recipe, CarnetError> {
        let now = self.clock.now();
        let recipe = Recipe {
            id: Ulid::new().to_string(),
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            instructions: input.instructions,
            category: input.category,
            cooking_time: input.cooking_time,
            servings: input.servings,
            difficulty: input.difficulty,
            rating: input.rating,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        };
        self.recipes.push(recipe.clone());
        self.persist()?;
        Ok(recipe)
    }

    /// Merge a patch onto an existing record and refresh `updated_at`.
    /// Unknown ids are a silent no-op (`Ok(None)`). Mirror failures keep
    /// the in-memory mutation, same as [`Self::create`].
    pub fn update(&mut self, id: &str, patch: RecipePatch) -> Result<Option<Recipe>, CarnetError> {
        let now = self.clock.now();
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply(recipe);
        recipe.updated_at = now;
        let updated = recipe.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove the matching record if present. Unknown ids return
    /// `Ok(false)` without touching the mirror.
    pub fn delete(&mut self, id: &str) -> Result<bool, CarnetError> {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn by_category(&self, category: Category) -> Vec<Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over title, description, and tags.
    pub fn search(&self, query: &str) -> Vec<Recipe> {
        let needle = query.to_lowercase();
        self.recipes
            .iter()
            .filter(|r| r.matches_text(&needle))
            .cloned()
            .collect()
    }

    pub fn by_rating_descending(&self) -> Vec<Recipe> {
        let mut out = self.recipes.clone();
        out.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        out
    }

    fn persist(&self) -> Result<(), CarnetError> {
        self.mirror.save(&self.recipes)
    }
}

fn unique_ids(recipes: &[Recipe]) -> bool {
    let mut seen = FxHashSet::default();
    recipes.iter().all(|r| seen.insert(r.id.as_str()))
}
