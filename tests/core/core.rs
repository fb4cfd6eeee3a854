use carnet::core::mirror::{JsonFileMirror, MemoryMirror, Mirror};
use carnet::core::model::{Category, Difficulty, NewRecipe, Recipe, RecipePatch};
use carnet::core::seed;
use carnet::core::store::RecipeStore;
use carnet::core::time::{Clock, ManualClock, SystemClock};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;
use ulid::Ulid;

fn manual_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

fn new_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: "Une recette de test".to_string(),
        ingredients: vec!["1 ingrédient".to_string()],
        instructions: vec!["Une étape".to_string()],
        category: Category::PlatsPrincipaux,
        cooking_time: 10,
        servings: 2,
        difficulty: Difficulty::Facile,
        rating: 0.0,
        tags: vec!["test".to_string()],
    }
}

#[test]
fn first_load_seeds_an_absent_slot_and_writes_it_back() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("recipes.json");

    let mut store = RecipeStore::new(JsonFileMirror::new(&path), SystemClock);
    assert!(!store.is_loaded());
    let recipes = store.load();
    assert_eq!(recipes.len(), 2);
    assert!(store.is_loaded());
    assert!(path.is_file(), "seed should be written back");

    // A second store sees the persisted seed, not a fresh one.
    let seeded_ids: Vec<String> = store.recipes().iter().map(|r| r.id.clone()).collect();
    let mut again = RecipeStore::new(JsonFileMirror::new(&path), SystemClock);
    again.load();
    let reloaded_ids: Vec<String> = again.recipes().iter().map(|r| r.id.clone()).collect();
    assert_eq!(seeded_ids, reloaded_ids);
}

#[test]
fn an_empty_slot_is_seeded_like_an_absent_one() {
    let mirror = MemoryMirror::with_recipes(Vec::new());
    let mut store = RecipeStore::new(mirror, SystemClock);
    store.load();
    assert_eq!(store.recipes().len(), 2);
}

#[test]
fn a_corrupt_slot_degrades_to_an_empty_collection() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("recipes.json");
    fs::write(&path, "this is not json").unwrap();

    let mut store = RecipeStore::new(JsonFileMirror::new(&path), SystemClock);
    store.load();
    assert!(store.recipes().is_empty());
}

#[test]
fn duplicate_ids_in_the_slot_count_as_corruption() {
    let mut twin = seed::sample_recipes().remove(0);
    twin.id = "dup".to_string();
    let mirror = MemoryMirror::with_recipes(vec![twin.clone(), twin]);
    let mut store = RecipeStore::new(mirror, SystemClock);
    store.load();
    assert!(store.recipes().is_empty());
}

#[test]
fn create_stamps_a_fresh_unique_id_and_equal_timestamps() {
    let clock = manual_clock();
    let now = clock.now();
    let mut store = RecipeStore::new(MemoryMirror::new(), clock);

    let first = store.create(new_recipe("Gratin dauphinois")).unwrap();
    let second = store.create(new_recipe("Soupe à l'oignon")).unwrap();

    assert!(Ulid::from_string(&first.id).is_ok());
    assert_ne!(first.id, second.id);
    assert_eq!(first.created_at, now);
    assert_eq!(first.created_at, first.updated_at);

    let read = store.get(&first.id).unwrap();
    assert_eq!(read.title, "Gratin dauphinois");
}

#[test]
fn update_refreshes_updated_at_and_leaves_other_fields_alone() {
    let clock = manual_clock();
    let mut store = RecipeStore::new(MemoryMirror::new(), clock);
    let created = store.create(new_recipe("Quiche lorraine")).unwrap();

    store.clock().advance_secs(60);
    let updated = store
        .update(
            &created.id,
            RecipePatch {
                servings: Some(6),
                ..Default::default()
            },
        )
        .unwrap()
        .expect("known id");

    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.servings, 6);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.ingredients, created.ingredients);
    assert_eq!(updated.rating, created.rating);
}

#[test]
fn update_on_an_unknown_id_is_a_silent_noop() {
    let mut store = RecipeStore::new(MemoryMirror::new(), manual_clock());
    store.create(new_recipe("Ratatouille")).unwrap();
    let before: Vec<Recipe> = store.recipes().to_vec();

    let result = store
        .update(
            "no-such-id",
            RecipePatch {
                title: Some("x".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(result.is_none());
    assert_eq!(store.recipes(), &before[..]);
}

#[test]
fn delete_removes_permanently_and_noops_on_unknown_ids() {
    let mut store = RecipeStore::new(MemoryMirror::new(), manual_clock());
    let recipe = store.create(new_recipe("Crêpes")).unwrap();

    assert!(store.delete(&recipe.id).unwrap());
    assert!(store.get(&recipe.id).is_none());
    assert!(store.recipes().is_empty());

    assert!(!store.delete(&recipe.id).unwrap());
    assert!(store.recipes().is_empty());
}

#[test]
fn create_then_delete_on_an_empty_collection_leaves_it_empty() {
    let mirror = MemoryMirror::new();
    let mut store = RecipeStore::new(mirror, manual_clock());
    let recipe = store
        .create(NewRecipe {
            title: "Test".to_string(),
            cooking_time: 10,
            servings: 2,
            ..new_recipe("Test")
        })
        .unwrap();
    store.delete(&recipe.id).unwrap();
    assert!(store.recipes().is_empty());
}

#[test]
fn the_slot_round_trips_field_for_field_including_instants() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("recipes.json");

    let mut store = RecipeStore::new(JsonFileMirror::new(&path), manual_clock());
    store.load();
    store.create(new_recipe("Bœuf bourguignon")).unwrap();
    let before: Vec<Recipe> = store.recipes().to_vec();

    let reloaded = JsonFileMirror::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded, before);
}

#[test]
fn every_mutation_rewrites_the_whole_slot() {
    let mut store = RecipeStore::new(MemoryMirror::new(), manual_clock());
    let recipe = store.create(new_recipe("Velouté")).unwrap();
    assert_eq!(store.mirror().snapshot().unwrap().len(), 1);

    store
        .update(
            &recipe.id,
            RecipePatch {
                rating: Some(4.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.mirror().snapshot().unwrap()[0].rating, 4.0);

    store.delete(&recipe.id).unwrap();
    assert!(store.mirror().snapshot().unwrap().is_empty());
}

#[test]
fn a_failing_slot_keeps_the_mutation_in_memory_and_reports_it() {
    let mut store = RecipeStore::new(MemoryMirror::new(), manual_clock());
    store.load();
    assert_eq!(store.recipes().len(), 2);

    store.mirror().fail_saves(true);
    let err = store.create(new_recipe("Tapenade")).unwrap_err();
    assert!(err.to_string().contains("Catalog write failed"));
    assert_eq!(store.recipes().len(), 3);
    assert!(store.recipes().iter().any(|r| r.title == "Tapenade"));
    // The slot still holds the pre-failure state.
    assert_eq!(store.mirror().snapshot().unwrap().len(), 2);

    // The next successful mutation rewrites everything.
    store.mirror().fail_saves(false);
    store.create(new_recipe("Aïoli")).unwrap();
    assert_eq!(store.mirror().snapshot().unwrap().len(), 4);
}

#[test]
fn derived_reads_do_not_mutate_the_collection() {
    let mut store = RecipeStore::new(MemoryMirror::new(), manual_clock());
    store.load();
    let before: Vec<Recipe> = store.recipes().to_vec();

    let desserts = store.by_category(Category::Desserts);
    assert_eq!(desserts.len(), 1);
    assert_eq!(desserts[0].title, "Tarte au citron meringuée");

    let hits = store.search("CHAMPIGNONS");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Risotto aux champignons");

    let ranked = store.by_rating_descending();
    assert_eq!(ranked[0].title, "Tarte au citron meringuée");
    assert!(ranked[0].rating >= ranked[1].rating);

    assert_eq!(store.recipes(), &before[..]);
}
