//! Built-in example recipes, seeded into an empty catalog on first load.

use crate::core::model::{Category, Difficulty, Recipe};
use chrono::{DateTime, TimeZone, Utc};
use ulid::Ulid;

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The starter set. Ids are freshly stamped per seeding; creation dates
/// are fixed so the default list order is stable.
pub fn sample_recipes() -> Vec<Recipe> {
    let risotto_day = day(2024, 1, 15);
    let tarte_day = day(2024, 1, 10);
    vec![
        Recipe {
            id: Ulid::new().to_string(),
            title: "Risotto aux champignons".to_string(),
            description: "Un délicieux risotto crémeux aux champignons de saison".to_string(),
            ingredients: lines(&[
                "300g de riz arborio",
                "400g de champignons mélangés",
                "1L de bouillon de légumes",
                "1 oignon",
                "100ml de vin blanc",
                "50g de parmesan",
                "30g de beurre",
                "Sel, poivre",
            ]),
            instructions: lines(&[
                "Faire chauffer le bouillon dans une casserole",
                "Émincer l'oignon et le faire revenir dans l'huile",
                "Ajouter le riz et le faire nacrer 2 minutes",
                "Verser le vin blanc et laisser évaporer",
                "Ajouter le bouillon louche par louche en remuant",
                "Incorporer les champignons sautés",
                "Terminer avec le parmesan et le beurre",
            ]),
            category: Category::PlatsPrincipaux,
            cooking_time: 35,
            servings: 4,
            difficulty: Difficulty::Moyen,
            rating: 4.5,
            tags: lines(&["végétarien", "italien", "champignons"]),
            created_at: risotto_day,
            updated_at: risotto_day,
        },
        Recipe {
            id: Ulid::new().to_string(),
            title: "Tarte au citron meringuée".to_string(),
            description: "La classique tarte au citron avec sa meringue dorée".to_string(),
            ingredients: lines(&[
                "1 pâte brisée",
                "4 citrons",
                "3 œufs entiers",
                "2 jaunes d'œufs",
                "150g de sucre",
                "80g de beurre",
                "3 blancs d'œufs",
                "80g de sucre glace",
            ]),
            instructions: lines(&[
                "Préchauffer le four à 180°C",
                "Foncer un moule avec la pâte brisée",
                "Cuire à blanc 15 minutes",
                "Préparer la crème au citron avec les œufs, le sucre et le jus de citron",
                "Verser la crème sur la pâte",
                "Monter les blancs en neige avec le sucre glace",
                "Déposer la meringue et dorer au four",
            ]),
            category: Category::Desserts,
            cooking_time: 60,
            servings: 8,
            difficulty: Difficulty::Difficile,
            rating: 4.8,
            tags: lines(&["pâtisserie", "citron", "meringue"]),
            created_at: tarte_day,
            updated_at: tarte_day,
        },
    ]
}
