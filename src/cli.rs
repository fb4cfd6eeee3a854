//! CLI surface for the carnet binary. Clap types and dispatch live here;
//! all catalog logic is in `carnet::core`.

use carnet::core::config;
use carnet::core::controller::{Intent, Mode, ViewController};
use carnet::core::error::CarnetError;
use carnet::core::form::{self, RecipeForm};
use carnet::core::mirror::{JsonFileMirror, Mirror};
use carnet::core::model::{Category, Difficulty, Recipe, RecipePatch};
use carnet::core::output;
use carnet::core::query::{self, SortOption, ViewOptions};
use carnet::core::store::RecipeStore;
use carnet::core::time::{self, Clock, SystemClock};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

type Store = RecipeStore<JsonFileMirror, SystemClock>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "carnet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Carnet is a local-first personal recipe catalog: add, browse, search, and rate recipes kept in a single plain JSON file. 🍲"
)]
pub struct Cli {
    /// Catalog file (defaults to ~/.carnet/recipes.json).
    #[clap(long, global = true)]
    pub file: Option<PathBuf>,
    /// Output format.
    #[clap(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a recipe.
    Add {
        /// Recipe title (positional argument)
        #[clap(value_name = "TITLE")]
        title: String,
        #[clap(long, default_value = "")]
        description: String,
        /// Newline-delimited ingredient lines.
        #[clap(long, default_value = "")]
        ingredients: String,
        /// Newline-delimited instruction steps.
        #[clap(long, default_value = "")]
        instructions: String,
        #[clap(long, value_enum)]
        category: Category,
        #[clap(long, value_enum, default_value = "moyen")]
        difficulty: Difficulty,
        /// Cooking time in minutes.
        #[clap(long)]
        time: String,
        #[clap(long)]
        servings: String,
        /// Comma-delimited tags.
        #[clap(long, default_value = "")]
        tags: String,
    },
    /// List recipes, filtered and sorted.
    List {
        /// Text filter over title, description, and tags.
        #[clap(long, default_value = "")]
        search: String,
        /// Keep only one category (omit for all).
        #[clap(long, value_enum)]
        category: Option<Category>,
        #[clap(long, value_enum, default_value = "recent")]
        sort: SortOption,
    },
    /// Show one recipe in full.
    Show {
        #[clap(long)]
        id: String,
    },
    /// Edit fields of an existing recipe.
    Edit {
        #[clap(long)]
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        description: Option<String>,
        /// Newline-delimited ingredient lines (replaces the list).
        #[clap(long)]
        ingredients: Option<String>,
        /// Newline-delimited instruction steps (replaces the list).
        #[clap(long)]
        instructions: Option<String>,
        #[clap(long, value_enum)]
        category: Option<Category>,
        #[clap(long, value_enum)]
        difficulty: Option<Difficulty>,
        /// Cooking time in minutes.
        #[clap(long)]
        time: Option<String>,
        #[clap(long)]
        servings: Option<String>,
        /// Comma-delimited tags (replaces the list).
        #[clap(long)]
        tags: Option<String>,
    },
    /// Rate a recipe from 0 to 5.
    Rate {
        #[clap(long)]
        id: String,
        #[clap(value_name = "RATING")]
        rating: f32,
    },
    /// Delete a recipe (asks for confirmation unless --yes).
    Delete {
        #[clap(long)]
        id: String,
        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
    /// Browse the catalog interactively.
    Browse,
}

pub fn run(cli: Cli) -> Result<(), CarnetError> {
    let path = config::resolve_catalog_path(cli.file)?;
    let mut store = RecipeStore::new(JsonFileMirror::new(path), SystemClock);
    store.load();

    match cli.command {
        Command::Add {
            title,
            description,
            ingredients,
            instructions,
            category,
            difficulty,
            time,
            servings,
            tags,
        } => {
            let input = RecipeForm {
                title,
                description,
                ingredients,
                instructions,
                category,
                difficulty,
                cooking_time: time,
                servings,
                tags,
            }
            .parse()?;
            let recipe = store.create(input)?;
            match cli.format {
                OutputFormat::Json => print_envelope(
                    "recipe.add",
                    "ok",
                    serde_json::json!({ "item": recipe }),
                ),
                OutputFormat::Text => {
                    println!(
                        "{} \"{}\" ({})",
                        "Added".bright_green().bold(),
                        recipe.title,
                        recipe.id.dimmed()
                    );
                }
            }
        }
        Command::List {
            search,
            category,
            sort,
        } => {
            let opts = ViewOptions {
                search,
                category,
                sort,
            };
            let visible = query::view(store.recipes(), &opts);
            match cli.format {
                OutputFormat::Json => print_envelope(
                    "recipe.list",
                    "ok",
                    serde_json::json!({ "count": visible.len(), "items": visible }),
                ),
                OutputFormat::Text => render_list(&visible, true),
            }
        }
        Command::Show { id } => match store.get(&id) {
            Some(recipe) => match cli.format {
                OutputFormat::Json => print_envelope(
                    "recipe.show",
                    "ok",
                    serde_json::json!({ "item": recipe }),
                ),
                OutputFormat::Text => render_detail(recipe),
            },
            None => report_not_found(cli.format, "recipe.show", &id),
        },
        Command::Edit {
            id,
            title,
            description,
            ingredients,
            instructions,
            category,
            difficulty,
            time,
            servings,
            tags,
        } => {
            let patch = build_patch(
                title,
                description,
                ingredients,
                instructions,
                category,
                difficulty,
                time,
                servings,
                tags,
            )?;
            match store.update(&id, patch)? {
                Some(recipe) => match cli.format {
                    OutputFormat::Json => print_envelope(
                        "recipe.edit",
                        "ok",
                        serde_json::json!({ "item": recipe }),
                    ),
                    OutputFormat::Text => {
                        println!(
                            "{} \"{}\" ({})",
                            "Updated".bright_green().bold(),
                            recipe.title,
                            recipe.id.dimmed()
                        );
                    }
                },
                None => report_not_found(cli.format, "recipe.edit", &id),
            }
        }
        Command::Rate { id, rating } => {
            if !rating.is_finite() {
                return Err(CarnetError::Validation(
                    "rating must be a number between 0 and 5".to_string(),
                ));
            }
            let rating = rating.clamp(0.0, 5.0);
            let patch = RecipePatch {
                rating: Some(rating),
                ..Default::default()
            };
            match store.update(&id, patch)? {
                Some(recipe) => match cli.format {
                    OutputFormat::Json => print_envelope(
                        "recipe.rate",
                        "ok",
                        serde_json::json!({ "item": recipe }),
                    ),
                    OutputFormat::Text => {
                        println!(
                            "{} \"{}\" at {:.1}★",
                            "Rated".bright_green().bold(),
                            recipe.title,
                            recipe.rating
                        );
                    }
                },
                None => report_not_found(cli.format, "recipe.rate", &id),
            }
        }
        Command::Delete { id, yes } => {
            let Some(title) = store.get(&id).map(|r| r.title.clone()) else {
                report_not_found(cli.format, "recipe.delete", &id);
                return Ok(());
            };
            if !yes && !confirm(&format!("Delete \"{}\"? [y/N] ", title), &mut io::stdin().lock())? {
                match cli.format {
                    OutputFormat::Json => print_envelope(
                        "recipe.delete",
                        "aborted",
                        serde_json::json!({ "id": id }),
                    ),
                    OutputFormat::Text => println!("Aborted."),
                }
                return Ok(());
            }
            store.delete(&id)?;
            match cli.format {
                OutputFormat::Json => print_envelope(
                    "recipe.delete",
                    "ok",
                    serde_json::json!({ "id": id }),
                ),
                OutputFormat::Text => {
                    println!("{} \"{}\"", "Deleted".bright_green().bold(), title)
                }
            }
        }
        Command::Browse => browse(&mut store, &mut io::stdin().lock())?,
    }
    Ok(())
}

fn print_envelope(cmd: &str, status: &str, extra: serde_json::Value) {
    let envelope = time::command_envelope(cmd, status, extra);
    println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
}

fn report_not_found(format: OutputFormat, cmd: &str, id: &str) {
    match format {
        OutputFormat::Json => print_envelope(cmd, "not_found", serde_json::json!({ "id": id })),
        OutputFormat::Text => println!("No recipe with id {}", id),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_patch(
    title: Option<String>,
    description: Option<String>,
    ingredients: Option<String>,
    instructions: Option<String>,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    time: Option<String>,
    servings: Option<String>,
    tags: Option<String>,
) -> Result<RecipePatch, CarnetError> {
    let mut patch = RecipePatch {
        category,
        difficulty,
        ..Default::default()
    };
    if let Some(title) = title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(CarnetError::Validation("title must not be empty".to_string()));
        }
        patch.title = Some(title);
    }
    if let Some(description) = description {
        patch.description = Some(description.trim().to_string());
    }
    if let Some(raw) = ingredients {
        let lines = form::split_lines(&raw);
        if lines.is_empty() {
            return Err(CarnetError::Validation(
                "at least one ingredient is required".to_string(),
            ));
        }
        patch.ingredients = Some(lines);
    }
    if let Some(raw) = instructions {
        let lines = form::split_lines(&raw);
        if lines.is_empty() {
            return Err(CarnetError::Validation(
                "at least one instruction step is required".to_string(),
            ));
        }
        patch.instructions = Some(lines);
    }
    if let Some(raw) = time {
        patch.cooking_time =
            Some(form::parse_positive("cooking time", &raw).map_err(CarnetError::Validation)?);
    }
    if let Some(raw) = servings {
        patch.servings =
            Some(form::parse_positive("servings", &raw).map_err(CarnetError::Validation)?);
    }
    if let Some(raw) = tags {
        patch.tags = Some(form::split_tags(&raw));
    }
    if patch.is_empty() {
        return Err(CarnetError::Validation(
            "nothing to change; pass at least one field flag".to_string(),
        ));
    }
    Ok(patch)
}

fn render_list(recipes: &[Recipe], with_ids: bool) {
    if recipes.is_empty() {
        println!("No recipes match.");
        return;
    }
    for (i, r) in recipes.iter().enumerate() {
        let header = format!(
            "{}. {} — {} · {} · {} min · {:.1}★",
            i + 1,
            r.title.bold(),
            r.category.label(),
            r.difficulty.label(),
            r.cooking_time,
            r.rating
        );
        println!("{}", header);
        if !r.description.is_empty() {
            println!("   {}", output::compact_line(&r.description, 72).dimmed());
        }
        if !r.tags.is_empty() {
            println!("   {}", output::preview_tags(&r.tags, 4).cyan());
        }
        if with_ids {
            println!("   {}", r.id.dimmed());
        }
    }
}

fn render_detail(recipe: &Recipe) {
    println!("{}", recipe.title.bold().underline());
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!(
        "{} · {} · {} min · {} servings · {:.1}★",
        recipe.category.label(),
        recipe.difficulty.label(),
        recipe.cooking_time,
        recipe.servings,
        recipe.rating
    );
    if !recipe.tags.is_empty() {
        println!("{}", output::preview_tags(&recipe.tags, recipe.tags.len()).cyan());
    }
    println!();
    println!("{}", "Ingredients".bright_green().bold());
    for line in &recipe.ingredients {
        println!("  - {}", line);
    }
    println!();
    println!("{}", "Steps".bright_green().bold());
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
    println!(
        "{}",
        format!(
            "id {} · created {} · updated {}",
            recipe.id,
            recipe.created_at.format("%Y-%m-%d"),
            recipe.updated_at.format("%Y-%m-%d")
        )
        .dimmed()
    );
}

/// Explicit confirmation; anything but y/yes declines.
fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool, CarnetError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn prompt_line(prompt: &str, input: &mut impl BufRead) -> Result<Option<String>, CarnetError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    // EOF means the user is done with the session.
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Read lines until a blank one; returns them newline-joined so the
/// result flows through the same form parsing as the one-shot commands.
fn prompt_multiline(label: &str, input: &mut impl BufRead) -> Result<String, CarnetError> {
    println!("{} (one per line, blank line to finish):", label);
    let mut lines = Vec::new();
    loop {
        match prompt_line("  ", &mut *input)? {
            None => break,
            Some(line) if line.trim().is_empty() => break,
            Some(line) => lines.push(line),
        }
    }
    Ok(lines.join("\n"))
}

fn prompt_enum<T: ValueEnum + Copy>(
    label: &str,
    current: T,
    input: &mut impl BufRead,
) -> Result<T, CarnetError> {
    let options = T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    loop {
        let Some(line) = prompt_line(&format!("{} [{}]: ", label, options), &mut *input)? else {
            return Ok(current);
        };
        if line.trim().is_empty() {
            return Ok(current);
        }
        match T::from_str(line.trim(), true) {
            Ok(value) => return Ok(value),
            Err(_) => println!("Expected one of: {}", options),
        }
    }
}

fn prompt_field(label: &str, current: &str, input: &mut impl BufRead) -> Result<String, CarnetError> {
    let shown = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, output::compact_line(current, 40))
    };
    let line = prompt_line(&shown, input)?.unwrap_or_default();
    if line.trim().is_empty() {
        Ok(current.to_string())
    } else {
        Ok(line)
    }
}

/// Interactive session: the list/form/detail state machine driven by
/// stdin commands. One intent at a time, no background work.
fn browse(store: &mut Store, input: &mut impl BufRead) -> Result<(), CarnetError> {
    let mut vc = ViewController::new();
    let mut opts = ViewOptions::default();
    println!(
        "{}",
        "carnet — view N · add · edit N · delete N · search TEXT · category NAME · sort NAME · quit"
            .dimmed()
    );
    loop {
        match vc.mode() {
            Mode::List => {
                let visible = query::view(store.recipes(), &opts);
                println!();
                render_list(&visible, false);
                let Some(line) = prompt_line("> ", &mut *input)? else { break };
                let line = line.trim().to_string();
                let (verb, rest) = match line.split_once(' ') {
                    Some((v, r)) => (v, r.trim()),
                    None => (line.as_str(), ""),
                };
                match verb {
                    "" => {}
                    "q" | "quit" | "exit" => break,
                    "add" | "a" => vc.handle(Intent::Add),
                    "view" | "v" => {
                        if let Some(recipe) = pick(&visible, rest) {
                            vc.handle(Intent::View(recipe));
                        }
                    }
                    "edit" | "e" => {
                        if let Some(recipe) = pick(&visible, rest) {
                            vc.handle(Intent::Edit(recipe));
                        }
                    }
                    "delete" | "d" => {
                        if let Some(recipe) = pick(&visible, rest) {
                            if confirm(&format!("Delete \"{}\"? [y/N] ", recipe.title), &mut *input)? {
                                match store.delete(&recipe.id) {
                                    Ok(_) => println!("Deleted \"{}\"", recipe.title),
                                    Err(e) => warn_persistence(&e),
                                }
                            }
                        }
                    }
                    "search" | "s" => opts.search = rest.to_string(),
                    "category" | "c" => {
                        if rest.eq_ignore_ascii_case("all") || rest.is_empty() {
                            opts.category = None;
                        } else {
                            match Category::from_str(rest, true) {
                                Ok(c) => opts.category = Some(c),
                                Err(_) => println!("Unknown category: {}", rest),
                            }
                        }
                    }
                    "sort" => match SortOption::from_str(rest, true) {
                        Ok(s) => opts.sort = s,
                        Err(_) => println!("Expected: recent | popular | time | title"),
                    },
                    other => println!("Unknown command: {}", other),
                }
            }
            Mode::Detail => {
                let Some(recipe) = vc.selected().cloned() else {
                    vc.handle(Intent::Back);
                    continue;
                };
                println!();
                render_detail(&recipe);
                let Some(line) = prompt_line("[edit | back] > ", &mut *input)? else { break };
                match line.trim() {
                    "edit" | "e" => vc.handle(Intent::Edit(recipe)),
                    "back" | "b" | "" => vc.handle(Intent::Back),
                    other => println!("Unknown command: {}", other),
                }
            }
            Mode::Form => {
                let editing = vc.editing().cloned();
                if fill_form(store, editing.as_ref(), &mut *input)? {
                    vc.handle(Intent::Submitted);
                } else {
                    vc.handle(Intent::Cancel);
                }
            }
        }
    }
    Ok(())
}

/// Resolve a 1-based list index typed by the user.
fn pick(visible: &[Recipe], rest: &str) -> Option<Recipe> {
    if visible.is_empty() {
        println!("The list is empty.");
        return None;
    }
    match rest.parse::<usize>() {
        Ok(n) if n >= 1 && n <= visible.len() => Some(visible[n - 1].clone()),
        _ => {
            println!("Expected a list number between 1 and {}", visible.len());
            None
        }
    }
}

fn warn_persistence(err: &CarnetError) {
    eprintln!(
        "{} {} (the change is kept in memory; saving will be retried on the next change)",
        "warning:".bright_yellow().bold(),
        err
    );
}

/// Prompt the form fields and submit to the store. Returns `Ok(true)` on
/// submit, `Ok(false)` on cancel (empty title for a new recipe). A field
/// that fails validation re-opens the form instead of discarding it.
fn fill_form<M: Mirror, C: Clock>(
    store: &mut RecipeStore<M, C>,
    editing: Option<&Recipe>,
    input: &mut impl BufRead,
) -> Result<bool, CarnetError> {
    println!();
    match editing {
        Some(r) => println!("{} \"{}\" (blank keeps the current value)", "Editing".bold(), r.title),
        None => println!("{} (empty title cancels)", "New recipe".bold()),
    }

    let parsed = loop {
        let title = prompt_field("Title", editing.map(|r| r.title.as_str()).unwrap_or(""), &mut *input)?;
        if title.trim().is_empty() {
            return Ok(false);
        }
        let description = prompt_field(
            "Description",
            editing.map(|r| r.description.as_str()).unwrap_or(""),
            &mut *input,
        )?;
        let ingredients = match editing {
            Some(r) => {
                let raw = prompt_multiline("Ingredients (blank to keep current)", &mut *input)?;
                if raw.is_empty() { r.ingredients.join("\n") } else { raw }
            }
            None => prompt_multiline("Ingredients", &mut *input)?,
        };
        let instructions = match editing {
            Some(r) => {
                let raw = prompt_multiline("Steps (blank to keep current)", &mut *input)?;
                if raw.is_empty() { r.instructions.join("\n") } else { raw }
            }
            None => prompt_multiline("Steps", &mut *input)?,
        };
        let category = prompt_enum(
            "Category",
            editing.map(|r| r.category).unwrap_or(Category::PlatsPrincipaux),
            &mut *input,
        )?;
        let difficulty = prompt_enum(
            "Difficulty",
            editing.map(|r| r.difficulty).unwrap_or(Difficulty::Moyen),
            &mut *input,
        )?;
        let cooking_time = prompt_field(
            "Cooking time (minutes)",
            &editing.map(|r| r.cooking_time.to_string()).unwrap_or_default(),
            &mut *input,
        )?;
        let servings = prompt_field(
            "Servings",
            &editing.map(|r| r.servings.to_string()).unwrap_or_default(),
            &mut *input,
        )?;
        let tags = prompt_field(
            "Tags (comma-delimited)",
            &editing.map(|r| r.tags.join(", ")).unwrap_or_default(),
            &mut *input,
        )?;

        match (RecipeForm {
            title,
            description,
            ingredients,
            instructions,
            category,
            difficulty,
            cooking_time,
            servings,
            tags,
        })
        .parse()
        {
            Ok(parsed) => break parsed,
            Err(CarnetError::Validation(msg)) => {
                println!("{} {}", "Invalid:".bright_yellow().bold(), msg);
            }
            Err(e) => return Err(e),
        }
    };

    match editing {
        Some(existing) => {
            let patch = RecipePatch {
                title: Some(parsed.title),
                description: Some(parsed.description),
                ingredients: Some(parsed.ingredients),
                instructions: Some(parsed.instructions),
                category: Some(parsed.category),
                cooking_time: Some(parsed.cooking_time),
                servings: Some(parsed.servings),
                difficulty: Some(parsed.difficulty),
                // The form carries no rating; the existing one stays.
                rating: None,
                tags: Some(parsed.tags),
            };
            match store.update(&existing.id, patch) {
                Ok(Some(recipe)) => println!("Updated \"{}\"", recipe.title),
                Ok(None) => println!("No recipe with id {}", existing.id),
                Err(e) => warn_persistence(&e),
            }
        }
        None => match store.create(parsed) {
            Ok(recipe) => println!("Added \"{}\"", recipe.title),
            Err(e) => warn_persistence(&e),
        },
    }
    Ok(true)
}
