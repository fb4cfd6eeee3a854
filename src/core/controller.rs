//! Screen-mode state machine for the interactive surface: exactly one of
//! list, form, or detail is active, plus at most one selected recipe and
//! at most one editing target.

use crate::core::model::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Form,
    Detail,
}

/// User intents that move between screens. Delete is not an intent here:
/// it never changes mode and its confirmation belongs to the
/// presentation layer.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Open the form to create a new recipe.
    Add,
    /// Open the form to edit an existing recipe (from list or detail).
    Edit(Recipe),
    /// Open the detail screen for a recipe.
    View(Recipe),
    /// Form submitted after a successful store create/update.
    Submitted,
    /// Form abandoned.
    Cancel,
    /// Leave the detail screen.
    Back,
}

#[derive(Debug, Default)]
pub struct ViewController {
    mode: Mode,
    selected: Option<Recipe>,
    editing: Option<Recipe>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The recipe shown on the detail screen, if any.
    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    /// The form's editing target; `None` in form mode means creating new.
    pub fn editing(&self) -> Option<&Recipe> {
        self.editing.as_ref()
    }

    /// Apply one intent. Pairs outside the transition table are no-ops.
    pub fn handle(&mut self, intent: Intent) {
        match (self.mode, intent) {
            (Mode::List, Intent::Add) => {
                self.editing = None;
                self.mode = Mode::Form;
            }
            (Mode::List | Mode::Detail, Intent::Edit(recipe)) => {
                self.editing = Some(recipe);
                self.selected = None;
                self.mode = Mode::Form;
            }
            (Mode::List, Intent::View(recipe)) => {
                self.selected = Some(recipe);
                self.mode = Mode::Detail;
            }
            (Mode::Form, Intent::Submitted | Intent::Cancel) => {
                self.editing = None;
                self.mode = Mode::List;
            }
            (Mode::Detail, Intent::Back) => {
                self.selected = None;
                self.mode = Mode::List;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_recipes;

    #[test]
    fn starts_on_the_list_with_no_selection() {
        let vc = ViewController::new();
        assert_eq!(vc.mode(), Mode::List);
        assert!(vc.selected().is_none());
        assert!(vc.editing().is_none());
    }

    #[test]
    fn add_opens_a_blank_form() {
        let mut vc = ViewController::new();
        vc.handle(Intent::Add);
        assert_eq!(vc.mode(), Mode::Form);
        assert!(vc.editing().is_none());
    }

    #[test]
    fn edit_from_list_sets_the_editing_target() {
        let recipe = sample_recipes().remove(0);
        let mut vc = ViewController::new();
        vc.handle(Intent::Edit(recipe.clone()));
        assert_eq!(vc.mode(), Mode::Form);
        assert_eq!(vc.editing().map(|r| r.id.as_str()), Some(recipe.id.as_str()));
    }

    #[test]
    fn view_then_edit_then_submit_lands_back_on_the_list() {
        let recipe = sample_recipes().remove(0);
        let mut vc = ViewController::new();
        vc.handle(Intent::View(recipe.clone()));
        assert_eq!(vc.mode(), Mode::Detail);
        assert!(vc.selected().is_some());

        vc.handle(Intent::Edit(recipe));
        assert_eq!(vc.mode(), Mode::Form);
        assert!(vc.selected().is_none());
        assert!(vc.editing().is_some());

        vc.handle(Intent::Submitted);
        assert_eq!(vc.mode(), Mode::List);
        assert!(vc.editing().is_none());
    }

    #[test]
    fn cancel_clears_the_editing_target() {
        let recipe = sample_recipes().remove(0);
        let mut vc = ViewController::new();
        vc.handle(Intent::Edit(recipe));
        vc.handle(Intent::Cancel);
        assert_eq!(vc.mode(), Mode::List);
        assert!(vc.editing().is_none());
    }

    #[test]
    fn back_clears_the_selection() {
        let recipe = sample_recipes().remove(0);
        let mut vc = ViewController::new();
        vc.handle(Intent::View(recipe));
        vc.handle(Intent::Back);
        assert_eq!(vc.mode(), Mode::List);
        assert!(vc.selected().is_none());
    }

    #[test]
    fn intents_outside_the_table_are_no_ops() {
        let recipe = sample_recipes().remove(0);
        let mut vc = ViewController::new();
        vc.handle(Intent::Back);
        vc.handle(Intent::Submitted);
        assert_eq!(vc.mode(), Mode::List);

        vc.handle(Intent::Add);
        vc.handle(Intent::View(recipe.clone()));
        vc.handle(Intent::Add);
        assert_eq!(vc.mode(), Mode::Form);
        assert!(vc.selected().is_none());

        vc.handle(Intent::Cancel);
        vc.handle(Intent::View(recipe));
        vc.handle(Intent::Edit(sample_recipes().remove(1)));
        assert_eq!(vc.mode(), Mode::Form);
    }
}
