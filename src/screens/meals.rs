use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::domain::{MealType, Recipe};
use crate::metrics::filter_recipes;
use crate::notice::{NoticeKind, Notices};
use crate::seed;
use crate::store::Screen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealsState {
    /// Every recipe suggestions can be drawn from.
    pub catalog: Vec<Recipe>,
    /// Recipes revealed so far, in reveal order.
    pub recipes: Vec<Recipe>,
    pub search: String,
    pub meal_type: MealType,
    pub pantry: Vec<String>,
    pub ingredient_draft: String,
    pub open_recipe: Option<String>,
    pub favorites: Vec<String>,
    /// Recipe ids planned per day.
    pub meal_plan: BTreeMap<NaiveDate, Vec<String>>,
    pub notices: Notices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealsAction {
    Search(String),
    SelectMealType(MealType),
    EditIngredient(String),
    AddIngredient,
    OpenRecipe(String),
    CloseRecipe,
    ToggleFavorite(String),
    AddToPlan(String),
    /// Reveals the next catalog recipe not yet shown.
    Generate,
    DismissNotice(String),
    ExpireNotices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealsMetrics {
    pub visible: Vec<Recipe>,
    pub remaining_suggestions: usize,
    pub favorites: usize,
    pub planned_today: Vec<String>,
    pub open_recipe: Option<Recipe>,
}

impl MealsState {
    pub fn new(catalog: Vec<Recipe>, initially_shown: usize) -> Self {
        let recipes = catalog.iter().take(initially_shown).cloned().collect();
        Self {
            catalog,
            recipes,
            search: String::new(),
            meal_type: MealType::All,
            pantry: seed::pantry(),
            ingredient_draft: String::new(),
            open_recipe: None,
            favorites: vec!["2".to_string()],
            meal_plan: BTreeMap::new(),
            notices: Notices::default(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::recipe_catalog(), seed::INITIAL_RECIPES_SHOWN)
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|id| id == recipe_id)
    }

    fn shown(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == recipe_id)
    }

    fn apply(&mut self, action: MealsAction, context: &Context) {
        match action {
            MealsAction::Search(term) => self.search = term,
            MealsAction::SelectMealType(meal_type) => self.meal_type = meal_type,
            MealsAction::EditIngredient(text) => self.ingredient_draft = text,
            MealsAction::AddIngredient => self.add_ingredient(),
            MealsAction::OpenRecipe(recipe_id) => {
                if self.shown(&recipe_id).is_some() {
                    self.open_recipe = Some(recipe_id);
                } else {
                    tracing::warn!(%recipe_id, "open for unknown recipe ignored");
                }
            }
            MealsAction::CloseRecipe => self.open_recipe = None,
            MealsAction::ToggleFavorite(recipe_id) => self.toggle_favorite(recipe_id, context),
            MealsAction::AddToPlan(recipe_id) => self.add_to_plan(recipe_id, context),
            MealsAction::Generate => self.generate(context),
            MealsAction::DismissNotice(id) => self.notices.dismiss(&id),
            MealsAction::ExpireNotices => self.notices.expire(context.now(), context.notice_ttl),
        }
    }

    fn add_ingredient(&mut self) {
        let ingredient = self.ingredient_draft.trim().to_lowercase();
        if ingredient.is_empty() || self.pantry.contains(&ingredient) {
            return;
        }
        self.pantry.push(ingredient);
        self.ingredient_draft.clear();
    }

    fn toggle_favorite(&mut self, recipe_id: String, context: &Context) {
        if self.shown(&recipe_id).is_none() {
            tracing::warn!(%recipe_id, "favorite for unknown recipe ignored");
            return;
        }

        if self.is_favorite(&recipe_id) {
            self.favorites.retain(|id| *id != recipe_id);
            self.notices.raise("Removed from favorites", NoticeKind::Info, context);
        } else {
            self.favorites.push(recipe_id);
            self.notices.raise("Saved to favorites!", NoticeKind::Success, context);
        }
    }

    fn add_to_plan(&mut self, recipe_id: String, context: &Context) {
        let Some(name) = self.shown(&recipe_id).map(|recipe| recipe.name.clone()) else {
            tracing::warn!(%recipe_id, "plan for unknown recipe ignored");
            return;
        };

        self.meal_plan
            .entry(context.today())
            .or_default()
            .push(recipe_id);
        self.open_recipe = None;
        self.notices
            .raise(format!("Added {name} to your plan!"), NoticeKind::Success, context);
    }

    fn generate(&mut self, context: &Context) {
        let next = self
            .catalog
            .iter()
            .find(|candidate| self.shown(&candidate.id).is_none())
            .cloned();

        match next {
            Some(recipe) => {
                tracing::debug!(recipe_id = %recipe.id, "revealed recipe");
                self.recipes.push(recipe);
            }
            None => self
                .notices
                .raise("No more recipes to show!", NoticeKind::Warning, context),
        }
    }
}

impl Screen for MealsState {
    type Action = MealsAction;
    type Metrics = MealsMetrics;

    fn reduce(&self, action: MealsAction, context: &Context) -> Self {
        let mut next = self.clone();
        next.apply(action, context);
        next
    }

    fn metrics(&self, context: &Context) -> MealsMetrics {
        let planned_today = self
            .meal_plan
            .get(&context.today())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.shown(id))
                    .map(|recipe| recipe.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        MealsMetrics {
            visible: filter_recipes(&self.recipes, &self.search, self.meal_type)
                .into_iter()
                .cloned()
                .collect(),
            remaining_suggestions: self
                .catalog
                .iter()
                .filter(|recipe| self.shown(&recipe.id).is_none())
                .count(),
            favorites: self.favorites.len(),
            planned_today,
            open_recipe: self
                .open_recipe
                .as_deref()
                .and_then(|id| self.shown(id))
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::capabilities::testing::{at, fixed_context};

    #[test]
    fn generate_reveals_catalog_in_order_then_reports_exhaustion() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let mut state = MealsState::seeded();
        assert_eq!(state.metrics(&context).remaining_suggestions, 3);

        for expected in ["4", "5", "6"] {
            state = state.reduce(MealsAction::Generate, &context);
            assert_eq!(state.recipes.last().map(|recipe| recipe.id.as_str()), Some(expected));
        }
        assert!(state.notices.is_empty());

        let exhausted = state.reduce(MealsAction::Generate, &context);
        assert_eq!(exhausted.recipes, state.recipes);
        assert_eq!(
            exhausted.notices.latest().map(|notice| notice.message.as_str()),
            Some("No more recipes to show!")
        );
    }

    #[test]
    fn favorites_toggle_with_notices() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded();
        assert!(state.is_favorite("2"));

        let removed = state.reduce(MealsAction::ToggleFavorite("2".to_string()), &context);
        assert!(!removed.is_favorite("2"));
        assert_eq!(
            removed.notices.latest().map(|notice| notice.message.as_str()),
            Some("Removed from favorites")
        );

        let saved = removed.reduce(MealsAction::ToggleFavorite("2".to_string()), &context);
        assert!(saved.is_favorite("2"));
        assert_eq!(saved.notices.len(), 2);

        let unknown = state.reduce(MealsAction::ToggleFavorite("99".to_string()), &context);
        assert_eq!(unknown, state);
    }

    #[test]
    fn adding_to_plan_closes_the_open_recipe() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded()
            .reduce(MealsAction::OpenRecipe("3".to_string()), &context)
            .reduce(MealsAction::AddToPlan("3".to_string()), &context);
        assert_eq!(state.open_recipe, None);

        let metrics = state.metrics(&context);
        assert_eq!(metrics.planned_today, ["Avocado Toast with Egg"]);
        assert_eq!(
            state.notices.latest().map(|notice| notice.message.as_str()),
            Some("Added Avocado Toast with Egg to your plan!")
        );
    }

    #[test]
    fn pantry_ingredients_are_normalised_and_unique() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded()
            .reduce(MealsAction::EditIngredient("  Kale ".to_string()), &context)
            .reduce(MealsAction::AddIngredient, &context);
        assert_eq!(state.pantry.last().map(String::as_str), Some("kale"));
        assert!(state.ingredient_draft.is_empty());

        let duplicate = state
            .reduce(MealsAction::EditIngredient("RICE".to_string()), &context)
            .reduce(MealsAction::AddIngredient, &context);
        assert_eq!(duplicate.pantry, state.pantry);
        assert_eq!(duplicate.ingredient_draft, "RICE");

        let blank = state
            .reduce(MealsAction::EditIngredient("   ".to_string()), &context)
            .reduce(MealsAction::AddIngredient, &context);
        assert_eq!(blank.pantry, state.pantry);
    }

    #[test]
    fn visible_recipes_follow_search_and_meal_type() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded()
            .reduce(MealsAction::SelectMealType(MealType::Breakfast), &context);
        let names = state
            .metrics(&context)
            .visible
            .into_iter()
            .map(|recipe| recipe.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["Avocado Toast with Egg"]);

        let searched = MealsState::seeded()
            .reduce(MealsAction::Search("bowl".to_string()), &context)
            .metrics(&context);
        assert_eq!(searched.visible.len(), 1);
        assert_eq!(searched.visible[0].id, "1");
    }

    #[test]
    fn dismissing_a_notice_keeps_the_others() {
        let (context, _) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded()
            .reduce(MealsAction::ToggleFavorite("1".to_string()), &context)
            .reduce(MealsAction::ToggleFavorite("3".to_string()), &context);
        let first = state.notices.iter().next().map(|notice| notice.id.clone()).expect("raised");

        let dismissed = state.reduce(MealsAction::DismissNotice(first), &context);
        assert_eq!(dismissed.notices.len(), 1);
        assert_eq!(dismissed.favorites, state.favorites);
    }

    #[test]
    fn notices_expire_through_the_reducer() {
        let (context, clock) = fixed_context(at(2026, 9, 1, 12, 0));
        let state = MealsState::seeded().reduce(MealsAction::ToggleFavorite("1".to_string()), &context);
        clock.advance(Duration::seconds(1));
        assert_eq!(state.reduce(MealsAction::ExpireNotices, &context).notices.len(), 1);
        clock.advance(Duration::seconds(5));
        assert!(state.reduce(MealsAction::ExpireNotices, &context).notices.is_empty());
    }
}
