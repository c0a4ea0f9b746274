use iced::alignment::Vertical;
use iced::widget::pick_list::PickList;
use iced::widget::{Button, Column, Row, Scrollable, Space, Text, button, text_input};
use iced::{Element, Length};

use crate::Message;
use crate::filter::RecipeFilter;
use crate::i18n::tr;
use crate::recipe::{
    ALL_CATEGORIES, ALL_CUISINES, ALL_OCCASIONS, Category, Cuisine, Occasion, Recipe,
};
use crate::store::StoreError;
use crate::ui::{Choice, Feedback, field_label, panel};

/// Filter inputs plus the last result list of the search page.
#[derive(Debug, Default)]
pub struct SearchForm {
    pub name: String,
    pub cuisine: Choice<Cuisine>,
    pub category: Choice<Category>,
    pub occasion: Choice<Occasion>,
    results: Option<Vec<Recipe>>,
    pub searching: bool,
    pub feedback: Option<Feedback>,
}

impl SearchForm {
    pub fn to_filter(&self) -> RecipeFilter {
        RecipeFilter::build(
            Some(&self.name),
            self.cuisine.value().map(Cuisine::label),
            self.category.value().map(Category::label),
            self.occasion.value().map(Occasion::label),
        )
    }

    pub fn begin(&mut self) -> RecipeFilter {
        self.searching = true;
        self.feedback = None;
        self.to_filter()
    }

    pub fn finish(&mut self, result: Result<Vec<Recipe>, StoreError>) {
        self.searching = false;
        match result {
            Ok(mut recipes) => {
                let returned = recipes.len();
                recipes.retain(|recipe| recipe.id.is_some());
                if recipes.len() < returned {
                    log::warn!("Hiding {} recipe(s) without an id", returned - recipes.len());
                }
                log::debug!("Search returned {} recipe(s)", recipes.len());
                self.results = Some(recipes);
            }
            Err(error) => {
                log::error!("Search failed: {}", error);
                self.feedback = Some(Feedback::Failure(error.to_string()));
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn results(&self) -> Option<&[Recipe]> {
        self.results.as_deref()
    }

    /// Drops a recipe deleted in this session from the cached results.
    pub fn forget(&mut self, id: &str) {
        if let Some(results) = self.results.as_mut() {
            results.retain(|recipe| recipe.id_hex().as_deref() != Some(id));
        }
    }
}

pub fn search_view(form: &SearchForm) -> Element<'_, Message> {
    let name_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Recipe name"))
        .push(
            text_input(tr("Part of the recipe name"), &form.name)
                .on_input(Message::SearchNameChanged)
                .on_submit(Message::SearchSubmitted)
                .padding([6, 10])
                .width(Length::Fill),
        );

    let cuisine_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Cuisine"))
        .push(
            PickList::new(
                Choice::options(ALL_CUISINES),
                Some(form.cuisine),
                Message::SearchCuisineSelected,
            )
            .width(Length::Fill),
        );

    let category_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Category"))
        .push(
            PickList::new(
                Choice::options(ALL_CATEGORIES),
                Some(form.category),
                Message::SearchCategorySelected,
            )
            .width(Length::Fill),
        );

    let occasion_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Occasion"))
        .push(
            PickList::new(
                Choice::options(ALL_OCCASIONS),
                Some(form.occasion),
                Message::SearchOccasionSelected,
            )
            .width(Length::Fill),
        );

    let mut search_button =
        Button::new(Text::new(tr(if form.searching { "Searching..." } else { "Search" })).size(14))
            .padding([6, 16])
            .style(button::primary);
    if !form.searching {
        search_button = search_button.on_press(Message::SearchSubmitted);
    }

    let clear_button = Button::new(Text::new(tr("Clear filters")).size(14))
        .padding([6, 16])
        .style(button::secondary)
        .on_press(Message::SearchCleared);

    let actions = Row::new()
        .spacing(12)
        .push(Space::new().width(Length::Fill))
        .push(clear_button)
        .push(search_button);

    let filters = panel(
        Column::new()
            .spacing(10)
            .push(name_row)
            .push(cuisine_row)
            .push(category_row)
            .push(occasion_row)
            .push(actions),
    );

    let mut page = Column::new()
        .spacing(16)
        .push(Text::new(tr("Search recipes")).size(24))
        .push(filters);

    if let Some(feedback) = &form.feedback {
        page = page.push(feedback.view());
    }

    if let Some(results) = form.results() {
        page = page.push(results_view(results));
    }

    page.width(Length::Fill).into()
}

fn results_view(results: &[Recipe]) -> Element<'_, Message> {
    if results.is_empty() {
        return Text::new(tr("No recipe found. Try other filters.")).size(14).into();
    }

    let mut list = Column::new()
        .spacing(8)
        .push(Text::new(format!("{}: {}", tr("Recipes found"), results.len())).size(14));

    for recipe in results {
        let Some(id) = recipe.id_hex() else {
            continue;
        };

        let summary = Column::new()
            .spacing(2)
            .push(Text::new(recipe.name.as_str()).size(16))
            .push(
                Text::new(format!(
                    "{} / {} / {}",
                    recipe.cuisine_label(),
                    recipe.category_label(),
                    recipe.occasion_label()
                ))
                .size(12),
            );

        let row = Row::new()
            .spacing(12)
            .align_y(Vertical::Center)
            .push(summary)
            .push(Space::new().width(Length::Fill))
            .push(
                Button::new(Text::new(tr("Show details")).size(14))
                    .padding([4, 12])
                    .on_press(Message::RecipeSelected(id)),
            );

        list = list.push(panel(row).padding([8, 12]));
    }

    Scrollable::new(list).height(Length::Fill).width(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;
    use mongodb::bson::oid::ObjectId;

    fn stored(name: &str) -> Recipe {
        Recipe {
            id: Some(Bson::ObjectId(ObjectId::new())),
            name: name.to_string(),
            ..Recipe::default()
        }
    }

    #[test]
    fn untouched_form_builds_empty_filter() {
        assert!(SearchForm::default().to_filter().is_empty());
    }

    #[test]
    fn selections_become_equality_clauses() {
        let form = SearchForm {
            name: String::from("  curry "),
            cuisine: Choice::Only(Cuisine::Indian),
            occasion: Choice::Only(Occasion::QuickAndEasy),
            ..SearchForm::default()
        };
        let filter = form.to_filter();
        assert_eq!(filter.name.as_deref(), Some("curry"));
        assert_eq!(filter.cuisine.as_deref(), Some("Indian"));
        assert_eq!(filter.category, None);
        assert_eq!(filter.occasion.as_deref(), Some("Quick & Easy"));
    }

    #[test]
    fn failed_search_keeps_previous_results() {
        let mut form = SearchForm::default();
        form.begin();
        form.finish(Ok(vec![stored("Sushi")]));

        form.begin();
        assert!(form.searching);
        form.finish(Err(StoreError::Read(String::from("timeout"))));

        assert!(!form.searching);
        assert_eq!(form.results().map(<[Recipe]>::len), Some(1));
        assert_eq!(form.feedback, Some(Feedback::Failure(String::from("Read error: timeout"))));
    }

    #[test]
    fn recipes_without_id_are_not_listed_or_counted() {
        let mut form = SearchForm::default();
        let unaddressable = Recipe { name: String::from("Ghost"), ..Recipe::default() };
        form.finish(Ok(vec![stored("Sushi"), unaddressable, stored("Ramen")]));

        let names: Vec<_> =
            form.results().unwrap_or_default().iter().map(|recipe| recipe.name.clone()).collect();
        assert_eq!(names, vec![String::from("Sushi"), String::from("Ramen")]);
    }

    #[test]
    fn forget_prunes_only_the_deleted_recipe() {
        let sushi = stored("Sushi");
        let ramen = stored("Ramen");
        let sushi_id = sushi.id_hex().expect("id");

        let mut form = SearchForm::default();
        form.finish(Ok(vec![sushi, ramen]));
        form.forget(&sushi_id);
        let names: Vec<_> =
            form.results().unwrap_or_default().iter().map(|recipe| recipe.name.clone()).collect();
        assert_eq!(names, vec![String::from("Ramen")]);
    }

    #[test]
    fn clear_resets_inputs_and_results() {
        let mut form = SearchForm { name: String::from("soup"), ..SearchForm::default() };
        form.finish(Ok(vec![stored("Miso")]));
        form.clear();
        assert!(form.name.is_empty());
        assert!(form.results().is_none());
    }
}
