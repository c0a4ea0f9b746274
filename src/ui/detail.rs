use iced::alignment::Vertical;
use iced::widget::{Button, Column, Row, Scrollable, Space, Text, button};
use iced::{Element, Length};

use crate::Message;
use crate::i18n::tr;
use crate::recipe::Recipe;
use crate::store::StoreError;
use crate::ui::{Feedback, panel};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    Loading,
    Loaded(Recipe),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub recipe_id: String,
    pub content: DetailContent,
    pub confirm_delete: bool,
    pub deleting: bool,
    pub feedback: Option<Feedback>,
}

impl DetailPage {
    pub fn loading(recipe_id: String) -> Self {
        Self {
            recipe_id,
            content: DetailContent::Loading,
            confirm_delete: false,
            deleting: false,
            feedback: None,
        }
    }

    pub fn finish_loading(&mut self, result: Result<Option<Recipe>, StoreError>) {
        self.content = match result {
            Ok(Some(recipe)) => DetailContent::Loaded(recipe),
            Ok(None) => {
                log::warn!("Recipe {} not found", self.recipe_id);
                DetailContent::NotFound
            }
            Err(error) => {
                log::error!("Loading recipe {} failed: {}", self.recipe_id, error);
                DetailContent::Failed(error.to_string())
            }
        };
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match &self.content {
            DetailContent::Loaded(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn request_delete(&mut self) -> bool {
        if self.recipe().is_none() || self.deleting {
            return false;
        }
        self.confirm_delete = true;
        self.feedback = None;
        true
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.confirm_delete = false;
        }
    }

    pub fn begin_delete(&mut self) -> bool {
        if !self.confirm_delete || self.deleting {
            return false;
        }
        self.deleting = true;
        true
    }

    /// Leaves the page intact with the reason shown.
    pub fn delete_failed(&mut self, error: &StoreError) {
        log::error!("Deleting recipe {} failed: {}", self.recipe_id, error);
        self.deleting = false;
        self.confirm_delete = false;
        self.feedback = Some(Feedback::Failure(error.to_string()));
    }
}

pub fn detail_view(page: &DetailPage) -> Element<'_, Message> {
    let back = Button::new(Text::new(tr("Back to Search")).size(14))
        .padding([6, 16])
        .on_press(Message::BackToSearch);

    let body: Element<'_, Message> = match &page.content {
        DetailContent::Loading => Text::new(tr("Loading recipe...")).size(14).into(),
        DetailContent::NotFound => Text::new(tr("Recipe not found. It may have been deleted."))
            .size(14)
            .style(iced::widget::text::danger)
            .into(),
        DetailContent::Failed(reason) => {
            Text::new(reason.as_str()).size(14).style(iced::widget::text::danger).into()
        }
        DetailContent::Loaded(recipe) => recipe_view(recipe, page.deleting),
    };

    let mut column = Column::new()
        .spacing(16)
        .push(Row::new().push(back).push(Space::new().width(Length::Fill)))
        .push(body);

    if let Some(feedback) = &page.feedback {
        column = column.push(feedback.view());
    }

    column.width(Length::Fill).into()
}

fn recipe_view(recipe: &Recipe, deleting: bool) -> Element<'_, Message> {
    let facts = Column::new()
        .spacing(4)
        .push(fact_row("Cuisine", recipe.cuisine_label()))
        .push(fact_row("Category", recipe.category_label()))
        .push(fact_row("Occasion", recipe.occasion_label()))
        .push(fact_row("Last update", recipe.last_update.as_deref().unwrap_or("N/A")));

    let ingredients = Column::new()
        .spacing(4)
        .push(Text::new(tr("Ingredients")).size(18))
        .push(Text::new(recipe.ingredients.as_str()).size(14));

    let mut steps = Column::new().spacing(4).push(Text::new(tr("Steps")).size(18));
    for (index, step) in recipe.steps.iter().enumerate() {
        steps = steps.push(Text::new(format!("{}. {}", index + 1, step)).size(14));
    }

    let mut delete = Button::new(Text::new(tr("Delete")).size(14))
        .padding([6, 16])
        .style(button::danger);
    if !deleting {
        delete = delete.on_press(Message::DeleteRequested);
    }

    let actions = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Space::new().width(Length::Fill))
        .push(
            Button::new(Text::new(tr("Copy JSON")).size(14))
                .padding([6, 16])
                .style(button::secondary)
                .on_press(Message::CopyRecipeJson),
        )
        .push(delete);

    let content = Column::new()
        .spacing(16)
        .push(Text::new(recipe.name.as_str()).size(28))
        .push(panel(facts))
        .push(panel(ingredients))
        .push(panel(steps))
        .push(actions);

    Scrollable::new(content).height(Length::Fill).into()
}

fn fact_row<'a>(label: &'static str, value: &'a str) -> Element<'a, Message> {
    Row::new()
        .spacing(12)
        .push(Text::new(tr(label)).size(14).width(Length::Fixed(120.0)))
        .push(Text::new(value).size(14))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> DetailPage {
        let mut page = DetailPage::loading(String::from("abc"));
        page.finish_loading(Ok(Some(Recipe { name: String::from("Sushi"), ..Recipe::default() })));
        page
    }

    #[test]
    fn missing_recipe_shows_not_found() {
        let mut page = DetailPage::loading(String::from("abc"));
        page.finish_loading(Ok(None));
        assert_eq!(page.content, DetailContent::NotFound);
        assert!(!page.request_delete());
    }

    #[test]
    fn read_failure_keeps_reason() {
        let mut page = DetailPage::loading(String::from("abc"));
        page.finish_loading(Err(StoreError::Read(String::from("socket closed"))));
        assert_eq!(page.content, DetailContent::Failed(String::from("Read error: socket closed")));
    }

    #[test]
    fn delete_needs_confirmation_first() {
        let mut page = loaded();
        assert!(!page.begin_delete());

        assert!(page.request_delete());
        page.cancel_delete();
        assert!(!page.confirm_delete);

        assert!(page.request_delete());
        assert!(page.begin_delete());
        assert!(page.deleting);
        assert!(!page.begin_delete());
    }

    #[test]
    fn failed_delete_reports_and_resets() {
        let mut page = loaded();
        page.request_delete();
        page.begin_delete();
        page.delete_failed(&StoreError::Write(String::from("not acknowledged")));

        assert!(!page.deleting);
        assert!(!page.confirm_delete);
        assert!(page.recipe().is_some());
        assert_eq!(
            page.feedback,
            Some(Feedback::Failure(String::from("Write error: not acknowledged")))
        );
    }
}
