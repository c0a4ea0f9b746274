use iced::alignment::Vertical;
use iced::widget::pick_list::PickList;
use iced::widget::text_editor::{self, Action as TextEditorAction, Content as TextEditorContent};
use iced::widget::{Button, Column, Row, Scrollable, Space, Text, button, text, text_input};
use iced::{Element, Length};

use crate::Message;
use crate::i18n::tr;
use crate::recipe::{
    ALL_CATEGORIES, ALL_CUISINES, ALL_OCCASIONS, Category, Cuisine, NAME_MAX_CHARS, NewRecipe,
    Occasion, ValidationError,
};
use crate::session::StepList;
use crate::store::StoreError;
use crate::ui::{Choice, Feedback, field_label, panel};

pub struct RegisterForm {
    pub name: String,
    pub cuisine: Choice<Cuisine>,
    pub category: Choice<Category>,
    pub occasion: Choice<Occasion>,
    pub ingredients: TextEditorContent,
    pub errors: Vec<ValidationError>,
    pub submitting: bool,
    pub feedback: Option<Feedback>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            cuisine: Choice::Any,
            category: Choice::Any,
            occasion: Choice::Any,
            ingredients: TextEditorContent::new(),
            errors: Vec::new(),
            submitting: false,
            feedback: None,
        }
    }
}

impl RegisterForm {
    pub fn set_name(&mut self, value: String) {
        self.name = value.chars().take(NAME_MAX_CHARS).collect();
    }

    pub fn edit_ingredients(&mut self, action: TextEditorAction) {
        self.ingredients.perform(action);
    }

    pub fn draft(&self, steps: &StepList) -> NewRecipe {
        NewRecipe {
            name: self.name.trim().to_string(),
            cuisine: self.cuisine.value(),
            category: self.category.value(),
            occasion: self.occasion.value(),
            ingredients: self.ingredients.text().trim_end().to_string(),
            steps: steps.to_vec(),
        }
    }

    /// Validates the draft; `None` means the errors are now on display.
    pub fn begin_submit(&mut self, steps: &StepList) -> Option<NewRecipe> {
        if self.submitting {
            return None;
        }

        let draft = self.draft(steps);
        self.feedback = None;
        match draft.validate() {
            Ok(()) => {
                self.errors.clear();
                self.submitting = true;
                Some(draft)
            }
            Err(errors) => {
                log::debug!("Registration blocked by {} validation error(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    /// Returns whether the form was cleared.
    pub fn finish_submit(&mut self, result: Result<String, StoreError>) -> bool {
        self.submitting = false;
        match result {
            Ok(id) => {
                *self = Self::default();
                let message = format!("{} ({id})", tr("Recipe registered."));
                self.feedback = Some(Feedback::Success(message));
                true
            }
            Err(error) => {
                log::error!("Registering recipe failed: {}", error);
                self.feedback = Some(Feedback::Failure(error.to_string()));
                false
            }
        }
    }
}

pub fn register_view<'a>(form: &'a RegisterForm, steps: &'a StepList) -> Element<'a, Message> {
    let name_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Recipe name *"))
        .push(
            text_input(tr("Recipe name"), &form.name)
                .on_input(Message::RegisterNameChanged)
                .padding([6, 10])
                .width(Length::Fill),
        )
        .push(
            Text::new(format!("{}/{}", form.name.chars().count(), NAME_MAX_CHARS)).size(12),
        );

    let cuisine_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(field_label("Cuisine"))
        .push(
            PickList::new(
                Choice::options(ALL_CUISINES),
                Some(form.cuisine),
                Message::RegisterCuisineSelected,
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
                Message::RegisterCategorySelected,
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
                Message::RegisterOccasionSelected,
            )
            .width(Length::Fill),
        );

    let ingredients = Column::new()
        .spacing(6)
        .push(Text::new(tr("Ingredients *")).size(14))
        .push(
            text_editor::TextEditor::new(&form.ingredients)
                .placeholder(tr("One ingredient per line"))
                .on_action(Message::IngredientsEdited)
                .height(Length::Fixed(140.0)),
        );

    let submit_label = if form.submitting { "Saving..." } else { "Register" };
    let mut submit = Button::new(Text::new(tr(submit_label)).size(14))
        .padding([6, 16])
        .style(button::primary);
    if !form.submitting {
        submit = submit.on_press(Message::RegisterSubmitted);
    }

    let mut column = Column::new()
        .spacing(16)
        .push(Text::new(tr("Register recipe")).size(24))
        .push(panel(
            Column::new()
                .spacing(10)
                .push(name_row)
                .push(cuisine_row)
                .push(category_row)
                .push(occasion_row)
                .push(ingredients),
        ))
        .push(panel(steps_editor(steps)));

    for error in &form.errors {
        column = column.push(Text::new(error.message()).size(14).style(text::danger));
    }
    if let Some(feedback) = &form.feedback {
        column = column.push(feedback.view());
    }

    column = column.push(Row::new().push(Space::new().width(Length::Fill)).push(submit));

    Scrollable::new(column.width(Length::Fill)).height(Length::Fill).into()
}

fn steps_editor(steps: &StepList) -> Element<'_, Message> {
    let mut column = Column::new().spacing(8).push(Text::new(tr("Steps")).size(18));

    for (index, step) in steps.as_slice().iter().enumerate() {
        column = column.push(
            Row::new()
                .spacing(12)
                .align_y(Vertical::Center)
                .push(
                    Text::new(format!("{} {}", tr("Step"), index + 1))
                        .size(14)
                        .width(Length::Fixed(80.0)),
                )
                .push(
                    text_input(tr("Describe this step"), step)
                        .on_input(move |value| Message::StepChanged(index, value))
                        .padding([6, 10])
                        .width(Length::Fill),
                ),
        );
    }

    let mut remove = Button::new(Text::new(tr("Delete last step")).size(14))
        .padding([6, 16])
        .style(button::secondary);
    if steps.len() > 1 {
        remove = remove.on_press(Message::StepRemoved);
    }

    let add = Button::new(Text::new(tr("Add step")).size(14))
        .padding([6, 16])
        .on_press(Message::StepAdded);

    column.push(Row::new().spacing(12).push(add).push(remove)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RegisterForm {
        let mut form = RegisterForm::default();
        form.set_name(String::from("  Sushi "));
        form.cuisine = Choice::Only(Cuisine::Asian);
        form.ingredients = TextEditorContent::with_text("Rice\nNori\n");
        form
    }

    #[test]
    fn name_input_is_capped() {
        let mut form = RegisterForm::default();
        form.set_name("a".repeat(NAME_MAX_CHARS + 10));
        assert_eq!(form.name.chars().count(), NAME_MAX_CHARS);
    }

    #[test]
    fn draft_trims_and_maps_choices() {
        let mut steps = StepList::default();
        steps.set(0, String::from("Cook rice"));

        let draft = filled_form().draft(&steps);
        assert_eq!(draft.name, "Sushi");
        assert_eq!(draft.cuisine, Some(Cuisine::Asian));
        assert_eq!(draft.category, None);
        assert_eq!(draft.ingredients, "Rice\nNori");
        assert_eq!(draft.steps, vec![String::from("Cook rice")]);
    }

    #[test]
    fn invalid_form_reports_every_error() {
        let mut form = RegisterForm::default();
        assert!(form.begin_submit(&StepList::default()).is_none());
        assert_eq!(
            form.errors,
            vec![ValidationError::MissingName, ValidationError::MissingIngredients]
        );
        assert!(!form.submitting);
    }

    #[test]
    fn valid_form_submits_once() {
        let mut form = filled_form();
        assert!(form.begin_submit(&StepList::default()).is_some());
        assert!(form.submitting);
        assert!(form.begin_submit(&StepList::default()).is_none());
    }

    #[test]
    fn success_clears_the_form() {
        let mut form = filled_form();
        form.begin_submit(&StepList::default());
        assert!(form.finish_submit(Ok(String::from("abc"))));

        assert!(form.name.is_empty());
        assert_eq!(form.cuisine, Choice::Any);
        assert!(form.feedback.as_ref().is_some_and(Feedback::is_success));
    }

    #[test]
    fn failure_keeps_the_form() {
        let mut form = filled_form();
        form.begin_submit(&StepList::default());
        assert!(!form.finish_submit(Err(StoreError::Write(String::from("denied")))));

        assert_eq!(form.name, "  Sushi ");
        assert!(!form.submitting);
        assert_eq!(form.feedback, Some(Feedback::Failure(String::from("Write error: denied"))));
    }
}
