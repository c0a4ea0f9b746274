use iced::alignment::Vertical;
use iced::widget::pick_list::PickList;
use iced::widget::text_editor::Action as TextEditorAction;
use iced::widget::{Button, Column, Container, Row, Space, Stack, Text, button, opaque};
use iced::{Element, Length, Task};

mod filter;
mod i18n;
mod logging;
mod recipe;
mod session;
mod settings;
mod store;
mod ui;

use crate::i18n::{ALL_LANGUAGES, Language, tr};
use crate::recipe::{Category, Cuisine, Occasion, Recipe};
use crate::session::{Session, View};
use crate::settings::AppSettings;
use crate::store::{StoreError, StoreHandle};
use crate::ui::detail::{DetailPage, detail_view};
use crate::ui::modal;
use crate::ui::register::{RegisterForm, register_view};
use crate::ui::search::{SearchForm, search_view};
use crate::ui::{Choice, Feedback};

fn main() -> iced::Result {
    iced::application(App::init, App::update, App::view)
        .title(App::title)
        .window_size((960.0, 760.0))
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Search,
    Register,
}

impl Page {
    fn label(self) -> &'static str {
        match self {
            Page::Search => "Search recipes",
            Page::Register => "Register recipe",
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    Connecting,
    Ready(StoreHandle),
    Failed(String),
}

struct App {
    settings: AppSettings,
    use_mock: bool,
    backend: Backend,
    page: Page,
    session: Session,
    search: SearchForm,
    detail: Option<DetailPage>,
    register: RegisterForm,
}

#[derive(Debug, Clone)]
enum Message {
    StoreOpened(Result<StoreHandle, StoreError>),
    RetryConnection,
    PageSelected(Page),
    LanguageSelected(Language),
    SearchNameChanged(String),
    SearchCuisineSelected(Choice<Cuisine>),
    SearchCategorySelected(Choice<Category>),
    SearchOccasionSelected(Choice<Occasion>),
    SearchSubmitted,
    SearchCleared,
    SearchCompleted(Result<Vec<Recipe>, StoreError>),
    RecipeSelected(String),
    RecipeLoaded { recipe_id: String, result: Result<Option<Recipe>, StoreError> },
    BackToSearch,
    DeleteRequested,
    DeleteCancelled,
    DeleteConfirmed,
    DeleteCompleted { recipe_id: String, result: Result<(), StoreError> },
    CopyRecipeJson,
    RegisterNameChanged(String),
    RegisterCuisineSelected(Choice<Cuisine>),
    RegisterCategorySelected(Choice<Category>),
    RegisterOccasionSelected(Choice<Occasion>),
    IngredientsEdited(TextEditorAction),
    StepChanged(usize, String),
    StepAdded,
    StepRemoved,
    RegisterSubmitted,
    RegisterCompleted(Result<String, StoreError>),
}

impl App {
    fn init() -> (Self, Task<Message>) {
        let (mut app_settings, load_error) = match settings::load_from_disk() {
            Ok(loaded) => (loaded, None),
            Err(error) => (AppSettings::default(), Some(error)),
        };
        app_settings.apply_env_overrides();

        logging::apply_settings(&app_settings);
        i18n::init_language(app_settings.language);
        if let Some(error) = load_error {
            log::warn!("Falling back to default settings: {}", error);
        }

        let mut app = Self::new(app_settings, settings::use_mock_backend());
        let task = app.connect();
        (app, task)
    }

    fn new(settings: AppSettings, use_mock: bool) -> Self {
        Self {
            settings,
            use_mock,
            backend: Backend::Connecting,
            page: Page::Search,
            session: Session::default(),
            search: SearchForm::default(),
            detail: None,
            register: RegisterForm::default(),
        }
    }

    fn title(&self) -> String {
        String::from(tr("Recipe Book"))
    }

    fn connect(&mut self) -> Task<Message> {
        self.backend = Backend::Connecting;
        let mongo = self.settings.mongo.clone();
        let use_mock = self.use_mock;
        Task::perform(async move { store::open_store(&mongo, use_mock) }, Message::StoreOpened)
    }

    fn store(&self) -> Option<StoreHandle> {
        match &self.backend {
            Backend::Ready(store) => Some(store.clone()),
            _ => None,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StoreOpened(result) => {
                self.backend = match result {
                    Ok(store) => Backend::Ready(store),
                    Err(error) => {
                        log::error!("Could not open recipe store: {}", error);
                        Backend::Failed(error.to_string())
                    }
                };
                Task::none()
            }
            Message::RetryConnection => self.connect(),
            Message::PageSelected(page) => {
                self.page = page;
                Task::none()
            }
            Message::LanguageSelected(language) => {
                if self.settings.language != language {
                    self.settings.language = language;
                    i18n::set_language(language);
                    if let Err(error) = settings::save_to_disk(&self.settings) {
                        log::error!("Failed to save settings: {}", error);
                    }
                }
                Task::none()
            }
            Message::SearchNameChanged(value) => {
                self.search.name = value;
                Task::none()
            }
            Message::SearchCuisineSelected(choice) => {
                self.search.cuisine = choice;
                Task::none()
            }
            Message::SearchCategorySelected(choice) => {
                self.search.category = choice;
                Task::none()
            }
            Message::SearchOccasionSelected(choice) => {
                self.search.occasion = choice;
                Task::none()
            }
            Message::SearchSubmitted => self.search_task(),
            Message::SearchCleared => {
                self.search.clear();
                Task::none()
            }
            Message::SearchCompleted(result) => {
                self.search.finish(result);
                Task::none()
            }
            Message::RecipeSelected(recipe_id) => self.select_recipe(recipe_id),
            Message::RecipeLoaded { recipe_id, result } => {
                if let Some(detail) = self.current_detail_mut(&recipe_id) {
                    detail.finish_loading(result);
                }
                Task::none()
            }
            Message::BackToSearch => {
                self.session.back();
                self.detail = None;
                Task::none()
            }
            Message::DeleteRequested => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.request_delete();
                }
                Task::none()
            }
            Message::DeleteCancelled => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.cancel_delete();
                }
                Task::none()
            }
            Message::DeleteConfirmed => self.delete_task(),
            Message::DeleteCompleted { recipe_id, result } => {
                match result {
                    Ok(()) => {
                        log::info!("Recipe {} deleted from the detail view", recipe_id);
                        self.search.forget(&recipe_id);
                        if self.session.finish_delete(&recipe_id) {
                            self.detail = None;
                        }
                        self.search.feedback =
                            Some(Feedback::Success(String::from(tr("Recipe deleted."))));
                    }
                    Err(error) => {
                        if let Some(detail) = self.current_detail_mut(&recipe_id) {
                            detail.delete_failed(&error);
                        }
                    }
                }
                Task::none()
            }
            Message::CopyRecipeJson => {
                let Some(recipe) = self.detail.as_ref().and_then(DetailPage::recipe) else {
                    return Task::none();
                };
                match recipe.to_pretty_json() {
                    Ok(json) => iced::clipboard::write(json),
                    Err(error) => {
                        log::error!("Could not render recipe as JSON: {}", error);
                        Task::none()
                    }
                }
            }
            Message::RegisterNameChanged(value) => {
                self.register.set_name(value);
                Task::none()
            }
            Message::RegisterCuisineSelected(choice) => {
                self.register.cuisine = choice;
                Task::none()
            }
            Message::RegisterCategorySelected(choice) => {
                self.register.category = choice;
                Task::none()
            }
            Message::RegisterOccasionSelected(choice) => {
                self.register.occasion = choice;
                Task::none()
            }
            Message::IngredientsEdited(action) => {
                self.register.edit_ingredients(action);
                Task::none()
            }
            Message::StepChanged(index, value) => {
                self.session.steps.set(index, value);
                Task::none()
            }
            Message::StepAdded => {
                self.session.steps.push_empty();
                Task::none()
            }
            Message::StepRemoved => {
                self.session.steps.remove_last();
                Task::none()
            }
            Message::RegisterSubmitted => self.register_task(),
            Message::RegisterCompleted(result) => {
                if self.register.finish_submit(result) {
                    self.session.steps.reset();
                }
                Task::none()
            }
        }
    }

    fn current_detail_mut(&mut self, recipe_id: &str) -> Option<&mut DetailPage> {
        self.detail.as_mut().filter(|detail| detail.recipe_id == recipe_id)
    }

    fn search_task(&mut self) -> Task<Message> {
        let Some(store) = self.store() else {
            return Task::none();
        };
        if self.search.searching {
            return Task::none();
        }

        let filter = self.search.begin();
        Task::perform(async move { store.search(&filter) }, Message::SearchCompleted)
    }

    fn select_recipe(&mut self, recipe_id: String) -> Task<Message> {
        let Some(store) = self.store() else {
            return Task::none();
        };

        self.session.select(recipe_id.clone());
        self.detail = Some(DetailPage::loading(recipe_id.clone()));
        log::debug!("Fetching recipe {}", recipe_id);

        Task::perform(
            {
                let recipe_id = recipe_id.clone();
                async move { store.get_by_id(&recipe_id) }
            },
            move |result| Message::RecipeLoaded { recipe_id, result },
        )
    }

    fn delete_task(&mut self) -> Task<Message> {
        let Some(store) = self.store() else {
            return Task::none();
        };
        let Some(detail) = self.detail.as_mut() else {
            return Task::none();
        };
        if !detail.begin_delete() {
            return Task::none();
        }

        let recipe_id = detail.recipe_id.clone();
        Task::perform(
            {
                let recipe_id = recipe_id.clone();
                async move { store.delete_by_id(&recipe_id) }
            },
            move |result| Message::DeleteCompleted { recipe_id, result },
        )
    }

    fn register_task(&mut self) -> Task<Message> {
        let Some(store) = self.store() else {
            return Task::none();
        };
        let Some(draft) = self.register.begin_submit(&self.session.steps) else {
            return Task::none();
        };

        Task::perform(async move { store.insert(&draft) }, Message::RegisterCompleted)
    }

    fn view(&self) -> Element<'_, Message> {
        let content = match &self.backend {
            Backend::Connecting => {
                self.status_view(tr("Connecting to the recipe database..."), None)
            }
            Backend::Failed(reason) => self.status_view(
                tr("Could not connect to the recipe database."),
                Some(reason.as_str()),
            ),
            Backend::Ready(_) => self.page_view(),
        };

        let body = Column::new()
            .push(self.header())
            .push(Container::new(content).padding(16).width(Length::Fill).height(Length::Fill))
            .height(Length::Fill);

        let confirm = self
            .detail
            .as_ref()
            .filter(|detail| detail.confirm_delete)
            .and_then(|detail| detail.recipe().map(|recipe| (recipe, detail.deleting)));

        match confirm {
            Some((recipe, deleting)) => Stack::new()
                .push(body)
                .push(opaque(modal::delete_confirmation(&recipe.name, deleting)))
                .into(),
            None => body.into(),
        }
    }

    fn header(&self) -> Element<'_, Message> {
        let page_button = |page: Page| {
            let entry = Button::new(Text::new(tr(page.label())).size(14)).padding([6, 16]);
            if self.page == page {
                entry.style(button::primary)
            } else {
                entry.style(button::secondary).on_press(Message::PageSelected(page))
            }
        };

        Row::new()
            .spacing(8)
            .padding([8, 16])
            .align_y(Vertical::Center)
            .push(Text::new(tr("Recipe Book")).size(20))
            .push(Space::new().width(Length::Fixed(24.0)))
            .push(page_button(Page::Search))
            .push(page_button(Page::Register))
            .push(Space::new().width(Length::Fill))
            .push(Text::new(tr("Language")).size(14))
            .push(
                PickList::new(
                    ALL_LANGUAGES,
                    Some(self.settings.language),
                    Message::LanguageSelected,
                )
                .width(Length::Fixed(140.0)),
            )
            .into()
    }

    fn page_view(&self) -> Element<'_, Message> {
        match self.page {
            Page::Search => match (self.session.view(), &self.detail) {
                (View::Detail(_), Some(detail)) => detail_view(detail),
                _ => search_view(&self.search),
            },
            Page::Register => register_view(&self.register, &self.session.steps),
        }
    }

    fn status_view<'a>(
        &self,
        headline: &'static str,
        reason: Option<&'a str>,
    ) -> Element<'a, Message> {
        let mut column = Column::new().spacing(12).push(Text::new(headline).size(20));

        if let Some(reason) = reason {
            column = column
                .push(Text::new(reason).size(14).style(iced::widget::text::danger))
                .push(
                    Text::new(format!("{} {}", tr("Database:"), self.settings.mongo.database))
                        .size(14),
                )
                .push(
                    Button::new(Text::new(tr("Retry")).size(14))
                        .padding([6, 16])
                        .style(button::primary)
                        .on_press(Message::RetryConnection),
                );
        }

        Container::new(column).center_x(Length::Fill).center_y(Length::Fill).into()
    }
}
