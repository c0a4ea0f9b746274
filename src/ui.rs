use std::fmt;

use iced::widget::{Container, Text, container, text};
use iced::{Element, Length, Theme, border};

use crate::Message;
use crate::i18n::tr;

pub mod detail;
pub mod modal;
pub mod register;
pub mod search;

/// Select-box value with a leading "any" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    Any,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::Any
    }
}

impl<T: Copy> Choice<T> {
    pub fn options(all: &[T]) -> Vec<Self> {
        std::iter::once(Choice::Any).chain(all.iter().copied().map(Choice::Only)).collect()
    }

    pub fn value(self) -> Option<T> {
        match self {
            Choice::Any => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Any => f.write_str(tr("Any")),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Failure(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(msg) | Feedback::Failure(msg) => msg.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let success = self.is_success();
        Text::new(self.message())
            .size(14)
            .style(move |theme| if success { text::success(theme) } else { text::danger(theme) })
            .into()
    }
}

pub fn panel<'a>(content: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    Container::new(content).padding(16).width(Length::Fill).style(panel_style)
}

fn panel_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: border::rounded(6).width(1).color(palette.background.strong.color),
        ..Default::default()
    }
}

pub fn field_label<'a>(label: &'static str) -> Text<'a> {
    Text::new(tr(label)).size(14).width(Length::Fixed(120.0))
}
