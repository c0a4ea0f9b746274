use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Space, Text, button, container};
use iced::{Color, Element, Length, Shadow, Theme, Vector, border};

use crate::Message;
use crate::i18n::tr;

pub fn color_luminance(color: Color) -> f32 {
    0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b
}

fn overlay_color(theme: &Theme) -> Color {
    if color_luminance(theme.palette().background) > 0.5 {
        Color::from_rgba(0.0, 0.0, 0.0, 0.55)
    } else {
        Color::from_rgba(1.0, 1.0, 1.0, 0.35)
    }
}

pub fn modal_layout<'a>(content: Element<'a, Message>, width: Length) -> Element<'a, Message> {
    let card = Container::new(content).padding(20).width(width).style(|theme: &Theme| {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(palette.background.base.color.into()),
            border: border::rounded(8).width(1).color(palette.background.strong.color),
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: Vector::new(0.0, 8.0),
                blur_radius: 24.0,
            },
            text_color: Some(palette.background.base.text),
            ..Default::default()
        }
    });

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(overlay_color(theme).into()),
            ..Default::default()
        })
        .into()
}

/// Confirmation card shown over the detail view before a recipe is deleted.
pub fn delete_confirmation<'a>(recipe_name: &str, deleting: bool) -> Element<'a, Message> {
    let title = Text::new(tr("Delete recipe")).size(20);
    let question = Text::new(format!("{} \"{}\"?", tr("Do you really want to delete"), recipe_name))
        .size(14);

    let mut cancel = Button::new(Text::new(tr("Cancel")).size(14)).padding([6, 16]);
    let confirm_label = if deleting { "Deleting..." } else { "Delete" };
    let mut confirm = Button::new(Text::new(tr(confirm_label)).size(14))
        .padding([6, 16])
        .style(button::danger);
    if !deleting {
        cancel = cancel.on_press(Message::DeleteCancelled);
        confirm = confirm.on_press(Message::DeleteConfirmed);
    }

    let actions = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Space::new().width(Length::Fill))
        .push(cancel)
        .push(confirm);

    let content = Column::new().spacing(16).push(title).push(question).push(actions);

    modal_layout(content.into(), Length::Fixed(420.0))
}
