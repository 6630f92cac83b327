use std::time::Duration;

use iced::widget::{button, container, text, tooltip};
use iced::{Element, Font, Theme, font};

pub mod form;

pub const BOLD: Font = Font {
    family: font::Family::SansSerif,
    weight: font::Weight::Bold,
    stretch: font::Stretch::Normal,
    style: font::Style::Normal,
};

/// A compact toolbar button with a tooltip. Without a message, the button is disabled.
pub fn square_button<'a, Message: Clone + 'a>(
    label: &'a str,
    tooltip_label: &'a str,
    msg: Option<Message>,
    style: impl Fn(&Theme, button::Status) -> button::Style + 'a,
) -> Element<'a, Message> {
    tooltip(
        button(text(label).size(14))
            .padding([4, 10])
            .style(style)
            .on_press_maybe(msg),
        container(text(tooltip_label))
            .padding(5)
            .style(container::dark),
        tooltip::Position::Bottom,
    )
    .delay(Duration::from_millis(600))
    .into()
}
