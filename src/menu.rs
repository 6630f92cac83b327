// SPDX-License-Identifier: GPL-3.0-or-later

//! Styled building blocks for iced_aw menu bars.

use iced::{
    Border, Element, Length, Renderer, Theme, alignment,
    border::Radius,
    widget::{self, button, container, row, text},
};
use iced_aw::{
    Menu, MenuBar,
    menu::{DrawPath, Item, Style},
    style as awstyle,
};

mod style {
    use iced::{
        Border, Color, Theme,
        theme::palette::Extended,
        widget::button::{Status, Style},
    };

    fn base(palette: &Extended, status: Status) -> Style {
        let base = Style {
            text_color: palette.background.base.text,
            ..Style::default()
        };
        match status {
            Status::Active => base.with_background(Color::TRANSPARENT),
            Status::Hovered => base.with_background(palette.primary.weak.color),
            Status::Pressed => base.with_background(palette.primary.strong.color),
            Status::Disabled => Style {
                text_color: palette.background.strong.color,
                ..base.with_background(Color::TRANSPARENT)
            },
        }
    }

    pub(crate) fn root(theme: &Theme, status: Status) -> Style {
        let palette = theme.extended_palette();
        let base = base(palette, status);
        match status {
            Status::Active => base.with_background(palette.background.neutral.color),
            _ => base,
        }
    }

    pub(crate) fn item(theme: &Theme, status: Status) -> Style {
        Style {
            border: Border::default().rounded(6.0),
            ..base(theme.extended_palette(), status)
        }
    }
}

/// A top-level entry of the menu bar.
pub fn root<'a, Message: Clone + 'a>(label: &'a str, msg: Message) -> Element<'a, Message> {
    button(text(label).align_y(alignment::Vertical::Center))
        .padding([4, 8])
        .on_press(msg)
        .style(style::root)
        .into()
}

/// A submenu entry. Without a message, the entry is shown disabled.
pub fn item<'a, Message: Clone + 'a>(label: &'a str, msg: Option<Message>) -> Element<'a, Message> {
    item_with_shortcut(label, "", msg)
}

/// A submenu entry with a keyboard shortcut hint on the right.
pub fn item_with_shortcut<'a, Message: Clone + 'a>(
    label: &'a str,
    shortcut: &'a str,
    msg: Option<Message>,
) -> Element<'a, Message> {
    button(
        row![
            text(label).width(Length::Fill),
            text(shortcut).size(12).align_y(alignment::Vertical::Center),
        ]
        .spacing(10),
    )
    .padding([4, 8])
    .width(Length::Fill)
    .on_press_maybe(msg)
    .style(style::item)
    .into()
}

/// A checkable submenu entry.
pub fn toggle<'a, Message: Clone + 'a>(
    label: &'a str,
    msg: Message,
    is_checked: bool,
) -> Element<'a, Message> {
    let checkbox = widget::checkbox::<Message, Theme, Renderer>(is_checked)
        .label(label)
        .on_toggle(move |_| msg.clone())
        .spacing(10)
        .size(16);
    container(checkbox)
        .padding([4, 8])
        .align_y(alignment::Vertical::Center)
        .align_left(Length::Fill)
        .into()
}

/// A thin line between groups of entries.
pub fn separator<'a, Message: 'a>() -> Element<'a, Message> {
    container(widget::rule::horizontal(1)).padding([2, 4]).into()
}

/// Wraps a menu bar so it spans the window and matches the theme.
pub fn bar<'a, Message: 'a>(bar: MenuBar<'a, Message, Theme, Renderer>) -> Element<'a, Message> {
    // MenuBar ignores .width(Length::Fill), so the container does the stretching
    container(
        bar.draw_path(DrawPath::FakeHovering)
            .close_on_background_click_global(true)
            .close_on_item_click_global(true)
            .padding(4.0)
            .style(|theme: &Theme, status: awstyle::Status| Style {
                path_border: Border {
                    radius: Radius::new(6.0),
                    ..Default::default()
                },
                path: theme.extended_palette().primary.weak.color.into(),
                ..awstyle::menu_bar::primary(theme, status)
            })
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .style(|theme| container::Style {
        background: Some(theme.extended_palette().background.base.color.into()),
        ..container::Style::default()
    })
    .into()
}

pub fn submenu<'a, Message: Clone + 'a>(
    items: Vec<Item<'a, Message, Theme, Renderer>>,
) -> Menu<'a, Message, Theme, Renderer> {
    Menu::new(items).width(220.0).offset(6.0).spacing(2.0)
}
