use iced::{
    Element, Task,
    widget::{button, row, space},
};

use crate::app;

pub mod about;
pub mod confirm;
pub mod preferences;
pub mod prompt;
pub mod record;

#[derive(Debug, Clone)]
pub enum Message {
    /// Hands a result to the application, which dismisses the dialog.
    ToApp(Box<app::Message>),
    Preferences(preferences::Message),
    Record(record::Message),
    Prompt(prompt::Message),
}

impl From<preferences::Message> for Message {
    fn from(message: preferences::Message) -> Self {
        Message::Preferences(message)
    }
}

impl From<record::Message> for Message {
    fn from(message: record::Message) -> Self {
        Message::Record(message)
    }
}

impl From<prompt::Message> for Message {
    fn from(message: prompt::Message) -> Self {
        Message::Prompt(message)
    }
}

/// A modal dialog shown on top of the main window.
pub trait Dialog {
    fn title(&self) -> String;
    fn view(&self) -> Element<'_, Message>;
    fn update(&mut self, _message: Message) -> Task<Message> {
        Task::none()
    }
}

pub fn to_app(message: app::Message) -> Message {
    Message::ToApp(Box::new(message))
}

pub fn dismiss() -> Message {
    to_app(app::Message::CloseDialog)
}

/// Right-aligned Cancel and confirm buttons. Without a confirm message, the confirm button is
/// disabled.
pub fn buttons<'a>(
    confirm_label: &'a str,
    confirm: Option<Message>,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> Element<'a, Message> {
    row![
        space::horizontal(),
        button("Cancel")
            .on_press(dismiss())
            .padding([5, 15])
            .style(button::secondary),
        button(confirm_label)
            .on_press_maybe(confirm)
            .padding([5, 15])
            .style(style),
    ]
    .spacing(10)
    .into()
}
