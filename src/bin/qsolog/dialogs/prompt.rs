use iced::{
    Element, Task,
    widget::{button, column, container, text, text_input},
};
use qsolog::logbook::validate_log_name;

use crate::app;

#[derive(Debug, Clone)]
pub enum Message {
    Update(String),
    Submit,
}

/// Asks for a log name.
pub struct Window {
    title: String,
    label: String,
    value: String,
    error: Option<String>,
    on_submit: Box<dyn Fn(String) -> app::Message>,
}

impl Window {
    pub fn new(
        title: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        on_submit: impl Fn(String) -> app::Message + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            value: value.into(),
            error: None,
            on_submit: Box::new(on_submit),
        }
    }

    fn submit(&mut self) -> Task<super::Message> {
        let name = self.value.trim().to_string();
        match validate_log_name(&name) {
            Ok(()) => Task::done(super::to_app((self.on_submit)(name))),
            Err(err) => {
                self.error = Some(err.to_string());
                Task::none()
            }
        }
    }
}

impl super::Dialog for Window {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn view(&self) -> Element<'_, super::Message> {
        let mut content = column![
            text(&self.label),
            text_input("", &self.value)
                .on_input(|value| Message::Update(value).into())
                .on_submit(Message::Submit.into())
                .padding(5),
        ]
        .spacing(10);
        if let Some(error) = &self.error {
            content = content.push(container(text(error)).padding(5).style(container::danger));
        }
        content
            .push(super::buttons(
                "OK",
                (!self.value.trim().is_empty()).then(|| Message::Submit.into()),
                button::primary,
            ))
            .into()
    }

    fn update(&mut self, message: super::Message) -> Task<super::Message> {
        let super::Message::Prompt(message) = message else {
            return Task::none();
        };
        match message {
            Message::Update(value) => {
                self.value = value;
                self.error = None;
                Task::none()
            }
            Message::Submit => self.submit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dialogs::Dialog, logbook_view};

    #[test]
    fn rejects_invalid_names() {
        let mut window = Window::new("New log", "Name", "", |name| {
            app::Message::Logbook(logbook_view::Message::NewLog(name))
        });
        let _ = window.update(Message::Update("2bad".into()).into());
        let _ = window.update(Message::Submit.into());
        assert!(window.error.is_some());

        let _ = window.update(Message::Update("good_name".into()).into());
        assert!(window.error.is_none());
        let _ = window.update(Message::Submit.into());
        assert!(window.error.is_none());
    }
}
