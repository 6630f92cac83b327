use iced::{
    Element,
    widget::{button, column, text},
};

use crate::app;

/// A yes/no question guarding a destructive action.
pub struct Window {
    title: String,
    question: String,
    confirm_label: &'static str,
    on_confirm: app::Message,
}

impl Window {
    pub fn new(
        title: impl Into<String>,
        question: impl Into<String>,
        confirm_label: &'static str,
        on_confirm: app::Message,
    ) -> Self {
        Self {
            title: title.into(),
            question: question.into(),
            confirm_label,
            on_confirm,
        }
    }
}

impl super::Dialog for Window {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn view(&self) -> Element<'_, super::Message> {
        column![
            text(&self.question),
            super::buttons(
                self.confirm_label,
                Some(super::to_app(self.on_confirm.clone())),
                button::danger,
            ),
        ]
        .spacing(15)
        .into()
    }
}
