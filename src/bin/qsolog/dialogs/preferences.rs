use std::path::PathBuf;

use iced::{
    Element, Length, Task,
    alignment::Vertical,
    widget::{Column, button, checkbox, column, container, pick_list, row, rule, text, text_input},
};
use qsolog::{
    preferences::Preferences,
    record::{self, FIELDS, MODES},
    util,
};

use crate::{app, widgets::BOLD};

#[derive(Debug, Clone)]
pub enum Message {
    ShowToolbox(bool),
    DefaultLogbook(bool),
    DefaultLogbookPath(String),
    BrowseDefaultLogbook,
    ToggleField(&'static str, bool),
    AutofillBand(bool),
    DefaultMode(&'static str),
    DefaultPower(String),
    Submit,
}

/// Edits a working copy of the preferences; nothing changes until the copy is submitted.
pub struct Window {
    working_copy: Preferences,
}

fn section<'a>(title: &'a str, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        column![text(title).font(BOLD).size(18), rule::horizontal(2), content.into()]
            .padding(10)
            .spacing(5),
    )
    .style(container::bordered_box)
    .width(Length::Fill)
    .into()
}

fn labelled<'a>(label: &'a str, input: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    row![text(label).width(Length::FillPortion(1)), input.into()]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
}

impl Window {
    pub fn new(preferences: &Preferences) -> Self {
        Self {
            working_copy: preferences.clone(),
        }
    }

    fn view_general(&self) -> Element<'_, Message> {
        let general = &self.working_copy.general;
        let path = general
            .default_logbook_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        section(
            "General",
            column![
                checkbox(general.show_toolbox)
                    .label("Show toolbox at startup")
                    .on_toggle(Message::ShowToolbox),
                checkbox(general.default_logbook)
                    .label("Open a default logbook at startup")
                    .on_toggle(Message::DefaultLogbook),
                labelled(
                    "Default logbook",
                    row![
                        text_input("", &path)
                            .on_input(Message::DefaultLogbookPath)
                            .padding(5),
                        button("Browse...")
                            .on_press(Message::BrowseDefaultLogbook)
                            .padding(5)
                            .style(button::secondary),
                    ]
                    .spacing(5)
                    .width(Length::FillPortion(3)),
                ),
            ]
            .spacing(8),
        )
    }

    fn view_columns(&self) -> Element<'_, Message> {
        let visible = &self.working_copy.view.visible_fields;
        let grid = Column::new().spacing(4).extend(FIELDS.chunks(3).map(|chunk| {
            row(chunk.iter().map(|&field| {
                checkbox(visible.contains(field))
                    .label(record::display_name(field))
                    .on_toggle(move |on| Message::ToggleField(field, on))
                    .width(Length::FillPortion(1))
                    .into()
            }))
            .spacing(10)
            .into()
        }));
        section("Visible columns", grid)
    }

    fn view_records(&self) -> Element<'_, Message> {
        let records = &self.working_copy.records;
        section(
            "Records",
            column![
                checkbox(records.autofill_band)
                    .label("Fill in the band from the frequency")
                    .on_toggle(Message::AutofillBand),
                labelled(
                    "Default mode",
                    pick_list(
                        MODES,
                        MODES
                            .iter()
                            .copied()
                            .find(|mode| *mode == records.default_mode),
                        Message::DefaultMode,
                    )
                    .width(Length::FillPortion(3)),
                ),
                labelled(
                    "Default power (W)",
                    text_input("", &records.default_power)
                        .on_input(Message::DefaultPower)
                        .padding(5)
                        .width(Length::FillPortion(3)),
                ),
            ]
            .spacing(8),
        )
    }
}

impl super::Dialog for Window {
    fn title(&self) -> String {
        "Preferences".into()
    }

    fn view(&self) -> Element<'_, super::Message> {
        let result: Element<Message> = column![
            self.view_general(),
            self.view_columns(),
            self.view_records(),
        ]
        .spacing(10)
        .into();
        column![
            result.map(super::Message::Preferences),
            super::buttons(
                "Apply",
                Some(Message::Submit.into()),
                button::primary
            ),
        ]
        .spacing(10)
        .into()
    }

    fn update(&mut self, message: super::Message) -> Task<super::Message> {
        let super::Message::Preferences(message) = message else {
            return Task::none();
        };
        match message {
            Message::ShowToolbox(on) => self.working_copy.general.show_toolbox = on,
            Message::DefaultLogbook(on) => self.working_copy.general.default_logbook = on,
            Message::DefaultLogbookPath(path) => {
                self.working_copy.general.default_logbook_path =
                    (!path.is_empty()).then(|| PathBuf::from(path));
            }
            Message::BrowseDefaultLogbook => {
                return Task::future(util::pick_file(&[util::LOGBOOK_FILTER])).and_then(|path| {
                    Task::done(
                        Message::DefaultLogbookPath(path.display().to_string()).into(),
                    )
                });
            }
            Message::ToggleField(field, on) => {
                let visible = &mut self.working_copy.view.visible_fields;
                if on {
                    visible.insert(field);
                } else {
                    visible.remove(field);
                }
            }
            Message::AutofillBand(on) => self.working_copy.records.autofill_band = on,
            Message::DefaultMode(mode) => self.working_copy.records.default_mode = mode.into(),
            Message::DefaultPower(power) => self.working_copy.records.default_power = power,
            Message::Submit => {
                return Task::done(super::to_app(app::Message::UpdatePreferences(
                    self.working_copy.clone(),
                )));
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::Dialog;

    fn send(window: &mut Window, message: Message) {
        let _ = window.update(message.into());
    }

    #[test]
    fn edits_stay_in_the_working_copy() {
        let original = Preferences::default();
        let mut window = Window::new(&original);
        send(&mut window, Message::ShowToolbox(true));
        send(&mut window, Message::ToggleField("NOTES", true));
        send(&mut window, Message::ToggleField("RST_RCVD", false));
        send(&mut window, Message::DefaultMode("CW"));
        send(&mut window, Message::DefaultLogbookPath("/tmp/log.db".into()));

        assert_eq!(original, Preferences::default());
        assert!(window.working_copy.general.show_toolbox);
        assert!(window.working_copy.view.visible_fields.contains("NOTES"));
        assert!(!window.working_copy.view.visible_fields.contains("RST_RCVD"));
        assert_eq!(window.working_copy.records.default_mode, "CW");
        assert_eq!(
            window.working_copy.general.default_logbook_path,
            Some(PathBuf::from("/tmp/log.db"))
        );

        send(&mut window, Message::DefaultLogbookPath(String::new()));
        assert_eq!(window.working_copy.general.default_logbook_path, None);
    }
}
