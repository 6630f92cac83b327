use iced::{
    Element, Length, Task,
    widget::{button, column, container, scrollable, text},
};
use qsolog::{
    band,
    preferences::Preferences,
    record::{self, FIELDS, MODES, Record},
};

use crate::{
    app, logbook_view,
    widgets::form::{self, Field, Form},
};

#[derive(Debug, Clone)]
pub enum Message {
    Form(form::Message),
}

/// Adds a record to a log, or edits one already in it.
pub struct Window {
    log: String,
    id: Option<i64>,
    form: Form,
    autofill_band: bool,
    error: Option<String>,
}

fn field_index(name: &str) -> Option<usize> {
    FIELDS.iter().position(|field| *field == name)
}

impl Window {
    /// A blank record stamped with the current UTC time and the preferred mode and power.
    pub fn add(log: String, preferences: &Preferences) -> Self {
        let mut record = Record::starting_at(chrono::Utc::now());
        record.set("MODE", preferences.records.default_mode.as_str());
        record.set("TX_PWR", preferences.records.default_power.as_str());
        Self::new(log, record, preferences)
    }

    pub fn edit(log: String, record: Record, preferences: &Preferences) -> Self {
        Self::new(log, record, preferences)
    }

    fn new(log: String, record: Record, preferences: &Preferences) -> Self {
        let fields = FIELDS
            .iter()
            .map(|&name| {
                let value = record.get(name).to_string();
                let field = if name == "MODE" {
                    Field::Choice(MODES, value)
                } else {
                    Field::Text(value)
                };
                (record::display_name(name).to_string(), field)
            })
            .collect();
        Self {
            log,
            id: record.id,
            form: Form::new(fields),
            autofill_band: preferences.records.autofill_band,
            error: None,
        }
    }

    fn record(&self) -> Record {
        let mut record = Record::from_fields(FIELDS.iter().copied().zip(self.form.field_values()));
        record.id = self.id;
        record
    }

    fn submit(&mut self) -> Task<super::Message> {
        let record = self.record();
        if !record::is_valid_callsign(record.call()) {
            self.error = Some(format!("'{}' is not a valid callsign", record.call()));
            return Task::none();
        }
        let message = match self.id {
            Some(_) => logbook_view::Message::UpdateRecord(self.log.clone(), record),
            None => logbook_view::Message::AddRecord(self.log.clone(), record),
        };
        Task::done(super::to_app(app::Message::Logbook(message)))
    }
}

impl super::Dialog for Window {
    fn title(&self) -> String {
        match self.id {
            Some(_) => format!("Edit record in {}", self.log),
            None => format!("Add record to {}", self.log),
        }
    }

    fn view(&self) -> Element<'_, super::Message> {
        let form: Element<_> = self.form.view().map(Message::Form);
        let mut content = column![
            scrollable(container(form.map(super::Message::Record)).padding([0, 15]))
                .height(Length::Fixed(380.0))
        ]
        .spacing(10);
        if let Some(error) = &self.error {
            content = content.push(container(text(error)).padding(5).style(container::danger));
        }
        content
            .push(super::buttons(
                "Save",
                Some(Message::Form(form::Message::Submit).into()),
                button::primary,
            ))
            .into()
    }

    fn update(&mut self, message: super::Message) -> Task<super::Message> {
        let super::Message::Record(Message::Form(message)) = message else {
            return Task::none();
        };
        match message {
            form::Message::Submit => self.submit(),
            form::Message::UpdateField(idx, value) => {
                if self.autofill_band
                    && field_index("FREQ") == Some(idx)
                    && let (Some(band), Some(band_idx)) =
                        (band::band_for_frequency_str(&value), field_index("BAND"))
                {
                    self.form.set(band_idx, band.to_string());
                }
                self.form.update(form::Message::UpdateField(idx, value));
                self.error = None;
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::Dialog;

    fn edit(window: &mut Window, field: &str, value: &str) {
        let idx = field_index(field).unwrap();
        let _ = window.update(Message::Form(form::Message::UpdateField(idx, value.into())).into());
    }

    #[test]
    fn new_records_use_preferred_mode_and_power() {
        let mut preferences = Preferences::default();
        preferences.records.default_mode = "CW".into();
        preferences.records.default_power = "100".into();
        let window = Window::add("contest".into(), &preferences);
        let record = window.record();
        assert_eq!(record.get("MODE"), "CW");
        assert_eq!(record.get("TX_PWR"), "100");
        assert_eq!(record.get("QSO_DATE").len(), 8);
        assert_eq!(record.get("TIME_ON").len(), 4);
        assert_eq!(record.id, None);
    }

    #[test]
    fn frequency_fills_in_band() {
        let mut window = Window::add("log".into(), &Preferences::default());
        edit(&mut window, "FREQ", "14.074");
        assert_eq!(window.record().get("BAND"), "20m");
        edit(&mut window, "FREQ", "99999");
        assert_eq!(window.record().get("BAND"), "20m");

        let mut preferences = Preferences::default();
        preferences.records.autofill_band = false;
        let mut window = Window::add("log".into(), &preferences);
        edit(&mut window, "FREQ", "7.1");
        assert_eq!(window.record().get("BAND"), "");
    }

    #[test]
    fn invalid_callsign_blocks_submission() {
        let mut window = Window::add("log".into(), &Preferences::default());
        edit(&mut window, "CALL", "not a call");
        let _ = window.update(Message::Form(form::Message::Submit).into());
        assert!(window.error.is_some());

        edit(&mut window, "CALL", "M0ABC");
        assert!(window.error.is_none());
        let _ = window.update(Message::Form(form::Message::Submit).into());
        assert!(window.error.is_none());
    }

    #[test]
    fn editing_keeps_the_record_id() {
        let mut record = Record::from_fields([("CALL", "G4XYZ")]);
        record.id = Some(7);
        let window = Window::edit("log".into(), record, &Preferences::default());
        assert_eq!(window.record().id, Some(7));
        assert_eq!(window.record().call(), "G4XYZ");
        assert!(window.title().starts_with("Edit"));
    }
}
