use iced::{
    Element, Length,
    alignment::Vertical,
    widget::{Column, pick_list, row, text, text_input},
};

use super::BOLD;

#[derive(Debug, Clone)]
pub enum Message {
    Submit,
    UpdateField(usize, String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    /// A value picked from a fixed list; the stored value may also be one not in the list.
    Choice(&'static [&'static str], String),
}

impl Field {
    pub fn view(&self, idx: usize) -> Element<'_, Message> {
        match self {
            Field::Text(value) => text_input("", value)
                .on_input(move |s| Message::UpdateField(idx, s))
                .on_submit(Message::Submit)
                .padding(5)
                .width(Length::FillPortion(3))
                .into(),
            Field::Choice(options, value) => pick_list(
                *options,
                options.iter().copied().find(|option| *option == value.as_str()),
                move |option: &'static str| Message::UpdateField(idx, option.to_string()),
            )
            .placeholder(value.as_str())
            .width(Length::FillPortion(3))
            .into(),
        }
    }

    fn value(&self) -> &str {
        match self {
            Field::Text(s) | Field::Choice(_, s) => s,
        }
    }

    fn set_value(&mut self, value: String) {
        match self {
            Field::Text(s) | Field::Choice(_, s) => *s = value,
        }
    }
}

/// A column of labelled inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    fields: Vec<(String, Field)>,
}

impl Form {
    pub fn new(fields: Vec<(String, Field)>) -> Self {
        Self { fields }
    }

    pub fn view(&self) -> Element<'_, Message> {
        Column::new()
            .extend(
                self.fields
                    .iter()
                    .enumerate()
                    .map(|(idx, (label, field))| -> Element<'_, Message> {
                        row![
                            text(label).font(BOLD).width(Length::FillPortion(1)),
                            field.view(idx)
                        ]
                        .spacing(10)
                        .align_y(Vertical::Center)
                        .into()
                    }),
            )
            .spacing(6)
            .into()
    }

    /// Applies field edits; `Submit` is left to the owner of the form.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::UpdateField(idx, value) => self.set(idx, value),
            Message::Submit => {
                log::warn!("Form submission should be handled by the parent widget");
            }
        }
    }

    pub fn set(&mut self, idx: usize, value: String) {
        if let Some((_, field)) = self.fields.get_mut(idx) {
            field.set_value(value);
        }
    }

    pub fn field_values(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(_, field)| field.value().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_fields_by_index() {
        let mut form = Form::new(vec![
            ("Name".into(), Field::Text("a".into())),
            ("Mode".into(), Field::Choice(&["CW", "SSB"], "CW".into())),
        ]);
        form.update(Message::UpdateField(1, "SSB".into()));
        form.update(Message::UpdateField(0, "b".into()));
        form.update(Message::UpdateField(7, "ignored".into()));
        assert_eq!(form.field_values(), ["b", "SSB"]);
    }
}
