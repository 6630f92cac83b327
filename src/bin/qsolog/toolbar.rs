use iced::{
    Element, Length, Theme,
    alignment::Vertical,
    widget::{button, container, row, rule, space},
};

use crate::{
    app::{DialogRequest, Message},
    logbook_view::{self, LogbookView},
    widgets::square_button,
};

pub fn view<'a>(logbook: &'a LogbookView, toolbox_visible: bool) -> Element<'a, Message> {
    let has_log = logbook.current_log().is_some();
    let has_selection = logbook.selected_record().is_some();
    let toolbox_style: fn(&Theme, button::Status) -> button::Style = if toolbox_visible {
        button::primary
    } else {
        button::secondary
    };

    container(
        row![
            square_button(
                "New",
                "Create a new logbook",
                Some(Message::Logbook(logbook_view::Message::New)),
                button::secondary,
            ),
            square_button(
                "Open",
                "Open a logbook",
                Some(Message::Logbook(logbook_view::Message::Open)),
                button::secondary,
            ),
            rule::vertical(1),
            square_button(
                "Add",
                "Add a record to the current log",
                has_log.then_some(Message::OpenDialog(DialogRequest::AddRecord)),
                button::secondary,
            ),
            square_button(
                "Edit",
                "Edit the selected record",
                has_selection.then_some(Message::OpenDialog(DialogRequest::EditRecord)),
                button::secondary,
            ),
            square_button(
                "Delete",
                "Delete the selected record",
                has_selection.then_some(Message::OpenDialog(DialogRequest::DeleteRecord)),
                button::danger,
            ),
            space::horizontal(),
            square_button(
                "Toolbox",
                "Show or hide the toolbox",
                Some(Message::ToggleToolbox),
                toolbox_style,
            ),
        ]
        .spacing(6)
        .height(Length::Fixed(32.0))
        .align_y(Vertical::Center),
    )
    .padding([2, 6])
    .width(Length::Fill)
    .into()
}
