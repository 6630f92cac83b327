use iced::Element;
use iced_aw::{menu_bar, menu_items};
use qsolog::menu::{bar, item, root, separator, submenu, toggle};

use crate::{
    app::{DialogRequest, Message},
    logbook_view::{self, LogbookView},
};

fn logbook_item<'a>(
    label: &'a str,
    msg: logbook_view::Message,
    enabled: bool,
) -> Element<'a, Message> {
    item(label, enabled.then_some(Message::Logbook(msg)))
}

fn dialog_item<'a>(label: &'a str, request: DialogRequest, enabled: bool) -> Element<'a, Message> {
    item(label, enabled.then_some(Message::OpenDialog(request)))
}

/// The main menu bar. Entries that need an open logbook, a log or a selected record are
/// disabled until there is one.
pub fn view<'a>(logbook: &'a LogbookView, toolbox_visible: bool) -> Element<'a, Message> {
    let is_open = logbook.is_open();
    let has_log = logbook.current_log().is_some();
    let has_selection = logbook.selected_record().is_some();

    bar(menu_bar!(
        (
            root("Logbook", Message::Nop),
            submenu(menu_items!(
                (logbook_item("New logbook...", logbook_view::Message::New, true)),
                (logbook_item("Open logbook...", logbook_view::Message::Open, true)),
                (logbook_item("Close logbook", logbook_view::Message::Close, is_open)),
                (separator()),
                (logbook_item("Import ADIF...", logbook_view::Message::ImportAdif, has_log)),
                (logbook_item("Export ADIF...", logbook_view::Message::ExportAdif, has_log)),
                (separator()),
                (item("Quit", Some(Message::Shutdown))),
            ))
        ),
        (
            root("Log", Message::Nop),
            submenu(menu_items!(
                (dialog_item("New log...", DialogRequest::NewLog, is_open)),
                (dialog_item("Rename log...", DialogRequest::RenameLog, has_log)),
                (dialog_item("Delete log", DialogRequest::DeleteLog, has_log)),
            ))
        ),
        (
            root("Records", Message::Nop),
            submenu(menu_items!(
                (dialog_item("Add record...", DialogRequest::AddRecord, has_log)),
                (dialog_item("Edit record...", DialogRequest::EditRecord, has_selection)),
                (dialog_item("Delete record", DialogRequest::DeleteRecord, has_selection)),
                (separator()),
                (dialog_item("Remove duplicates", DialogRequest::RemoveDuplicates, has_log)),
            ))
        ),
        (
            root("Edit", Message::Nop),
            submenu(menu_items!(
                (dialog_item("Preferences...", DialogRequest::Preferences, true)),
            ))
        ),
        (
            root("View", Message::Nop),
            submenu(menu_items!(
                (toggle("Toolbox", Message::ToggleToolbox, toolbox_visible)),
            ))
        ),
        (
            root("Help", Message::Nop),
            submenu(menu_items!(
                (item("Online documentation", Some(Message::OpenDocumentation))),
                (separator()),
                (dialog_item("About", DialogRequest::About, true)),
            ))
        )
    ))
}
