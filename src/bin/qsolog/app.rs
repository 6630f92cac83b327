// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt, future, stream};
use iced::{
    Application, Color, Element, Length, Program, Size, Subscription, Task, Theme,
    widget::{center, column, container, opaque, row, rule, scrollable, space, stack, text},
    window,
};
use qsolog::preferences::Preferences;

use crate::{
    config::ConfigDir,
    dialogs::{self, Dialog, about, confirm, preferences, prompt, record},
    logbook_view::{self, LogbookView},
    menu, resources, toolbar,
    toolbox::{self, Toolbox},
    widgets::BOLD,
};

/// Everything `main` prepares before the event loop starts.
#[derive(Debug, Clone)]
pub struct Startup {
    /// Logbook given on the command line.
    pub logbook: Option<PathBuf>,
    pub config_dir: ConfigDir,
    /// `None` when there is no usable preferences file.
    pub preferences: Option<Preferences>,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    config_dir: ConfigDir,
    preferences: Preferences,
    logbook: LogbookView,
    toolbox: Toolbox,
    toolbox_visible: bool,
    dialog: Option<Box<dyn Dialog>>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    Nop,
    Logbook(logbook_view::Message),
    Toolbox(toolbox::Message),
    Dialog(dialogs::Message),
    ToggleToolbox,
    OpenDialog(DialogRequest),
    CloseDialog,
    UpdatePreferences(Preferences),
    OpenDocumentation,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogRequest {
    About,
    Preferences,
    NewLog,
    RenameLog,
    DeleteLog,
    AddRecord,
    EditRecord,
    DeleteRecord,
    RemoveDuplicates,
}

/// The toolbox starts out visible only if the preferences say so.
pub fn initial_toolbox_visibility(preferences: Option<&Preferences>) -> bool {
    preferences.is_some_and(|preferences| preferences.general.show_toolbox)
}

/// Ctrl-C, as a one-shot stream of [`Message::Shutdown`].
fn interrupts() -> impl Stream<Item = Message> {
    stream::once(tokio::signal::ctrl_c()).filter_map(|result| {
        future::ready(match result {
            Ok(()) => {
                log::info!("Interrupted");
                Some(Message::Shutdown)
            }
            Err(err) => {
                log::error!("Could not listen for interrupts: {err}");
                None
            }
        })
    })
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: 0.7,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    }
}

impl AppModel {
    pub fn create(startup: Startup) -> Application<impl Program<Message = Message, Theme = Theme>> {
        let icon = resources::window_icon();
        iced::application(move || Self::init(startup.clone()), Self::update, Self::view)
            .title(Self::title)
            .subscription(Self::subscription)
            .theme(Theme::Dark)
            .window(window::Settings {
                size: Size::new(800.0, 600.0),
                position: window::Position::Centered,
                icon,
                exit_on_close_request: false,
                ..window::Settings::default()
            })
    }

    /// Builds the widgets (logbook view first, then the toolbox; the menu bar and toolbar are
    /// drawn from the logbook view) and opens the startup logbook, if any.
    fn init(startup: Startup) -> (Self, Task<Message>) {
        let toolbox_visible = initial_toolbox_visibility(startup.preferences.as_ref());
        let preferences = startup.preferences.unwrap_or_default();
        let mut logbook = LogbookView::new(&preferences);
        let toolbox = Toolbox::new();

        let path = startup.logbook.or_else(|| {
            preferences.startup_logbook().map(|path| {
                log::info!("Opening default logbook {}", path.display());
                path.to_path_buf()
            })
        });
        let task = match path {
            Some(path) => logbook
                .update(logbook_view::Message::OpenPath(path))
                .map(Message::Logbook),
            None => Task::none(),
        };

        let app = AppModel {
            config_dir: startup.config_dir,
            preferences,
            logbook,
            toolbox,
            toolbox_visible,
            dialog: None,
        };
        (app, task)
    }

    fn title(&self) -> String {
        match self.logbook.path().and_then(Path::file_name) {
            Some(name) => format!("{} - {}", env!("CARGO_PKG_NAME"), name.to_string_lossy()),
            None => env!("CARGO_PKG_NAME").into(),
        }
    }

    fn make_dialog(&self, request: DialogRequest) -> Option<Box<dyn Dialog>> {
        let log = self.logbook.current_log().map(str::to_string);
        let dialog: Box<dyn Dialog> = match request {
            DialogRequest::About => Box::new(about::About::new()),
            DialogRequest::Preferences => Box::new(preferences::Window::new(&self.preferences)),
            DialogRequest::NewLog if self.logbook.is_open() => {
                Box::new(prompt::Window::new("New log", "Name of the new log", "", |name| {
                    Message::Logbook(logbook_view::Message::NewLog(name))
                }))
            }
            DialogRequest::RenameLog => {
                let old = log?;
                Box::new(prompt::Window::new(
                    "Rename log",
                    format!("New name for {old}"),
                    old.clone(),
                    move |new| Message::Logbook(logbook_view::Message::RenameLog(old.clone(), new)),
                ))
            }
            DialogRequest::DeleteLog => {
                let log = log?;
                Box::new(confirm::Window::new(
                    "Delete log",
                    format!("Delete {log} and all of its records? This cannot be undone."),
                    "Delete",
                    Message::Logbook(logbook_view::Message::DeleteLog(log)),
                ))
            }
            DialogRequest::AddRecord => Box::new(record::Window::add(log?, &self.preferences)),
            DialogRequest::EditRecord => {
                let record = self.logbook.selected_record()?.clone();
                Box::new(record::Window::edit(log?, record, &self.preferences))
            }
            DialogRequest::DeleteRecord => {
                let record = self.logbook.selected_record()?;
                let id = record.id?;
                Box::new(confirm::Window::new(
                    "Delete record",
                    format!("Delete the record for {}?", record.call()),
                    "Delete",
                    Message::Logbook(logbook_view::Message::DeleteRecord(log?, id)),
                ))
            }
            DialogRequest::RemoveDuplicates => {
                let log = log?;
                Box::new(confirm::Window::new(
                    "Remove duplicates",
                    format!(
                        "Remove records in {log} that repeat an earlier contact \
                         (same callsign, date, time, frequency, band and mode)?"
                    ),
                    "Remove",
                    Message::Logbook(logbook_view::Message::RemoveDuplicates(log)),
                ))
            }
            DialogRequest::NewLog => return None,
        };
        Some(dialog)
    }

    fn view_status_bar(&self) -> Element<'_, Message> {
        let path = self
            .logbook
            .path()
            .or(self.logbook.opening())
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        container(
            row![
                text(self.logbook.status()).size(12),
                space::horizontal(),
                text(path).size(12),
            ]
            .spacing(10),
        )
        .padding([2, 8])
        .width(Length::Fill)
        .style(container::dark)
        .into()
    }

    fn view_dialog<'a>(&'a self, dialog: &'a dyn Dialog) -> Element<'a, Message> {
        let content = column![
            text(dialog.title()).font(BOLD).size(20),
            rule::horizontal(2),
            scrollable(dialog.view().map(Message::Dialog)),
        ]
        .spacing(10);
        opaque(
            center(opaque(
                container(content)
                    .padding(20)
                    .width(Length::Fixed(620.0))
                    .max_height(560.0)
                    .style(container::bordered_box),
            ))
            .style(backdrop),
        )
    }

    /// Describes the interface based on the current state of the application model.
    ///
    /// Top to bottom: menu bar, toolbar, logbook, toolbox, status bar. Dialogs are drawn on
    /// top and block everything below them.
    fn view(&self) -> Element<'_, Message> {
        let mut content = column![
            menu::view(&self.logbook, self.toolbox_visible),
            toolbar::view(&self.logbook, self.toolbox_visible),
            rule::horizontal(1),
            self.logbook.view().map(Message::Logbook),
        ];
        if self.toolbox_visible {
            content = content.push(
                self.toolbox
                    .view(self.logbook.current_records())
                    .map(Message::Toolbox),
            );
        }
        let main: Element<_> = content.push(self.view_status_bar()).into();
        match &self.dialog {
            Some(dialog) => stack![main, self.view_dialog(dialog.as_ref())].into(),
            None => main,
        }
    }

    /// Window close requests and Ctrl-C both end in an orderly shutdown.
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_requests().map(|_| Message::Shutdown),
            Subscription::run(interrupts),
        ])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Nop => {}
            Message::Logbook(message) => {
                return self.logbook.update(message).map(Message::Logbook);
            }
            Message::Toolbox(message) => self.toolbox.update(message),
            Message::Dialog(dialogs::Message::ToApp(message)) => {
                self.dialog = None;
                return self.update(*message);
            }
            Message::Dialog(message) => match &mut self.dialog {
                Some(dialog) => return dialog.update(message).map(Message::Dialog),
                None => log::warn!("Received dialog message without an open dialog"),
            },
            Message::ToggleToolbox => self.toolbox_visible = !self.toolbox_visible,
            Message::OpenDialog(request) => {
                self.dialog = self.make_dialog(request);
                if self.dialog.is_none() {
                    log::warn!("Cannot open {request:?} dialog in the current state");
                }
            }
            Message::CloseDialog => self.dialog = None,
            Message::UpdatePreferences(preferences) => {
                if let Err(err) = self.config_dir.save_preferences(&preferences) {
                    log::error!("Could not save preferences: {err:#}");
                }
                self.logbook.apply_view_preferences(&preferences);
                self.preferences = preferences;
            }
            Message::OpenDocumentation => {
                let url = env!("CARGO_PKG_REPOSITORY");
                if let Err(err) = open::that(url) {
                    log::error!("Could not open {url}: {err}");
                }
            }
            Message::Shutdown => {
                log::info!("Shutting down");
                self.dialog = None;
                return self
                    .logbook
                    .update(logbook_view::Message::Close)
                    .map(Message::Logbook)
                    .chain(iced::exit());
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn startup(dir: &Path, preferences: Option<Preferences>) -> Startup {
        Startup {
            logbook: None,
            config_dir: ConfigDir::at(dir.join("config")),
            preferences,
        }
    }

    fn with_toolbox(show: bool) -> Preferences {
        let mut preferences = Preferences::default();
        preferences.general.show_toolbox = show;
        preferences
    }

    #[test]
    fn toolbox_visibility_follows_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            (None, false),
            (Some(with_toolbox(false)), false),
            (Some(with_toolbox(true)), true),
        ];
        for (preferences, visible) in cases {
            assert_eq!(initial_toolbox_visibility(preferences.as_ref()), visible);
            let (app, _) = AppModel::init(startup(dir.path(), preferences));
            assert_eq!(app.toolbox_visible, visible);
        }
    }

    #[test]
    fn unusable_preferences_mean_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(dir.path());
        std::fs::write(
            config.preferences_path(),
            "this is not a preferences file\ngeneral=yes\n",
        )
        .unwrap();
        let (app, _) = AppModel::init(Startup {
            logbook: None,
            config_dir: config.clone(),
            preferences: config.load_preferences(),
        });
        assert!(!app.toolbox_visible);
        assert_eq!(app.preferences, Preferences::default());
    }

    #[test]
    fn command_line_logbook_is_handed_to_the_logbook_view() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.db");
        let (app, _) = AppModel::init(Startup {
            logbook: Some(missing.clone()),
            ..startup(dir.path(), None)
        });
        assert_eq!(app.logbook.opening(), Some(missing.as_path()));
        assert!(!app.logbook.is_open());
    }

    #[test]
    fn default_logbook_is_opened_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut preferences = Preferences::default();
        preferences.general.default_logbook_path = Some(dir.path().join("default.db"));
        let (app, _) = AppModel::init(startup(dir.path(), Some(preferences.clone())));
        assert_eq!(app.logbook.opening(), None);

        preferences.general.default_logbook = true;
        let (app, _) = AppModel::init(startup(dir.path(), Some(preferences)));
        assert_eq!(
            app.logbook.opening(),
            Some(dir.path().join("default.db").as_path())
        );

        let (app, _) = AppModel::init(Startup {
            logbook: Some(dir.path().join("cli.db")),
            ..startup(dir.path(), Some(with_toolbox(false)))
        });
        assert_eq!(
            app.logbook.opening(),
            Some(dir.path().join("cli.db").as_path())
        );
    }

    #[test]
    fn about_dialog_leaves_state_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = AppModel::init(startup(dir.path(), Some(with_toolbox(true))));
        let _ = app.update(Message::OpenDialog(DialogRequest::About));
        assert_eq!(
            app.dialog.as_ref().map(|dialog| dialog.title()),
            Some("About qsolog".to_string())
        );
        let _ = app.update(Message::Dialog(dialogs::dismiss()));
        assert!(app.dialog.is_none());
        assert!(app.toolbox_visible);
        assert_eq!(app.preferences, with_toolbox(true));
        assert!(!app.logbook.is_open());
        assert!(!app.config_dir.preferences_path().exists());
    }

    #[test]
    fn confirmed_preferences_are_saved_and_applied() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = AppModel::init(startup(dir.path(), None));
        let _ = app.update(Message::OpenDialog(DialogRequest::Preferences));
        assert!(app.dialog.is_some());

        let mut changed = with_toolbox(true);
        changed.view.visible_fields.insert("NOTES");
        let _ = app.update(Message::Dialog(dialogs::to_app(Message::UpdatePreferences(
            changed.clone(),
        ))));
        assert!(app.dialog.is_none());
        assert_eq!(app.preferences, changed);
        assert!(app.logbook.columns().contains(&"NOTES"));
        assert_eq!(app.config_dir.load_preferences(), Some(changed));
    }

    #[test]
    fn cancelled_preferences_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(dir.path().join("config"));
        config.save_preferences(&with_toolbox(true)).unwrap();
        let before = std::fs::read_to_string(config.preferences_path()).unwrap();

        let (mut app, _) = AppModel::init(startup(dir.path(), config.load_preferences()));
        let _ = app.update(Message::OpenDialog(DialogRequest::Preferences));
        let _ = app.update(Message::Dialog(
            preferences::Message::ShowToolbox(false).into(),
        ));
        let _ = app.update(Message::Dialog(dialogs::dismiss()));

        assert!(app.dialog.is_none());
        assert_eq!(app.preferences, with_toolbox(true));
        assert_eq!(
            std::fs::read_to_string(config.preferences_path()).unwrap(),
            before
        );
    }

    #[test]
    fn record_dialogs_need_a_log() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = AppModel::init(startup(dir.path(), None));
        for request in [
            DialogRequest::NewLog,
            DialogRequest::RenameLog,
            DialogRequest::AddRecord,
            DialogRequest::EditRecord,
            DialogRequest::DeleteRecord,
        ] {
            let _ = app.update(Message::OpenDialog(request));
            assert!(app.dialog.is_none(), "{request:?}");
        }
    }

    #[tokio::test]
    async fn shutdown_closes_dialog_and_logbook() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = AppModel::init(startup(dir.path(), None));
        let opened = logbook_view::open_logbook(dir.path().join("shutdown.db")).await;
        let _ = app.update(Message::Logbook(logbook_view::Message::Opened(
            opened.map_err(|err| err.to_string()),
        )));
        assert!(app.logbook.is_open());
        let _ = app.update(Message::OpenDialog(DialogRequest::About));
        assert!(app.dialog.is_some());

        let _ = app.update(Message::Shutdown);
        assert!(app.dialog.is_none());
        assert!(!app.logbook.is_open());
    }

    #[test]
    fn toolbox_can_be_toggled() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = AppModel::init(startup(dir.path(), None));
        let _ = app.update(Message::ToggleToolbox);
        assert!(app.toolbox_visible);
        let _ = app.update(Message::ToggleToolbox);
        assert!(!app.toolbox_visible);
    }
}
