// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use iced::{
    Element, Length, Task, Theme,
    alignment::{Horizontal, Vertical},
    widget::{
        Row, button, center, column, container, row, scrollable, space, table, text, text_input,
    },
};
use qsolog::{
    adif,
    logbook::Logbook,
    preferences::Preferences,
    record::{self, FIELDS, Record},
    util,
};

/// One log of the open logbook, with its records in row-id order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    pub name: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone)]
pub enum Message {
    New,
    Open,
    OpenPath(PathBuf),
    Opened(Result<(Logbook, Vec<LogPage>), String>),
    Close,
    SelectLog(usize),
    Select(i64),
    Filter(String),
    NewLog(String),
    RenameLog(String, String),
    DeleteLog(String),
    AddRecord(String, Record),
    UpdateRecord(String, Record),
    DeleteRecord(String, i64),
    RemoveDuplicates(String),
    ImportAdif,
    DoImportAdif(String, PathBuf),
    ExportAdif,
    DoExportAdif(String, PathBuf),
    /// All logs reloaded after a change to the set of logs; `focus` names the log to show.
    PagesChanged {
        focus: Option<String>,
        result: Result<(String, Vec<LogPage>), String>,
    },
    /// One log reloaded after a change to its records.
    LogChanged {
        log: String,
        result: Result<(String, Vec<Record>), String>,
    },
    Reported(Result<String, String>),
}

async fn load_pages(logbook: &Logbook) -> anyhow::Result<Vec<LogPage>> {
    let mut pages = Vec::new();
    for name in logbook.log_names().await? {
        let records = logbook.records(&name).await?;
        pages.push(LogPage { name, records });
    }
    Ok(pages)
}

/// Opens (creating if needed) the logbook at `path` and loads all of its logs.
pub async fn open_logbook(path: PathBuf) -> anyhow::Result<(Logbook, Vec<LogPage>)> {
    let logbook = Logbook::open(&path).await?;
    let pages = load_pages(&logbook).await?;
    Ok((logbook, pages))
}

fn matches_filter(record: &Record, filter: &str) -> bool {
    filter.is_empty()
        || record
            .call()
            .to_ascii_lowercase()
            .contains(&filter.to_ascii_lowercase())
}

/// Renders one field of a record as a clickable cell; the selected row is highlighted.
fn cell<'a>(
    field: &'static str,
    selected: Option<i64>,
) -> impl Fn(&'a Record) -> Element<'a, Message> {
    move |record: &'a Record| {
        let style: fn(&Theme, button::Status) -> button::Style =
            if record.id.is_some() && record.id == selected {
                button::primary
            } else {
                button::text
            };
        button(text(record.get(field)).size(13))
            .padding([2, 4])
            .width(Length::Fill)
            .style(style)
            .on_press_maybe(record.id.map(Message::Select))
            .into()
    }
}

pub struct LogbookView {
    logbook: Option<Logbook>,
    pages: Vec<LogPage>,
    current: usize,
    selected: Option<i64>,
    filter: String,
    columns: Vec<&'static str>,
    status: String,
    opening: Option<PathBuf>,
}

impl LogbookView {
    pub fn new(preferences: &Preferences) -> Self {
        let mut view = Self {
            logbook: None,
            pages: Vec::new(),
            current: 0,
            selected: None,
            filter: String::new(),
            columns: Vec::new(),
            status: "Ready".into(),
            opening: None,
        };
        view.apply_view_preferences(preferences);
        view
    }

    /// Shows the columns the preferences ask for, in catalogue order.
    pub fn apply_view_preferences(&mut self, preferences: &Preferences) {
        self.columns = FIELDS
            .iter()
            .copied()
            .filter(|field| preferences.view.visible_fields.contains(field))
            .collect();
    }

    pub fn is_open(&self) -> bool {
        self.logbook.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.logbook.as_ref().map(Logbook::path)
    }

    /// The path being opened, until the open finishes.
    pub fn opening(&self) -> Option<&Path> {
        self.opening.as_deref()
    }

    pub fn current_log(&self) -> Option<&str> {
        self.pages.get(self.current).map(|page| page.name.as_str())
    }

    pub fn current_records(&self) -> &[Record] {
        self.pages
            .get(self.current)
            .map(|page| page.records.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let selected = self.selected?;
        self.current_records()
            .iter()
            .find(|record| record.id == Some(selected))
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Text for the status bar: the current log's size and the outcome of the last operation.
    pub fn status(&self) -> String {
        match self.current_log() {
            Some(log) => format!(
                "{log}: {} records | {}",
                self.current_records().len(),
                self.status
            ),
            None => self.status.clone(),
        }
    }

    fn set_error(&mut self, err: String) {
        log::error!("{err}");
        self.status = format!("Error: {err}");
    }

    fn set_status(&mut self, status: String) {
        log::info!("{status}");
        self.status = status;
    }

    /// Runs `work` against the open logbook and turns its outcome into a message.
    fn run<T, F>(
        &mut self,
        work: impl FnOnce(Logbook) -> F,
        done: impl FnOnce(Result<T, String>) -> Message + Send + 'static,
    ) -> Task<Message>
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let Some(logbook) = self.logbook.clone() else {
            self.set_error("No logbook is open".into());
            return Task::none();
        };
        let work = work(logbook);
        Task::perform(
            async move { work.await.map_err(|err| format!("{err:#}")) },
            done,
        )
    }

    fn close(&mut self) -> Task<Message> {
        self.pages.clear();
        self.current = 0;
        self.selected = None;
        match self.logbook.take() {
            Some(logbook) => {
                log::info!("Closing logbook {}", logbook.path().display());
                Task::future(logbook.close()).discard()
            }
            None => Task::none(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::New => Task::future(util::save_file(&[util::LOGBOOK_FILTER], "db"))
                .and_then(|path| Task::done(Message::OpenPath(path))),
            Message::Open => Task::future(util::pick_file(&[util::LOGBOOK_FILTER]))
                .and_then(|path| Task::done(Message::OpenPath(path))),
            Message::OpenPath(path) => {
                log::debug!("Opening logbook {}", path.display());
                self.status = format!("Opening {}", path.display());
                self.opening = Some(path.clone());
                Task::perform(
                    async move { open_logbook(path).await.map_err(|err| format!("{err:#}")) },
                    Message::Opened,
                )
            }
            Message::Opened(result) => {
                let path = self.opening.take();
                match result {
                    Ok((logbook, pages)) => {
                        let close = self.close();
                        self.set_status(format!(
                            "Opened {} ({} logs)",
                            logbook.path().display(),
                            pages.len()
                        ));
                        self.logbook = Some(logbook);
                        self.pages = pages;
                        close
                    }
                    Err(err) => {
                        let path = path.map(|p| p.display().to_string()).unwrap_or_default();
                        self.set_error(format!("Could not open logbook {path}: {err}"));
                        Task::none()
                    }
                }
            }
            Message::Close => {
                let task = self.close();
                self.status = "Logbook closed".into();
                task
            }
            Message::SelectLog(idx) => {
                if idx < self.pages.len() {
                    self.current = idx;
                    self.selected = None;
                }
                Task::none()
            }
            Message::Select(id) => {
                self.selected = Some(id);
                Task::none()
            }
            Message::Filter(filter) => {
                self.filter = filter;
                Task::none()
            }
            Message::NewLog(name) => {
                let focus = Some(name.clone());
                self.run(
                    |logbook| async move {
                        logbook.new_log(&name).await?;
                        anyhow::Ok((format!("Created log {name}"), load_pages(&logbook).await?))
                    },
                    |result| Message::PagesChanged { focus, result },
                )
            }
            Message::RenameLog(old, new) => {
                let focus = Some(new.clone());
                self.run(
                    |logbook| async move {
                        logbook.rename_log(&old, &new).await?;
                        anyhow::Ok((
                            format!("Renamed log {old} to {new}"),
                            load_pages(&logbook).await?,
                        ))
                    },
                    |result| Message::PagesChanged { focus, result },
                )
            }
            Message::DeleteLog(name) => self.run(
                |logbook| async move {
                    logbook.delete_log(&name).await?;
                    anyhow::Ok((format!("Deleted log {name}"), load_pages(&logbook).await?))
                },
                |result| Message::PagesChanged {
                    focus: None,
                    result,
                },
            ),
            Message::AddRecord(log, record) => {
                let name = log.clone();
                self.run(
                    |logbook| async move {
                        let id = logbook.add_record(&log, &record).await?;
                        log::debug!("Added record {id} to {log}");
                        anyhow::Ok((
                            format!("Added {} to {log}", record.call()),
                            logbook.records(&log).await?,
                        ))
                    },
                    |result| Message::LogChanged { log: name, result },
                )
            }
            Message::UpdateRecord(log, record) => {
                let name = log.clone();
                self.run(
                    |logbook| async move {
                        logbook.update_record(&log, &record).await?;
                        anyhow::Ok((
                            format!("Updated {} in {log}", record.call()),
                            logbook.records(&log).await?,
                        ))
                    },
                    |result| Message::LogChanged { log: name, result },
                )
            }
            Message::DeleteRecord(log, id) => {
                let name = log.clone();
                self.run(
                    |logbook| async move {
                        logbook.delete_record(&log, id).await?;
                        let records = logbook.records(&log).await?;
                        anyhow::Ok((format!("Deleted record from {log}"), records))
                    },
                    |result| Message::LogChanged { log: name, result },
                )
            }
            Message::RemoveDuplicates(log) => {
                let name = log.clone();
                self.run(
                    |logbook| async move {
                        let removed = logbook.remove_duplicates(&log).await?;
                        anyhow::Ok((
                            format!("Removed {removed} duplicate records from {log}"),
                            logbook.records(&log).await?,
                        ))
                    },
                    |result| Message::LogChanged { log: name, result },
                )
            }
            Message::ImportAdif => {
                let Some(log) = self.current_log().map(str::to_string) else {
                    self.set_error("Select a log to import into".into());
                    return Task::none();
                };
                Task::future(util::pick_file(&[util::ADIF_FILTER]))
                    .and_then(move |path| Task::done(Message::DoImportAdif(log.clone(), path)))
            }
            Message::DoImportAdif(log, path) => {
                let name = log.clone();
                self.run(
                    |logbook| async move {
                        let records = adif::load(&path).await?;
                        let ids = logbook.add_records(&log, &records).await?;
                        anyhow::Ok((
                            format!("Imported {} records from {}", ids.len(), path.display()),
                            logbook.records(&log).await?,
                        ))
                    },
                    |result| Message::LogChanged { log: name, result },
                )
            }
            Message::ExportAdif => {
                let Some(log) = self.current_log().map(str::to_string) else {
                    self.set_error("Select a log to export".into());
                    return Task::none();
                };
                Task::future(util::save_file(&[util::ADIF_FILTER], "adi"))
                    .and_then(move |path| Task::done(Message::DoExportAdif(log.clone(), path)))
            }
            Message::DoExportAdif(log, path) => self.run(
                |logbook| async move {
                    let records = logbook.records(&log).await?;
                    adif::save(&path, &records).await?;
                    anyhow::Ok(format!(
                        "Exported {} records to {}",
                        records.len(),
                        path.display()
                    ))
                },
                Message::Reported,
            ),
            Message::PagesChanged { focus, result } => {
                match result {
                    Ok((status, pages)) => {
                        let current = self.current_log().map(str::to_string);
                        self.pages = pages;
                        let focus = focus.or(current);
                        self.current = focus
                            .and_then(|name| self.pages.iter().position(|page| page.name == name))
                            .unwrap_or(0);
                        self.selected = None;
                        self.set_status(status);
                    }
                    Err(err) => self.set_error(err),
                }
                Task::none()
            }
            Message::LogChanged { log, result } => {
                match result {
                    Ok((status, records)) => {
                        if let Some(page) = self.pages.iter_mut().find(|page| page.name == log) {
                            page.records = records;
                        }
                        if self.selected_record().is_none() {
                            self.selected = None;
                        }
                        self.set_status(status);
                    }
                    Err(err) => self.set_error(err),
                }
                Task::none()
            }
            Message::Reported(result) => {
                match result {
                    Ok(status) => self.set_status(status),
                    Err(err) => self.set_error(err),
                }
                Task::none()
            }
        }
    }

    fn view_tabs(&self) -> Element<'_, Message> {
        let tabs = Row::new().spacing(4).extend(self.pages.iter().enumerate().map(
            |(idx, page)| -> Element<'_, Message> {
                let style: fn(&Theme, button::Status) -> button::Style = if idx == self.current {
                    button::primary
                } else {
                    button::secondary
                };
                button(text(format!("{} ({})", page.name, page.records.len())).size(13))
                    .padding([4, 10])
                    .style(style)
                    .on_press(Message::SelectLog(idx))
                    .into()
            },
        ));
        row![
            scrollable(tabs).direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(4).scroller_width(4)
            )),
            space::horizontal(),
            text_input("Filter by callsign", &self.filter)
                .on_input(Message::Filter)
                .padding(5)
                .width(Length::Fixed(200.0)),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
    }

    fn view_records(&self) -> Element<'_, Message> {
        let selected = self.selected;
        let columns = self.columns().iter().map(|&field| {
            table::column(
                text(record::display_name(field)).size(13),
                cell(field, selected),
            )
        });
        let rows = self
            .current_records()
            .iter()
            .filter(|record| matches_filter(record, &self.filter));
        scrollable(table(columns, rows))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        if !self.is_open() {
            let hint = match &self.opening {
                Some(path) => format!("Opening {}...", path.display()),
                None => "No logbook is open.".into(),
            };
            return center(
                column![
                    text(hint),
                    row![
                        button("New logbook")
                            .on_press(Message::New)
                            .style(button::primary),
                        button("Open logbook")
                            .on_press(Message::Open)
                            .style(button::secondary),
                    ]
                    .spacing(10),
                ]
                .spacing(10)
                .align_x(Horizontal::Center),
            )
            .into();
        }
        if self.pages.is_empty() {
            return center(text("This logbook has no logs yet. Create one from the Log menu."))
                .into();
        }
        container(column![self.view_tabs(), self.view_records()].spacing(6))
            .padding(6)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
