use iced::{
    Element, Length, Theme,
    alignment::Vertical,
    widget::{Column, button, column, container, progress_bar, row, scrollable, table, text},
};
use qsolog::{
    record::Record,
    stats::{AWARD_BANDS, AwardsTable, ModeClass, band_counts},
};

use crate::widgets::BOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Awards,
    BandStatistics,
}

impl Tab {
    const ALL: [Tab; 2] = [Tab::Awards, Tab::BandStatistics];

    fn label(self) -> &'static str {
        match self {
            Tab::Awards => "Awards",
            Tab::BandStatistics => "Band statistics",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectTab(Tab),
}

/// Summaries of the current log, recomputed from its records on every view.
pub struct Toolbox {
    tab: Tab,
}

type AwardsRow = (ModeClass, Vec<usize>);

fn view_awards<'a>(records: &[Record]) -> Element<'a, Message> {
    let awards = AwardsTable::from_records(records);
    let mode_column = table::column(text("Mode").font(BOLD), |(class, _): AwardsRow| {
        text(class.to_string()).font(BOLD)
    });
    let band_columns = AWARD_BANDS.iter().enumerate().map(|(idx, band)| {
        table::column(text(*band).font(BOLD), move |(_, counts): AwardsRow| {
            text(counts.get(idx).copied().unwrap_or_default().to_string())
        })
    });
    scrollable(table(
        std::iter::once(mode_column).chain(band_columns),
        awards.rows,
    ))
    .direction(scrollable::Direction::Horizontal(scrollable::Scrollbar::new()))
    .width(Length::Fill)
    .into()
}

fn view_band_statistics<'a>(records: &[Record]) -> Element<'a, Message> {
    let counts = band_counts(records);
    if counts.is_empty() {
        return text("No contacts in this log.").into();
    }
    let max = counts.iter().map(|(_, count)| *count).max().unwrap_or(1) as f32;
    let bars = Column::new().spacing(4).extend(counts.into_iter().map(
        |(band, count)| -> Element<'a, Message> {
            row![
                text(band).width(Length::Fixed(70.0)),
                progress_bar(0.0..=max, count as f32).girth(12.0),
                text(count.to_string()).width(Length::Fixed(50.0)),
            ]
            .spacing(10)
            .align_y(Vertical::Center)
            .into()
        },
    ));
    scrollable(bars).height(Length::Fill).into()
}

impl Toolbox {
    pub fn new() -> Self {
        Self { tab: Tab::Awards }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SelectTab(tab) => self.tab = tab,
        }
    }

    pub fn view(&self, records: &[Record]) -> Element<'_, Message> {
        let tabs = row(Tab::ALL.into_iter().map(|tab| {
            let style: fn(&Theme, button::Status) -> button::Style = if tab == self.tab {
                button::primary
            } else {
                button::secondary
            };
            button(text(tab.label()).size(13))
                .padding([4, 10])
                .style(style)
                .on_press(Message::SelectTab(tab))
                .into()
        }))
        .spacing(4);
        let content = match self.tab {
            Tab::Awards => view_awards(records),
            Tab::BandStatistics => view_band_statistics(records),
        };
        container(column![tabs, content].spacing(8))
            .padding(8)
            .width(Length::Fill)
            .height(Length::Fixed(220.0))
            .style(container::bordered_box)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_tabs() {
        let mut toolbox = Toolbox::new();
        assert_eq!(toolbox.tab, Tab::Awards);
        toolbox.update(Message::SelectTab(Tab::BandStatistics));
        assert_eq!(toolbox.tab, Tab::BandStatistics);
    }
}
