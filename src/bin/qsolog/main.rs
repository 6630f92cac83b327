// SPDX-License-Identifier: GPL-3.0-or-later

mod app;
mod config;
mod dialogs;
mod logbook_view;
mod logging;
mod menu;
mod resources;
mod toolbar;
mod toolbox;
mod widgets;

use clap::Parser;
use std::path::PathBuf;

use crate::app::{AppModel, Startup};
use crate::config::ConfigDir;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Also write debug messages to ~/qsolog.debug
    #[arg(short, long)]
    debug: bool,
    /// Logbook to open at startup; created if it doesn't exist
    #[arg(short, long, value_name = "PATH")]
    logbook: Option<PathBuf>,
}

fn main() -> iced::Result {
    // Parse command line arguments
    let args = Args::parse();
    logging::init(args.debug);
    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config_dir = ConfigDir::locate();
    if config_dir.ensure() {
        log::debug!("Configuration directory is {}", config_dir.path().display());
    }
    let preferences = config_dir.load_preferences();

    AppModel::create(Startup {
        logbook: args.logbook,
        config_dir,
        preferences,
    })
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["qsolog"]).unwrap();
        assert!(!args.debug);
        assert_eq!(args.logbook, None);

        let args = Args::try_parse_from(["qsolog", "-d", "-l", "field_day.db"]).unwrap();
        assert!(args.debug);
        assert_eq!(args.logbook, Some(PathBuf::from("field_day.db")));

        let args = Args::try_parse_from(["qsolog", "--logbook", "/tmp/x.db", "--debug"]).unwrap();
        assert!(args.debug);
        assert_eq!(args.logbook, Some(PathBuf::from("/tmp/x.db")));

        assert!(Args::try_parse_from(["qsolog", "--logbook"]).is_err());
    }
}
