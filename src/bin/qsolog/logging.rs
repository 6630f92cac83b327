// SPDX-License-Identifier: GPL-3.0-or-later

//! The process logger: console output for everyone, plus a debug file on request.

use std::{fs::File, io::Write, path::PathBuf};

use env_logger::{Env, Target, WriteStyle};
use log::{LevelFilter, Log, Metadata, Record};

const DEBUG_FILE: &str = "qsolog.debug";

pub fn debug_file_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(DEBUG_FILE)
}

/// Forwards each log record to the console logger and, when debugging, to the debug file.
/// Each side applies its own level filter.
pub struct Logger {
    console: env_logger::Logger,
    file: Option<env_logger::Logger>,
}

impl Logger {
    pub fn new(debug_file: Option<File>) -> Self {
        let console =
            env_logger::Builder::from_env(Env::default().default_filter_or("warn,qsolog=info"))
                .build();
        let file = debug_file.map(|file| {
            env_logger::Builder::new()
                .filter_level(LevelFilter::Warn)
                .filter_module("qsolog", LevelFilter::Debug)
                .target(Target::Pipe(Box::new(file)))
                .write_style(WriteStyle::Never)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "{} - {} - {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .build()
        });
        Self { console, file }
    }

    fn max_level(&self) -> LevelFilter {
        self.file
            .as_ref()
            .map(|file| file.filter())
            .into_iter()
            .chain(std::iter::once(self.console.filter()))
            .max()
            .unwrap_or(LevelFilter::Off)
    }

    /// Installs this logger as the `log` backend.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata)
            || self
                .file
                .as_ref()
                .is_some_and(|file| file.enabled(metadata))
    }

    fn log(&self, record: &Record) {
        self.console.log(record);
        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}

/// Sets up logging for the process. With `debug`, debug messages also go to
/// [`debug_file_path`]; if that file can't be created we log the problem and carry on.
pub fn init(debug: bool) {
    let (file, file_error) = if debug {
        let path = debug_file_path();
        match File::create(&path) {
            Ok(file) => (Some(file), None),
            Err(err) => (None, Some(format!("{}: {}", path.display(), err))),
        }
    } else {
        (None, None)
    };
    let has_file = file.is_some();
    if let Err(err) = Logger::new(file).install() {
        eprintln!("Failed to install logger: {err}");
        return;
    }
    if let Some(err) = file_error {
        log::error!("Could not open debug log {err}");
    } else if has_file {
        log::info!("Writing debug log to {}", debug_file_path().display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn emit(logger: &Logger, level: Level, target: &str, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{message}"))
                .build(),
        );
    }

    #[test]
    fn debug_file_gets_debug_records_from_this_crate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEBUG_FILE);
        let logger = Logger::new(Some(File::create(&path).unwrap()));
        assert_eq!(logger.max_level(), LevelFilter::Debug.max(logger.console.filter()));

        emit(&logger, Level::Debug, "qsolog::app", "opened logbook");
        emit(&logger, Level::Trace, "qsolog::app", "too chatty");
        emit(&logger, Level::Debug, "wgpu_core::device", "not ours");
        emit(&logger, Level::Warn, "wgpu_core::device", "important");
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "{contents}");
        assert!(lines[0].ends_with(" - DEBUG - opened logbook"));
        assert!(lines[1].ends_with(" - WARN - important"));
    }

    #[test]
    fn without_debug_file_only_console_is_used() {
        let logger = Logger::new(None);
        assert!(logger.file.is_none());
        assert_eq!(logger.max_level(), logger.console.filter());
    }
}
