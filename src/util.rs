// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use rfd::AsyncFileDialog;

pub const LOGBOOK_FILTER: (&str, &[&str]) = ("Logbooks", &["db", "sqlite"]);
pub const ADIF_FILTER: (&str, &[&str]) = ("ADIF", &["adi", "adif"]);

fn dialog(filters: &[(&str, &[&str])]) -> AsyncFileDialog {
    filters
        .iter()
        .fold(AsyncFileDialog::new(), |dialog, &(name, extensions)| {
            dialog.add_filter(name, extensions)
        })
}

pub async fn pick_file(filters: &[(&str, &[&str])]) -> Option<PathBuf> {
    dialog(filters)
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Asks for a path to save to, appending `extension` if the user didn't type one.
pub async fn save_file(filters: &[(&str, &[&str])], extension: &str) -> Option<PathBuf> {
    let path = dialog(filters)
        .save_file()
        .await
        .map(|file| with_default_extension(file.path(), extension));
    log::debug!("Picked file for saving: {:?}", path);
    path
}

pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(extension)
    } else {
        path.into()
    }
}
