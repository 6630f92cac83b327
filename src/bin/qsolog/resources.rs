use std::path::PathBuf;

use anyhow::Context;
use iced::window;

/// Directory holding the icon and logo.
///
/// `QSOLOG_RESOURCES` wins if set; otherwise `res/` next to the executable, then the `res/`
/// directory of the source tree.
pub fn dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("QSOLOG_RESOURCES") {
        return dir.into();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("res")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("res"))
}

pub fn read(name: &str) -> anyhow::Result<Vec<u8>> {
    let path = dir().join(name);
    std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Loads the window icon. A missing or broken icon only costs us the icon.
pub fn window_icon() -> Option<window::Icon> {
    let icon = read("icon.png").and_then(|bytes| {
        window::icon::from_file_data(&bytes, None)
            .map_err(|err| anyhow::anyhow!("Failed to decode icon: {err:?}"))
    });
    match icon {
        Ok(icon) => Some(icon),
        Err(err) => {
            log::warn!("Could not load window icon: {err:#}");
            None
        }
    }
}
