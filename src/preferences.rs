// SPDX-License-Identifier: GPL-3.0-or-later

//! User preferences, stored as a section/key-value (INI style) text file.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};

use crate::record::{DEFAULT_VISIBLE_FIELDS, FIELDS};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub general: General,
    pub view: View,
    pub records: Records,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Whether the toolbox panel is shown at startup.
    #[serde(serialize_with = "write_bool", deserialize_with = "read_bool_or_false")]
    pub show_toolbox: bool,
    /// Open `default_logbook_path` at startup when no logbook is given on the command line.
    #[serde(serialize_with = "write_bool", deserialize_with = "read_bool_or_false")]
    pub default_logbook: bool,
    #[serde(serialize_with = "write_path", deserialize_with = "read_path")]
    pub default_logbook_path: Option<PathBuf>,
}

/// Serialized as one boolean key per record field.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Record fields shown as columns in the logbook.
    pub visible_fields: BTreeSet<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    /// Fill in BAND from FREQ when editing a record.
    #[serde(serialize_with = "write_bool", deserialize_with = "read_bool_or_true")]
    pub autofill_band: bool,
    pub default_mode: String,
    pub default_power: String,
}

impl Default for View {
    fn default() -> Self {
        Self {
            visible_fields: DEFAULT_VISIBLE_FIELDS.iter().copied().collect(),
        }
    }
}

impl Default for Records {
    fn default() -> Self {
        Self {
            autofill_band: true,
            default_mode: "SSB".into(),
            default_power: String::new(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn bool_or(value: &str, default: bool) -> bool {
    parse_bool(value).unwrap_or_else(|| {
        log::warn!("Ignoring invalid boolean `{value}`");
        default
    })
}

fn write_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(format_bool(*value))
}

fn read_bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(bool_or(&value, false))
}

fn read_bool_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(bool_or(&value, true))
}

fn write_path<S: Serializer>(path: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error> {
    let path = path.as_ref().map(|p| p.display().to_string());
    serializer.serialize_str(path.as_deref().unwrap_or_default())
}

fn read_path<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PathBuf>, D::Error> {
    let path = String::deserialize(deserializer)?;
    let path = path.trim();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELDS.len()))?;
        for field in FIELDS {
            map.serialize_entry(
                &field.to_ascii_lowercase(),
                format_bool(self.visible_fields.contains(field)),
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for View {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = BTreeMap::<String, String>::deserialize(deserializer)?;
        let defaults = View::default();
        let visible_fields = FIELDS
            .iter()
            .copied()
            .filter(|field| {
                let default = defaults.visible_fields.contains(field);
                keys.get(&field.to_ascii_lowercase())
                    .map_or(default, |value| bool_or(value, default))
            })
            .collect();
        Ok(Self { visible_fields })
    }
}

impl Preferences {
    /// Parses preferences text. Missing sections and keys, and booleans that don't parse, fall
    /// back to their defaults; syntax errors make the whole text invalid.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_ini::from_str(text)?)
    }

    /// Serialises the preferences in the same format `parse` reads.
    pub fn to_text(&self) -> anyhow::Result<String> {
        Ok(serde_ini::to_string(self)?)
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_text()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// The logbook to open at startup according to these preferences.
    pub fn startup_logbook(&self) -> Option<&Path> {
        self.general
            .default_logbook
            .then_some(self.general.default_logbook_path.as_deref())
            .flatten()
    }
}
