// SPDX-License-Identifier: GPL-3.0-or-later

use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;

/// ADIF fields stored for every contact, in display order.
pub const FIELDS: &[&str] = &[
    "CALL",
    "QSO_DATE",
    "TIME_ON",
    "FREQ",
    "BAND",
    "MODE",
    "SUBMODE",
    "TX_PWR",
    "RST_SENT",
    "RST_RCVD",
    "QSL_SENT",
    "QSL_RCVD",
    "NOTES",
    "NAME",
    "ADDRESS",
    "STATE",
    "COUNTRY",
    "DXCC",
    "CQZ",
    "ITUZ",
    "IOTA",
    "GRIDSQUARE",
    "SAT_NAME",
    "SAT_MODE",
];

/// Fields shown in the logbook table unless the preferences say otherwise.
pub const DEFAULT_VISIBLE_FIELDS: &[&str] = &[
    "CALL", "QSO_DATE", "TIME_ON", "FREQ", "BAND", "MODE", "RST_SENT", "RST_RCVD",
];

/// Fields that identify a contact when looking for duplicates.
const DUPLICATE_KEY: &[&str] = &["CALL", "QSO_DATE", "TIME_ON", "FREQ", "BAND", "MODE"];

pub const MODES: &[&str] = &[
    "AM",
    "CW",
    "DIGITALVOICE",
    "DSTAR",
    "FM",
    "FT4",
    "FT8",
    "HELL",
    "JT65",
    "JT9",
    "MFSK",
    "OLIVIA",
    "PKT",
    "PSK",
    "RTTY",
    "SSB",
    "SSTV",
];

static CALLSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z0-9]{1,4}/)?(?:[A-Z0-9]*[0-9][A-Z0-9]*)(?:/[A-Z0-9]{1,4})?$")
        .expect("callsign regex is valid")
});

/// Human-readable column heading for an ADIF field.
pub fn display_name(field: &str) -> &'static str {
    match field {
        "CALL" => "Callsign",
        "QSO_DATE" => "Date",
        "TIME_ON" => "Time",
        "FREQ" => "Frequency (MHz)",
        "BAND" => "Band",
        "MODE" => "Mode",
        "SUBMODE" => "Submode",
        "TX_PWR" => "TX Power (W)",
        "RST_SENT" => "RST Sent",
        "RST_RCVD" => "RST Received",
        "QSL_SENT" => "QSL Sent",
        "QSL_RCVD" => "QSL Received",
        "NOTES" => "Notes",
        "NAME" => "Name",
        "ADDRESS" => "Address",
        "STATE" => "State",
        "COUNTRY" => "Country",
        "DXCC" => "DXCC",
        "CQZ" => "CQ Zone",
        "ITUZ" => "ITU Zone",
        "IOTA" => "IOTA",
        "GRIDSQUARE" => "Grid Square",
        "SAT_NAME" => "Satellite",
        "SAT_MODE" => "Satellite Mode",
        _ => "Unknown",
    }
}

fn is_callsign_body(part: &str) -> bool {
    part.chars().any(|c| c.is_ascii_alphabetic()) && part.chars().any(|c| c.is_ascii_digit())
}

/// Checks the general shape of a callsign, e.g. `M0ABC`, `F/M0ABC/P`.
///
/// The body, between the optional prefix and suffix, needs at least one letter and one digit.
pub fn is_valid_callsign(call: &str) -> bool {
    let call = call.trim().to_ascii_uppercase();
    if !CALLSIGN.is_match(&call) {
        return false;
    }
    let is_affix = |part: &str| part.len() <= 4;
    match call.split('/').collect::<Vec<_>>().as_slice() {
        [body] | [_, body, _] => is_callsign_body(body),
        // Either `prefix/body` or `body/suffix`
        [first, second] => {
            (is_callsign_body(first) && is_affix(second))
                || (is_affix(first) && is_callsign_body(second))
        }
        _ => false,
    }
}

/// A single contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Row id in the log table, `None` until stored.
    pub id: Option<i64>,
    fields: BTreeMap<&'static str, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new record with QSO_DATE and TIME_ON set from `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let mut record = Self::new();
        record.set("QSO_DATE", now.format("%Y%m%d").to_string());
        record.set("TIME_ON", now.format("%H%M").to_string());
        record
    }

    /// Builds a record from arbitrary (name, value) pairs, dropping unknown fields.
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in fields {
            let name = name.as_ref().to_ascii_uppercase();
            if !record.set(&name, value) {
                log::debug!("Dropping unsupported field {name}");
            }
        }
        record
    }

    /// Value of `field`, or the empty string.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Sets `field`; an empty value removes it. Returns false for unknown fields.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(key) = FIELDS.iter().find(|f| **f == field) else {
            return false;
        };
        let value = value.into().trim().to_string();
        if value.is_empty() {
            self.fields.remove(key);
        } else {
            self.fields.insert(key, value);
        }
        true
    }

    /// Non-empty fields in catalogue order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELDS
            .iter()
            .filter_map(|f| self.fields.get(f).map(|v| (*f, v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn call(&self) -> &str {
        self.get("CALL")
    }

    /// Key used to group duplicates.
    pub(crate) fn duplicate_key(&self) -> Vec<String> {
        DUPLICATE_KEY
            .iter()
            .map(|field| match *field {
                "CALL" => self.get(field).to_ascii_uppercase(),
                _ => self.get(field).to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn callsign_validation() {
        for call in [
            "M0ABC",
            "2E0XYZ",
            "F/M0ABC/P",
            "w1aw",
            "VK2/G4ABC",
            "DL1ABC/MM",
            "AB1/P",
        ] {
            assert!(is_valid_callsign(call), "{call} should be valid");
        }
        for call in [
            "",
            "ABC",
            "1234",
            "M0 ABC",
            "M0ABC//P",
            "TOOLONG/M0ABC",
            "G/1234",
            "1/234/P",
            "1234/P",
            "F/ABC/1",
        ] {
            assert!(!is_valid_callsign(call), "{call} should be invalid");
        }
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let record = Record::from_fields([("call", "M0ABC"), ("APP_FOO", "bar"), ("band", "20m")]);
        assert_eq!(record.call(), "M0ABC");
        assert_eq!(record.get("BAND"), "20m");
        assert_eq!(record.get("APP_FOO"), "");
        assert_eq!(record.fields().count(), 2);
    }

    #[test]
    fn empty_values_clear_fields() {
        let mut record = Record::from_fields([("CALL", "M0ABC"), ("NOTES", "hello")]);
        assert!(record.set("NOTES", "   "));
        assert_eq!(record.fields().map(|(f, _)| f).collect::<Vec<_>>(), ["CALL"]);
        assert!(!record.set("NOT_A_FIELD", "x"));
    }

    #[test]
    fn fields_follow_catalogue_order() {
        let record = Record::from_fields([("MODE", "CW"), ("CALL", "M0ABC"), ("FREQ", "7.010")]);
        let order: Vec<_> = record.fields().map(|(f, _)| f).collect();
        assert_eq!(order, ["CALL", "FREQ", "MODE"]);
    }

    #[test]
    fn starting_at_sets_date_and_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        let record = Record::starting_at(now);
        assert_eq!(record.get("QSO_DATE"), "20240309");
        assert_eq!(record.get("TIME_ON"), "0705");
    }

    #[test]
    fn duplicates_ignore_callsign_case_and_other_fields() {
        let a = Record::from_fields([
            ("CALL", "m0abc"),
            ("QSO_DATE", "20240309"),
            ("TIME_ON", "0705"),
            ("FREQ", "14.074"),
            ("BAND", "20m"),
            ("MODE", "FT8"),
            ("NOTES", "first"),
        ]);
        let mut b = a.clone();
        b.set("CALL", "M0ABC");
        b.set("NOTES", "second");
        assert_eq!(a.duplicate_key(), b.duplicate_key());
        b.set("TIME_ON", "0706");
        assert_ne!(a.duplicate_key(), b.duplicate_key());
    }
}
