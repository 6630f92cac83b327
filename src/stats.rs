// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;

use itertools::Itertools;

use crate::{band::band_index, record::Record};

/// Bands tracked by the awards table.
pub const AWARD_BANDS: &[&str] = &[
    "160m", "80m", "60m", "40m", "30m", "20m", "17m", "15m", "12m", "10m", "6m", "4m", "2m",
    "70cm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeClass {
    Phone,
    Cw,
    Digital,
    Mixed,
}

impl ModeClass {
    pub const ALL: [ModeClass; 4] = [Self::Phone, Self::Cw, Self::Digital, Self::Mixed];

    /// Whether a contact made in `mode` counts towards this class.
    pub fn includes(self, mode: &str) -> bool {
        let mode = mode.trim().to_ascii_uppercase();
        if mode.is_empty() {
            return false;
        }
        let phone = matches!(mode.as_str(), "AM" | "FM" | "SSB" | "DIGITALVOICE");
        match self {
            ModeClass::Phone => phone,
            ModeClass::Cw => mode == "CW",
            ModeClass::Digital => !phone && mode != "CW",
            ModeClass::Mixed => true,
        }
    }
}

impl Display for ModeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModeClass::Phone => "Phone",
            ModeClass::Cw => "CW",
            ModeClass::Digital => "Digital",
            ModeClass::Mixed => "Mixed",
        };
        f.write_str(name)
    }
}

/// Contact counts per mode class (rows) and award band (columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardsTable {
    pub rows: Vec<(ModeClass, Vec<usize>)>,
}

impl AwardsTable {
    pub fn from_records(records: &[Record]) -> Self {
        let rows = ModeClass::ALL
            .iter()
            .map(|&class| {
                let counts = AWARD_BANDS
                    .iter()
                    .map(|band| {
                        records
                            .iter()
                            .filter(|r| {
                                r.get("BAND").eq_ignore_ascii_case(band)
                                    && class.includes(r.get("MODE"))
                            })
                            .count()
                    })
                    .collect();
                (class, counts)
            })
            .collect();
        Self { rows }
    }

    pub fn count(&self, class: ModeClass, band: &str) -> usize {
        let Some(column) = AWARD_BANDS.iter().position(|b| *b == band) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, counts)| counts[column])
            .unwrap_or(0)
    }
}

/// Number of contacts per band, ordered by the band plan. Records without a recognised band
/// are counted under "Unknown" at the end.
pub fn band_counts(records: &[Record]) -> Vec<(String, usize)> {
    records
        .iter()
        .map(|r| r.get("BAND").to_ascii_lowercase())
        .counts()
        .into_iter()
        .map(|(band, count)| match band_index(&band) {
            Some(_) => (band, count),
            None => ("Unknown".to_string(), count),
        })
        .into_grouping_map()
        .sum()
        .into_iter()
        .sorted_by_key(|(band, _)| band_index(band).unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(band: &str, mode: &str) -> Record {
        Record::from_fields([("CALL", "M0ABC"), ("BAND", band), ("MODE", mode)])
    }

    #[test]
    fn mode_classes() {
        assert!(ModeClass::Phone.includes("ssb"));
        assert!(ModeClass::Cw.includes("CW"));
        assert!(ModeClass::Digital.includes("FT8"));
        assert!(!ModeClass::Digital.includes("FM"));
        assert!(ModeClass::Mixed.includes("RTTY"));
        assert!(!ModeClass::Mixed.includes(""));
    }

    #[test]
    fn awards_counts() {
        let records = vec![
            contact("20m", "SSB"),
            contact("20m", "FT8"),
            contact("20M", "CW"),
            contact("40m", "CW"),
            contact("11m", "AM"),
            contact("2m", ""),
        ];
        let table = AwardsTable::from_records(&records);
        assert_eq!(table.count(ModeClass::Phone, "20m"), 1);
        assert_eq!(table.count(ModeClass::Cw, "20m"), 1);
        assert_eq!(table.count(ModeClass::Digital, "20m"), 1);
        assert_eq!(table.count(ModeClass::Mixed, "20m"), 3);
        assert_eq!(table.count(ModeClass::Mixed, "40m"), 1);
        assert_eq!(table.count(ModeClass::Mixed, "2m"), 0);
        assert_eq!(table.count(ModeClass::Mixed, "11m"), 0);
    }

    #[test]
    fn band_counts_in_plan_order() {
        let records = vec![
            contact("2m", "FM"),
            contact("20m", "SSB"),
            contact("160m", "CW"),
            contact("20m", "FT8"),
            contact("", "FT8"),
            contact("11m", "AM"),
        ];
        assert_eq!(
            band_counts(&records),
            vec![
                ("160m".to_string(), 1),
                ("20m".to_string(), 2),
                ("2m".to_string(), 1),
                ("Unknown".to_string(), 2),
            ]
        );
    }
}
