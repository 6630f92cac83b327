// SPDX-License-Identifier: GPL-3.0-or-later

/// ADIF band plan: (band, lower edge MHz, upper edge MHz), ordered by frequency.
pub const BANDS: &[(&str, f64, f64)] = &[
    ("2190m", 0.1357, 0.1378),
    ("630m", 0.472, 0.479),
    ("560m", 0.501, 0.504),
    ("160m", 1.8, 2.0),
    ("80m", 3.5, 4.0),
    ("60m", 5.06, 5.45),
    ("40m", 7.0, 7.3),
    ("30m", 10.1, 10.15),
    ("20m", 14.0, 14.35),
    ("17m", 18.068, 18.168),
    ("15m", 21.0, 21.45),
    ("12m", 24.89, 24.99),
    ("10m", 28.0, 29.7),
    ("6m", 50.0, 54.0),
    ("4m", 70.0, 71.0),
    ("2m", 144.0, 148.0),
    ("1.25m", 222.0, 225.0),
    ("70cm", 420.0, 450.0),
    ("33cm", 902.0, 928.0),
    ("23cm", 1240.0, 1300.0),
    ("13cm", 2300.0, 2450.0),
    ("9cm", 3300.0, 3500.0),
    ("6cm", 5650.0, 5925.0),
    ("3cm", 10000.0, 10500.0),
    ("1.25cm", 24000.0, 24250.0),
    ("6mm", 47000.0, 47200.0),
    ("4mm", 75500.0, 81000.0),
    ("2.5mm", 119980.0, 120020.0),
    ("2mm", 142000.0, 149000.0),
    ("1mm", 241000.0, 250000.0),
];

/// Returns the band containing `mhz`, edges inclusive.
pub fn band_for_frequency(mhz: f64) -> Option<&'static str> {
    BANDS
        .iter()
        .find(|(_, lower, upper)| (*lower..=*upper).contains(&mhz))
        .map(|(name, _, _)| *name)
}

/// Parses a frequency field (MHz) and looks up its band.
pub fn band_for_frequency_str(freq: &str) -> Option<&'static str> {
    freq.trim()
        .parse::<f64>()
        .ok()
        .and_then(band_for_frequency)
}

/// Position of `band` in the band plan, used for sorting.
pub fn band_index(band: &str) -> Option<usize> {
    BANDS
        .iter()
        .position(|(name, _, _)| name.eq_ignore_ascii_case(band))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_hf_bands() {
        assert_eq!(band_for_frequency(14.074), Some("20m"));
        assert_eq!(band_for_frequency(7.0), Some("40m"));
        assert_eq!(band_for_frequency(29.7), Some("10m"));
        assert_eq!(band_for_frequency(145.5), Some("2m"));
    }

    #[test]
    fn out_of_band_is_none() {
        assert_eq!(band_for_frequency(12.0), None);
        assert_eq!(band_for_frequency(0.0), None);
        assert_eq!(band_for_frequency(-3.6), None);
    }

    #[test]
    fn parses_strings() {
        assert_eq!(band_for_frequency_str(" 3.573 "), Some("80m"));
        assert_eq!(band_for_frequency_str("abc"), None);
        assert_eq!(band_for_frequency_str(""), None);
    }

    #[test]
    fn band_order() {
        assert!(band_index("160m") < band_index("20m"));
        assert_eq!(band_index("70CM"), band_index("70cm"));
        assert_eq!(band_index("11m"), None);
    }
}
