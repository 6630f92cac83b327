// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading and writing the ADI flavour of the Amateur Data Interchange Format.
//!
//! An ADI file is an optional free-text header terminated by `<EOH>`, followed by records.
//! Each field is written as `<NAME:LENGTH>` or `<NAME:LENGTH:TYPE>` followed by exactly LENGTH
//! characters of data, and each record is terminated by `<EOR>`.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use thiserror::Error;

use crate::record::Record;

pub const ADIF_VERSION: &str = "3.1.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdifError {
    #[error("unterminated field specifier at byte {0}")]
    UnterminatedSpecifier(usize),
    #[error("malformed field specifier <{spec}> at byte {offset}")]
    MalformedSpecifier { spec: String, offset: usize },
    #[error("data for field {name} at byte {offset} runs past the end of the input")]
    Truncated { name: String, offset: usize },
}

/// One parsed field specifier.
enum Tag<'a> {
    EndOfHeader,
    EndOfRecord,
    Field { name: &'a str, length: usize },
}

fn parse_tag(spec: &str, offset: usize) -> Result<Tag<'_>, AdifError> {
    let malformed = || AdifError::MalformedSpecifier {
        spec: spec.to_string(),
        offset,
    };
    let mut parts = spec.split(':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(malformed());
    }
    match parts.next() {
        None if name.eq_ignore_ascii_case("EOH") => Ok(Tag::EndOfHeader),
        None if name.eq_ignore_ascii_case("EOR") => Ok(Tag::EndOfRecord),
        None => Err(malformed()),
        Some(length) => {
            let length = length.trim().parse().map_err(|_| malformed())?;
            // An optional data type indicator may follow; it does not change how we store the
            // value.
            if parts.nth(1).is_some() {
                return Err(malformed());
            }
            Ok(Tag::Field { name, length })
        }
    }
}

/// Parses ADI text into records. Fields the record model doesn't know about are dropped; a
/// trailing record without `<EOR>` is discarded.
pub fn parse(text: &str) -> Result<Vec<Record>, AdifError> {
    let mut pos = if text.starts_with('<') {
        0
    } else {
        header_end(text).unwrap_or(0)
    };

    let mut records = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();
    while let Some(start) = text[pos..].find('<').map(|i| pos + i) {
        let end = text[start..]
            .find('>')
            .map(|i| start + i)
            .ok_or(AdifError::UnterminatedSpecifier(start))?;
        pos = end + 1;
        match parse_tag(&text[start + 1..end], start)? {
            Tag::EndOfHeader => {}
            Tag::EndOfRecord => {
                records.push(Record::from_fields(current.drain(..)));
            }
            Tag::Field { name, length } => {
                let data = &text[pos..];
                let byte_len = data
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(data.len()))
                    .nth(length)
                    .ok_or_else(|| AdifError::Truncated {
                        name: name.to_string(),
                        offset: start,
                    })?;
                current.push((name.to_string(), data[..byte_len].to_string()));
                pos += byte_len;
            }
        }
    }
    if !current.is_empty() {
        log::warn!("Discarding {} fields after the last <EOR>", current.len());
    }
    Ok(records)
}

/// Finds the byte offset just past the first `<EOH>`, if the text has a header. Header text is
/// free-form, so tags and stray `<` before it aren't interpreted.
fn header_end(text: &str) -> Option<usize> {
    text.to_ascii_uppercase()
        .find("<EOH>")
        .map(|start| start + "<EOH>".len())
}

fn write_field(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("<{}:{}>{}\n", name, value.chars().count(), value));
}

/// Serialises records as ADI text, including a header.
pub fn write(records: &[Record]) -> String {
    let mut out = format!("Exported by {}\n", env!("CARGO_PKG_NAME"));
    write_field(&mut out, "ADIF_VER", ADIF_VERSION);
    write_field(&mut out, "PROGRAMID", env!("CARGO_PKG_NAME"));
    write_field(&mut out, "PROGRAMVERSION", env!("CARGO_PKG_VERSION"));
    write_field(
        &mut out,
        "CREATED_TIMESTAMP",
        &Utc::now().format("%Y%m%d %H%M%S").to_string(),
    );
    out.push_str("<EOH>\n");
    for record in records {
        for (name, value) in record.fields() {
            write_field(&mut out, name, value);
        }
        out.push_str("<EOR>\n\n");
    }
    out
}

/// Loads all records from an ADI file.
pub async fn load(path: &Path) -> anyhow::Result<Vec<Record>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    // ADI files in the wild are frequently Latin-1 rather than UTF-8
    let text = String::from_utf8_lossy(&bytes);
    let records = parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    log::debug!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Writes records to an ADI file, replacing it.
pub async fn save(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    tokio::fs::write(path, write(records))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_after_header() {
        let text = "Some header text <ADIF_VER:5>3.1.0\n<EOH>\n\
                    <CALL:5>M0ABC <BAND:3>20m<MODE:2:S>CW <EOR>\n\
                    <call:6>2E0XYZ<band:2>2m<eor>";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].call(), "M0ABC");
        assert_eq!(records[0].get("MODE"), "CW");
        assert_eq!(records[1].call(), "2E0XYZ");
        assert_eq!(records[1].get("BAND"), "2m");
        assert_eq!(records[0].get("ADIF_VER"), "");
    }

    #[test]
    fn header_text_is_free_form() {
        let records = parse("Exported 2024 a<b <EOH><CALL:4>W1AW<EOR>").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].call(), "W1AW");

        let records = parse("Log for x<y\n<eoh>\n<CALL:5>M0ABC<EOR>").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].call(), "M0ABC");
    }

    #[test]
    fn no_header_when_text_starts_with_tag() {
        let records = parse("<CALL:4>W1AW<EOR>").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].call(), "W1AW");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let records = parse("<CALL:5>M0ABC<NAME:4>Jörg<NOTES:3>abc<EOR>").unwrap();
        assert_eq!(records[0].get("NAME"), "Jörg");
        assert_eq!(records[0].get("NOTES"), "abc");
    }

    #[test]
    fn data_may_contain_angle_brackets() {
        let records = parse("<CALL:5>M0ABC<NOTES:6><b>hi!<EOR>").unwrap();
        assert_eq!(records[0].get("NOTES"), "<b>hi!");
    }

    #[test]
    fn trailing_record_without_eor_is_discarded() {
        let records = parse("<CALL:5>M0ABC<EOR><CALL:4>W1AW").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn errors_carry_offsets() {
        assert_eq!(
            parse("<CALL:5>M0ABC<EOR><CALL:5"),
            Err(AdifError::UnterminatedSpecifier(18))
        );
        assert_eq!(
            parse("<CALL:x>M0ABC<EOR>"),
            Err(AdifError::MalformedSpecifier {
                spec: "CALL:x".into(),
                offset: 0
            })
        );
        assert_eq!(
            parse("<CALL:9>M0ABC"),
            Err(AdifError::Truncated {
                name: "CALL".into(),
                offset: 0
            })
        );
    }

    #[test]
    fn written_text_parses_back() {
        let record = Record::from_fields([
            ("CALL", "M0ABC"),
            ("QSO_DATE", "20240309"),
            ("FREQ", "14.074"),
            ("NOTES", "Grüße"),
        ]);
        let text = write(std::slice::from_ref(&record));
        assert!(text.contains("<ADIF_VER:5>3.1.0"));
        assert!(text.contains("<NOTES:5>Grüße"));
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed, vec![record]);
    }

    #[tokio::test]
    async fn load_and_save_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.adi");
        let records = vec![
            Record::from_fields([("CALL", "M0ABC")]),
            Record::from_fields([("CALL", "W1AW"), ("MODE", "CW")]),
        ];
        save(&path, &records).await.unwrap();
        assert_eq!(load(&path).await.unwrap(), records);
        assert!(load(&dir.path().join("missing.adi")).await.is_err());
    }
}
