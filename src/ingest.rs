//! Open-Data Ingest Module
//!
//! Parses the incentivi.gov.it open-data CSV export into records:
//! - sniffs the delimiter (`;` vs `,`)
//! - remaps the base columns to short internal names
//! - keeps the structured numeric columns under their original names
//! - normalizes deadlines to ISO `YYYY-MM-DD`
//! - drops rows without a usable title or source URL
//!
//! Fetching the export over the network is the caller's problem; this module
//! only ever sees the CSV text.

use crate::amounts::NUMERIC_COLUMNS;
use crate::types::{AmountProvenance, Record};
use anyhow::{Context, Result};
use chrono::Utc;
use csv::ReaderBuilder;
use std::collections::BTreeMap;

/// Upstream header -> internal base field.
const FIELD_MAP: &[(&str, &str)] = &[
    ("Titolo", "title"),
    ("Soggetto_Concedente", "entity"),
    ("Regioni", "region"),
    ("Link_istituzionale", "source_url"),
    ("Data_chiusura", "deadline"),
];

/// Pick the delimiter by counting candidates in a leading sample.
fn detect_delimiter(sample: &str) -> u8 {
    if sample.matches(';').count() > sample.matches(',').count() {
        b';'
    } else {
        b','
    }
}

/// Normalize the source's date spellings to `YYYY-MM-DD`.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, a plain ISO prefix, and `DD/MM/YYYY`;
/// anything else is treated as absent.
fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains('T') && raw.get(4..5) == Some("-") {
        return raw.split('T').next().map(str::to_string);
    }
    if raw.get(4..5) == Some("-") && raw.len() >= 10 {
        return raw.get(..10).map(str::to_string);
    }
    if raw.contains('/') {
        let parts: Vec<&str> = raw.split('/').collect();
        if let [d, m, y] = parts[..] {
            if y.len() == 4 {
                return Some(format!("{}-{:0>2}-{:0>2}", y, m, d));
            }
        }
    }
    None
}

/// Parse the raw open-data CSV text into base records.
///
/// Rows missing a title or institutional link are skipped; every kept record
/// is stamped with the current UTC extraction time.
pub fn parse_open_data(text: &str) -> Result<Vec<Record>> {
    let sample: String = text.chars().take(1000).collect();
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(&sample))
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("open-data CSV has no header row")?
        .clone();

    let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.context("malformed open-data CSV row")?;

        let mut title = String::new();
        let mut entity = None;
        let mut region = None;
        let mut source_url = String::new();
        let mut deadline_raw: Option<String> = None;
        let mut extra = BTreeMap::new();

        for (header, value) in headers.iter().zip(row.iter()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match FIELD_MAP.iter().find(|(h, _)| *h == header) {
                Some((_, "title")) => title = value.to_string(),
                Some((_, "entity")) => entity = Some(value.to_string()),
                Some((_, "region")) => region = Some(value.to_string()),
                Some((_, "source_url")) => source_url = value.to_string(),
                Some((_, "deadline")) => deadline_raw = Some(value.to_string()),
                _ => {
                    if NUMERIC_COLUMNS.contains(&header) {
                        extra.insert(header.to_string(), value.to_string());
                    }
                }
            }
        }

        if title.is_empty() || source_url.is_empty() {
            continue;
        }

        records.push(Record {
            title,
            entity,
            region,
            source_url,
            deadline: deadline_raw.as_deref().and_then(normalize_date),
            extracted_at: stamp.clone(),
            sector: None,
            funding_type: None,
            amount_min: None,
            amount_max: None,
            amount_provenance: AmountProvenance::Absent,
            extra,
        });
    }

    Ok(records)
}
