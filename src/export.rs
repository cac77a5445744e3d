//! Dataset Export Module
//!
//! Writes the enriched record collection as a flat CSV (`bandi.csv`) and a
//! JSON array (`bandi.json`), and reads the flat CSV back for the slicing
//! CLI. The CSV puts the base columns first, in fixed order, followed by the
//! union of extra columns in first-seen order.

use crate::types::{AmountProvenance, FundingType, Record, Sector};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Fixed leading columns of the flat CSV.
pub const BASE_FIELDS: &[&str] = &[
    "title",
    "entity",
    "region",
    "source_url",
    "deadline",
    "sector",
    "funding_type",
    "amount_min",
    "amount_max",
    "amount_provenance",
    "extracted_at",
];

/// Base fields plus every extra column seen across `records`, first-seen
/// order, no duplicates.
fn all_fields<'a>(records: &[&'a Record]) -> Vec<&'a str> {
    let mut fields: Vec<&str> = BASE_FIELDS.to_vec();
    for rec in records {
        for key in rec.extra.keys() {
            if !fields.contains(&key.as_str()) {
                fields.push(key);
            }
        }
    }
    fields
}

fn field_value(rec: &Record, field: &str) -> String {
    match field {
        "title" => rec.title.clone(),
        "entity" => rec.entity.clone().unwrap_or_default(),
        "region" => rec.region.clone().unwrap_or_default(),
        "source_url" => rec.source_url.clone(),
        "deadline" => rec.deadline.clone().unwrap_or_default(),
        "sector" => rec.sector.map(|s| s.as_str()).unwrap_or_default().to_string(),
        "funding_type" => rec.funding_type.map(|t| t.as_str()).unwrap_or_default().to_string(),
        "amount_min" => rec.amount_min.map(|n| n.to_string()).unwrap_or_default(),
        "amount_max" => rec.amount_max.map(|n| n.to_string()).unwrap_or_default(),
        "amount_provenance" => rec.amount_provenance.as_str().to_string(),
        "extracted_at" => rec.extracted_at.clone(),
        _ => rec.extra.get(field).cloned().unwrap_or_default(),
    }
}

/// Write one CSV from a borrowed record slice. Used both for the full
/// dataset and for per-partition slices.
pub fn write_csv(records: &[&Record], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    let fields = all_fields(records);
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open {:?} for writing", path))?;

    writer.write_record(&fields)?;
    for rec in records {
        let row: Vec<String> = fields.iter().map(|f| field_value(rec, f)).collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the full dataset CSV.
pub fn save_csv(records: &[Record], path: &Path) -> Result<()> {
    let refs: Vec<&Record> = records.iter().collect();
    write_csv(&refs, path)
}

/// Save the full dataset as pretty-printed JSON.
pub fn save_json(records: &[Record], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON to {:?}", path))?;
    Ok(())
}

/// Read a flat enriched CSV back into records.
///
/// Unknown columns land in `extra`; empty cells are treated as absent.
pub fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to read CSV from {:?}", path))?;
    let headers = reader
        .headers()
        .with_context(|| format!("CSV {:?} has no header row", path))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("malformed CSV row")?;

        let mut rec = Record {
            title: String::new(),
            entity: None,
            region: None,
            source_url: String::new(),
            deadline: None,
            extracted_at: String::new(),
            sector: None,
            funding_type: None,
            amount_min: None,
            amount_max: None,
            amount_provenance: AmountProvenance::Absent,
            extra: BTreeMap::new(),
        };

        for (header, value) in headers.iter().zip(row.iter()) {
            if value.is_empty() {
                continue;
            }
            match header {
                "title" => rec.title = value.to_string(),
                "entity" => rec.entity = Some(value.to_string()),
                "region" => rec.region = Some(value.to_string()),
                "source_url" => rec.source_url = value.to_string(),
                "deadline" => rec.deadline = Some(value.to_string()),
                "sector" => rec.sector = Sector::from_str(value),
                "funding_type" => rec.funding_type = FundingType::from_str(value),
                "amount_min" => rec.amount_min = value.parse().ok(),
                "amount_max" => rec.amount_max = value.parse().ok(),
                "amount_provenance" => {
                    rec.amount_provenance =
                        AmountProvenance::from_str(value).unwrap_or_default()
                }
                "extracted_at" => rec.extracted_at = value.to_string(),
                _ => {
                    rec.extra.insert(header.to_string(), value.to_string());
                }
            }
        }
        records.push(rec);
    }

    Ok(records)
}
