//! Partitioning Module
//!
//! Groups the flat record collection into region × sector buckets and writes
//! one CSV per bucket under `out/<region-slug>/<sector-slug>.csv`.

use crate::export::write_csv;
use crate::regions::normalize_region;
use crate::slug::slug;
use crate::types::{Record, Sector};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Partition records by (canonical region, sector label), keeping each
/// record's original relative order within its bucket. A key exists only if
/// at least one record produced it.
pub fn group_records(records: &[Record]) -> BTreeMap<(String, String), Vec<&Record>> {
    let mut by_key: BTreeMap<(String, String), Vec<&Record>> = BTreeMap::new();
    for rec in records {
        let region = normalize_region(rec.region.as_deref().unwrap_or(""));
        let sector = rec.sector.unwrap_or(Sector::Vario).as_str().to_string();
        by_key.entry((region, sector)).or_default().push(rec);
    }
    by_key
}

/// Write one CSV per partition. Returns the number of slices written.
pub fn slice_dataset(records: &[Record], out: &Path) -> Result<usize> {
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {:?}", out))?;

    let by_key = group_records(records);
    for ((region, sector), recs) in &by_key {
        let dst = out.join(slug(region)).join(format!("{}.csv", slug(sector)));
        write_csv(recs, &dst)
            .with_context(|| format!("Failed to write slice for {} / {}", region, sector))?;
    }
    Ok(by_key.len())
}
