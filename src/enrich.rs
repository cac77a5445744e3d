//! Enrichment Pass
//!
//! Mutates records in place, additively: classification and amount
//! extraction fill the derived fields, base fields are never altered.

use crate::amounts::extract_amounts;
use crate::classify::{classify_funding_type, classify_sector};
use crate::types::Record;

/// Classify every record and extract its amount range.
pub fn enrich(records: &mut [Record]) {
    for rec in records.iter_mut() {
        rec.sector = Some(classify_sector(&rec.title));
        rec.funding_type = Some(classify_funding_type(&rec.title));

        let (min, max, provenance) = extract_amounts(rec);
        rec.amount_min = min;
        rec.amount_max = max;
        rec.amount_provenance = provenance;
    }
}
