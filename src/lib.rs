//! BandiRadar Library
//!
//! Enrichment and slicing pipeline for Italian public-funding opportunity
//! records: classification, amount extraction, region canonicalization and
//! region × sector partitioning, plus CSV/JSON/ICS export.

pub mod amounts;
pub mod classify;
pub mod enrich;
pub mod export;
pub mod ics;
pub mod ingest;
pub mod regions;
pub mod slices;
pub mod slug;
pub mod types;

pub use types::*;
