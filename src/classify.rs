//! Keyword Classification Module
//!
//! Maps record titles to a sector and a funding-type category using ordered
//! keyword tables. Matching is substring-based and case-insensitive; the
//! first category whose keyword list hits wins, so table order matters.

use crate::types::{FundingType, Sector};

/// Sector keyword table, checked in order.
pub const SECTOR_KEYWORDS: &[(Sector, &[&str])] = &[
    (Sector::Digitale, &["digit", "ict", "software", "innovazione tecnologica"]),
    (Sector::Turismo, &["turism", "hotel", "ricettiv"]),
    (Sector::Green, &["energie rinnovabili", "sostenibil", "fotovoltaic", "ecolog"]),
    (Sector::Agro, &["agricolt", "agro", "rural", "impresa agric"]),
];

/// Funding-type keyword table, checked in order.
pub const TYPE_KEYWORDS: &[(FundingType, &[&str])] = &[
    (FundingType::FondoPerduto, &["contributo a fondo perduto", "fondo perduto"]),
    (FundingType::CreditoImposta, &["credito d'imposta", "tax credit"]),
    (FundingType::Garanzia, &["garanzia", "fondo di garanzia"]),
    (FundingType::FinanziamentoAgevolato, &["finanziamento agevolato", "tasso agevolato"]),
];

/// First category whose keyword list contains a substring of the lower-cased
/// title; `fallback` when nothing matches.
fn first_match<C: Copy>(title: &str, table: &[(C, &[&str])], fallback: C) -> C {
    let lc = title.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lc.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(fallback)
}

pub fn classify_sector(title: &str) -> Sector {
    first_match(title, SECTOR_KEYWORDS, Sector::Vario)
}

pub fn classify_funding_type(title: &str) -> FundingType {
    first_match(title, TYPE_KEYWORDS, FundingType::Altro)
}
