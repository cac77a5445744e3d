use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single funding-opportunity record.
///
/// Base fields are populated at ingest time; `sector`, `funding_type` and the
/// amount fields are filled in by the enrichment pass. Source-specific
/// structured columns keep their upstream names and live in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    #[serde(default)]
    pub entity: Option<String>,
    /// Raw region string as published by the source; canonicalized only at
    /// grouping time.
    #[serde(default)]
    pub region: Option<String>,
    pub source_url: String,
    /// ISO `YYYY-MM-DD`, or absent when the source gave nothing parseable.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub extracted_at: String,
    #[serde(default)]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub funding_type: Option<FundingType>,
    #[serde(default)]
    pub amount_min: Option<i64>,
    #[serde(default)]
    pub amount_max: Option<i64>,
    #[serde(default)]
    pub amount_provenance: AmountProvenance,
    /// Upstream columns carried verbatim (e.g. `Importo_minimo`).
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, String>,
}

/// High-level economic domain a record targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Digitale,
    Turismo,
    Green,
    Agro,
    Vario,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Digitale => "digitale",
            Sector::Turismo => "turismo",
            Sector::Green => "green",
            Sector::Agro => "agro",
            Sector::Vario => "vario",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "digitale" => Some(Sector::Digitale),
            "turismo" => Some(Sector::Turismo),
            "green" => Some(Sector::Green),
            "agro" => Some(Sector::Agro),
            "vario" => Some(Sector::Vario),
            _ => None,
        }
    }
}

/// Mechanism of the funding instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingType {
    FondoPerduto,
    CreditoImposta,
    Garanzia,
    FinanziamentoAgevolato,
    Altro,
}

impl FundingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingType::FondoPerduto => "fondo_perduto",
            FundingType::CreditoImposta => "credito_imposta",
            FundingType::Garanzia => "garanzia",
            FundingType::FinanziamentoAgevolato => "finanziamento_agevolato",
            FundingType::Altro => "altro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fondo_perduto" => Some(FundingType::FondoPerduto),
            "credito_imposta" => Some(FundingType::CreditoImposta),
            "garanzia" => Some(FundingType::Garanzia),
            "finanziamento_agevolato" => Some(FundingType::FinanziamentoAgevolato),
            "altro" => Some(FundingType::Altro),
            _ => None,
        }
    }
}

/// Which extraction phase produced a record's amount range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountProvenance {
    /// Derived from the source's structured numeric columns.
    Structured,
    /// Recovered by regex scanning over the record's free text.
    Text,
    /// No usable amount anywhere in the record.
    #[default]
    Absent,
}

impl AmountProvenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountProvenance::Structured => "structured",
            AmountProvenance::Text => "text",
            AmountProvenance::Absent => "absent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "structured" => Some(AmountProvenance::Structured),
            "text" => Some(AmountProvenance::Text),
            "absent" => Some(AmountProvenance::Absent),
            _ => None,
        }
    }
}
