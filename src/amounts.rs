//! Amount Extraction Module
//!
//! Derives an integer (min, max) monetary range per record:
//! 1. from the source's structured numeric columns, then
//! 2. in fallback, by regex over all string-valued fields.
//!
//! Each phase either yields a non-empty value set or defers to the next;
//! the provenance flag records which phase won.

use crate::types::{AmountProvenance, Record};
use regex::Regex;
use std::sync::LazyLock;

/// Structured numeric columns considered during phase 1, in candidate order.
pub const NUMERIC_COLUMNS: &[&str] = &[
    "Importo_minimo",
    "Importo_massimo",
    "Spesa_Ammessa_min",
    "Spesa_Ammessa_max",
    "Agevolazione_Concedibile_min",
    "Agevolazione_Concedibile_max",
    "Stanziamento_incentivo",
];

/// Floor for regex-extracted values. Smaller hits are treated as noise
/// (stray page or document numbers, not plausible funding amounts).
/// Inherited from the upstream dataset without a documented rationale.
pub const MIN_PLAUSIBLE_AMOUNT: i64 = 2_300;

/// Currency-marked numeric mention: `€`/`EUR`/`EU` followed by digits,
/// possibly grouped with `.`, `'` or spaces.
static EURO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:€|\bEUR?\b)\s*([0-9][0-9.'\s]*[0-9])").expect("euro pattern is valid")
});

type Collect = fn(&Record) -> Vec<i64>;

/// Extraction phases in fallback order. The first phase that produces any
/// value wins; later phases are not consulted.
const PHASES: &[(AmountProvenance, Collect)] = &[
    (AmountProvenance::Structured, collect_structured),
    (AmountProvenance::Text, collect_text),
];

/// Produce `(amount_min, amount_max, provenance)` for a record.
pub fn extract_amounts(rec: &Record) -> (Option<i64>, Option<i64>, AmountProvenance) {
    for (provenance, collect) in PHASES {
        let values = collect(rec);
        if let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) {
            return (Some(min), Some(max), *provenance);
        }
    }
    (None, None, AmountProvenance::Absent)
}

/// Coerce a structured field value to an integer: comma becomes a decimal
/// point, parse as float, truncate. Unparseable values yield `None`.
fn coerce(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', ".");
    cleaned.parse::<f64>().ok().map(|f| f.trunc() as i64)
}

/// Phase 1: every non-empty structured column plus any pre-existing amount
/// fields, coerced to integers. Parse failures are dropped silently.
fn collect_structured(rec: &Record) -> Vec<i64> {
    let mut values: Vec<i64> = NUMERIC_COLUMNS
        .iter()
        .filter_map(|col| rec.extra.get(*col))
        .filter(|v| !v.is_empty())
        .filter_map(|v| coerce(v))
        .collect();
    values.extend(rec.amount_min);
    values.extend(rec.amount_max);
    values
}

/// Phase 2: scan the concatenation of all string-valued fields for
/// currency-marked mentions.
fn collect_text(rec: &Record) -> Vec<i64> {
    parse_euro_amounts(&text_blob(rec), MIN_PLAUSIBLE_AMOUNT)
}

/// All currency-marked amounts in `text` strictly above `floor`. Grouping
/// separators are stripped before parsing; malformed matches are dropped.
pub fn parse_euro_amounts(text: &str, floor: i64) -> Vec<i64> {
    EURO_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let digits: String = caps[1].chars().filter(|c| !" .'".contains(*c)).collect();
            digits.parse::<i64>().ok()
        })
        .filter(|&n| n > floor)
        .collect()
}

/// One blob out of every textual field of the record, extras included.
fn text_blob(rec: &Record) -> String {
    let mut parts: Vec<&str> = vec![&rec.title, &rec.source_url, &rec.extracted_at];
    parts.extend(rec.entity.as_deref());
    parts.extend(rec.region.as_deref());
    parts.extend(rec.deadline.as_deref());
    parts.extend(rec.extra.values().map(String::as_str));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_extra(extra: &[(&str, &str)]) -> Record {
        Record {
            title: "Bando di prova".to_string(),
            entity: Some("Regione Lombardia".to_string()),
            region: Some("Lombardia".to_string()),
            source_url: "https://example.it/bando".to_string(),
            deadline: Some("2026-09-30".to_string()),
            extracted_at: "2026-08-30T10:00:00".to_string(),
            sector: None,
            funding_type: None,
            amount_min: None,
            amount_max: None,
            amount_provenance: AmountProvenance::Absent,
            extra: extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_structured_min_max() {
        let rec = record_with_extra(&[("Importo_minimo", "1000"), ("Importo_massimo", "5000")]);
        assert_eq!(
            extract_amounts(&rec),
            (Some(1000), Some(5000), AmountProvenance::Structured)
        );
    }

    #[test]
    fn test_structured_comma_decimal_truncates() {
        let rec = record_with_extra(&[("Stanziamento_incentivo", "1500000,75")]);
        assert_eq!(
            extract_amounts(&rec),
            (Some(1500000), Some(1500000), AmountProvenance::Structured)
        );
    }

    #[test]
    fn test_structured_bad_values_dropped_not_fatal() {
        let rec = record_with_extra(&[
            ("Importo_minimo", "n.d."),
            ("Importo_massimo", "20000"),
        ]);
        assert_eq!(
            extract_amounts(&rec),
            (Some(20000), Some(20000), AmountProvenance::Structured)
        );
    }

    #[test]
    fn test_text_fallback_only_without_structured() {
        let mut rec = record_with_extra(&[("Descrizione", "contributo fino a € 10.000")]);
        assert_eq!(
            extract_amounts(&rec),
            (Some(10000), Some(10000), AmountProvenance::Text)
        );

        // A single structured value preempts the text scan entirely
        rec.extra
            .insert("Importo_massimo".to_string(), "4000".to_string());
        assert_eq!(
            extract_amounts(&rec),
            (Some(4000), Some(4000), AmountProvenance::Structured)
        );
    }

    #[test]
    fn test_text_noise_floor() {
        let rec = record_with_extra(&[("Descrizione", "vedi €1.000 a pagina 12")]);
        // 1000 <= 2300: dropped as noise, record ends up with no amounts
        assert_eq!(extract_amounts(&rec), (None, None, AmountProvenance::Absent));
    }

    #[test]
    fn test_preexisting_amounts_count_as_structured() {
        let mut rec = record_with_extra(&[]);
        rec.amount_min = Some(3000);
        rec.amount_max = Some(9000);
        assert_eq!(
            extract_amounts(&rec),
            (Some(3000), Some(9000), AmountProvenance::Structured)
        );
    }

    #[test]
    fn test_parse_euro_amounts_separators() {
        assert_eq!(parse_euro_amounts("fino a € 10.000", 2300), vec![10000]);
        assert_eq!(parse_euro_amounts("EUR 1'500'000 stanziati", 2300), vec![1500000]);
        assert_eq!(parse_euro_amounts("importo EU 250 000", 2300), vec![250000]);
        assert_eq!(parse_euro_amounts("tra € 5.000 e € 50.000", 2300), vec![5000, 50000]);
    }

    #[test]
    fn test_parse_euro_amounts_unmarked_numbers_ignored() {
        assert_eq!(parse_euro_amounts("codice bando 2026/10000", 2300), Vec::<i64>::new());
    }

    #[test]
    fn test_min_max_invariant() {
        let rec = record_with_extra(&[
            ("Spesa_Ammessa_min", "8000"),
            ("Spesa_Ammessa_max", "3000"),
            ("Stanziamento_incentivo", "5000"),
        ]);
        let (min, max, _) = extract_amounts(&rec);
        assert!(min.unwrap() <= max.unwrap());
        assert_eq!((min, max), (Some(3000), Some(8000)));
    }
}
