//! Region Normalization Module
//!
//! Canonicalizes the inconsistently formatted region strings found in the
//! source datasets into a fixed vocabulary plus the "Nazionale" fallback.

/// Multi-word region names that the sources spell in too many ways to
/// title-case mechanically. An entry applies when the lower-cased input
/// contains every required substring.
const CANONICAL_REGIONS: &[(&[&str], &str)] = &[
    (&["valle", "aosta"], "Valle d'Aosta"),
    (&["trentino", "alto", "adige"], "Trentino-Alto Adige/Südtirol"),
];

/// Convert a raw region string into one canonical region name.
///
/// Rules, first applicable wins:
/// 1. empty input -> "Nazionale"
/// 2. comma-separated list of regions -> "Nazionale"
/// 3. canonical table entry (Valle d'Aosta, Trentino-Alto Adige/Südtirol)
/// 4. slash variant -> part before the first slash
/// 5. otherwise title-case the raw string
pub fn normalize_region(raw: &str) -> String {
    let txt = raw.trim();
    if txt.is_empty() {
        return "Nazionale".to_string();
    }
    if txt.contains(',') {
        return "Nazionale".to_string();
    }

    let low = txt.to_lowercase();
    for (needles, canonical) in CANONICAL_REGIONS {
        if needles.iter().all(|n| low.contains(n)) {
            return (*canonical).to_string();
        }
    }

    let txt = txt.split('/').next().unwrap_or(txt);
    title_case(txt)
}

/// Capitalize the first letter of each word, lowercase the rest. A letter
/// counts as word-initial after any non-alphabetic character, so hyphenated
/// and apostrophe'd names come out as "Emilia-Romagna" / "D'Aosta".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}
