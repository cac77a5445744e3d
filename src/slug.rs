//! Slug Module
//!
//! Converts arbitrary text into bounded-length, filesystem-safe identifiers
//! used for partition directories and file names.

use sha2::{Digest, Sha256};

/// Maximum slug length before hash disambiguation kicks in.
pub const SLUG_MAX_LEN: usize = 40;

/// Hex characters of content hash appended to truncated slugs.
pub const SLUG_HASH_LEN: usize = 6;

/// Lowercase, spaces to underscores, strip everything outside `[a-z0-9_]`,
/// collapse underscore runs. Inputs longer than [`SLUG_MAX_LEN`] are
/// truncated and suffixed with a hash of the full normalized string, so two
/// long inputs sharing a 40-character prefix still get distinct slugs.
pub fn slug(text: &str) -> String {
    let mut base = String::new();
    let mut run = false;
    for ch in text.to_lowercase().chars() {
        let ch = if ch == ' ' { '_' } else { ch };
        match ch {
            'a'..='z' | '0'..='9' => {
                base.push(ch);
                run = false;
            }
            '_' => {
                if !run {
                    base.push('_');
                }
                run = true;
            }
            _ => {}
        }
    }

    if base.len() <= SLUG_MAX_LEN {
        return base;
    }

    let digest = Sha256::digest(base.as_bytes());
    let hash: String = digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
        .chars()
        .take(SLUG_HASH_LEN)
        .collect();
    // base is pure ASCII at this point, byte indexing is safe
    format!("{}_{}", &base[..SLUG_MAX_LEN], hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        assert_eq!(slug("Comuni  Montani!!"), "comuni_montani");
        assert_eq!(slug("Valle d'Aosta"), "valle_daosta");
        assert_eq!(slug("Trentino-Alto Adige/Südtirol"), "trentinoalto_adigesdtirol");
    }

    #[test]
    fn test_short_slug_is_idempotent() {
        let once = slug("Fondo di Garanzia PMI");
        assert_eq!(slug(&once), once);
    }

    #[test]
    fn test_long_inputs_sharing_prefix_stay_distinct() {
        let prefix = "a".repeat(SLUG_MAX_LEN);
        let one = slug(&format!("{}{}", prefix, "xxxxxxxxxxxxxxxxxxxx"));
        let two = slug(&format!("{}{}", prefix, "yyyyyyyyyyyyyyyyyyyy"));
        assert_ne!(one, two);
        assert_eq!(&one[..SLUG_MAX_LEN], &two[..SLUG_MAX_LEN]);
        assert_eq!(one.len(), SLUG_MAX_LEN + 1 + SLUG_HASH_LEN);
    }

    #[test]
    fn test_short_input_untouched_by_hashing() {
        let s = slug("agro");
        assert_eq!(s, "agro");
        assert!(s.len() <= SLUG_MAX_LEN);
    }
}
