//! Normalization rules for raw candidate source data
//!
//! The source spreadsheets mix English spellings, Arabic and Kurdish script.
//! These tables reduce that text to the canonical values stored in the
//! database. Lookups lowercase the input, trim it and collapse internal
//! whitespace runs to a single space before matching.
//!
//! Failure modes differ on purpose:
//!
//! - governorate: unknown input yields `None` and the caller keeps the raw text
//! - gender: unknown input is an error, the row must be rejected
//! - nomination type: unknown input falls back to [`NominationType::Independent`]

use crate::error::{HamletError, Result};
use crate::types::{Gender, NominationType};

/// Alias (lowercase) -> canonical governorate name.
pub const GOVERNORATE_ALIASES: &[(&str, &str)] = &[
    ("baghdad", "Baghdad"),
    ("bagdad", "Baghdad"),
    ("basra", "Basra"),
    ("basrah", "Basra"),
    ("nineveh", "Nineveh"),
    ("ninawa", "Nineveh"),
    ("erbil", "Erbil"),
    ("arbil", "Erbil"),
    ("irbil", "Erbil"),
    ("sulaymaniyah", "Sulaymaniyah"),
    ("sulaimaniya", "Sulaymaniyah"),
    ("dohuk", "Dohuk"),
    ("duhok", "Dohuk"),
    ("anbar", "Al Anbar"),
    ("al anbar", "Al Anbar"),
    ("al-anbar", "Al Anbar"),
    ("diyala", "Diyala"),
    ("kirkuk", "Kirkuk"),
    ("salah al-din", "Saladin"),
    ("saladin", "Saladin"),
    ("wasit", "Wasit"),
    ("maysan", "Maysan"),
    ("babil", "Babil"),
    ("babylon", "Babil"),
    ("najaf", "Najaf"),
    ("karbala", "Karbala"),
    ("al-qadisiyyah", "Al-Qādisiyyah"),
    ("qadisiyyah", "Al-Qādisiyyah"),
    ("dhi qar", "Dhi Qar"),
    ("dhi-qar", "Dhi Qar"),
    ("muthanna", "Muthanna"),
    ("al-muthanna", "Muthanna"),
];

/// Token (lowercase) -> gender. English initials and words, Arabic, Kurdish.
pub const GENDER_TOKENS: &[(&str, Gender)] = &[
    ("male", Gender::Male),
    ("m", Gender::Male),
    ("ذكر", Gender::Male),
    ("نێر", Gender::Male),
    ("female", Gender::Female),
    ("f", Gender::Female),
    ("أنثى", Gender::Female),
    ("مێ", Gender::Female),
];

/// Token (lowercase) -> nomination type. English and Arabic synonyms.
pub const NOMINATION_TYPE_TOKENS: &[(&str, NominationType)] = &[
    ("party", NominationType::Party),
    ("حزب", NominationType::Party),
    ("independent", NominationType::Independent),
    ("مستقل", NominationType::Independent),
    ("coalition", NominationType::Coalition),
    ("alliance", NominationType::Coalition),
    ("تحالف", NominationType::Coalition),
    ("individual", NominationType::Individual),
    ("فردي", NominationType::Individual),
];

/// Lowercase, trim and collapse whitespace runs.
pub fn normalize_token(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn lookup<T: Copy>(table: &[(&str, T)], raw: &str) -> Option<T> {
    let key = normalize_token(raw);
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, value)| *value)
}

/// Canonical governorate name for a spelling variant, `None` when unknown.
pub fn normalize_governorate(raw: &str) -> Option<&'static str> {
    lookup(GOVERNORATE_ALIASES, raw)
}

/// Parse a source gender token. Unrecognized tokens are an error.
pub fn parse_gender(raw: &str) -> Result<Gender> {
    lookup(GENDER_TOKENS, raw).ok_or_else(|| HamletError::InvalidGender(raw.to_string()))
}

/// Parse a source nomination type, defaulting to `Independent` when unrecognized.
pub fn parse_nomination_type(raw: &str) -> NominationType {
    lookup(NOMINATION_TYPE_TOKENS, raw).unwrap_or(NominationType::Independent)
}

/// URL slug for a canonical governorate name: `Dhi Qar` -> `dhi-qar`.
pub fn governorate_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Short governorate code: first three characters, uppercased.
pub fn governorate_code(name: &str) -> String {
    name.trim().chars().take(3).collect::<String>().to_uppercase()
}

/// Party code: first ten characters, uppercased, each whitespace run replaced by `_`.
pub fn party_code(name: &str) -> String {
    let mut code = String::new();
    let mut in_whitespace = false;
    for c in name.trim().chars().take(10) {
        if c.is_whitespace() {
            if !in_whitespace {
                code.push('_');
            }
            in_whitespace = true;
        } else {
            code.extend(c.to_uppercase());
            in_whitespace = false;
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_alias_resolves_to_one_canonical_name() {
        for (alias, canonical) in GOVERNORATE_ALIASES {
            assert_eq!(normalize_governorate(alias), Some(*canonical), "alias {alias}");
            let hits: Vec<_> = GOVERNORATE_ALIASES
                .iter()
                .filter(|(other, _)| other == alias)
                .collect();
            assert_eq!(hits.len(), 1, "alias {alias} listed twice");
        }
    }

    #[test]
    fn test_canonical_governorates_cover_all_eighteen() {
        let mut canonical: Vec<_> = GOVERNORATE_ALIASES.iter().map(|(_, c)| *c).collect();
        canonical.sort_unstable();
        canonical.dedup();
        assert_eq!(canonical.len(), 18);
    }

    #[test]
    fn test_unknown_governorate_is_none() {
        assert_eq!(normalize_governorate("Atlantis"), None);
        assert_eq!(normalize_governorate(""), None);
        assert_eq!(normalize_governorate("   "), None);
        assert_eq!(normalize_governorate("بغداد"), None);
    }

    #[test]
    fn test_governorate_internal_whitespace() {
        assert_eq!(normalize_governorate("  Dhi \n Qar "), Some("Dhi Qar"));
        assert_eq!(normalize_governorate("AL   ANBAR"), Some("Al Anbar"));
    }

    #[test]
    fn test_gender_tokens() {
        assert_eq!(parse_gender("M"), Ok(Gender::Male));
        assert_eq!(parse_gender(" female "), Ok(Gender::Female));
        assert_eq!(parse_gender("ذكر"), Ok(Gender::Male));
        assert_eq!(parse_gender("أنثى"), Ok(Gender::Female));
        assert_eq!(parse_gender("نێر"), Ok(Gender::Male));
        assert_eq!(parse_gender("مێ"), Ok(Gender::Female));
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let err = parse_gender("x").unwrap_err();
        assert_eq!(err, HamletError::InvalidGender("x".to_string()));
        assert_eq!(err.to_string(), "Invalid gender value: \"x\"");
        assert!(parse_gender("").is_err());
    }

    #[test]
    fn test_nomination_type_tokens() {
        assert_eq!(parse_nomination_type("Party"), NominationType::Party);
        assert_eq!(parse_nomination_type("مستقل"), NominationType::Independent);
        assert_eq!(parse_nomination_type("ALLIANCE"), NominationType::Coalition);
        assert_eq!(parse_nomination_type("تحالف"), NominationType::Coalition);
        assert_eq!(parse_nomination_type("فردي"), NominationType::Individual);
    }

    #[test]
    fn test_unknown_nomination_type_defaults_to_independent() {
        assert_eq!(parse_nomination_type("list"), NominationType::Independent);
        assert_eq!(parse_nomination_type(""), NominationType::Independent);
    }

    #[test]
    fn test_codes_and_slugs() {
        assert_eq!(governorate_slug("Dhi Qar"), "dhi-qar");
        assert_eq!(governorate_slug("Al-Qādisiyyah"), "al-qādisiyyah");
        assert_eq!(governorate_code("Baghdad"), "BAG");
        assert_eq!(party_code("State of Law Coalition"), "STATE_OF_L");
        assert_eq!(party_code("  Fatah "), "FATAH");
        assert_eq!(party_code("State   of Law"), "STATE_OF");
        assert_eq!(party_code("Al\t \tWataniya"), "AL_WATAN");
    }

    fn alias_strategy() -> impl Strategy<Value = (&'static str, &'static str)> {
        proptest::sample::select(GOVERNORATE_ALIASES.to_vec())
    }

    proptest! {
        #[test]
        fn prop_alias_lookup_ignores_case_and_padding(
            (alias, canonical) in alias_strategy(),
            upper_mask in proptest::collection::vec(any::<bool>(), 0..32),
            left in "[ \t\n]{0,3}",
            right in "[ \t\n]{0,3}",
        ) {
            let mixed: String = alias
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if upper_mask.get(i).copied().unwrap_or(false) {
                        c.to_uppercase().next().unwrap_or(c)
                    } else {
                        c
                    }
                })
                .collect();
            let input = format!("{left}{mixed}{right}");
            prop_assert_eq!(normalize_governorate(&input), Some(canonical));
        }

        #[test]
        fn prop_governorate_lookup_never_panics(input in ".*") {
            let _ = normalize_governorate(&input);
        }
    }
}
