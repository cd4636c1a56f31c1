//! Source column mapping
//!
//! The official candidate spreadsheet has bilingual, multi-line headers and
//! the JSON export uses camelCase keys. Each logical field lists the header
//! keys it may appear under, in priority order. The first key that is present
//! with a non-blank value wins.

use super::models::{ExtractedFields, RawRecord};

/// Logical candidate field read from a source record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BallotNumber,
    NameOnBallot,
    CandidateSequence,
    NominationType,
    ElectoralDistrict,
    Gender,
    FullName,
    VoterNumber,
    FullNameArabic,
    FullNameKurdish,
    UniqueCandidateId,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Field,
    /// Header keys in priority order, already whitespace-collapsed
    pub keys: &'static [&'static str],
}

pub const COLUMN_SPECS: &[ColumnSpec] = &[
    ColumnSpec {
        field: Field::BallotNumber,
        keys: &["A", "رقم الاقتراع الحزب", "ballotNumber"],
    },
    ColumnSpec {
        field: Field::NameOnBallot,
        keys: &[
            "Name on ballot",
            "الحزب",
            "nameOnBallot",
            "partyNameEnglish",
            "partyNameArabic",
        ],
    },
    ColumnSpec {
        field: Field::CandidateSequence,
        keys: &["Candidate Sequence", "رقم الاقتراع للمرشح", "candidateSequence"],
    },
    ColumnSpec {
        field: Field::NominationType,
        keys: &["Type Nominat- ion", "ا نوع الترشيح", "nominationType"],
    },
    ColumnSpec {
        field: Field::ElectoralDistrict,
        keys: &[
            "Electoral district",
            "الدائرة الانتخابية",
            "electoralDistrict",
            "governorate",
        ],
    },
    ColumnSpec {
        field: Field::Gender,
        keys: &["Sex", "الجنس", "gender", "sex"],
    },
    ColumnSpec {
        field: Field::FullName,
        keys: &[
            "Candidate's full name",
            "إسم المرشح الكامل",
            "fullName",
            "fullNameEnglish",
            "fullNameArabic",
        ],
    },
    ColumnSpec {
        field: Field::VoterNumber,
        keys: &["Voter number", "الرقم", "voterNumber"],
    },
    ColumnSpec {
        field: Field::FullNameArabic,
        keys: &["fullNameArabic"],
    },
    ColumnSpec {
        field: Field::FullNameKurdish,
        keys: &["fullNameKurdish"],
    },
    ColumnSpec {
        field: Field::UniqueCandidateId,
        keys: &["uniqueCandidateId"],
    },
];

/// Header key as used for lookups: BOM stripped, whitespace runs collapsed.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-blank value among `keys`, trimmed
pub fn first_present<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

pub fn extract(record: &RawRecord) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    for spec in COLUMN_SPECS {
        let value = first_present(record, spec.keys).map(str::to_string);
        let slot = match spec.field {
            Field::BallotNumber => &mut fields.ballot_number,
            Field::NameOnBallot => &mut fields.name_on_ballot,
            Field::CandidateSequence => &mut fields.candidate_sequence,
            Field::NominationType => &mut fields.nomination_type,
            Field::ElectoralDistrict => &mut fields.electoral_district,
            Field::Gender => &mut fields.gender,
            Field::FullName => &mut fields.full_name,
            Field::VoterNumber => &mut fields.voter_number,
            Field::FullNameArabic => &mut fields.full_name_arabic,
            Field::FullNameKurdish => &mut fields.full_name_kurdish,
            Field::UniqueCandidateId => &mut fields.unique_candidate_id,
        };
        *slot = value;
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        let mut record = RawRecord::new(2);
        for (header, value) in pairs {
            record.insert(header, *value);
        }
        record
    }

    #[test]
    fn test_every_field_has_a_spec() {
        let fields = [
            Field::BallotNumber,
            Field::NameOnBallot,
            Field::CandidateSequence,
            Field::NominationType,
            Field::ElectoralDistrict,
            Field::Gender,
            Field::FullName,
            Field::VoterNumber,
            Field::FullNameArabic,
            Field::FullNameKurdish,
            Field::UniqueCandidateId,
        ];
        for field in fields {
            assert_eq!(
                COLUMN_SPECS.iter().filter(|s| s.field == field).count(),
                1,
                "{field:?}"
            );
        }
    }

    #[test]
    fn test_spec_keys_are_normalized() {
        for spec in COLUMN_SPECS {
            for key in spec.keys {
                assert_eq!(normalize_header(key), *key);
            }
        }
    }

    #[test]
    fn test_normalize_header_collapses_multiline_headers() {
        assert_eq!(normalize_header("Candidate\n\nSequence"), "Candidate Sequence");
        assert_eq!(normalize_header("   Type\n      Nominat-\n            ion"), "Type Nominat- ion");
        assert_eq!(normalize_header("\u{feff}A"), "A");
    }

    #[test]
    fn test_official_english_headers() {
        let fields = extract(&record(&[
            ("A", "105"),
            ("Name on ballot", "Progress Party"),
            ("Candidate\n\nSequence", "3"),
            ("   Type\n      Nominat-\n            ion", "Party"),
            ("Electoral\ndistrict", "Basrah"),
            ("Sex", "F"),
            ("Candidate's full name", "Zainab Karim"),
            ("Voter number", "778812"),
        ]));

        assert_eq!(fields.ballot_number.as_deref(), Some("105"));
        assert_eq!(fields.name_on_ballot.as_deref(), Some("Progress Party"));
        assert_eq!(fields.candidate_sequence.as_deref(), Some("3"));
        assert_eq!(fields.nomination_type.as_deref(), Some("Party"));
        assert_eq!(fields.electoral_district.as_deref(), Some("Basrah"));
        assert_eq!(fields.gender.as_deref(), Some("F"));
        assert_eq!(fields.full_name.as_deref(), Some("Zainab Karim"));
        assert_eq!(fields.voter_number.as_deref(), Some("778812"));
        assert!(fields.unique_candidate_id.is_none());
    }

    #[test]
    fn test_arabic_headers() {
        let fields = extract(&record(&[
            ("رقم الاقتراع الحزب", "210"),
            ("الحزب", "تحالف الفتح"),
            ("رقم الاقتراع للمرشح", "7"),
            ("ا نوع الترشيح", "تحالف"),
            ("الدائرة الانتخابية", "بغداد"),
            ("الجنس", "ذكر"),
            ("إسم المرشح الكامل", "علي حسن"),
            ("الرقم", "11"),
        ]));

        assert_eq!(fields.ballot_number.as_deref(), Some("210"));
        assert_eq!(fields.name_on_ballot.as_deref(), Some("تحالف الفتح"));
        assert_eq!(fields.candidate_sequence.as_deref(), Some("7"));
        assert_eq!(fields.nomination_type.as_deref(), Some("تحالف"));
        assert_eq!(fields.electoral_district.as_deref(), Some("بغداد"));
        assert_eq!(fields.gender.as_deref(), Some("ذكر"));
        assert_eq!(fields.full_name.as_deref(), Some("علي حسن"));
        assert_eq!(fields.voter_number.as_deref(), Some("11"));
    }

    #[test]
    fn test_json_export_keys() {
        let fields = extract(&record(&[
            ("uniqueCandidateId", "cand-0001"),
            ("fullNameEnglish", "Ali Hassan"),
            ("fullNameArabic", "علي حسن"),
            ("governorate", "Baghdad"),
            ("sex", "male"),
            ("partyNameArabic", "دولة القانون"),
        ]));

        assert_eq!(fields.unique_candidate_id.as_deref(), Some("cand-0001"));
        assert_eq!(fields.full_name.as_deref(), Some("Ali Hassan"));
        assert_eq!(fields.full_name_arabic.as_deref(), Some("علي حسن"));
        assert_eq!(fields.electoral_district.as_deref(), Some("Baghdad"));
        assert_eq!(fields.gender.as_deref(), Some("male"));
        assert_eq!(fields.name_on_ballot.as_deref(), Some("دولة القانون"));
    }

    #[test]
    fn test_first_present_key_wins() {
        let fields = extract(&record(&[
            ("Sex", "M"),
            ("الجنس", "أنثى"),
            ("Electoral district", "Erbil"),
            ("governorate", "Kirkuk"),
        ]));
        assert_eq!(fields.gender.as_deref(), Some("M"));
        assert_eq!(fields.electoral_district.as_deref(), Some("Erbil"));
    }

    #[test]
    fn test_blank_value_falls_through_to_next_key() {
        let fields = extract(&record(&[
            ("Candidate's full name", "   "),
            ("إسم المرشح الكامل", "  علي حسن "),
        ]));
        assert_eq!(fields.full_name.as_deref(), Some("علي حسن"));
    }

    #[test]
    fn test_missing_columns_are_none() {
        let fields = extract(&record(&[("unrelated", "x")]));
        assert_eq!(fields, ExtractedFields::default());
    }
}
