//! Domain enums shared by the API and the import pipeline
//!
//! The variant names are the canonical spellings used on the wire and in the
//! Postgres enum types (`gender`, `nomination_type`, `candidate_status`).
//! With the `sqlx` feature they bind directly to those database types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HamletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "gender"))]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "nomination_type"))]
pub enum NominationType {
    Party,
    Independent,
    Coalition,
    Individual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "candidate_status"))]
pub enum CandidateStatus {
    #[default]
    Active,
    Withdrawn,
    Disqualified,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl NominationType {
    pub const ALL: [NominationType; 4] = [
        NominationType::Party,
        NominationType::Independent,
        NominationType::Coalition,
        NominationType::Individual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NominationType::Party => "Party",
            NominationType::Independent => "Independent",
            NominationType::Coalition => "Coalition",
            NominationType::Individual => "Individual",
        }
    }
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Active => "Active",
            CandidateStatus::Withdrawn => "Withdrawn",
            CandidateStatus::Disqualified => "Disqualified",
        }
    }
}

macro_rules! canonical_from_str {
    ($ty:ty, $kind:literal, [$($variant:ident),+]) => {
        /// Exact match on the canonical variant name.
        impl FromStr for $ty {
            type Err = HamletError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(<$ty>::$variant),)+
                    other => Err(HamletError::unknown_variant($kind, other)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

canonical_from_str!(Gender, "gender", [Male, Female]);
canonical_from_str!(NominationType, "nomination type", [Party, Independent, Coalition, Individual]);
canonical_from_str!(CandidateStatus, "status", [Active, Withdrawn, Disqualified]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for gender in Gender::ALL {
            assert_eq!(gender.as_str().parse::<Gender>(), Ok(gender));
        }
        for kind in NominationType::ALL {
            assert_eq!(kind.to_string().parse::<NominationType>(), Ok(kind));
        }
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("male".parse::<Gender>().is_err());
        assert!(" Female".parse::<Gender>().is_err());
        assert_eq!(
            "Alliance".parse::<NominationType>(),
            Err(HamletError::unknown_variant("nomination type", "Alliance"))
        );
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&NominationType::Coalition).unwrap();
        assert_eq!(json, "\"Coalition\"");
        let status: CandidateStatus = serde_json::from_str("\"Withdrawn\"").unwrap();
        assert_eq!(status, CandidateStatus::Withdrawn);
        assert_eq!(CandidateStatus::default(), CandidateStatus::Active);
    }
}
