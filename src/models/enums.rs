use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Discipline {
    SkilledNursing => "skilled_nursing",
    PhysicalTherapy => "physical_therapy",
    OccupationalTherapy => "occupational_therapy",
    SpeechTherapy => "speech_therapy",
    MedicalSocialWork => "medical_social_work",
    HomeHealthAide => "home_health_aide",
});

str_enum!(FrequencyUnit {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

str_enum!(FrequencyStatus {
    New => "new",
    Current => "current",
});

impl Discipline {
    pub const ALL: [Discipline; 6] = [
        Discipline::SkilledNursing,
        Discipline::PhysicalTherapy,
        Discipline::OccupationalTherapy,
        Discipline::SpeechTherapy,
        Discipline::MedicalSocialWork,
        Discipline::HomeHealthAide,
    ];

    /// Short code printed on visit calendars.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SkilledNursing => "SN",
            Self::PhysicalTherapy => "PT",
            Self::OccupationalTherapy => "OT",
            Self::SpeechTherapy => "ST",
            Self::MedicalSocialWork => "MSW",
            Self::HomeHealthAide => "HHA",
        }
    }
}

impl FrequencyStatus {
    pub const ALL: [FrequencyStatus; 2] = [FrequencyStatus::New, FrequencyStatus::Current];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn discipline_round_trip() {
        for d in Discipline::ALL {
            assert_eq!(Discipline::from_str(d.as_str()).unwrap(), d);
        }
    }

    #[test]
    fn unit_round_trip() {
        for (variant, s) in [
            (FrequencyUnit::Daily, "daily"),
            (FrequencyUnit::Weekly, "weekly"),
            (FrequencyUnit::Monthly, "monthly"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(FrequencyUnit::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_status_rejected() {
        let err = FrequencyStatus::from_str("archived").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { ref field, .. } if field == "FrequencyStatus"));
    }

    #[test]
    fn serde_uses_storage_names() {
        let json = serde_json::to_string(&Discipline::PhysicalTherapy).unwrap();
        assert_eq!(json, "\"physical_therapy\"");
        let unit: FrequencyUnit = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(unit, FrequencyUnit::Monthly);
    }

    #[test]
    fn discipline_codes_are_distinct() {
        let mut codes: Vec<_> = Discipline::ALL.iter().map(|d| d.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Discipline::ALL.len());
    }
}
