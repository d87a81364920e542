use serde::{Deserialize, Serialize};

/// The kind of person being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxpayerType {
    Individual,
    Huf,
    Company,
    Firm,
    Llp,
    Aop,
    Boi,
    LocalAuthority,
    ArtificialJuridicalPerson,
    Trust,
    CooperativeSociety,
}

impl TaxpayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Huf => "huf",
            Self::Company => "company",
            Self::Firm => "firm",
            Self::Llp => "llp",
            Self::Aop => "aop",
            Self::Boi => "boi",
            Self::LocalAuthority => "local authority",
            Self::ArtificialJuridicalPerson => "artificial juridical person",
            Self::Trust => "trust",
            Self::CooperativeSociety => "co-operative society",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(Self::Individual),
            "huf" => Some(Self::Huf),
            "company" => Some(Self::Company),
            "firm" => Some(Self::Firm),
            "llp" => Some(Self::Llp),
            "aop" => Some(Self::Aop),
            "boi" => Some(Self::Boi),
            "local authority" | "local_authority" => Some(Self::LocalAuthority),
            "artificial juridical person" | "artificial_juridical_person" | "ajp" => {
                Some(Self::ArtificialJuridicalPerson)
            }
            "trust" => Some(Self::Trust),
            "co-operative society" | "cooperative_society" => Some(Self::CooperativeSociety),
            _ => None,
        }
    }

    /// Types taxed through a slab table rather than a flat rate.
    pub fn is_slab_based(&self) -> bool {
        matches!(
            self,
            Self::Individual | Self::Huf | Self::Aop | Self::Boi | Self::ArtificialJuridicalPerson
        )
    }

    /// Types whose return is due on the audit due date.
    pub fn is_audit_case(&self) -> bool {
        matches!(
            self,
            Self::Company | Self::Firm | Self::Llp | Self::LocalAuthority
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidentialStatus {
    #[serde(rename = "ROR")]
    ResidentOrdinarilyResident,
    #[serde(rename = "RNOR")]
    ResidentNotOrdinarilyResident,
    #[serde(rename = "NR")]
    NonResident,
}

impl ResidentialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResidentOrdinarilyResident => "ROR",
            Self::ResidentNotOrdinarilyResident => "RNOR",
            Self::NonResident => "NR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROR" => Some(Self::ResidentOrdinarilyResident),
            "RNOR" => Some(Self::ResidentNotOrdinarilyResident),
            "NR" => Some(Self::NonResident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    #[default]
    Below60,
    From60To80,
    Above80,
}

impl AgeBand {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "below60" | "below_60" => Some(Self::Below60),
            "60to80" | "from60_to80" => Some(Self::From60To80),
            "above80" | "above_80" => Some(Self::Above80),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaxRegime {
    #[default]
    Old,
    New,
}

impl TaxRegime {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Old" | "old" => Some(Self::Old),
            "New" | "new" => Some(Self::New),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    #[default]
    Domestic,
    Foreign,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Foreign => "foreign",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxpayer_type_round_trips_through_display_name() {
        for t in [
            TaxpayerType::Individual,
            TaxpayerType::LocalAuthority,
            TaxpayerType::ArtificialJuridicalPerson,
            TaxpayerType::CooperativeSociety,
        ] {
            assert_eq!(TaxpayerType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn slab_based_types() {
        assert!(TaxpayerType::Individual.is_slab_based());
        assert!(TaxpayerType::ArtificialJuridicalPerson.is_slab_based());
        assert!(!TaxpayerType::Firm.is_slab_based());
        assert!(!TaxpayerType::Trust.is_slab_based());
    }

    #[test]
    fn unknown_codes_do_not_parse() {
        assert_eq!(TaxpayerType::parse("partnership"), None);
        assert_eq!(ResidentialStatus::parse("resident"), None);
        assert_eq!(AgeBand::parse("90plus"), None);
    }
}
