use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::income_source::amount_or_zero;

/// Nature of a foreign income item; decides which domestic head it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncomeNature {
    Salary,
    HouseProperty,
    BusinessProfessionalIncome,
    LongTermCapitalGain,
    ShortTermCapitalGain,
    InterestIncome,
    Dividend,
    Royalty,
    FeesForTechnicalServices,
    #[default]
    Others,
}

impl IncomeNature {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::HouseProperty => "House Property",
            Self::BusinessProfessionalIncome => "Business/Professional Income",
            Self::LongTermCapitalGain => "Long-Term Capital Gain",
            Self::ShortTermCapitalGain => "Short-Term Capital Gain",
            Self::InterestIncome => "Interest Income",
            Self::Dividend => "Dividend",
            Self::Royalty => "Royalty",
            Self::FeesForTechnicalServices => "Fees for Technical Services",
            Self::Others => "Others",
        }
    }
}

/// Special-rate provisions for non-residents and offshore funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpecialSection {
    #[default]
    None,
    #[serde(rename = "115A")]
    S115A,
    #[serde(rename = "115AB")]
    S115AB,
    #[serde(rename = "115AC")]
    S115AC,
    #[serde(rename = "115ACA")]
    S115ACA,
    #[serde(rename = "115AD")]
    S115AD,
    #[serde(rename = "115AE")]
    S115AE,
    #[serde(rename = "115BBA")]
    S115BBA,
}

impl SpecialSection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::S115A => "115A",
            Self::S115AB => "115AB",
            Self::S115AC => "115AC",
            Self::S115ACA => "115ACA",
            Self::S115AD => "115AD",
            Self::S115AE => "115AE",
            Self::S115BBA => "115BBA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    #[default]
    NotApplicable,
    DeviationFound,
    NotFiled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransferPricing {
    pub is_associated_enterprise: bool,
    pub arms_length_price: Option<Decimal>,
    pub form_3ceb_status: ComplianceStatus,
}

/// One item of income earned outside India.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InternationalIncomeItem {
    pub id: String,
    pub country: String,
    pub nature: IncomeNature,
    pub amount_in_inr: Option<Decimal>,
    pub tax_paid_in_inr: Option<Decimal>,
    pub dtaa_applicable: bool,
    pub applicable_dtaa_article: String,
    /// Treaty rate as a fraction. `Some(0)` means the treaty exempts the item.
    pub tax_rate_as_per_dtaa: Option<Decimal>,
    pub is_ltcg: bool,
    pub special_section: SpecialSection,
    pub transfer_pricing: TransferPricing,
    pub form67_filed: bool,
}

impl InternationalIncomeItem {
    /// The amount brought to tax: the arm's length price for transactions
    /// with an associated enterprise, else the declared amount.
    pub fn assessable_amount(&self) -> Decimal {
        let tp = &self.transfer_pricing;
        match tp.arms_length_price {
            Some(alp) if tp.is_associated_enterprise => amount_or_zero(Some(alp)),
            _ => amount_or_zero(self.amount_in_inr),
        }
    }

    pub fn foreign_tax_paid(&self) -> Decimal {
        amount_or_zero(self.tax_paid_in_inr)
    }

    pub fn is_treaty_exempt(&self) -> bool {
        self.dtaa_applicable && self.tax_rate_as_per_dtaa == Some(Decimal::ZERO)
    }
}
