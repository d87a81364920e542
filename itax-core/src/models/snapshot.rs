//! The taxpayer snapshot: everything the engine reads for one computation.
//!
//! Every income, addition, disallowance and exemption field is an
//! [`IncomeSource`] so that residency filtering applies uniformly. Groups of
//! related fields expose a `sources()` accessor listing them in declaration
//! order, which is the order the head calculators sum them in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::income_source::{IncomeSource, amount_or_zero};
use super::international::InternationalIncomeItem;
use super::taxpayer::{AgeBand, CompanyType, ResidentialStatus, TaxRegime, TaxpayerType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerSnapshot {
    pub assessee_name: String,
    pub pan: String,
    /// Assessment year in `YYYY-YY` form, e.g. `2024-25`.
    pub assessment_year: String,
    pub taxpayer_type: TaxpayerType,
    pub residential_status: ResidentialStatus,
    pub company_type: Option<CompanyType>,
    pub previous_year_turnover: Option<Decimal>,
    pub age: AgeBand,
    pub tax_regime: TaxRegime,
    pub trust_data: TrustData,
    pub salary: Salary,
    pub house_properties: Vec<HouseProperty>,
    pub pgbp: Pgbp,
    pub capital_gains: CapitalGains,
    pub other_sources: OtherSources,
    pub deemed_income: DeemedIncome,
    pub international_income: Vec<InternationalIncomeItem>,
    pub deductions: Deductions,
    pub losses: Losses,
    pub interest_calc: InterestFacts,
    pub tds: Option<Decimal>,
    pub advance_tax: Option<Decimal>,
}

impl Default for TaxpayerSnapshot {
    fn default() -> Self {
        Self {
            assessee_name: String::new(),
            pan: String::new(),
            assessment_year: "2024-25".to_string(),
            taxpayer_type: TaxpayerType::Individual,
            residential_status: ResidentialStatus::ResidentOrdinarilyResident,
            company_type: None,
            previous_year_turnover: None,
            age: AgeBand::Below60,
            tax_regime: TaxRegime::Old,
            trust_data: TrustData::default(),
            salary: Salary::default(),
            house_properties: Vec::new(),
            pgbp: Pgbp::default(),
            capital_gains: CapitalGains::default(),
            other_sources: OtherSources::default(),
            deemed_income: DeemedIncome::default(),
            international_income: Vec::new(),
            deductions: Deductions::default(),
            losses: Losses::default(),
            interest_calc: InterestFacts::default(),
            tds: None,
            advance_tax: None,
        }
    }
}

impl TaxpayerSnapshot {
    pub fn tds_paid(&self) -> Decimal {
        amount_or_zero(self.tds)
    }

    pub fn advance_tax_paid(&self) -> Decimal {
        amount_or_zero(self.advance_tax)
    }
}

// =============================================================================
// Salary
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeType {
    Government,
    #[default]
    NonGovernment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Salary {
    pub employee_type: EmployeeType,
    pub basic_salary: IncomeSource,
    pub allowances: IncomeSource,
    pub bonus_and_commission: IncomeSource,
    pub perquisites: Perquisites,
    pub profits_in_lieu: ProfitsInLieu,
    /// Section 10 exemptions found not allowable; added back to income.
    pub exemptions: SalaryExemptions,
    /// Section 16 deductions found not allowable; added back to income.
    pub deductions: SalaryDeductions,
    /// Set on reassessment when the standard deduction was already given.
    pub standard_deduction_allowed_previously: bool,
}

impl Salary {
    /// Section 17(1)-(3) components.
    pub fn components(&self) -> Vec<&IncomeSource> {
        let mut sources = vec![&self.basic_salary, &self.allowances, &self.bonus_and_commission];
        sources.extend(self.perquisites.sources());
        sources.extend(self.profits_in_lieu.sources());
        sources
    }

    /// Disallowed exemptions and deductions.
    pub fn disallowances(&self) -> Vec<&IncomeSource> {
        let mut sources: Vec<&IncomeSource> = self.exemptions.sources().to_vec();
        sources.extend(self.deductions.sources());
        sources
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Perquisites {
    pub rent_free_accommodation: IncomeSource,
    pub motor_car: IncomeSource,
    pub other_perquisites: IncomeSource,
}

impl Perquisites {
    pub fn sources(&self) -> [&IncomeSource; 3] {
        [
            &self.rent_free_accommodation,
            &self.motor_car,
            &self.other_perquisites,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfitsInLieu {
    pub termination_compensation: IncomeSource,
    pub commuted_pension: IncomeSource,
    pub retrenchment_compensation: IncomeSource,
    pub vrs_compensation: IncomeSource,
    pub other_profits_in_lieu: IncomeSource,
}

impl ProfitsInLieu {
    pub fn sources(&self) -> [&IncomeSource; 5] {
        [
            &self.termination_compensation,
            &self.commuted_pension,
            &self.retrenchment_compensation,
            &self.vrs_compensation,
            &self.other_profits_in_lieu,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SalaryExemptions {
    pub hra: IncomeSource,
    pub lta: IncomeSource,
    pub gratuity: IncomeSource,
    pub leave_encashment: IncomeSource,
    pub commuted_pension: IncomeSource,
    pub retrenchment_compensation: IncomeSource,
    pub vrs_compensation: IncomeSource,
    pub provident_fund: IncomeSource,
    pub superannuation_fund: IncomeSource,
    pub special_allowances: IncomeSource,
    pub other_exemptions: IncomeSource,
}

impl SalaryExemptions {
    pub fn sources(&self) -> [&IncomeSource; 11] {
        [
            &self.hra,
            &self.lta,
            &self.gratuity,
            &self.leave_encashment,
            &self.commuted_pension,
            &self.retrenchment_compensation,
            &self.vrs_compensation,
            &self.provident_fund,
            &self.superannuation_fund,
            &self.special_allowances,
            &self.other_exemptions,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SalaryDeductions {
    pub professional_tax: IncomeSource,
    pub entertainment_allowance: IncomeSource,
}

impl SalaryDeductions {
    pub fn sources(&self) -> [&IncomeSource; 2] {
        [&self.professional_tax, &self.entertainment_allowance]
    }
}

// =============================================================================
// House property
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HouseProperty {
    pub gross_rent: IncomeSource,
    pub municipal_taxes: IncomeSource,
    pub interest_on_loan: IncomeSource,
    pub is_self_occupied: bool,
}

// =============================================================================
// Business or profession
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PresumptiveScheme {
    #[default]
    None,
    #[serde(rename = "44AD")]
    Ad,
    #[serde(rename = "44ADA")]
    Ada,
    #[serde(rename = "44AE")]
    Ae,
    #[serde(rename = "44B")]
    B,
    #[serde(rename = "44BB")]
    Bb,
    #[serde(rename = "44BBA")]
    Bba,
    #[serde(rename = "44BBB")]
    Bbb,
}

impl PresumptiveScheme {
    /// 44AD and 44ADA assessees pay advance tax in a single instalment.
    pub fn has_single_instalment(&self) -> bool {
        matches!(self, Self::Ad | Self::Ada)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Heavy,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Vehicle44AE {
    pub id: String,
    pub kind: VehicleKind,
    pub tonnage: Option<Decimal>,
    pub months: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Pgbp {
    pub is_controlled_from_india: bool,
    pub net_profit: IncomeSource,
    /// Tracked apart from presumptive income, which is non-speculative.
    pub speculative_income: IncomeSource,
    pub additions: PgbpAdditions,
    pub presumptive_scheme: PresumptiveScheme,
    pub turnover_44ad_digital: IncomeSource,
    pub turnover_44ad_other: IncomeSource,
    pub gross_receipts_44ada: IncomeSource,
    pub vehicles_44ae: Vec<Vehicle44AE>,
    pub aggregate_receipts_44b: IncomeSource,
    pub aggregate_receipts_44bb: IncomeSource,
    pub aggregate_receipts_44bba: IncomeSource,
    pub aggregate_receipts_44bbb: IncomeSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PgbpAdditions {
    pub unreported_sales: IncomeSource,
    pub unaccounted_business_income: IncomeSource,
    pub bogus_purchases: IncomeSource,
    pub unrecorded_credits: IncomeSource,
    pub gp_np_ratio_difference: IncomeSource,
    pub stock_suppression: IncomeSource,
    pub disallowance_36_employee_contrib: IncomeSource,
    pub disallowance_36_1_vii_provisions: IncomeSource,
    pub disallowance_36_1_iii_interest: IncomeSource,
    pub disallowance_37_1_non_business: IncomeSource,
    pub disallowance_37_1_personal: IncomeSource,
    pub disallowance_37_1_capital: IncomeSource,
    pub disallowance_40a_tds: IncomeSource,
    pub disallowance_40b_partner_payments: IncomeSource,
    pub disallowance_40a2_related_party: IncomeSource,
    pub disallowance_40a3_cash_payment: IncomeSource,
    pub disallowance_40a7_gratuity: IncomeSource,
    pub disallowance_40a9_unapproved_funds: IncomeSource,
    pub disallowance_43b_statutory_dues: IncomeSource,
    pub disallowance_14a_exempt_income: IncomeSource,
    pub incorrect_depreciation: IncomeSource,
    pub unexplained_expenditure: IncomeSource,
    pub other_disallowances: IncomeSource,
}

impl PgbpAdditions {
    pub fn sources(&self) -> [&IncomeSource; 23] {
        [
            &self.unreported_sales,
            &self.unaccounted_business_income,
            &self.bogus_purchases,
            &self.unrecorded_credits,
            &self.gp_np_ratio_difference,
            &self.stock_suppression,
            &self.disallowance_36_employee_contrib,
            &self.disallowance_36_1_vii_provisions,
            &self.disallowance_36_1_iii_interest,
            &self.disallowance_37_1_non_business,
            &self.disallowance_37_1_personal,
            &self.disallowance_37_1_capital,
            &self.disallowance_40a_tds,
            &self.disallowance_40b_partner_payments,
            &self.disallowance_40a2_related_party,
            &self.disallowance_40a3_cash_payment,
            &self.disallowance_40a7_gratuity,
            &self.disallowance_40a9_unapproved_funds,
            &self.disallowance_43b_statutory_dues,
            &self.disallowance_14a_exempt_income,
            &self.incorrect_depreciation,
            &self.unexplained_expenditure,
            &self.other_disallowances,
        ]
    }
}

// =============================================================================
// Capital gains
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CapitalGains {
    pub stcg_111a: IncomeSource,
    pub stcg_other: IncomeSource,
    pub ltcg_112a: IncomeSource,
    pub ltcg_other: IncomeSource,
    pub adjustment_50c: IncomeSource,
    pub cost_of_improvement: IncomeSource,
    pub exemption_54: IncomeSource,
    pub exemption_54b_ltcg: IncomeSource,
    pub exemption_54b_stcg: IncomeSource,
    pub exemption_54d: IncomeSource,
    pub exemption_54ec: IncomeSource,
    pub exemption_54ee: IncomeSource,
    pub exemption_54f: IncomeSource,
    pub exemption_54g: IncomeSource,
    pub exemption_54ga: IncomeSource,
    pub exemption_54gb: IncomeSource,
    pub adjustment_50: IncomeSource,
    pub adjustment_50ca: IncomeSource,
    pub adjustment_50d: IncomeSource,
    /// Stamp-duty value adjustment on business stock; flows to PGBP.
    pub adjustment_43ca: IncomeSource,
}

impl CapitalGains {
    /// Adjustments and disallowed exemptions that increase short-term gain.
    pub fn additions(&self) -> [&IncomeSource; 15] {
        [
            &self.adjustment_50c,
            &self.adjustment_50ca,
            &self.adjustment_50d,
            &self.cost_of_improvement,
            &self.exemption_54,
            &self.exemption_54b_ltcg,
            &self.exemption_54b_stcg,
            &self.exemption_54d,
            &self.exemption_54ec,
            &self.exemption_54ee,
            &self.exemption_54f,
            &self.exemption_54g,
            &self.exemption_54ga,
            &self.exemption_54gb,
            &self.adjustment_50,
        ]
    }
}

// =============================================================================
// Other sources and deemed income
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OtherSources {
    pub other_incomes: IncomeSource,
    pub winnings: IncomeSource,
    /// Reported for rate purposes only; never taxed.
    pub agricultural_income: IncomeSource,
    pub other_exempt_income_sec10: IncomeSource,
    pub disallowance_14a: IncomeSource,
    pub deemed_dividend_2_22_e: IncomeSource,
    pub gifts_56_2_x: IncomeSource,
    pub family_pension: IncomeSource,
    pub interest_on_enhanced_compensation: IncomeSource,
    pub race_horse_income: IncomeSource,
}

impl OtherSources {
    /// Fields pooled as ordinary other-sources income.
    pub fn additions(&self) -> [&IncomeSource; 7] {
        [
            &self.other_incomes,
            &self.deemed_dividend_2_22_e,
            &self.gifts_56_2_x,
            &self.family_pension,
            &self.interest_on_enhanced_compensation,
            &self.disallowance_14a,
            &self.other_exempt_income_sec10,
        ]
    }
}

/// Unexplained credits, investments and expenditure (sections 68 to 69D).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeemedIncome {
    pub sec68_cash_credits: IncomeSource,
    pub sec69_unexplained_investments: IncomeSource,
    pub sec69a_unexplained_money: IncomeSource,
    pub sec69b_investments_not_disclosed: IncomeSource,
    pub sec69c_unexplained_expenditure: IncomeSource,
    pub sec69d_hundi_borrowing: IncomeSource,
}

impl DeemedIncome {
    pub fn sources(&self) -> [&IncomeSource; 6] {
        [
            &self.sec68_cash_credits,
            &self.sec69_unexplained_investments,
            &self.sec69a_unexplained_money,
            &self.sec69b_investments_not_disclosed,
            &self.sec69c_unexplained_expenditure,
            &self.sec69d_hundi_borrowing,
        ]
    }
}

// =============================================================================
// Chapter VI-A deductions (disallowed claims)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Deductions {
    pub c80: IncomeSource,
    pub ccd1b80: IncomeSource,
    pub ccd2_80: IncomeSource,
    pub d80: IncomeSource,
    pub dd80: IncomeSource,
    pub ddb80: IncomeSource,
    pub e80: IncomeSource,
    pub g80: IncomeSource,
    pub gg80: IncomeSource,
    pub gga80: IncomeSource,
    pub ggc80: IncomeSource,
    pub tta80: IncomeSource,
    pub ttb80: IncomeSource,
    pub u80: IncomeSource,
    pub jjaa80: IncomeSource,
    pub qqb80: IncomeSource,
    pub rrb80: IncomeSource,
    pub ia80: IncomeSource,
}

impl Deductions {
    pub fn sources(&self) -> [&IncomeSource; 18] {
        [
            &self.c80,
            &self.ccd1b80,
            &self.ccd2_80,
            &self.d80,
            &self.dd80,
            &self.ddb80,
            &self.e80,
            &self.g80,
            &self.gg80,
            &self.gga80,
            &self.ggc80,
            &self.tta80,
            &self.ttb80,
            &self.u80,
            &self.jjaa80,
            &self.qqb80,
            &self.rrb80,
            &self.ia80,
        ]
    }
}

// =============================================================================
// Losses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Losses {
    pub brought_forward: BroughtForwardLosses,
    pub current_year: CurrentYearLosses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BroughtForwardLosses {
    pub house_property: Option<Decimal>,
    pub business_non_speculative: Option<Decimal>,
    pub business_speculative: Option<Decimal>,
    pub ltcl: Option<Decimal>,
    pub stcl: Option<Decimal>,
    pub race_horses: Option<Decimal>,
    pub unabsorbed_depreciation: Option<Decimal>,
}

/// Current-year losses entered directly. House-property loss is not here;
/// it is derived from the house-property computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CurrentYearLosses {
    pub business_non_speculative: Option<Decimal>,
    pub business_speculative: Option<Decimal>,
    pub ltcl: Option<Decimal>,
    pub stcl: Option<Decimal>,
    pub race_horses: Option<Decimal>,
}

// =============================================================================
// Filing facts for interest
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    #[default]
    Regular,
    #[serde(rename = "best_judgment_144")]
    BestJudgment144,
    #[serde(rename = "reassessment_147_post_assessment")]
    Reassessment147PostAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdvanceTaxInstallments {
    /// Paid by 15 June.
    pub q1: Option<Decimal>,
    /// Paid by 15 September.
    pub q2: Option<Decimal>,
    /// Paid by 15 December.
    pub q3: Option<Decimal>,
    /// Paid by 15 March.
    pub q4: Option<Decimal>,
}

/// Dates are `YYYY-MM-DD` strings; anything else is treated as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InterestFacts {
    pub due_date_of_filing: String,
    /// Date of filing, or date of completion of assessment for 144/147 cases.
    pub actual_date_of_filing: String,
    pub assessment_type: AssessmentType,
    pub due_date_148_notice: Option<String>,
    pub tax_on_earlier_assessment: Option<Decimal>,
    pub income_as_per_earlier_assessment: Option<Decimal>,
    pub no_return_furnished_for_reassessment: bool,
    pub advance_tax_installments: AdvanceTaxInstallments,
}

// =============================================================================
// Trusts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrustData {
    /// Receipts denied exemption for breach of 12A/12AA/12AB conditions.
    pub disallowed_receipts_12a: IncomeSource,
    /// Receipts denied exemption under 10(23C).
    pub disallowed_receipts_10_23c: IncomeSource,
}
