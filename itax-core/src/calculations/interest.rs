//! Interest u/s 234A, 234B and 234C.
//!
//! Simple interest at 1% a month. Any part of a calendar month counts as a
//! whole month, including the month the period starts in. Dates are
//! `YYYY-MM-DD`; a missing or malformed date skips only the component that
//! needs it.
//!
//! The 234A period and base depend on the assessment type:
//!
//! | Assessment type         | Period starts after            | Base                          |
//! |-------------------------|--------------------------------|-------------------------------|
//! | Regular, best judgment  | filing due date                | tax less advance tax and TDS  |
//! | Reassessment u/s 147    | 148 notice due date, else the filing due date | tax less tax on earlier assessment |
//!
//! A 148 notice date that is given but malformed skips 234A rather than
//! falling back to the filing due date.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_to_rupee};
use crate::models::{AssessmentType, InterestResult, QuarterMonths, TaxpayerSnapshot, amount_or_zero};

const MONTHLY_RATE: Decimal = dec!(0.01);
const ADVANCE_TAX_THRESHOLD: Decimal = dec!(0.90);

/// Cumulative share of tax due by each instalment date, the relaxed share
/// below which a shortfall draws no interest, and months of interest.
const INSTALMENTS: [(Decimal, Option<Decimal>, u32); 3] = [
    (dec!(0.15), Some(dec!(0.12)), 3),
    (dec!(0.45), Some(dec!(0.36)), 3),
    (dec!(0.75), None, 3),
];

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_logged(field: &'static str, value: &str) -> Option<NaiveDate> {
    let parsed = parse_date(value);
    if parsed.is_none() {
        if value.is_empty() {
            debug!(field, "date not given");
        } else {
            warn!(field, value, "unparseable date; interest component skipped");
        }
    }
    parsed
}

/// Months from `start` to `end`, counting both end months. Zero when `end`
/// is before `start`.
pub fn interest_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32) + 1;
    u32::try_from(months).unwrap_or(0)
}

/// Tax figures the interest computation is based on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterestBase {
    /// Tax payable after foreign tax credit.
    pub tax_payable: Decimal,
    /// Tax on capital gains, winnings and foreign income, left out of the
    /// first three 234C instalments.
    pub tax_on_excluded_income: Decimal,
}

#[derive(Debug, Clone)]
pub struct InterestCalculator<'a> {
    snapshot: &'a TaxpayerSnapshot,
}

impl<'a> InterestCalculator<'a> {
    pub fn new(snapshot: &'a TaxpayerSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn calculate(&self, base: &InterestBase) -> InterestResult {
        let facts = &self.snapshot.interest_calc;
        let actual = parse_logged("actual_date_of_filing", &facts.actual_date_of_filing);
        let tax = non_negative(base.tax_payable);
        let mut result = InterestResult::default();

        if let Some((months, interest)) = self.section_234a(tax, actual) {
            result.months_234a = months;
            result.u_s_234a = interest;
        }

        let assessed = non_negative(tax - self.snapshot.tds_paid());
        if let Some((months, interest)) = self.section_234b(assessed, actual) {
            result.months_234b = months;
            result.u_s_234b = interest;
        }

        let (months, interest) = self.section_234c(assessed, base.tax_on_excluded_income);
        result.months_234c = months;
        result.u_s_234c = interest;

        result.total_interest = round_to_rupee(result.u_s_234a + result.u_s_234b + result.u_s_234c);
        debug!(
            u_s_234a = %result.u_s_234a,
            u_s_234b = %result.u_s_234b,
            u_s_234c = %result.u_s_234c,
            total = %result.total_interest,
            "interest computed"
        );
        result
    }

    fn section_234a(&self, tax: Decimal, actual: Option<NaiveDate>) -> Option<(u32, Decimal)> {
        let facts = &self.snapshot.interest_calc;
        let (start, base) = match facts.assessment_type {
            AssessmentType::Reassessment147PostAssessment => {
                // A notice date that is given but malformed skips 234A.
                let notice = facts.due_date_148_notice.as_deref().filter(|d| !d.trim().is_empty());
                let start = match notice {
                    Some(notice) => parse_logged("due_date_148_notice", notice),
                    None => parse_logged("due_date_of_filing", &facts.due_date_of_filing),
                };
                let earlier = amount_or_zero(facts.tax_on_earlier_assessment);
                (start, non_negative(tax - earlier))
            }
            AssessmentType::Regular | AssessmentType::BestJudgment144 => {
                let start = parse_logged("due_date_of_filing", &facts.due_date_of_filing);
                let prepaid = self.snapshot.advance_tax_paid() + self.snapshot.tds_paid();
                (start, non_negative(tax - prepaid))
            }
        };

        let start = start?.succ_opt()?;
        let end = actual?;
        if end < start || base <= Decimal::ZERO {
            return None;
        }
        let months = interest_months(start, end);
        Some((months, base * MONTHLY_RATE * Decimal::from(months)))
    }

    fn section_234b(&self, assessed: Decimal, actual: Option<NaiveDate>) -> Option<(u32, Decimal)> {
        let paid = self.snapshot.advance_tax_paid();
        if paid >= assessed * ADVANCE_TAX_THRESHOLD {
            return None;
        }
        let shortfall = assessed - paid;
        if shortfall <= Decimal::ZERO {
            return None;
        }

        let year_start = self.assessment_year_start()?;
        let end = actual.filter(|d| *d > year_start).unwrap_or(year_start);
        let months = interest_months(year_start, end);
        Some((months, shortfall * MONTHLY_RATE * Decimal::from(months)))
    }

    fn section_234c(&self, assessed: Decimal, excluded: Decimal) -> (QuarterMonths, Decimal) {
        let paid = &self.snapshot.interest_calc.advance_tax_installments;
        let amount = amount_or_zero;
        let cumulative = [
            amount(paid.q1),
            amount(paid.q1) + amount(paid.q2),
            amount(paid.q1) + amount(paid.q2) + amount(paid.q3),
        ];
        let paid_by_q4 = cumulative[2] + amount(paid.q4);

        let mut months = QuarterMonths::default();
        let mut interest = Decimal::ZERO;

        if !self.snapshot.pgbp.presumptive_scheme.has_single_instalment() {
            let adjusted = non_negative(assessed - excluded);
            let slots = [&mut months.q1, &mut months.q2, &mut months.q3];
            for ((&(share, relaxed, due_months), paid), slot) in
                INSTALMENTS.iter().zip(cumulative).zip(slots)
            {
                let required = adjusted * share;
                let relieved = relaxed.is_some_and(|r| paid >= adjusted * r);
                if paid < required && !relieved {
                    interest += (required - paid) * MONTHLY_RATE * Decimal::from(due_months);
                    *slot = due_months;
                }
            }
        }

        if paid_by_q4 < assessed {
            interest += (assessed - paid_by_q4) * MONTHLY_RATE;
            months.q4 = 1;
        }

        (months, interest)
    }

    /// 1 April of the first year named in the assessment year.
    fn assessment_year_start(&self) -> Option<NaiveDate> {
        let year = &self.snapshot.assessment_year;
        let start = year
            .split('-')
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .and_then(|y| NaiveDate::from_ymd_opt(y, 4, 1));
        if start.is_none() {
            warn!(assessment_year = %year, "unparseable assessment year; 234B skipped");
        }
        start
    }
}
