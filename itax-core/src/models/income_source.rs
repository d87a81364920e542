use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest magnitude accepted for an entered amount. Anything beyond it is
/// treated like an invalid number, which keeps every later product and sum
/// well inside `Decimal`'s range.
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// An entered amount with blank and out-of-range values counting as zero.
pub fn amount_or_zero(value: Option<Decimal>) -> Decimal {
    match value {
        Some(amount) if amount.abs() <= MAX_INPUT_AMOUNT => amount,
        Some(amount) => {
            warn!(%amount, "amount out of range; treated as zero");
            Decimal::ZERO
        }
        None => Decimal::ZERO,
    }
}

/// Where a declared amount accrues or arises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IncomeLocation {
    #[default]
    #[serde(rename = "India")]
    India,
    #[serde(rename = "Outside India")]
    OutsideIndia,
}

/// One entered amount. `amount` is `None` while the field is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AdditionItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub location: IncomeLocation,
}

impl AdditionItem {
    pub fn new(id: impl Into<String>, amount: Decimal, location: IncomeLocation) -> Self {
        Self {
            id: id.into(),
            amount: Some(amount),
            location,
        }
    }

    /// The entered amount, with a blank field counting as zero.
    pub fn value(&self) -> Decimal {
        amount_or_zero(self.amount)
    }
}

/// An ordered list of additions making up one income field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IncomeSource {
    #[serde(default)]
    pub additions: Vec<AdditionItem>,
}

impl IncomeSource {
    /// A source with a single India-located amount.
    pub fn india(amount: Decimal) -> Self {
        Self {
            additions: vec![AdditionItem::new("1", amount, IncomeLocation::India)],
        }
    }

    /// A source with a single amount located outside India.
    pub fn outside_india(amount: Decimal) -> Self {
        Self {
            additions: vec![AdditionItem::new("1", amount, IncomeLocation::OutsideIndia)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.iter().all(|item| item.amount.is_none())
    }
}
