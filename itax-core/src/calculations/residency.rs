//! Residency filter: which declared amounts are taxable in India.
//!
//! Every head calculator sums its fields through [`ResidencyFilter`]; no
//! other code looks at [`IncomeLocation`].
//!
//! | Status | India item | Outside-India item |
//! |--------|------------|--------------------|
//! | ROR    | taxable    | taxable            |
//! | RNOR   | taxable    | taxable only for business controlled from India |
//! | NR     | taxable    | excluded           |

use rust_decimal::Decimal;

use crate::models::{AdditionItem, IncomeLocation, IncomeSource, ResidentialStatus};

/// What kind of income a source carries, for the RNOR business exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeKind {
    Business { controlled_from_india: bool },
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct ResidencyFilter {
    status: ResidentialStatus,
}

impl ResidencyFilter {
    pub fn new(status: ResidentialStatus) -> Self {
        Self { status }
    }

    pub fn status(&self) -> ResidentialStatus {
        self.status
    }

    pub fn is_taxable(&self, item: &AdditionItem, kind: IncomeKind) -> bool {
        let in_india = item.location == IncomeLocation::India;
        match self.status {
            ResidentialStatus::ResidentOrdinarilyResident => true,
            ResidentialStatus::ResidentNotOrdinarilyResident => {
                in_india
                    || matches!(
                        kind,
                        IncomeKind::Business {
                            controlled_from_india: true
                        }
                    )
            }
            ResidentialStatus::NonResident => in_india,
        }
    }

    /// Sum of taxable amounts in `source`; blank amounts count as zero.
    pub fn taxable_value_of(&self, source: &IncomeSource, kind: IncomeKind) -> Decimal {
        source
            .additions
            .iter()
            .filter(|item| self.is_taxable(item, kind))
            .map(AdditionItem::value)
            .sum()
    }

    pub fn taxable_value(&self, source: &IncomeSource) -> Decimal {
        self.taxable_value_of(source, IncomeKind::Other)
    }

    pub fn sum<'a, I>(&self, sources: I) -> Decimal
    where
        I: IntoIterator<Item = &'a IncomeSource>,
    {
        sources.into_iter().map(|s| self.taxable_value(s)).sum()
    }
}
