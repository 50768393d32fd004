use crate::lending::domain::{FeeDescriptor, FeeTable, LoanProduct, RepaymentMethod};
use crate::members::domain::SavingsFrequency;

/// Static definition of a loan product.
pub(crate) struct ProductPolicy {
    pub product: LoanProduct,
    pub label: &'static str,
    pub description: &'static str,
    pub unlock_streak: u32,
    pub fees: [(RepaymentMethod, FeeDescriptor); 3],
}

const fn fee(fee_percent: u8, effective_annual_rate: u8) -> FeeDescriptor {
    FeeDescriptor {
        fee_percent,
        effective_annual_rate,
    }
}

/// Products in presentation order.
pub(crate) const CATALOG: [ProductPolicy; 2] = [
    ProductPolicy {
        product: LoanProduct::Boost,
        label: "Boost Loan",
        description: "Emergency capital for immediate business needs",
        unlock_streak: 4,
        fees: [
            (RepaymentMethod::OneTime, fee(10, 43)),
            (RepaymentMethod::TwoPart, fee(15, 63)),
            (RepaymentMethod::Installmental, fee(20, 82)),
        ],
    },
    ProductPolicy {
        product: LoanProduct::Ascend,
        label: "Ascend Capital",
        description: "Long-term growth funding for business expansion",
        unlock_streak: 12,
        fees: [
            (RepaymentMethod::OneTime, fee(8, 25)),
            (RepaymentMethod::TwoPart, fee(12, 35)),
            (RepaymentMethod::Installmental, fee(18, 55)),
        ],
    },
];

impl ProductPolicy {
    /// Weekly savers get a larger Boost multiplier; Ascend is flat.
    pub fn multiplier(&self, frequency: Option<SavingsFrequency>) -> f64 {
        match self.product {
            LoanProduct::Boost => match frequency {
                Some(SavingsFrequency::Weekly) => 2.5,
                _ => 2.0,
            },
            LoanProduct::Ascend => 3.2,
        }
    }

    pub fn fee_table(&self) -> FeeTable {
        self.fees.iter().copied().collect()
    }
}
