use core_types::{SellerStat, TopProduct};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One line of the final seller report.
///
/// Monetary fields are rounded half away from zero and carry exactly two
/// fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: usize,
    pub top_products: Vec<TopProduct>,
    pub bonus: Decimal,
}

impl ReportRow {
    /// Closes off a ranked seller's statistics into a report row.
    pub fn from_stat(stat: &SellerStat, bonus: Decimal, top_products_limit: usize) -> Self {
        Self {
            seller_id: stat.id.clone(),
            name: stat.name.clone(),
            revenue: round2(stat.revenue),
            profit: round2(stat.profit),
            sales_count: stat.sales_count,
            top_products: stat.top_products(top_products_limit),
            bonus: round2(bonus),
        }
    }
}

/// Rounds to two fractional digits, half away from zero, and pins the scale at 2.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
