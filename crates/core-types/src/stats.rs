use crate::error::CoreError;
use crate::structs::Seller;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cumulative units of one SKU sold by one seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductTally {
    pub quantity: u64,
    /// (record index, item index) of the first sale, used to break quantity ties.
    pub first_sale: (usize, usize),
}

/// A `{sku, quantity}` entry in a seller's top-products list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// The running statistics of one seller while purchase records are folded in.
///
/// A `SellerStat` is owned by exactly one accumulator and is only mutated
/// through the methods below; it becomes read-only once ranking starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStat {
    pub id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: usize,
    pub products_sold: HashMap<String, ProductTally>,
}

impl SellerStat {
    /// Creates a zeroed accumulator for the given seller.
    pub fn new(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            name: seller.display_name(),
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
            products_sold: HashMap::new(),
        }
    }

    /// Counts one receipt and its total towards this seller's revenue.
    pub fn record_sale(&mut self, total_amount: Decimal) -> Result<(), CoreError> {
        self.revenue = checked_sum(self.revenue, total_amount, "revenue", &self.id)?;
        self.sales_count += 1;
        Ok(())
    }

    /// Adds a line item's profit and quantity.
    ///
    /// `position` is where the item sits in the batch; it is only kept for the
    /// first sale of each SKU.
    pub fn record_item(
        &mut self,
        sku: &str,
        quantity: u32,
        profit: Decimal,
        position: (usize, usize),
    ) -> Result<(), CoreError> {
        self.profit = checked_sum(self.profit, profit, "profit", &self.id)?;
        let tally = self
            .products_sold
            .entry(sku.to_string())
            .or_insert(ProductTally { quantity: 0, first_sale: position });
        tally.quantity += u64::from(quantity);
        tally.first_sale = tally.first_sale.min(position);
        Ok(())
    }

    /// Folds a partial accumulator for the same seller into this one.
    pub fn merge(&mut self, other: SellerStat) -> Result<(), CoreError> {
        debug_assert_eq!(self.id, other.id);
        self.revenue = checked_sum(self.revenue, other.revenue, "revenue", &self.id)?;
        self.profit = checked_sum(self.profit, other.profit, "profit", &self.id)?;
        self.sales_count += other.sales_count;
        for (sku, theirs) in other.products_sold {
            self.products_sold
                .entry(sku)
                .and_modify(|ours| {
                    ours.quantity += theirs.quantity;
                    ours.first_sale = ours.first_sale.min(theirs.first_sale);
                })
                .or_insert(theirs);
        }
        Ok(())
    }

    /// Total units sold across every SKU.
    pub fn total_quantity(&self) -> u64 {
        self.products_sold.values().map(|t| t.quantity).sum()
    }

    /// The `limit` best-selling SKUs by quantity, descending.
    ///
    /// Equal quantities keep the order in which the SKUs were first sold.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut tallies: Vec<(&String, &ProductTally)> = self.products_sold.iter().collect();
        tallies.sort_by(|(_, a), (_, b)| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.first_sale.cmp(&b.first_sale))
        });
        tallies
            .into_iter()
            .take(limit)
            .map(|(sku, tally)| TopProduct {
                sku: sku.clone(),
                quantity: tally.quantity,
            })
            .collect()
    }
}

fn checked_sum(current: Decimal, addend: Decimal, field: &str, seller: &str) -> Result<Decimal, CoreError> {
    current
        .checked_add(addend)
        .ok_or_else(|| CoreError::Overflow(format!("{field} of seller '{seller}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seller() -> Seller {
        Seller {
            id: "seller_1".to_string(),
            first_name: "Alexey".to_string(),
            last_name: "Petrov".to_string(),
            start_date: None,
            position: None,
        }
    }

    #[test]
    fn new_stat_is_zeroed_and_named() {
        let stat = SellerStat::new(&seller());
        assert_eq!(stat.name, "Alexey Petrov");
        assert_eq!(stat.revenue, Decimal::ZERO);
        assert_eq!(stat.sales_count, 0);
        assert!(stat.products_sold.is_empty());
    }

    #[test]
    fn top_products_orders_by_quantity_then_first_sale() {
        let mut stat = SellerStat::new(&seller());
        stat.record_item("B", 3, dec!(1), (0, 0)).unwrap();
        stat.record_item("A", 5, dec!(1), (0, 1)).unwrap();
        stat.record_item("C", 3, dec!(1), (1, 0)).unwrap();
        stat.record_item("B", 0, dec!(1), (2, 0)).unwrap();

        let top = stat.top_products(10);
        let skus: Vec<&str> = top.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["A", "B", "C"]);
        assert_eq!(stat.profit, dec!(4));
        assert_eq!(stat.top_products(2).len(), 2);
    }

    #[test]
    fn merge_keeps_earliest_first_sale() {
        let mut left = SellerStat::new(&seller());
        left.record_sale(dec!(10)).unwrap();
        left.record_item("A", 1, dec!(2), (5, 0)).unwrap();

        let mut right = SellerStat::new(&seller());
        right.record_sale(dec!(7.5)).unwrap();
        right.record_item("A", 2, dec!(1), (1, 3)).unwrap();
        right.record_item("B", 4, dec!(1), (2, 0)).unwrap();

        left.merge(right).unwrap();
        assert_eq!(left.revenue, dec!(17.5));
        assert_eq!(left.sales_count, 2);
        assert_eq!(left.products_sold["A"].quantity, 3);
        assert_eq!(left.products_sold["A"].first_sale, (1, 3));
        assert_eq!(left.total_quantity(), 7);
    }

    #[test]
    fn revenue_overflow_is_an_error() {
        let mut stat = SellerStat::new(&seller());
        stat.record_sale(Decimal::MAX).unwrap();
        let err = stat.record_sale(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CoreError::Overflow(ref what) if what.contains("revenue")));
        assert_eq!(stat.revenue, Decimal::MAX);
        assert_eq!(stat.sales_count, 1);
    }

    #[test]
    fn profit_overflow_leaves_tallies_untouched() {
        let mut stat = SellerStat::new(&seller());
        stat.record_item("A", 1, Decimal::MIN, (0, 0)).unwrap();
        assert!(stat.record_item("A", 4, Decimal::MIN, (1, 0)).is_err());
        assert_eq!(stat.products_sold["A"].quantity, 1);
    }
}
