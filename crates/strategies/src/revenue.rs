use crate::RevenueStrategy;
use core_types::Item;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `sale_price × quantity × (1 − discount / 100)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueStrategy for SimpleRevenue {
    fn compute(&self, item: &Item) -> Option<Decimal> {
        let discount = Decimal::ONE.checked_sub(item.discount.checked_div(dec!(100))?)?;
        GrossRevenue.compute(item)?.checked_mul(discount)
    }
}

/// `sale_price × quantity`, ignoring the discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrossRevenue;

impl RevenueStrategy for GrossRevenue {
    fn compute(&self, item: &Item) -> Option<Decimal> {
        item.sale_price.checked_mul(Decimal::from(item.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sale_price: Decimal, quantity: u32, discount: Decimal) -> Item {
        Item {
            sku: "SKU_001".to_string(),
            quantity,
            sale_price,
            discount,
        }
    }

    #[test]
    fn simple_revenue_applies_discount() {
        assert_eq!(SimpleRevenue.compute(&item(dec!(20), 3, dec!(10))), Some(dec!(54)));
        assert_eq!(SimpleRevenue.compute(&item(dec!(19.99), 1, dec!(0))), Some(dec!(19.99)));
        assert_eq!(SimpleRevenue.compute(&item(dec!(50), 2, dec!(100))), Some(Decimal::ZERO));
    }

    #[test]
    fn gross_revenue_ignores_discount() {
        assert_eq!(GrossRevenue.compute(&item(dec!(20), 3, dec!(10))), Some(dec!(60)));
    }

    #[test]
    fn overflowing_line_yields_none() {
        assert_eq!(GrossRevenue.compute(&item(Decimal::MAX, 2, dec!(0))), None);
        assert_eq!(SimpleRevenue.compute(&item(Decimal::MAX, 2, dec!(10))), None);
    }
}
