use crate::error::StrategyError;
use crate::BonusStrategy;
use configuration::BonusByProfitParams;
use core_types::SellerStat;
use rust_decimal::Decimal;

/// The tiered, rank-based bonus.
///
/// | rank            | bonus                       |
/// |-----------------|-----------------------------|
/// | 0               | `first_place_pct` × profit  |
/// | 1, 2            | `podium_pct` × profit       |
/// | last            | 0                           |
/// | everyone else   | `default_pct` × profit      |
///
/// The tiers are checked top-down, so with three sellers or fewer the last
/// seller still falls into the first-place or podium tier.
#[derive(Debug, Clone, Default)]
pub struct BonusByProfit {
    params: BonusByProfitParams,
}

impl BonusByProfit {
    /// Creates a new `BonusByProfit`, rejecting rates outside `0..=1`.
    pub fn new(params: BonusByProfitParams) -> Result<Self, StrategyError> {
        let rates = [
            ("first_place_pct", params.first_place_pct),
            ("podium_pct", params.podium_pct),
            ("default_pct", params.default_pct),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(StrategyError::InvalidParameters(format!(
                    "{name} must be between 0 and 1, got {rate}"
                )));
            }
        }
        Ok(Self { params })
    }
}

impl BonusStrategy for BonusByProfit {
    fn compute(&self, rank: usize, total: usize, stat: &SellerStat) -> Decimal {
        let rate = match rank {
            0 => self.params.first_place_pct,
            1 | 2 => self.params.podium_pct,
            r if r + 1 == total => Decimal::ZERO,
            _ => self.params.default_pct,
        };
        tracing::trace!(seller = %stat.id, rank, total, %rate, "Bonus tier selected");
        stat.profit * rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Seller;
    use rust_decimal_macros::dec;

    fn stat(profit: Decimal) -> SellerStat {
        let seller = Seller {
            id: "seller_1".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Sidorov".to_string(),
            start_date: None,
            position: None,
        };
        let mut stat = SellerStat::new(&seller);
        stat.profit = profit;
        stat
    }

    #[test]
    fn tiers_for_a_large_team() {
        let bonus = BonusByProfit::default();
        let s = stat(dec!(1000));
        assert_eq!(bonus.compute(0, 5, &s), dec!(150));
        assert_eq!(bonus.compute(1, 5, &s), dec!(100));
        assert_eq!(bonus.compute(2, 5, &s), dec!(100));
        assert_eq!(bonus.compute(3, 5, &s), dec!(50));
        assert_eq!(bonus.compute(4, 5, &s), Decimal::ZERO);
    }

    #[test]
    fn top_tiers_win_over_last_place() {
        let bonus = BonusByProfit::default();
        let s = stat(dec!(200));
        // Single seller: first and last at once.
        assert_eq!(bonus.compute(0, 1, &s), dec!(30));
        // Three sellers: rank 2 is last but also on the podium.
        assert_eq!(bonus.compute(2, 3, &s), dec!(20));
        // Four sellers: rank 3 is last and nothing else.
        assert_eq!(bonus.compute(3, 4, &s), Decimal::ZERO);
    }

    #[test]
    fn negative_profit_gives_negative_bonus() {
        let bonus = BonusByProfit::default();
        assert_eq!(bonus.compute(0, 2, &stat(dec!(-40))), dec!(-6));
    }

    #[test]
    fn custom_rates_are_used() {
        let params = BonusByProfitParams {
            first_place_pct: dec!(0.5),
            podium_pct: dec!(0.25),
            default_pct: dec!(0.01),
        };
        let bonus = BonusByProfit::new(params).unwrap();
        assert_eq!(bonus.compute(0, 10, &stat(dec!(100))), dec!(50));
        assert_eq!(bonus.compute(5, 10, &stat(dec!(100))), dec!(1));
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let params = BonusByProfitParams {
            podium_pct: dec!(1.5),
            ..BonusByProfitParams::default()
        };
        assert!(matches!(
            BonusByProfit::new(params),
            Err(StrategyError::InvalidParameters(_))
        ));
    }
}
