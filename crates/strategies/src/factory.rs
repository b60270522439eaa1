use crate::bonus::BonusByProfit;
use crate::error::StrategyError;
use crate::revenue::{GrossRevenue, SimpleRevenue};
use crate::{BonusStrategy, RevenueStrategy};
use configuration::Strategies;
use std::fmt;
use std::str::FromStr;

/// Identifies a `RevenueStrategy` implementation by its configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueStrategyId {
    Simple,
    Gross,
}

impl RevenueStrategyId {
    pub const ALL: [RevenueStrategyId; 2] = [RevenueStrategyId::Simple, RevenueStrategyId::Gross];

    pub fn name(&self) -> &'static str {
        match self {
            RevenueStrategyId::Simple => "simple",
            RevenueStrategyId::Gross => "gross",
        }
    }
}

impl FromStr for RevenueStrategyId {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| StrategyError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for RevenueStrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a `BonusStrategy` implementation by its configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusStrategyId {
    ByProfit,
}

impl BonusStrategyId {
    pub const ALL: [BonusStrategyId; 1] = [BonusStrategyId::ByProfit];

    pub fn name(&self) -> &'static str {
        match self {
            BonusStrategyId::ByProfit => "by_profit",
        }
    }
}

impl FromStr for BonusStrategyId {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| StrategyError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for BonusStrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Creates the revenue strategy named in `config.revenue`.
pub fn create_revenue_strategy(config: &Strategies) -> Result<Box<dyn RevenueStrategy>, StrategyError> {
    let id: RevenueStrategyId = config.revenue.parse()?;
    tracing::debug!(strategy = %id, "Creating revenue strategy");
    // The compiler will error if a new RevenueStrategyId is added but not handled here.
    match id {
        RevenueStrategyId::Simple => Ok(Box::new(SimpleRevenue)),
        RevenueStrategyId::Gross => Ok(Box::new(GrossRevenue)),
    }
}

/// Creates the bonus strategy named in `config.bonus`, wired with its parameters.
pub fn create_bonus_strategy(config: &Strategies) -> Result<Box<dyn BonusStrategy>, StrategyError> {
    let id: BonusStrategyId = config.bonus.parse()?;
    tracing::debug!(strategy = %id, "Creating bonus strategy");
    match id {
        BonusStrategyId::ByProfit => {
            let params = config.bonus_by_profit.clone();
            Ok(Box::new(BonusByProfit::new(params)?))
        }
    }
}
