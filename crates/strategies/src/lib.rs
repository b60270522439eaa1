//! # Sales Report Strategy Library
//!
//! This crate holds the two pluggable computations of the seller report: how much
//! net revenue a line item brings in, and how large a bonus a ranked seller earns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   the CLI. It depends only on `core-types` and `configuration`.
//! - **Strategy Agnostic Analyzer:** By using the `RevenueStrategy` and `BonusStrategy`
//!   traits, the `analytics` crate can aggregate with any implementation without
//!   knowing its internal details.
//! - **Extensibility:** Adding a new strategy involves implementing one of the traits
//!   and adding it to the matching id enum and `factory`.
//!
//! ## Public API
//!
//! - `RevenueStrategy` / `BonusStrategy`: The traits all strategies implement.
//! - `RevenueStrategyId` / `BonusStrategyId`: Enums to identify which strategy to create.
//! - `create_revenue_strategy` / `create_bonus_strategy`: The factory functions.
//! - The concrete strategy structs themselves (e.g., `SimpleRevenue`).

// Declare all the modules that constitute this crate.
pub mod bonus;
pub mod error;
pub mod factory;
pub mod revenue;

// Re-export the key components to create a clean, public-facing API.
pub use bonus::BonusByProfit;
pub use error::StrategyError;
pub use factory::{create_bonus_strategy, create_revenue_strategy, BonusStrategyId, RevenueStrategyId};
pub use revenue::{GrossRevenue, SimpleRevenue};

use core_types::{Item, SellerStat};
use rust_decimal::Decimal;

/// Computes the net revenue of a single line item.
///
/// The `Send + Sync` bounds let the analyzer share one instance across the
/// rayon workers of the parallel accumulation path.
pub trait RevenueStrategy: Send + Sync {
    /// Returns the revenue `item` contributes after any discount, or `None`
    /// when the amount does not fit in a `Decimal`.
    fn compute(&self, item: &Item) -> Option<Decimal>;
}

/// Computes the bonus of a seller from its position in the profit ranking.
pub trait BonusStrategy: Send + Sync {
    /// # Arguments
    ///
    /// * `rank` - Zero-based position in the profit-descending ordering.
    /// * `total` - Number of ranked sellers.
    /// * `stat` - The seller's fully accumulated statistics.
    fn compute(&self, rank: usize, total: usize, stat: &SellerStat) -> Decimal;
}
