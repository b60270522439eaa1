use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: Report,
    pub strategies: Strategies,
}

impl Config {
    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_products_limit == 0 {
            return Err(ConfigError::Validation(
                "report.top_products_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the seller report is produced and rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Maximum number of entries in each seller's top-products list.
    pub top_products_limit: usize,
    /// Fold purchase records on the rayon thread pool instead of sequentially.
    pub parallel: bool,
    pub format: OutputFormat,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            top_products_limit: 10,
            parallel: false,
            format: OutputFormat::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
}

/// Selects the revenue and bonus strategies by name and holds their parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Strategies {
    /// Name of the revenue strategy, e.g. "simple".
    pub revenue: String,
    /// Name of the bonus strategy, e.g. "by_profit".
    pub bonus: String,
    pub bonus_by_profit: BonusByProfitParams,
}

impl Default for Strategies {
    fn default() -> Self {
        Self {
            revenue: "simple".to_string(),
            bonus: "by_profit".to_string(),
            bonus_by_profit: BonusByProfitParams::default(),
        }
    }
}

/// Tier rates for the rank-based bonus, as fractions of profit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BonusByProfitParams {
    /// Rank 0.
    pub first_place_pct: Decimal,
    /// Ranks 1 and 2.
    pub podium_pct: Decimal,
    /// Everyone else except the last place, who gets nothing.
    pub default_pct: Decimal,
}

impl Default for BonusByProfitParams {
    fn default() -> Self {
        Self {
            first_place_pct: dec!(0.15),
            podium_pct: dec!(0.10),
            default_pct: dec!(0.05),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = from_toml("");
        assert_eq!(config.report.top_products_limit, 10);
        assert!(!config.report.parallel);
        assert_eq!(config.report.format, OutputFormat::Table);
        assert_eq!(config.strategies.revenue, "simple");
        assert_eq!(config.strategies.bonus, "by_profit");
        assert_eq!(config.strategies.bonus_by_profit, BonusByProfitParams::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = from_toml(
            r#"
            [report]
            format = "json"

            [strategies.bonus_by_profit]
            first_place_pct = 0.2
            "#,
        );
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.top_products_limit, 10);
        assert_eq!(config.strategies.bonus_by_profit.first_place_pct, dec!(0.2));
        assert_eq!(config.strategies.bonus_by_profit.podium_pct, dec!(0.10));
    }

    #[test]
    fn zero_top_products_limit_is_rejected() {
        let config = from_toml("[report]\ntop_products_limit = 0\n");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
