use crate::error::{AnalyticsError, ReferenceKind};
use crate::report::ReportRow;
use configuration::{Report, Strategies};
use core_types::{Item, Product, PurchaseRecord, SalesData, Seller, SellerStat};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use strategies::{
    create_bonus_strategy, create_revenue_strategy, BonusByProfit, BonusStrategy,
    RevenueStrategy, SimpleRevenue,
};

/// The two computations the caller plugs into the analysis.
///
/// Both slots are optional so that an incomplete configuration can be
/// reported as `AnalyticsError::MissingStrategy` instead of panicking.
#[derive(Default)]
pub struct AnalysisOptions {
    pub revenue: Option<Box<dyn RevenueStrategy>>,
    pub bonus: Option<Box<dyn BonusStrategy>>,
}

impl AnalysisOptions {
    pub fn new(
        revenue: impl RevenueStrategy + 'static,
        bonus: impl BonusStrategy + 'static,
    ) -> Self {
        Self {
            revenue: Some(Box::new(revenue)),
            bonus: Some(Box::new(bonus)),
        }
    }

    /// Builds the strategies named in the configuration.
    pub fn from_config(config: &Strategies) -> Result<Self, AnalyticsError> {
        Ok(Self {
            revenue: Some(create_revenue_strategy(config)?),
            bonus: Some(create_bonus_strategy(config)?),
        })
    }
}

/// A stateless calculator turning a batch of sales data into a ranked seller report.
#[derive(Debug, Clone)]
pub struct SalesAnalyzer {
    top_products_limit: usize,
    parallel: bool,
}

impl Default for SalesAnalyzer {
    fn default() -> Self {
        Self {
            top_products_limit: 10,
            parallel: false,
        }
    }
}

/// Seller id to position in the seller input, plus SKU to product.
struct Indices<'a> {
    sellers: HashMap<&'a str, usize>,
    products: HashMap<&'a str, &'a Product>,
}

impl SalesAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(report: &Report) -> Self {
        Self {
            top_products_limit: report.top_products_limit,
            parallel: report.parallel,
        }
    }

    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The main entry point for producing the seller report.
    ///
    /// # Arguments
    ///
    /// * `data` - The sales batch. All four collections must be non-empty.
    /// * `options` - The revenue and bonus strategies.
    ///
    /// # Returns
    ///
    /// One `ReportRow` per seller, ordered by descending profit. Sellers with
    /// equal profit keep their order from `data.sellers`.
    pub fn analyze(
        &self,
        data: &SalesData,
        options: &AnalysisOptions,
    ) -> Result<Vec<ReportRow>, AnalyticsError> {
        data.ensure_non_empty()?;
        let revenue = options
            .revenue
            .as_deref()
            .ok_or(AnalyticsError::MissingStrategy("calculate_revenue"))?;
        let bonus = options
            .bonus
            .as_deref()
            .ok_or(AnalyticsError::MissingStrategy("calculate_bonus"))?;

        tracing::info!(
            sellers = data.sellers.len(),
            products = data.products.len(),
            records = data.purchase_records.len(),
            parallel = self.parallel,
            "Analyzing sales data"
        );

        let indices = build_indices(data)?;
        let stats = if self.parallel {
            accumulate_parallel(data, &indices, revenue)?
        } else {
            accumulate_sequential(data, &indices, revenue)?
        };

        // `sort_by` is stable: equal profits keep the seller input order.
        let mut ranked = stats;
        ranked.sort_by(|a, b| b.profit.cmp(&a.profit));

        let total = ranked.len();
        let rows: Vec<ReportRow> = ranked
            .iter()
            .enumerate()
            .map(|(rank, stat)| {
                let amount = bonus.compute(rank, total, stat);
                tracing::debug!(seller = %stat.id, rank, profit = %stat.profit, bonus = %amount, "Seller ranked");
                ReportRow::from_stat(stat, amount, self.top_products_limit)
            })
            .collect();

        tracing::info!(rows = rows.len(), "Sales report ready");
        Ok(rows)
    }
}

/// Runs the default `SalesAnalyzer` over `data`.
///
/// `None` stands for an absent bundle and is rejected as invalid input.
pub fn analyze_sales_data(
    data: Option<&SalesData>,
    options: &AnalysisOptions,
) -> Result<Vec<ReportRow>, AnalyticsError> {
    let data = data.ok_or_else(|| AnalyticsError::InvalidInput("no sales data supplied".to_string()))?;
    SalesAnalyzer::new().analyze(data, options)
}

/// The stock strategies: discounted revenue and the tiered profit bonus.
pub fn default_options() -> AnalysisOptions {
    AnalysisOptions::new(SimpleRevenue, BonusByProfit::default())
}

fn build_indices(data: &SalesData) -> Result<Indices<'_>, AnalyticsError> {
    let mut sellers = HashMap::with_capacity(data.sellers.len());
    for (position, seller) in data.sellers.iter().enumerate() {
        if sellers.insert(seller.id.as_str(), position).is_some() {
            return Err(AnalyticsError::InvalidInput(format!(
                "duplicate seller id '{}'",
                seller.id
            )));
        }
    }

    let products = data
        .products
        .iter()
        .map(|product| (product.sku.as_str(), product))
        .collect();

    Ok(Indices { sellers, products })
}

fn resolve_seller(indices: &Indices<'_>, record: &PurchaseRecord) -> Result<usize, AnalyticsError> {
    indices
        .sellers
        .get(record.seller_id.as_str())
        .copied()
        .ok_or_else(|| {
            tracing::warn!(seller_id = %record.seller_id, receipt = ?record.receipt_id, "Unknown seller in purchase record");
            AnalyticsError::UnresolvedReference {
                kind: ReferenceKind::Seller,
                id: record.seller_id.clone(),
            }
        })
}

/// Folds one purchase record into its seller's accumulator.
fn fold_record(
    stat: &mut SellerStat,
    record_index: usize,
    record: &PurchaseRecord,
    indices: &Indices<'_>,
    revenue: &dyn RevenueStrategy,
) -> Result<(), AnalyticsError> {
    stat.record_sale(record.total_amount)?;

    for (item_index, item) in record.items.iter().enumerate() {
        let product = indices.products.get(item.sku.as_str()).ok_or_else(|| {
            tracing::warn!(sku = %item.sku, receipt = ?record.receipt_id, "Unknown product in purchase record");
            AnalyticsError::UnresolvedReference {
                kind: ReferenceKind::Product,
                id: item.sku.clone(),
            }
        })?;

        let profit = line_profit(item, product, revenue).ok_or_else(|| {
            AnalyticsError::InvalidInput(format!(
                "amount overflow in line {item_index} of purchase record {record_index} (sku '{}')",
                item.sku
            ))
        })?;
        stat.record_item(&item.sku, item.quantity, profit, (record_index, item_index))?;
    }

    Ok(())
}

/// Net revenue minus cost basis; `None` when an amount leaves the `Decimal` range.
fn line_profit(item: &Item, product: &Product, revenue: &dyn RevenueStrategy) -> Option<Decimal> {
    let cost = product.purchase_price.checked_mul(Decimal::from(item.quantity))?;
    revenue.compute(item)?.checked_sub(cost)
}

fn initial_stats(sellers: &[Seller]) -> Vec<SellerStat> {
    sellers.iter().map(SellerStat::new).collect()
}

fn accumulate_sequential(
    data: &SalesData,
    indices: &Indices<'_>,
    revenue: &dyn RevenueStrategy,
) -> Result<Vec<SellerStat>, AnalyticsError> {
    let mut stats = initial_stats(&data.sellers);

    for (record_index, record) in data.purchase_records.iter().enumerate() {
        let seller = resolve_seller(indices, record)?;
        fold_record(&mut stats[seller], record_index, record, indices, revenue)?;
    }

    Ok(stats)
}

/// Folds records on the rayon pool into per-seller partials, then merges them.
///
/// Decimal addition is exact, so the merged totals match the sequential path.
/// Which failure `try_fold` stops at depends on scheduling, so any failure is
/// settled by rerunning the sequential path: it reports the first bad record,
/// and its result is the one the caller gets.
fn accumulate_parallel(
    data: &SalesData,
    indices: &Indices<'_>,
    revenue: &dyn RevenueStrategy,
) -> Result<Vec<SellerStat>, AnalyticsError> {
    match fold_partials(data, indices, revenue) {
        Ok(stats) => Ok(stats),
        Err(err) => {
            tracing::debug!(error = %err, "Parallel accumulation failed, replaying sequentially");
            accumulate_sequential(data, indices, revenue)
        }
    }
}

fn fold_partials(
    data: &SalesData,
    indices: &Indices<'_>,
    revenue: &dyn RevenueStrategy,
) -> Result<Vec<SellerStat>, AnalyticsError> {
    let partials = data
        .purchase_records
        .par_iter()
        .enumerate()
        .try_fold(HashMap::new, |mut acc: HashMap<usize, SellerStat>, (record_index, record)| {
            let seller = resolve_seller(indices, record)?;
            let stat = acc
                .entry(seller)
                .or_insert_with(|| SellerStat::new(&data.sellers[seller]));
            fold_record(stat, record_index, record, indices, revenue)?;
            Ok::<_, AnalyticsError>(acc)
        })
        .try_reduce(HashMap::new, |mut left, right| -> Result<_, AnalyticsError> {
            for (seller, partial) in right {
                match left.get_mut(&seller) {
                    Some(stat) => stat.merge(partial)?,
                    None => {
                        left.insert(seller, partial);
                    }
                }
            }
            Ok(left)
        })?;

    let mut stats = initial_stats(&data.sellers);
    for (seller, partial) in partials {
        stats[seller].merge(partial)?;
    }
    Ok(stats)
}
