use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A buyer referenced by purchase records. Not used by the aggregation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A member of the sales staff. Every purchase record is attributed to one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub position: Option<String>,
}

impl Seller {
    /// The "first last" form used in the report.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A catalogue entry, looked up by `sku`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    /// The cost basis of one unit.
    pub purchase_price: Decimal,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Catalogue price. The price actually charged lives on each `Item`.
    #[serde(default)]
    pub sale_price: Option<Decimal>,
}

/// One product/quantity/discount line inside a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    pub quantity: u32,
    pub sale_price: Decimal,
    /// Discount in percent, e.g. `10` means 10%.
    #[serde(default)]
    pub discount: Decimal,
}

/// A completed transaction (a receipt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default)]
    pub receipt_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub seller_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub items: Vec<Item>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub total_discount: Option<Decimal>,
}
