pub mod bundle;
pub mod error;
pub mod stats;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use bundle::SalesData;
pub use error::CoreError;
pub use stats::{ProductTally, SellerStat, TopProduct};
pub use structs::{Customer, Item, Product, PurchaseRecord, Seller};
