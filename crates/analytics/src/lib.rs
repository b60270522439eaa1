//! # Sales Analytics Engine
//!
//! This crate turns a batch of sales records into the per-seller performance
//! report: revenue, profit, number of sales, best-selling products, and a
//! rank-based bonus.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   the terminal. It depends only on `core-types`, `configuration` and `strategies`.
//! - **Stateless Calculation:** The `SalesAnalyzer` is a stateless calculator. It takes
//!   a `SalesData` bundle and two strategies as input and produces `ReportRow`s as
//!   output. The same input always yields the same report.
//!
//! ## Public API
//!
//! - `SalesAnalyzer`: The main struct that contains the aggregation and ranking logic.
//! - `analyze_sales_data`: One-call entry point using the default analyzer settings.
//! - `AnalysisOptions`: The revenue and bonus strategies to plug in.
//! - `ReportRow`: One finished line of the report.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{analyze_sales_data, default_options, AnalysisOptions, SalesAnalyzer};
pub use error::{AnalyticsError, ReferenceKind};
pub use report::{round2, ReportRow};
