use analytics::{AnalysisOptions, ReportRow, SalesAnalyzer};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use configuration::{load_config, OutputFormat};
use core_types::SalesData;
use std::path::PathBuf;
use std::process::ExitCode;
use strategies::{BonusStrategyId, RevenueStrategyId};
use tracing_subscriber::EnvFilter;

/// The main entry point for the sales report application.
fn main() -> ExitCode {
    // A missing .env file is fine; it only carries optional SALES__* overrides.
    dotenvy::dotenv().ok();

    // Logs go to stderr so the report on stdout can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
        Commands::Strategies => {
            print_strategies();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Builds per-seller revenue, profit and bonus reports from a batch of sales records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON data bundle and print the seller report.
    Analyze(AnalyzeArgs),
    /// List the revenue and bonus strategies that can be configured.
    Strategies,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the JSON bundle with customers, sellers, products and purchase_records.
    #[arg(long)]
    data: PathBuf,

    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding `report.format`.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of top products per seller, overriding `report.top_products_limit`.
    #[arg(long)]
    top: Option<usize>,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Loads configuration and data, runs the analyzer and renders the rows.
fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(top) = args.top {
        anyhow::ensure!(top > 0, "--top must be at least 1");
        config.report.top_products_limit = top;
    }
    let format = args.format.unwrap_or(config.report.format);

    let raw = std::fs::read_to_string(&args.data)
        .with_context(|| format!("Failed to read data bundle {}", args.data.display()))?;
    let data = SalesData::from_json_str(&raw)
        .with_context(|| format!("Failed to parse data bundle {}", args.data.display()))?;

    let options = AnalysisOptions::from_config(&config.strategies)?;
    let rows = SalesAnalyzer::from_config(&config.report).analyze(&data, &options)?;

    match format {
        OutputFormat::Table => println!("{}", render_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

fn render_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "Seller", "Name", "Revenue", "Profit", "Sales", "Bonus", "Top products",
        ]);

    for (rank, row) in rows.iter().enumerate() {
        let top_products = row
            .top_products
            .iter()
            .map(|p| format!("{}×{}", p.sku, p.quantity))
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.seller_id),
            Cell::new(&row.name),
            Cell::new(row.revenue).set_alignment(CellAlignment::Right),
            Cell::new(row.profit).set_alignment(CellAlignment::Right),
            Cell::new(row.sales_count).set_alignment(CellAlignment::Right),
            Cell::new(row.bonus).set_alignment(CellAlignment::Right),
            Cell::new(top_products),
        ]);
    }
    table
}

fn print_strategies() {
    println!("Revenue strategies (strategies.revenue):");
    for id in RevenueStrategyId::ALL {
        println!("  {id}");
    }
    println!("Bonus strategies (strategies.bonus):");
    for id in BonusStrategyId::ALL {
        println!("  {id}");
    }
}
