//! Procurement Trade-offs
//!
//! This example selects items from a small building estimate, trading off total
//! cost, total embodied carbon and total eta with NSGA-II.
//!
//! Rows use the loose column names of a spreadsheet export (`item`, `price`, `qty`,
//! `gwp`); prices with thousands separators are accepted. Set `RUST_LOG=debug` to see
//! per-generation progress.

use procure_evo::prelude::*;
use tracing_subscriber::EnvFilter;

const ESTIMATE: &str = r#"[
    {"item": "Ready-mix concrete C30", "price": "1,850", "qty": 12, "gwp": 310, "eta": 4},
    {"item": "Rebar SD420", "price": "2,400", "qty": 3, "gwp": 1900, "eta": 6},
    {"item": "Glulam beam", "price": 3100, "qty": 4, "gwp": 120, "eta": 9},
    {"item": "Clay brick", "price": 6, "qty": 5000, "gwp": 0.25, "eta": 2},
    {"item": "Gypsum board", "price": 210, "qty": 80, "gwp": 3.1, "eta": 1},
    {"item": "Mineral wool", "price": 95, "qty": 120, "gwp": 1.4, "eta": 3},
    {"item": "Aluminium window frame", "price": "4,200", "qty": 6, "gwp": 820, "eta": 12},
    {"item": "Low-e glazing", "price": "3,600", "qty": 10, "gwp": 35, "eta": 8},
    {"item": "Bitumen membrane", "price": 140, "qty": 60, "gwp": 6.5},
    {"item": "Ceramic tile", "price": 55, "qty": 300, "gwp": "n/a", "eta": 5}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Procurement Trade-offs ===\n");

    let dataset = ItemDataset::from_json(ESTIMATE)?;
    println!("Loaded {} items", dataset.len());

    let config = OptimizerConfig::from_json(r#"{"pop_size": 60, "n_gen": 150, "seed": 42}"#)?;
    let outcome = optimize_materials(&dataset, &config, None)?;

    println!("\nFirst front: {} members", outcome.front_size);
    for solution in &outcome.solutions {
        println!(
            "  #{} cost {:>10.2}  carbon {:>10.2}  eta {:>6.2}  ({} items)",
            solution.id,
            solution.total_cost,
            solution.total_carbon,
            solution.total_eta,
            solution.items.len()
        );
    }

    println!("\n{}", outcome.stats.summary());
    println!("\n{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
