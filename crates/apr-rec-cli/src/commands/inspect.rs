//! Inspect command implementation

use crate::error::{require_file, Result};
use crate::output;
use aprender_rec::data::Dataset;
use colored::Colorize;
use std::path::Path;

/// Run the inspect command
pub(crate) fn run(path: &Path, json: bool) -> Result<()> {
    require_file(path)?;
    let dataset = Dataset::from_json_file(path)?;
    let matrix = dataset.interaction_matrix()?;

    let interactions: usize = (0..matrix.n_users())
        .map(|u| matrix.row(u).iter().filter(|&&f| f == 1).count())
        .sum();
    let cells = matrix.n_users() * matrix.n_items();
    let density = if cells == 0 {
        0.0
    } else {
        interactions as f64 / cells as f64
    };

    if json {
        let summary = serde_json::json!({
            "users": matrix.n_users(),
            "items": matrix.n_items(),
            "interactions": interactions,
            "density": density,
            "users_with_ground_truth": dataset.relevant_items.len(),
        });
        println!("{summary:#}");
        return Ok(());
    }

    output::section("Dataset");
    output::kv("File", path.display());
    output::kv("Users", matrix.n_users());
    output::kv("Items", matrix.n_items());
    output::kv("Interactions", interactions);
    output::kv("Density", format!("{:.1}%", density * 100.0));

    output::section("Purchases");
    let width = matrix.users().iter().map(String::len).max().unwrap_or(0);
    println!(
        "  {:<width$}  {}",
        "",
        matrix.items().join(" ").bold()
    );
    for (u, user) in matrix.users().iter().enumerate() {
        let cells: Vec<String> = matrix
            .row(u)
            .iter()
            .zip(matrix.items())
            .map(|(&flag, item)| {
                let cell = format!("{:^w$}", flag, w = item.len());
                if flag == 1 {
                    cell.green().bold().to_string()
                } else {
                    cell.dimmed().to_string()
                }
            })
            .collect();
        println!("  {:<width$}  {}", user.white().bold(), cells.join(" "));
    }

    output::section("Relevant items");
    if dataset.relevant_items.is_empty() {
        output::warning("no ground truth; all metrics will be 0");
    } else {
        output::mapping(&dataset.relevant_items);
    }
    Ok(())
}
