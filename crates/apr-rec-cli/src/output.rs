//! Output formatting utilities

use aprender_rec::data::RecommendationMap;
use aprender_rec::pipeline::MetricsReport;
use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Comma-separated list, `-` when empty.
pub(crate) fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Print one line per user of `mapping`.
pub(crate) fn mapping(mapping: &RecommendationMap) {
    let width = mapping.keys().map(String::len).max().unwrap_or(0);
    for (user, items) in mapping {
        println!("  {:<width$}  {}", user.white().bold(), format_list(items));
    }
}

/// Print the strategy comparison table.
pub(crate) fn metrics_table(report: &MetricsReport) {
    println!("  {}", MetricsReport::header().bold());
    for row in &report.rows {
        let line = row.render();
        if row.metrics.is_some() {
            println!("  {line}");
        } else {
            println!("  {}", line.dimmed());
        }
    }
    println!("  {}", format!("K = {}", report.k).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_list_empty() {
        assert_eq!(format_list(&[]), "-");
    }

    #[test]
    fn test_format_list_joins_in_order() {
        let items = vec!["c".to_string(), "a".to_string()];
        assert_eq!(format_list(&items), "c, a");
    }
}
