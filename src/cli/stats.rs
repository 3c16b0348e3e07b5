//! `stats` command: aggregate view of the collection.

use crate::config::GeocampoConfig;
use crate::stats::{sorted_entries, InventoryStats};
use crate::Result;
use std::collections::HashMap;

/// Runs the `stats` command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_stats(config: &GeocampoConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let stats = InventoryStats::compute(store.records());

    println!("Records:         {}", stats.total);
    println!("  with photo:    {}", stats.with_photo);
    println!("  imported:      {}", stats.imported);
    println!("  w/ dimensions: {}", stats.with_dimensions);
    println!("Total area:      {:.2} m²", stats.total_area);
    print_group("By status", &stats.by_status);
    print_group("By type", &stats.by_type);
    print_group("By technology", &stats.by_technology);
    print_group("By faces", &stats.by_faces);
    Ok(())
}

fn print_group(title: &str, groups: &HashMap<String, usize>) {
    let entries = sorted_entries(groups);
    if entries.is_empty() {
        return;
    }
    println!("{title}:");
    for (label, count) in entries {
        println!("  {label}: {count}");
    }
}
