//! Plain-text rendering of orders for the terminal.

use std::fmt::Write;

use dockorder_engine::{Entry, LiveSet, Region};

/// One numbered block per region. Placeholders show their group name.
pub fn render_orders(orders: &[(Region, Vec<Entry>)]) -> String {
    let mut out = String::new();
    for (region, entries) in orders {
        let _ = writeln!(out, "{region}:");
        if entries.is_empty() {
            out.push_str("  (empty)\n");
            continue;
        }
        for (index, entry) in entries.iter().enumerate() {
            let suffix = if entry.is_placeholder() { " (group)" } else { "" };
            let _ = writeln!(out, "  {}. {}{suffix}", index + 1, entry.display_name());
        }
    }
    out
}

/// Each region's docked entries, left to right, on one line.
pub fn render_live<L: LiveSet + ?Sized>(live: &L) -> String {
    let mut out = String::new();
    for region in Region::ALL {
        let names: Vec<String> = live
            .children(region)
            .into_iter()
            .map(|token| token.into_inner())
            .collect();
        let _ = writeln!(out, "{region:<6} | {}", names.join("  "));
    }
    out
}
