// Colored terminal output for pin listings.
//
// This module handles all terminal-specific formatting. The main.rs
// display paths delegate here.

use std::collections::HashMap;

use colored::Colorize;

use crate::cluster::PinGroup;
use crate::output::truncate_chars;
use crate::supabase::users::display_name;

/// Display the aggregated pin list in the terminal.
pub fn display_pin_list(
    groups: &[PinGroup],
    names: &HashMap<String, String>,
    excluded: usize,
) {
    if groups.is_empty() {
        println!("No pins to show. The map is empty (or every post lacks coordinates).");
        return;
    }

    println!(
        "\n{}",
        format!("=== Map pins ({} groups) ===", groups.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<24} {:>6}  {:<28}  {}",
        "Pin".dimmed(),
        "Address".dimmed(),
        "Posts".dimmed(),
        "First post".dimmed(),
        "Discovered by".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for (i, group) in groups.iter().enumerate() {
        let address = if group.address.is_empty() {
            "(unresolved)".dimmed().to_string()
        } else {
            group.address.clone()
        };
        let first = group.first();

        println!(
            "  {:>4}. {:<24} {:>6}  {:<28}  {}",
            i + 1,
            address,
            group.members.len(),
            truncate_chars(&first.title, 24),
            display_name(names, &first.user_id),
        );
    }

    println!();

    // Summary
    let total_posts: usize = groups.iter().map(|g| g.members.len()).sum();
    let merged = groups.iter().filter(|g| g.members.len() > 1).count();
    println!("  {} posts on {} pins ({} merged)", total_posts, groups.len(), merged);
    if excluded > 0 {
        println!(
            "  {} {} posts skipped (no coordinates)",
            "~".yellow(),
            excluded
        );
    }
}
