//! Handler for the `status` command.

use anyhow::Result;
use bundle_status::engine::config::RenderConfig;
use bundle_status::engine::render::{kind_badge, paint, progress_bar, tag_icon};
use bundle_status::engine::state::BundleStatus;
use colored::Colorize;
use std::path::Path;

/// Displays the derived status of a bundle.
///
/// # Errors
/// Returns error if the snapshot cannot be loaded.
pub fn handle(path: &Path, config: &RenderConfig, json: bool) -> Result<()> {
    let status = super::load_status(path, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match status {
        Some(status) => print_human(&status, config),
        None => println!("   No status to display"),
    }
    Ok(())
}

fn print_human(status: &BundleStatus, config: &RenderConfig) {
    println!(
        "{} Bundle Status ({})",
        "📊".cyan(),
        status.bundle_type.to_string().dimmed()
    );
    println!(
        "   {}  {}",
        kind_badge(status.kind),
        paint(&status.message, status.color)
    );

    if let (Some(progress), Some(percent)) = (status.progress, status.percent()) {
        println!(
            "   {} {}%",
            progress_bar(progress, usize::from(config.bar_width)).dimmed(),
            percent
        );
    }

    if let Some(ts) = status.last_updated {
        println!(
            "   {} {}",
            "Last updated:".dimmed(),
            ts.format("%Y-%m-%d %H:%M UTC")
        );
    }

    println!();
    for p in &status.participants {
        println!(
            "   {} [{}] {} ({})",
            tag_icon(p.tag),
            p.initial,
            p.name,
            p.tag.to_string().dimmed()
        );
    }
}
