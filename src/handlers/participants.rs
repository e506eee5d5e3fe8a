//! Handler for the `participants` command.

use anyhow::Result;
use bundle_status::engine::config::RenderConfig;
use bundle_status::engine::participant::ParticipantView;
use bundle_status::engine::render::{paint, tag_icon};
use colored::Colorize;
use std::path::Path;

/// Lists every participant with its visual state, in snapshot order.
///
/// # Errors
/// Returns error if the snapshot cannot be loaded.
pub fn handle(path: &Path, config: &RenderConfig, json: bool) -> Result<()> {
    let participants = super::load_status(path, config)?
        .map(|s| s.participants)
        .unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&participants)?);
        return Ok(());
    }

    print_human(&participants);
    Ok(())
}

fn print_human(participants: &[ParticipantView]) {
    println!("{} Participants:", "👥".cyan());

    if participants.is_empty() {
        println!("   (No participants)");
        return;
    }

    for p in participants {
        println!(
            "   {} [{}] {}  {}  {}",
            tag_icon(p.tag),
            p.initial.to_string().bold(),
            p.name,
            paint(&p.tag.to_string(), p.tag.color_hint()),
            format!("#{}", p.task_id).dimmed()
        );
    }
}
