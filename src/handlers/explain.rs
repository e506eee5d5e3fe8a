//! Handler for the `explain` command.

use anyhow::Result;
use bundle_status::engine::config::RenderConfig;
use bundle_status::engine::render::{kind_badge, tag_icon};
use bundle_status::engine::state::{BundleKind, BundleStatus, Tally};
use colored::Colorize;
use std::path::Path;

/// Explains which rules produced a bundle's status.
///
/// # Errors
/// Returns error if the snapshot cannot be loaded.
pub fn handle(path: &Path, config: &RenderConfig, json: bool) -> Result<()> {
    let status = super::load_status(path, config)?;

    if json {
        let report = status.as_ref().map(|s| {
            let participants: Vec<_> = s
                .participants
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "taskId": p.task_id,
                        "rule": p.rule,
                        "tag": p.tag,
                    })
                })
                .collect();
            serde_json::json!({
                "kind": s.kind,
                "rule": s.rule,
                "settled": s.kind.is_settled(),
                "tally": s.tally,
                "participants": participants,
            })
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let Some(status) = status else {
        println!("{} Empty bundle: no status is derived.", "reason:".dimmed());
        return Ok(());
    };

    print_human(&status);
    Ok(())
}

fn print_human(status: &BundleStatus) {
    let t = &status.tally;
    println!("{} matched rule `{}`", kind_badge(status.kind), status.rule.cyan());
    println!(
        "   Tally:  {} total, {} consented, {} completed, {} declined",
        t.total, t.consented, t.completed, t.declined
    );
    let settled = if status.kind.is_settled() {
        "yes, no further changes expected".green()
    } else {
        "no, waiting on the backend".yellow()
    };
    println!("   Settled: {settled}");
    println!();

    print_explanation(status.kind, t);
    println!();

    println!("{}", "Participants:".dimmed().underline());
    for p in &status.participants {
        println!(
            "   {} {}  {}  {}",
            tag_icon(p.tag),
            p.name,
            p.tag,
            format!("rule `{}`", p.rule).dimmed()
        );
    }
}

fn print_explanation(kind: BundleKind, t: &Tally) {
    match kind {
        BundleKind::Cancelled => println!(
            "{} {} participant(s) rejected or had a payment cancelled.",
            "reason:".red(),
            t.declined
        ),
        BundleKind::Completed => {
            println!("{} All {} payments completed.", "reason:".green(), t.total);
        }
        BundleKind::Charging => println!(
            "{} All {} consented; {} of {} charged so far.",
            "reason:".blue(),
            t.total,
            t.completed,
            t.total
        ),
        BundleKind::Pending => println!(
            "{} {} of {} consented; waiting on {}.",
            "reason:".yellow(),
            t.consented,
            t.total,
            t.total - t.consented
        ),
    }
}
