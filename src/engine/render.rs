//! Terminal rendering helpers shared by the handlers.

use super::config::MAX_BAR_WIDTH;
use super::participant::ParticipantTag;
use super::state::BundleKind;
use colored::{ColoredString, Colorize};

/// Draws `[####......]` for a fraction in `[0, 1]`. Width is capped at [`MAX_BAR_WIDTH`].
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let width = width.min(usize::from(MAX_BAR_WIDTH));
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Colors text by a color hint.
#[must_use]
pub fn paint(text: &str, hint: &str) -> ColoredString {
    match hint {
        "green" => text.green(),
        "blue" => text.blue(),
        "red" => text.red(),
        "amber" => text.yellow(),
        _ => text.dimmed(),
    }
}

#[must_use]
pub fn kind_badge(kind: BundleKind) -> ColoredString {
    paint(&kind.to_string(), kind.color_hint()).bold()
}

#[must_use]
pub fn tag_icon(tag: ParticipantTag) -> ColoredString {
    paint(tag.icon(), tag.color_hint())
}
