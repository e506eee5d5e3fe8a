//! Derived State Engine: Computes a bundle's status from its task snapshot.
//!
//! This module is the "truth oracle" for a shared bill. It answers "what should
//! every viewer see for this bundle right now?" from nothing but the task list.
//!
//! The mapping is `Snapshot -> DerivedState`. It holds no memory between calls,
//! never mutates its input, and never fails: an empty snapshot yields `None`,
//! anything else yields exactly one [`BundleKind`].

use super::participant::ParticipantView;
use super::types::{Bundle, BundleType, PaymentStatus, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The derived (computed) status of a whole bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    /// Someone rejected or a payment was cancelled; no charges go through
    Cancelled,
    /// Every participant has been charged
    Completed,
    /// Everyone consented, charges are in flight
    Charging,
    /// Waiting on consent from at least one participant
    Pending,
}

impl BundleKind {
    /// Returns the display color hint for UI rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            BundleKind::Cancelled => "red",
            BundleKind::Completed => "green",
            BundleKind::Charging => "blue",
            BundleKind::Pending => "amber",
        }
    }

    /// Returns true if no further change is expected from the backend.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, BundleKind::Cancelled | BundleKind::Completed)
    }

    fn message(self, tally: &Tally) -> String {
        match self {
            BundleKind::Cancelled => "Bundle cancelled. No charges were completed.".to_string(),
            BundleKind::Completed => "All roommates have paid.".to_string(),
            BundleKind::Charging => "Everyone agreed. Charging in progress.".to_string(),
            BundleKind::Pending => format!("{}/{} roommates agreed", tally.consented, tally.total),
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::Cancelled => write!(f, "CANCELLED"),
            BundleKind::Completed => write!(f, "COMPLETED"),
            BundleKind::Charging => write!(f, "CHARGING"),
            BundleKind::Pending => write!(f, "PENDING"),
        }
    }
}

/// Aggregate counts over a task snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub total: usize,
    /// Payment completed
    pub completed: usize,
    /// Payment authorized or completed
    pub consented: usize,
    /// Rejected consent or cancelled payment
    pub declined: usize,
}

impl Tally {
    #[must_use]
    pub fn count(tasks: &[Task]) -> Self {
        let mut tally = Tally {
            total: tasks.len(),
            ..Tally::default()
        };
        for task in tasks {
            if task.payment_status == PaymentStatus::Completed {
                tally.completed += 1;
            }
            if task.payment_status.is_consented() {
                tally.consented += 1;
            }
            if task.is_declined() {
                tally.declined += 1;
            }
        }
        tally
    }

    /// `consented / total`, or `None` for an empty tally.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn consent_fraction(&self) -> Option<f64> {
        (self.total > 0).then(|| self.consented as f64 / self.total as f64)
    }
}

/// A fn-pointer rule over a tally.
pub struct BundleRule {
    pub id: &'static str,
    pub condition: fn(&Tally) -> bool,
    pub kind: BundleKind,
}

/// Evaluated top to bottom, first match wins. Never consulted for an empty tally.
pub const BUNDLE_RULES: &[BundleRule] = &[
    BundleRule {
        id: "cancelled",
        condition: |t: &Tally| t.declined > 0,
        kind: BundleKind::Cancelled,
    },
    BundleRule {
        id: "completed",
        condition: |t: &Tally| t.completed == t.total,
        kind: BundleKind::Completed,
    },
    BundleRule {
        id: "charging",
        condition: |t: &Tally| t.consented == t.total,
        kind: BundleKind::Charging,
    },
];

/// Rule id used when no rule in [`BUNDLE_RULES`] matches.
pub const PENDING_RULE: &str = "pending";

/// Returns the matching rule id and kind for a non-empty tally.
#[must_use]
pub fn match_bundle(tally: &Tally) -> (&'static str, BundleKind) {
    BUNDLE_RULES
        .iter()
        .find(|rule| (rule.condition)(tally))
        .map_or((PENDING_RULE, BundleKind::Pending), |rule| {
            (rule.id, rule.kind)
        })
}

/// The view-model handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatus {
    pub kind: BundleKind,
    pub message: String,
    pub color: &'static str,
    /// Only present while `kind` is `Pending`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub tally: Tally,
    pub rule: &'static str,
    pub bundle_type: BundleType,
    /// Newest `updatedAt` across the tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub participants: Vec<ParticipantView>,
}

impl BundleStatus {
    /// Progress as a whole percentage, rounded to nearest.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> Option<u8> {
        self.progress
            .map(|p| (p.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

/// Derives the status of a bundle from its tasks.
///
/// This is a pure function - no I/O, no side effects. Returns `None` for an
/// empty task list; callers must render nothing in that case.
#[must_use]
pub fn derive_status(tasks: &[Task]) -> Option<BundleStatus> {
    derive_with_type(tasks, BundleType::default())
}

/// Same as [`derive_status`] with an explicit bundle type.
///
/// The type is carried into the output only; every type uses [`BUNDLE_RULES`].
#[must_use]
pub fn derive_with_type(tasks: &[Task], bundle_type: BundleType) -> Option<BundleStatus> {
    if tasks.is_empty() {
        return None;
    }

    let tally = Tally::count(tasks);
    let (rule, kind) = match_bundle(&tally);
    let progress = match kind {
        BundleKind::Pending => tally.consent_fraction(),
        _ => None,
    };

    Some(BundleStatus {
        kind,
        message: kind.message(&tally),
        color: kind.color_hint(),
        progress,
        tally,
        rule,
        bundle_type,
        last_updated: tasks.iter().filter_map(|t| t.updated_at).max(),
        participants: tasks.iter().map(ParticipantView::from_task).collect(),
    })
}

impl Bundle {
    /// Derives this bundle's status, passing its type through.
    #[must_use]
    pub fn derive_status(&self) -> Option<BundleStatus> {
        derive_with_type(&self.tasks, self.bundle_type.clone())
    }
}
