//! Per-participant classification.
//!
//! Runs its own rule table, separate from the bundle-level one in `state.rs`.
//! A participant who already paid shows as paid even inside a cancelled bundle.

use super::types::{PaymentStatus, RecordId, Task};
use serde::Serialize;
use std::fmt;

/// Visual state of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantTag {
    Paid,
    Authorized,
    Declined,
    Awaiting,
}

impl ParticipantTag {
    /// Returns the display color hint for UI rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            ParticipantTag::Paid => "green",
            ParticipantTag::Authorized => "blue",
            ParticipantTag::Declined => "red",
            ParticipantTag::Awaiting => "gray",
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            ParticipantTag::Paid => "✓",
            ParticipantTag::Authorized => "●",
            ParticipantTag::Declined => "✗",
            ParticipantTag::Awaiting => "○",
        }
    }
}

impl fmt::Display for ParticipantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantTag::Paid => write!(f, "PAID"),
            ParticipantTag::Authorized => write!(f, "AUTHORIZED"),
            ParticipantTag::Declined => write!(f, "DECLINED"),
            ParticipantTag::Awaiting => write!(f, "AWAITING"),
        }
    }
}

/// A fn-pointer rule over a single task.
pub struct ParticipantRule {
    pub id: &'static str,
    pub condition: fn(&Task) -> bool,
    pub tag: ParticipantTag,
}

/// Evaluated top to bottom, first match wins.
pub const PARTICIPANT_RULES: &[ParticipantRule] = &[
    ParticipantRule {
        id: "paid",
        condition: |t: &Task| t.payment_status == PaymentStatus::Completed,
        tag: ParticipantTag::Paid,
    },
    ParticipantRule {
        id: "authorized",
        condition: |t: &Task| t.payment_status == PaymentStatus::Authorized,
        tag: ParticipantTag::Authorized,
    },
    ParticipantRule {
        id: "declined",
        condition: Task::is_declined,
        tag: ParticipantTag::Declined,
    },
];

/// Rule id used when no rule in [`PARTICIPANT_RULES`] matches.
pub const AWAITING_RULE: &str = "awaiting";

/// Returns the matching rule id and tag for a task.
#[must_use]
pub fn match_participant(task: &Task) -> (&'static str, ParticipantTag) {
    PARTICIPANT_RULES
        .iter()
        .find(|rule| (rule.condition)(task))
        .map_or((AWAITING_RULE, ParticipantTag::Awaiting), |rule| {
            (rule.id, rule.tag)
        })
}

/// Classifies a single participant. Total: unknown statuses fall through to `Awaiting`.
#[must_use]
pub fn classify_participant(task: &Task) -> ParticipantTag {
    match_participant(task).1
}

/// What the rendering layer needs to draw one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub task_id: RecordId,
    pub name: String,
    pub initial: char,
    pub tag: ParticipantTag,
    pub rule: &'static str,
}

impl ParticipantView {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        let (rule, tag) = match_participant(task);
        Self {
            task_id: task.id.clone(),
            name: task.display_name().to_string(),
            initial: task.initial(),
            tag,
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Response;

    fn make_task(payment: PaymentStatus, response: Response) -> Task {
        Task::new(1, "Sam")
            .with_payment(payment)
            .with_response(response)
    }

    #[test]
    fn test_completed_is_paid() {
        let task = make_task(PaymentStatus::Completed, Response::Accepted);
        assert_eq!(classify_participant(&task), ParticipantTag::Paid);
    }

    #[test]
    fn test_completed_beats_rejection() {
        let task = make_task(PaymentStatus::Completed, Response::Rejected);
        assert_eq!(classify_participant(&task), ParticipantTag::Paid);
    }

    #[test]
    fn test_authorized_beats_rejection() {
        let task = make_task(PaymentStatus::Authorized, Response::Rejected);
        assert_eq!(classify_participant(&task), ParticipantTag::Authorized);
    }

    #[test]
    fn test_declined() {
        let rejected = make_task(PaymentStatus::Pending, Response::Rejected);
        let cancelled = make_task(PaymentStatus::Cancelled, Response::None);
        assert_eq!(classify_participant(&rejected), ParticipantTag::Declined);
        assert_eq!(classify_participant(&cancelled), ParticipantTag::Declined);
    }

    #[test]
    fn test_awaiting_fallback() {
        let pending = make_task(PaymentStatus::Pending, Response::Accepted);
        let unknown = make_task(PaymentStatus::Unknown, Response::Unknown);
        assert_eq!(classify_participant(&pending), ParticipantTag::Awaiting);
        assert_eq!(classify_participant(&unknown), ParticipantTag::Awaiting);
        assert_eq!(match_participant(&unknown).0, AWAITING_RULE);
    }

    #[test]
    fn test_view_carries_rule_and_initial() {
        let mut task = make_task(PaymentStatus::Authorized, Response::Accepted);
        task.user = None;
        let view = ParticipantView::from_task(&task);
        assert_eq!(view.rule, "authorized");
        assert_eq!(view.initial, '?');
        assert_eq!(view.name, "Unknown");
        assert_eq!(view.tag.color_hint(), "blue");
    }
}
