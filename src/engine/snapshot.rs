//! Snapshot loading: the boundary with whatever fetched the bundle.
//!
//! Accepts either a bundle object or a bare task array. Unrecognized status
//! values are logged and kept; they never fail the load.

use super::error::{Result, SnapshotError};
use super::types::{Bundle, Task};
use std::io::Read;
use std::path::Path;

/// Path that means "read from stdin".
pub const STDIN_PATH: &str = "-";

pub struct Snapshot;

impl Snapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or does not match the task shape.
    pub fn from_json(text: &str) -> Result<Bundle> {
        let bundle = if text.trim_start().starts_with('[') {
            Bundle::new(serde_json::from_str::<Vec<Task>>(text)?)
        } else {
            serde_json::from_str::<Bundle>(text)?
        };

        report_drift(&bundle);
        tracing::debug!(
            tasks = bundle.tasks.len(),
            bundle_type = %bundle.bundle_type,
            "loaded snapshot"
        );
        Ok(bundle)
    }

    /// Reads a snapshot from a file, or from stdin when `path` is `-`.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Bundle> {
        let text = if path == Path::new(STDIN_PATH) {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        } else {
            std::fs::read_to_string(path)
        }
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "read snapshot");
        Self::from_json(&text)
    }
}

fn report_drift(bundle: &Bundle) {
    for task in bundle.tasks.iter().filter(|t| t.has_drift()) {
        tracing::warn!(
            task = %task.id,
            payment_status = %task.payment_status,
            response = %task.response,
            "unrecognized status value, classifying permissively"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{BundleType, PaymentStatus, RecordId};
    use std::io::Write;

    #[test]
    fn test_bare_array() {
        let bundle = Snapshot::from_json(r#"[{"id": 1}, {"id": 2, "paymentStatus": "completed"}]"#)
            .unwrap();
        assert_eq!(bundle.tasks.len(), 2);
        assert_eq!(bundle.bundle_type, BundleType::MarketplaceOnetime);
        assert_eq!(bundle.tasks[1].payment_status, PaymentStatus::Completed);
    }

    #[test]
    fn test_bundle_object() {
        let json = r#"{
            "id": "b-9",
            "bundleType": "marketplace_installment",
            "tasks": [{"id": "t1", "user": {"displayName": "Ana"}}]
        }"#;
        let bundle = Snapshot::from_json(json).unwrap();
        assert_eq!(bundle.id, Some(RecordId::Text("b-9".to_string())));
        assert_eq!(bundle.bundle_type, BundleType::MarketplaceInstallment);
        assert_eq!(bundle.tasks[0].display_name(), "Ana");
    }

    #[test]
    fn test_drift_does_not_fail() {
        let bundle = Snapshot::from_json(r#"[{"id": 1, "paymentStatus": "refunded"}]"#).unwrap();
        assert!(bundle.tasks[0].has_drift());
    }

    #[test]
    fn test_invalid_json() {
        let err = Snapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
        assert!(Snapshot::from_json(r#"[{"user": {}}]"#).is_err());
    }

    #[test]
    fn test_parse_errors_keep_position() {
        let text = "[\n  {\"id\": 1},\n  {\"user\": {}}\n]";
        let SnapshotError::Parse(err) = Snapshot::from_json(text).unwrap_err() else {
            panic!("expected a parse error");
        };
        assert_eq!(err.line(), 3);

        let text = "{\n  \"tasks\": [\n    {\"id\": {}}\n  ]\n}";
        let SnapshotError::Parse(err) = Snapshot::from_json(text).unwrap_err() else {
            panic!("expected a parse error");
        };
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_wrong_typed_fields_do_not_fail() {
        let json = r#"[
            {"id": 1, "user": {"name": 42}, "paymentStatus": "completed"},
            {"id": 2, "paymentStatus": 3},
            {"id": 1.5, "updatedAt": "2024-05-01 10:00:00"}
        ]"#;
        let bundle = Snapshot::from_json(json).unwrap();
        assert_eq!(bundle.tasks.len(), 3);
        assert_eq!(bundle.tasks[0].initial(), '?');
        assert_eq!(bundle.tasks[1].payment_status, PaymentStatus::Unknown);
        assert_eq!(bundle.tasks[2].id, RecordId::Text("1.5".to_string()));
        assert!(bundle.tasks[2].updated_at.is_some());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tasks": [{{"id": 1, "paymentStatus": "authorized"}}]}}"#).unwrap();
        let bundle = Snapshot::load(file.path()).unwrap();
        assert_eq!(bundle.tasks[0].payment_status, PaymentStatus::Authorized);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
