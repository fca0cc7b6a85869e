//! Marketplace records
//!
//! One typed record per board. Source payloads arrive as loosely typed
//! `Raw*` structs (status as a free string) and are validated exactly once
//! here, so the listing core only ever sees closed enumerations.

mod assignment;
mod notification;
mod submission;
mod user;

pub use assignment::{Assignment, AssignmentStatus, RawAssignment};
pub use notification::{Notification, NotificationStatus, RawNotification};
pub use submission::{RawSubmission, Submission, SubmissionStatus};
pub use user::{RawUserAccount, UserAccount, UserRole};

use crate::listing::{BucketKey, Listing};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Why a single record was refused at the source boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub id: String,
    pub reason: String,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {:?}: {}", self.id, self.reason)
    }
}

impl std::error::Error for RecordError {}

/// A refused record, tagged with the board it was meant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub board: &'static str,
    pub error: RecordError,
}

/// Parse a status-like field into its enumeration
pub(crate) fn parse_key<K: BucketKey>(id: &str, field: &str, value: &str) -> Result<K, RecordError> {
    K::parse(value).ok_or_else(|| RecordError {
        id: id.to_string(),
        reason: format!(
            "unknown {} {:?} (expected one of: {})",
            field,
            value,
            K::names().join(", ")
        ),
    })
}

/// Reject records without an id
pub(crate) fn require_id(id: String) -> Result<String, RecordError> {
    if id.trim().is_empty() {
        return Err(RecordError {
            id,
            reason: "missing id".to_string(),
        });
    }
    Ok(id)
}

/// Decode one wire value into its raw record shape. A value that does not
/// fit (null status, numeric id, missing timestamp) is refused on its own.
fn decode<Raw: DeserializeOwned>(value: Value) -> Result<Raw, RecordError> {
    let id = value_id(&value);
    serde_json::from_value(value).map_err(|e| RecordError {
        id,
        reason: e.to_string(),
    })
}

/// Best-effort id of an undecodable value, for the rejection log
fn value_id(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Validate a batch of wire values for one board.
///
/// Each value is decoded and checked independently. Undecodable values,
/// invalid records and repeated ids (the first occurrence wins) are
/// returned as rejections; the accepted records keep source order.
pub fn validate<Raw, R>(board: &'static str, values: Vec<Value>) -> (Vec<R>, Vec<Rejection>)
where
    Raw: DeserializeOwned,
    R: Listing + TryFrom<Raw, Error = RecordError>,
{
    let mut accepted: Vec<R> = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    for value in values {
        match decode::<Raw>(value).and_then(R::try_from) {
            Ok(record) => {
                if seen.insert(record.id().to_string()) {
                    accepted.push(record);
                } else {
                    rejected.push(Rejection {
                        board,
                        error: RecordError {
                            id: record.id().to_string(),
                            reason: "duplicate id".to_string(),
                        },
                    });
                }
            }
            Err(error) => rejected.push(Rejection { board, error }),
        }
    }

    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_submission(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "app_name": format!("App {}", id),
            "developer": "Ada",
            "package_name": format!("com.example.{}", id),
            "category": "tools",
            "status": status,
            "submitted_at": "2026-10-01T10:00:00Z",
        })
    }

    #[test]
    fn test_validate_rejects_unknown_status() {
        let (accepted, rejected) = validate::<RawSubmission, Submission>(
            "submissions",
            vec![raw_submission("a", "pending"), raw_submission("b", "archived")],
        );

        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].board, "submissions");
        assert_eq!(rejected[0].error.id, "b");
        assert!(rejected[0].error.reason.contains("archived"));
    }

    #[test]
    fn test_validate_keeps_first_duplicate() {
        let (accepted, rejected) = validate::<RawSubmission, Submission>(
            "submissions",
            vec![
                raw_submission("a", "pending"),
                raw_submission("a", "approved"),
                raw_submission("b", "in-review"),
            ],
        );

        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted[0].status, SubmissionStatus::Pending);
        assert_eq!(accepted[1].status, SubmissionStatus::InReview);
        assert_eq!(rejected[0].error.reason, "duplicate id");
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let (accepted, rejected) = validate::<RawSubmission, Submission>(
            "submissions",
            vec![raw_submission("  ", "pending")],
        );

        assert!(accepted.is_empty());
        assert_eq!(rejected[0].error.reason, "missing id");
    }

    #[test]
    fn test_validate_rejects_undecodable_values_one_by_one() {
        let mut null_status = raw_submission("b", "pending");
        null_status["status"] = Value::Null;
        let mut numeric_id = raw_submission("c", "pending");
        numeric_id["id"] = json!(7);
        let mut no_timestamp = raw_submission("d", "pending");
        no_timestamp.as_object_mut().unwrap().remove("submitted_at");

        let (accepted, rejected) = validate::<RawSubmission, Submission>(
            "submissions",
            vec![
                raw_submission("a", "pending"),
                null_status,
                numeric_id,
                no_timestamp,
                raw_submission("e", "approved"),
            ],
        );

        let ids: Vec<&str> = accepted.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        let rejected_ids: Vec<&str> = rejected.iter().map(|r| r.error.id.as_str()).collect();
        assert_eq!(rejected_ids, vec!["b", "7", "d"]);
        assert!(rejected[1].error.reason.contains("integer"));
    }
}
