// Record sources - where board collections come from
//
// A source returns a raw SnapshotDocument; validation into typed records
// happens once, in SnapshotDocument::validate, before anything reaches a
// board. The poller (poller.rs) refetches on an interval or on demand and
// forwards only the boards whose collection actually changed.

mod demo;
mod file;
mod http;
pub mod poller;

pub use demo::DemoSource;
pub use file::FileSource;
pub use http::HttpSource;
pub use poller::{PollCommand, Poller, SourceEvent};

use crate::board::BoardKind;
use crate::config::{SourceConfig, SourceKind};
use crate::records::{
    self, Assignment, Notification, RawAssignment, RawNotification, RawSubmission,
    RawUserAccount, Rejection, Submission, UserAccount,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while fetching a snapshot
#[derive(Debug)]
pub enum SourceError {
    /// Source is not usable with the given configuration
    NotConfigured(String),
    /// Snapshot file could not be read
    Io { path: PathBuf, message: String },
    /// Remote answered with a non-success status
    Http { status: u16, message: String },
    /// Request never got an answer
    Network(String),
    /// Payload is not a snapshot document
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured(msg) => write!(f, "Source not configured: {}", msg),
            Self::Io { path, message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
            Self::Http { status, message } => write!(f, "HTTP error ({}): {}", status, message),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Parse(msg) => write!(f, "Invalid snapshot: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// Snapshot as delivered on the wire. Missing arrays are empty boards.
///
/// Records stay untyped JSON until `validate`, so one malformed record is
/// rejected alone instead of failing the whole document.
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub submissions: Vec<Value>,
    #[serde(default)]
    pub assignments: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
    #[serde(default)]
    pub notifications: Vec<Value>,
}

impl SnapshotDocument {
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// Validate every record; refused ones are logged and kept in
    /// `Snapshot::rejected`
    pub fn validate(self) -> Snapshot {
        let (submissions, mut rejected) =
            records::validate::<RawSubmission, Submission>("submissions", self.submissions);
        let (assignments, r) =
            records::validate::<RawAssignment, Assignment>("assignments", self.assignments);
        rejected.extend(r);
        let (users, r) = records::validate::<RawUserAccount, UserAccount>("users", self.users);
        rejected.extend(r);
        let (notifications, r) = records::validate::<RawNotification, Notification>(
            "notifications",
            self.notifications,
        );
        rejected.extend(r);

        for rejection in &rejected {
            tracing::warn!(
                board = rejection.board,
                "Rejected record: {}",
                rejection.error
            );
        }

        Snapshot {
            submissions,
            assignments,
            users,
            notifications,
            rejected,
        }
    }
}

/// Validated snapshot of every board
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub submissions: Vec<Submission>,
    pub assignments: Vec<Assignment>,
    pub users: Vec<UserAccount>,
    pub notifications: Vec<Notification>,
    pub rejected: Vec<Rejection>,
}

impl Snapshot {
    pub fn fingerprint(&self, kind: BoardKind) -> Fingerprint {
        match kind {
            BoardKind::Submissions => Fingerprint::of(&self.submissions),
            BoardKind::Assignments => Fingerprint::of(&self.assignments),
            BoardKind::Users => Fingerprint::of(&self.users),
            BoardKind::Notifications => Fingerprint::of(&self.notifications),
        }
    }

    pub fn len(&self, kind: BoardKind) -> usize {
        match kind {
            BoardKind::Submissions => self.submissions.len(),
            BoardKind::Assignments => self.assignments.len(),
            BoardKind::Users => self.users.len(),
            BoardKind::Notifications => self.notifications.len(),
        }
    }
}

/// SHA-256 over a collection's records, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of<R: Serialize>(records: &[R]) -> Self {
        let mut hasher = Sha256::new();
        for record in records {
            // Serializing plain data structs cannot fail
            if let Ok(bytes) = serde_json::to_vec(record) {
                hasher.update(&bytes);
            }
            hasher.update(b"\n");
        }
        Self(hasher.finalize().into())
    }
}

/// The configured record source
pub enum Source {
    File(FileSource),
    Http(HttpSource),
    Demo(DemoSource),
}

impl Source {
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        match config.kind {
            SourceKind::File => {
                let path = config.file.clone().ok_or_else(|| {
                    SourceError::NotConfigured("file source needs a path".to_string())
                })?;
                Ok(Self::File(FileSource::new(path)))
            }
            SourceKind::Http => {
                let url = config.url.clone().ok_or_else(|| {
                    SourceError::NotConfigured("http source needs a url".to_string())
                })?;
                Ok(Self::Http(HttpSource::new(
                    url,
                    config.token.clone(),
                    config.request_timeout(),
                )?))
            }
            SourceKind::Demo => Ok(Self::Demo(DemoSource::new(config.demo_seed))),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(s) => format!("file {}", s.path().display()),
            Self::Http(s) => format!("http {}", s.url()),
            Self::Demo(_) => "demo".to_string(),
        }
    }

    pub async fn fetch(&mut self) -> Result<SnapshotDocument, SourceError> {
        match self {
            Self::File(s) => s.fetch().await,
            Self::Http(s) => s.fetch().await,
            Self::Demo(s) => Ok(s.fetch()),
        }
    }
}
