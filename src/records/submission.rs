// App submissions awaiting admin review

use super::{parse_key, require_id, RecordError};
use crate::board::Tabular;
use crate::listing::{contains_ci, BucketKey, Listing};
use crate::util::{format_age, format_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of a submitted app
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    InReview,
    Approved,
    Rejected,
}

impl BucketKey for SubmissionStatus {
    const ALL: &'static [Self] = &[
        SubmissionStatus::Pending,
        SubmissionStatus::InReview,
        SubmissionStatus::Approved,
        SubmissionStatus::Rejected,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InReview => "In Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        &[("reviewing", Self::InReview), ("accepted", Self::Approved)]
    }
}

/// A validated app submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: String,
    pub app_name: String,
    pub developer: String,
    pub package_name: String,
    pub category: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    /// Points the developer offers testers
    pub points_offered: u64,
}

/// Submission as delivered by the source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSubmission {
    pub id: String,
    pub app_name: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub category: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub points_offered: u64,
}

impl TryFrom<RawSubmission> for Submission {
    type Error = RecordError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        let id = require_id(raw.id)?;
        let status = parse_key(&id, "status", &raw.status)?;
        Ok(Self {
            id,
            app_name: raw.app_name,
            developer: raw.developer,
            package_name: raw.package_name,
            category: raw.category,
            status,
            submitted_at: raw.submitted_at,
            points_offered: raw.points_offered,
        })
    }
}

impl Listing for Submission {
    type Key = SubmissionStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket_key(&self) -> SubmissionStatus {
        self.status
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.app_name, needle)
            || contains_ci(&self.developer, needle)
            || contains_ci(&self.package_name, needle)
    }
}

impl Tabular for Submission {
    const TITLE: &'static str = "Submissions";
    const HEADERS: &'static [&'static str] = &["App", "Developer", "Package", "Category", "Points", "Submitted"];
    const WIDTHS: &'static [u16] = &[24, 18, 26, 12, 8, 12];

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.app_name.clone(),
            self.developer.clone(),
            self.package_name.clone(),
            self.category.clone(),
            format_number(self.points_offered),
            format_age(self.submitted_at, now),
        ]
    }
}
