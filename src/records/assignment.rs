// Paid testing assignments shown to professional testers

use super::{parse_key, require_id, RecordError};
use crate::board::Tabular;
use crate::listing::{contains_ci, BucketKey, Listing};
use crate::util::{format_age, format_number, format_span};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Available,
    Ongoing,
    Completed,
}

impl BucketKey for AssignmentStatus {
    const ALL: &'static [Self] = &[Self::Available, Self::Ongoing, Self::Completed];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        &[
            ("in_progress", Self::Ongoing),
            ("active", Self::Ongoing),
            ("done", Self::Completed),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub id: String,
    pub app_name: String,
    pub company: String,
    pub reward_points: u64,
    pub testers_needed: u32,
    pub status: AssignmentStatus,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAssignment {
    pub id: String,
    pub app_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub reward_points: u64,
    #[serde(default)]
    pub testers_needed: u32,
    pub status: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl TryFrom<RawAssignment> for Assignment {
    type Error = RecordError;

    fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
        let id = require_id(raw.id)?;
        let status = parse_key(&id, "status", &raw.status)?;
        Ok(Self {
            id,
            app_name: raw.app_name,
            company: raw.company,
            reward_points: raw.reward_points,
            testers_needed: raw.testers_needed,
            status,
            deadline: raw.deadline,
        })
    }
}

impl Listing for Assignment {
    type Key = AssignmentStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket_key(&self) -> AssignmentStatus {
        self.status
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.app_name, needle) || contains_ci(&self.company, needle)
    }
}

impl Tabular for Assignment {
    const TITLE: &'static str = "Assignments";
    const HEADERS: &'static [&'static str] = &["App", "Company", "Reward", "Testers", "Deadline"];
    const WIDTHS: &'static [u16] = &[30, 24, 14, 12, 20];

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        let deadline = match self.deadline {
            Some(at) if at > now => format!("in {}", format_span(at - now)),
            Some(at) => format!("closed {}", format_age(at, now)),
            None => "-".to_string(),
        };
        vec![
            self.app_name.clone(),
            self.company.clone(),
            format!("{} pts", format_number(self.reward_points)),
            self.testers_needed.to_string(),
            deadline,
        ]
    }
}
