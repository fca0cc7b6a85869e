// Notifications sent to users (broadcasts and direct messages)

use super::{parse_key, require_id, RecordError};
use crate::board::Tabular;
use crate::listing::{contains_ci, BucketKey, Listing};
use crate::util::format_age;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
}

impl BucketKey for NotificationStatus {
    const ALL: &'static [Self] = &[Self::Unread, Self::Read];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        &[("new", Self::Unread), ("seen", Self::Read)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Target group for broadcasts, empty for direct messages
    pub audience: String,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub audience: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}

impl TryFrom<RawNotification> for Notification {
    type Error = RecordError;

    fn try_from(raw: RawNotification) -> Result<Self, Self::Error> {
        let id = require_id(raw.id)?;
        let status = parse_key(&id, "status", &raw.status)?;
        Ok(Self {
            id,
            title: raw.title,
            body: raw.body,
            audience: raw.audience,
            status,
            sent_at: raw.sent_at,
        })
    }
}

impl Listing for Notification {
    type Key = NotificationStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket_key(&self) -> NotificationStatus {
        self.status
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.body, needle)
    }
}

impl Tabular for Notification {
    const TITLE: &'static str = "Notifications";
    const HEADERS: &'static [&'static str] = &["Title", "Message", "Audience", "Sent"];
    const WIDTHS: &'static [u16] = &[26, 46, 14, 14];

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        let audience = if self.audience.is_empty() {
            "direct".to_string()
        } else {
            self.audience.clone()
        };
        vec![
            self.title.clone(),
            self.body.clone(),
            audience,
            format_age(self.sent_at, now),
        ]
    }
}
