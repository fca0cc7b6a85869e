// Registered users, bucketed by role on the admin user list

use super::{parse_key, require_id, RecordError};
use crate::board::Tabular;
use crate::listing::{contains_ci, BucketKey, Listing};
use crate::util::{format_age, format_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Community,
    Tester,
    Admin,
}

impl BucketKey for UserRole {
    const ALL: &'static [Self] = &[Self::Community, Self::Tester, Self::Admin];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Tester => "tester",
            Self::Admin => "admin",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Community => "Community",
            Self::Tester => "Testers",
            Self::Admin => "Admins",
        }
    }

    fn aliases() -> &'static [(&'static str, Self)] {
        &[
            ("member", Self::Community),
            ("user", Self::Community),
            ("professional", Self::Tester),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Wallet balance in points
    pub points: u64,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUserAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub points: u64,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<RawUserAccount> for UserAccount {
    type Error = RecordError;

    fn try_from(raw: RawUserAccount) -> Result<Self, Self::Error> {
        let id = require_id(raw.id)?;
        let role = parse_key(&id, "role", &raw.role)?;
        Ok(Self {
            id,
            name: raw.name,
            email: raw.email,
            role,
            points: raw.points,
            joined_at: raw.joined_at,
        })
    }
}

impl Listing for UserAccount {
    type Key = UserRole;

    fn id(&self) -> &str {
        &self.id
    }

    fn bucket_key(&self) -> UserRole {
        self.role
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle) || contains_ci(&self.email, needle)
    }
}

impl Tabular for UserAccount {
    const TITLE: &'static str = "Users";
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Points", "Joined"];
    const WIDTHS: &'static [u16] = &[28, 40, 14, 18];

    fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            format_number(self.points),
            format_age(self.joined_at, now),
        ]
    }
}
