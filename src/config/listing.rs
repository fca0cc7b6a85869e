//! Listing configuration: tab policy and per-board page sizes

use serde::Deserialize;
use std::num::NonZeroUsize;

use crate::board::BoardKind;
use crate::listing::TabPolicy;

// ─────────────────────────────────────────────────────────────────────────────
// Page Sizes
// ─────────────────────────────────────────────────────────────────────────────

/// Records per page for each board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizes {
    pub submissions: usize,
    pub assignments: usize,
    pub users: usize,
    pub notifications: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            submissions: BoardKind::Submissions.default_page_size(),
            assignments: BoardKind::Assignments.default_page_size(),
            users: BoardKind::Users.default_page_size(),
            notifications: BoardKind::Notifications.default_page_size(),
        }
    }
}

/// Page sizes as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePageSizes {
    pub submissions: Option<usize>,
    pub assignments: Option<usize>,
    pub users: Option<usize>,
    pub notifications: Option<usize>,
}

impl PageSizes {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FilePageSizes>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            submissions: file.submissions.unwrap_or(defaults.submissions),
            assignments: file.assignments.unwrap_or(defaults.assignments),
            users: file.users.unwrap_or(defaults.users),
            notifications: file.notifications.unwrap_or(defaults.notifications),
        }
    }

    pub fn get(&self, kind: BoardKind) -> usize {
        match kind {
            BoardKind::Submissions => self.submissions,
            BoardKind::Assignments => self.assignments,
            BoardKind::Users => self.users,
            BoardKind::Notifications => self.notifications,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListingConfig {
    /// What happens to a bucket's page when switching away and back
    pub tab_policy: TabPolicy,
    pub page_sizes: PageSizes,
}

impl ListingConfig {
    /// Page size for a board. Zero in the config falls back to the
    /// board's default.
    pub fn page_size(&self, kind: BoardKind) -> NonZeroUsize {
        NonZeroUsize::new(self.page_sizes.get(kind))
            .or_else(|| NonZeroUsize::new(kind.default_page_size()))
            .unwrap_or(NonZeroUsize::MIN)
    }
}
