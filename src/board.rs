// Boards - one listing screen per record type
//
// A Board owns the delivered collection and its ViewState, and routes every
// change through the pure listing functions. BoardView erases the record
// type so the TUI and the print command can drive any board the same way.

use crate::config::ListingConfig;
use crate::listing::{self, BucketKey, Listing, ListingError, TabPolicy, ViewState};
use crate::records::{Assignment, Notification, Submission, UserAccount};
use crate::source::Snapshot;
use chrono::{DateTime, Utc};
use std::num::NonZeroUsize;

/// Table layout for a record type
pub trait Tabular {
    const TITLE: &'static str;
    const HEADERS: &'static [&'static str];
    /// Column widths in cells, one per header
    const WIDTHS: &'static [u16];

    fn cells(&self, now: DateTime<Utc>) -> Vec<String>;
}

/// The boards of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
#[value(rename_all = "lower")]
pub enum BoardKind {
    /// Admin review queue
    #[default]
    Submissions,
    /// Tester assignment market
    Assignments,
    /// Admin user list
    Users,
    /// Notification inbox
    Notifications,
}

impl BoardKind {
    pub fn all() -> &'static [BoardKind] {
        &[
            BoardKind::Submissions,
            BoardKind::Assignments,
            BoardKind::Users,
            BoardKind::Notifications,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardKind::Submissions => "submissions",
            BoardKind::Assignments => "assignments",
            BoardKind::Users => "users",
            BoardKind::Notifications => "notifications",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BoardKind::Submissions => "Submissions",
            BoardKind::Assignments => "Assignments",
            BoardKind::Users => "Users",
            BoardKind::Notifications => "Notifications",
        }
    }

    /// Page size used when the config does not set one
    pub fn default_page_size(&self) -> usize {
        match self {
            BoardKind::Submissions => 15,
            BoardKind::Assignments => 6,
            BoardKind::Users => 15,
            BoardKind::Notifications => 5,
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|&k| k == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}

/// One tab of a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Everything a renderer needs to draw a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub widths: &'static [u16],
    pub tabs: Vec<TabInfo>,
    pub active_tab: usize,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub total_pages: usize,
    pub bucket_len: usize,
    pub item_range: Option<(usize, usize)>,
    pub page_size: usize,
    pub query: String,
}

/// Type-erased board operations
pub trait BoardView: Send {
    fn kind(&self) -> BoardKind;
    fn model(&self, now: DateTime<Utc>) -> BoardModel;
    fn record_count(&self) -> usize;

    fn select_tab(&mut self, name: &str) -> Result<(), ListingError>;
    fn next_tab(&mut self);
    fn prev_tab(&mut self);

    fn next_page(&mut self);
    fn prev_page(&mut self);
    fn first_page(&mut self);
    fn last_page(&mut self);
    fn goto_page(&mut self, page: usize);

    fn query(&self) -> &str;
    fn set_query(&mut self, query: &str) -> bool;
}

/// A collection of records plus its view state
#[derive(Debug, Clone)]
pub struct Board<R: Listing> {
    kind: BoardKind,
    records: Vec<R>,
    state: ViewState<R::Key>,
    page_size: NonZeroUsize,
    policy: TabPolicy,
}

impl<R: Listing> Board<R> {
    pub fn new(kind: BoardKind, page_size: NonZeroUsize, policy: TabPolicy) -> Self {
        Self {
            kind,
            records: Vec::new(),
            state: ViewState::new(),
            page_size,
            policy,
        }
    }

    /// Replace the collection and recompute the view state
    pub fn deliver(&mut self, records: Vec<R>) {
        self.state = listing::recompute(&records, self.page_size, &self.state);
        self.records = records;
        tracing::debug!(
            board = self.kind.as_str(),
            records = self.records.len(),
            active = self.state.active().as_str(),
            page = self.state.active_page(),
            "Board recomputed"
        );
    }

    pub fn state(&self) -> &ViewState<R::Key> {
        &self.state
    }

    pub fn page(&self) -> listing::PageView<'_, R> {
        listing::view(&self.records, self.page_size, &self.state)
    }

    fn active_total_pages(&self) -> usize {
        self.page().total_pages
    }
}

impl<R> BoardView for Board<R>
where
    R: Listing + Tabular + Send,
{
    fn kind(&self) -> BoardKind {
        self.kind
    }

    fn model(&self, now: DateTime<Utc>) -> BoardModel {
        let page = self.page();
        let tabs = page
            .counts
            .iter()
            .map(|(key, count)| TabInfo {
                name: key.as_str(),
                label: key.label(),
                count: *count,
            })
            .collect();

        BoardModel {
            title: R::TITLE,
            headers: R::HEADERS,
            widths: R::WIDTHS,
            tabs,
            active_tab: page.active.ordinal(),
            rows: page.items.iter().map(|r| r.cells(now)).collect(),
            page: page.page,
            total_pages: page.total_pages,
            bucket_len: page.bucket_len,
            item_range: page.item_range,
            page_size: self.page_size.get(),
            query: self.state.query().to_string(),
        }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn select_tab(&mut self, name: &str) -> Result<(), ListingError> {
        self.state.select_str(name, self.policy).map(|_| ())
    }

    fn next_tab(&mut self) {
        self.state.next_bucket(self.policy);
    }

    fn prev_tab(&mut self) {
        self.state.prev_bucket(self.policy);
    }

    fn next_page(&mut self) {
        let total = self.active_total_pages();
        self.state.next_page(total);
    }

    fn prev_page(&mut self) {
        let total = self.active_total_pages();
        self.state.prev_page(total);
    }

    fn first_page(&mut self) {
        self.state.first_page();
    }

    fn last_page(&mut self) {
        let total = self.active_total_pages();
        self.state.last_page(total);
    }

    fn goto_page(&mut self, page: usize) {
        let total = self.active_total_pages();
        let active = self.state.active();
        self.state.set_page(active, page, total);
    }

    fn query(&self) -> &str {
        self.state.query()
    }

    fn set_query(&mut self, query: &str) -> bool {
        let changed = self.state.set_query(query);
        if changed {
            tracing::debug!(board = self.kind.as_str(), query, "Search changed, pages reset");
        }
        changed
    }
}

/// All boards of the console
pub struct Boards {
    pub submissions: Board<Submission>,
    pub assignments: Board<Assignment>,
    pub users: Board<UserAccount>,
    pub notifications: Board<Notification>,
}

impl Boards {
    pub fn new(config: &ListingConfig) -> Self {
        let policy = config.tab_policy;
        Self {
            submissions: Board::new(
                BoardKind::Submissions,
                config.page_size(BoardKind::Submissions),
                policy,
            ),
            assignments: Board::new(
                BoardKind::Assignments,
                config.page_size(BoardKind::Assignments),
                policy,
            ),
            users: Board::new(BoardKind::Users, config.page_size(BoardKind::Users), policy),
            notifications: Board::new(
                BoardKind::Notifications,
                config.page_size(BoardKind::Notifications),
                policy,
            ),
        }
    }

    pub fn get(&self, kind: BoardKind) -> &dyn BoardView {
        match kind {
            BoardKind::Submissions => &self.submissions,
            BoardKind::Assignments => &self.assignments,
            BoardKind::Users => &self.users,
            BoardKind::Notifications => &self.notifications,
        }
    }

    pub fn get_mut(&mut self, kind: BoardKind) -> &mut dyn BoardView {
        match kind {
            BoardKind::Submissions => &mut self.submissions,
            BoardKind::Assignments => &mut self.assignments,
            BoardKind::Users => &mut self.users,
            BoardKind::Notifications => &mut self.notifications,
        }
    }

    /// Deliver the changed boards of a snapshot; the others keep their
    /// collection untouched.
    pub fn apply(&mut self, snapshot: Snapshot, changed: &[BoardKind]) {
        let Snapshot {
            submissions,
            assignments,
            users,
            notifications,
            ..
        } = snapshot;

        if changed.contains(&BoardKind::Submissions) {
            self.submissions.deliver(submissions);
        }
        if changed.contains(&BoardKind::Assignments) {
            self.assignments.deliver(assignments);
        }
        if changed.contains(&BoardKind::Users) {
            self.users.deliver(users);
        }
        if changed.contains(&BoardKind::Notifications) {
            self.notifications.deliver(notifications);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AssignmentStatus, SubmissionStatus};

    fn assignment(id: usize, status: AssignmentStatus) -> Assignment {
        Assignment {
            id: format!("as-{}", id),
            app_name: format!("App {}", id),
            company: "Acme".to_string(),
            reward_points: 100,
            testers_needed: 12,
            status,
            deadline: None,
        }
    }

    fn submission(id: usize, status: SubmissionStatus, name: &str) -> Submission {
        Submission {
            id: format!("sub-{}", id),
            app_name: name.to_string(),
            developer: "Dev".to_string(),
            package_name: format!("com.example.app{}", id),
            category: "tools".to_string(),
            status,
            submitted_at: Utc::now(),
            points_offered: 50,
        }
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_board_model_reflects_active_page() {
        let mut board: Board<Assignment> =
            Board::new(BoardKind::Assignments, size(6), TabPolicy::Preserve);
        board.deliver(
            (0..13)
                .map(|i| assignment(i, AssignmentStatus::Available))
                .collect(),
        );

        board.last_page();
        let model = board.model(Utc::now());
        assert_eq!(model.page, 3);
        assert_eq!(model.total_pages, 3);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.rows[0][0], "App 12");
        assert_eq!(model.headers.len(), model.rows[0].len());
        assert_eq!(
            model.tabs.iter().map(|t| t.count).collect::<Vec<_>>(),
            vec![13, 0, 0]
        );
    }

    #[test]
    fn test_select_tab_surfaces_invalid_filter_kind() {
        let mut board: Board<Assignment> =
            Board::new(BoardKind::Assignments, size(6), TabPolicy::Preserve);

        assert!(board.select_tab("completed").is_ok());
        assert_eq!(board.model(Utc::now()).active_tab, 2);

        let err = board.select_tab("archived").unwrap_err();
        assert!(err.to_string().contains("archived"));
        assert_eq!(board.model(Utc::now()).active_tab, 2);
    }

    #[test]
    fn test_delivery_that_shrinks_bucket_clamps_page() {
        let mut board: Board<Assignment> =
            Board::new(BoardKind::Assignments, size(6), TabPolicy::Preserve);
        board.deliver(
            (0..13)
                .map(|i| assignment(i, AssignmentStatus::Available))
                .collect(),
        );
        board.goto_page(3);

        board.deliver(
            (0..4)
                .map(|i| assignment(i, AssignmentStatus::Available))
                .collect(),
        );
        assert_eq!(board.state().active_page(), 1);
    }

    #[test]
    fn test_search_resets_pages_and_filters_rows() {
        let mut board: Board<Submission> =
            Board::new(BoardKind::Submissions, size(2), TabPolicy::Preserve);
        board.deliver(vec![
            submission(1, SubmissionStatus::Pending, "Weather Now"),
            submission(2, SubmissionStatus::Pending, "Budget Pal"),
            submission(3, SubmissionStatus::Pending, "Weatherly"),
            submission(4, SubmissionStatus::Pending, "Notes"),
        ]);
        board.next_page();
        assert_eq!(board.state().active_page(), 2);

        assert!(board.set_query("weather"));
        let model = board.model(Utc::now());
        assert_eq!(model.page, 1);
        assert_eq!(model.bucket_len, 2);
        assert_eq!(model.query, "weather");
    }

    #[test]
    fn test_reset_policy_board() {
        let mut board: Board<Assignment> =
            Board::new(BoardKind::Assignments, size(1), TabPolicy::Reset);
        board.deliver(vec![
            assignment(1, AssignmentStatus::Ongoing),
            assignment(2, AssignmentStatus::Ongoing),
        ]);
        board.next_tab();
        board.next_page();
        assert_eq!(board.state().active_page(), 2);

        board.prev_tab();
        board.next_tab();
        assert_eq!(board.state().active_page(), 1);
    }

    #[test]
    fn test_board_kind_cycle() {
        assert_eq!(BoardKind::Notifications.next(), BoardKind::Submissions);
        assert_eq!(BoardKind::Submissions.next(), BoardKind::Assignments);
    }
}
