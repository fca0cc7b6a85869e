// Demo source: generates a believable marketplace to showcase the TUI
//
// The first fetch produces a fixed catalogue derived from the seed. Every
// later fetch advances a "round" that moves a few records along their
// lifecycle (pending -> in review -> approved, available -> ongoing, unread
// -> read), so refetch and page clamping can be watched live.
//
// Run with: TESTMARKET_SOURCE=demo cargo run --release

use super::SnapshotDocument;
use crate::records::{RawAssignment, RawNotification, RawSubmission, RawUserAccount};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::Value;

const APPS: &[(&str, &str, &str)] = &[
    ("Weather Now", "Skyline Labs", "Weather"),
    ("Budget Pal", "Coinfold", "Finance"),
    ("Trail Finder", "Outward Apps", "Travel"),
    ("Pixel Chef", "Kitchen Code", "Food & Drink"),
    ("Study Buddy", "Learnly", "Education"),
    ("Habit Loop", "Tinysteps", "Health & Fitness"),
    ("Parking Spot", "Curbside", "Maps & Navigation"),
    ("Podcast Lane", "Wavefront", "Music & Audio"),
    ("Plant Pal", "Greenroom", "Lifestyle"),
    ("Quick Invoice", "Ledgerly", "Business"),
    ("Word Sprint", "Glyph Games", "Games"),
    ("Bus Tracker", "Transitly", "Maps & Navigation"),
    ("Sleep Cycle+", "Nightowl", "Health & Fitness"),
    ("Recipe Box", "Kitchen Code", "Food & Drink"),
    ("Language Hop", "Learnly", "Education"),
    ("Photo Vault", "Lockbox", "Photography"),
    ("Car Share Go", "Curbside", "Auto & Vehicles"),
    ("Meme Maker", "Glyph Games", "Entertainment"),
    ("Run Coach", "Tinysteps", "Health & Fitness"),
    ("Grocery List", "Listwise", "Shopping"),
    ("Chess Daily", "Glyph Games", "Games"),
    ("Pet Diary", "Greenroom", "Lifestyle"),
    ("Crypto Watch", "Coinfold", "Finance"),
    ("Event Pass", "Ticketry", "Events"),
    ("Flash Notes", "Learnly", "Education"),
    ("Water Reminder", "Tinysteps", "Health & Fitness"),
    ("Ride Split", "Transitly", "Travel"),
    ("Clinic Queue", "Medline", "Medical"),
    ("Beat Maker", "Wavefront", "Music & Audio"),
    ("Room Planner", "Homely", "House & Home"),
];

const NAMES: &[&str] = &[
    "Ada Okafor", "Bruno Silva", "Chen Wei", "Dana Kowalski", "Elif Yilmaz",
    "Farah Haddad", "Gus Lindqvist", "Hana Sato", "Ivan Petrov", "Jo Mensah",
    "Kiri Walker", "Lena Fischer", "Mateo Rossi", "Nia Adeyemi", "Omar Aziz",
    "Priya Nair", "Quinn Murphy", "Rosa Ortega", "Sami Laine", "Tomas Novak",
    "Uma Reddy", "Vera Ionescu", "Wen Li", "Xavier Dubois", "Yara Costa",
    "Zane Hughes", "Aiko Tanaka", "Ben Carter", "Carla Mendes", "Dev Patel",
    "Emre Kaya", "Fiona Byrne", "Goran Horvat", "Hugo Martin",
];

const ANNOUNCEMENTS: &[(&str, &str, &str)] = &[
    ("Welcome aboard", "Thanks for joining the testing community.", ""),
    ("New assignments", "Five new paid assignments are open this week.", "testers"),
    ("Points doubled", "Reviews submitted this weekend earn double points.", "community"),
    ("Review approved", "Your review of Budget Pal was approved.", ""),
    ("Payout sent", "Your monthly payout is on its way.", ""),
    ("Policy update", "Updated testing guidelines are now live.", "everyone"),
    ("Deadline soon", "Trail Finder closes for testing in two days.", ""),
    ("Submission received", "We received your app and will review it shortly.", ""),
    ("Maintenance window", "The dashboard will be read-only on Sunday night.", "everyone"),
    ("Tester spotlight", "Meet this month's top community testers.", "community"),
    ("Feedback requested", "Tell us how the new review form works for you.", "testers"),
    ("Badge earned", "You earned the Early Bird badge.", ""),
];

/// Small deterministic generator (xorshift64*)
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }
}

pub struct DemoSource {
    seed: u64,
    round: u64,
    anchor: DateTime<Utc>,
}

impl DemoSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            round: 0,
            anchor: Utc::now(),
        }
    }

    /// Current round; incremented by every fetch
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn fetch(&mut self) -> SnapshotDocument {
        let doc = self.generate();
        self.round += 1;
        doc
    }

    fn generate(&self) -> SnapshotDocument {
        let mut rng = Rng::new(self.seed);
        SnapshotDocument {
            submissions: to_values(self.submissions(&mut rng)),
            assignments: to_values(self.assignments(&mut rng)),
            users: to_values(self.users(&mut rng)),
            notifications: to_values(self.notifications(&mut rng)),
        }
    }

    fn submissions(&self, rng: &mut Rng) -> Vec<RawSubmission> {
        APPS.iter()
            .enumerate()
            .map(|(i, (app, developer, category))| {
                let base = rng.below(4);
                // One stage per round for every fifth app, offset by position
                let advanced = self.round.saturating_sub(i as u64 % 5).div_ceil(5);
                let stage = match base {
                    3 => 3, // rejected stays rejected
                    b => (b + advanced).min(2),
                };
                let status = ["pending", "in_review", "approved", "rejected"][stage as usize];
                RawSubmission {
                    id: format!("sub-{:03}", i + 1),
                    app_name: app.to_string(),
                    developer: developer.to_string(),
                    package_name: package_name(developer, app),
                    category: category.to_string(),
                    status: status.to_string(),
                    submitted_at: self.anchor - TimeDelta::hours(rng.below(24 * 30) as i64 + 1),
                    points_offered: 50 * (rng.below(20) + 1),
                }
            })
            .collect()
    }

    fn assignments(&self, rng: &mut Rng) -> Vec<RawAssignment> {
        APPS.iter()
            .take(20)
            .enumerate()
            .map(|(i, (app, company, _))| {
                let base = rng.below(3);
                let stage = if i as u64 % 4 < self.round % 4 { (base + 1).min(2) } else { base };
                let status = ["available", "ongoing", "completed"][stage as usize];
                let offset = TimeDelta::days(rng.below(28) as i64) - TimeDelta::days(7);
                RawAssignment {
                    id: format!("asg-{:03}", i + 1),
                    app_name: app.to_string(),
                    company: company.to_string(),
                    reward_points: 100 * (rng.below(15) + 1),
                    testers_needed: rng.below(12) as u32 + 3,
                    status: status.to_string(),
                    deadline: Some(self.anchor + offset),
                }
            })
            .collect()
    }

    fn users(&self, rng: &mut Rng) -> Vec<RawUserAccount> {
        NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let role = match (i, rng.below(10)) {
                    (0 | 1, _) => "admin",
                    (_, 0..=3) => "tester",
                    _ => "community",
                };
                let handle = name.to_lowercase().replace(' ', ".");
                RawUserAccount {
                    id: format!("usr-{:03}", i + 1),
                    name: name.to_string(),
                    email: format!("{}@example.com", handle),
                    role: role.to_string(),
                    points: rng.below(5_000) + self.round * 10 * (i as u64 % 3),
                    joined_at: self.anchor - TimeDelta::days(rng.below(365) as i64 + 1),
                }
            })
            .collect()
    }

    fn notifications(&self, rng: &mut Rng) -> Vec<RawNotification> {
        ANNOUNCEMENTS
            .iter()
            .enumerate()
            .map(|(i, (title, body, audience))| {
                let unread = rng.below(3) != 0 && (i as u64) >= self.round;
                RawNotification {
                    id: format!("ntf-{:03}", i + 1),
                    title: title.to_string(),
                    body: body.to_string(),
                    audience: audience.to_string(),
                    status: if unread { "unread" } else { "read" }.to_string(),
                    sent_at: self.anchor - TimeDelta::minutes((i as i64 + 1) * 95),
                }
            })
            .collect()
    }
}

/// Wire form of generated records; plain data structs always serialize
fn to_values<T: Serialize>(records: Vec<T>) -> Vec<Value> {
    records
        .into_iter()
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect()
}

fn package_name(developer: &str, app: &str) -> String {
    let slug = |s: &str| {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase()
    };
    format!("com.{}.{}", slug(developer), slug(app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardKind;

    #[test]
    fn test_demo_is_deterministic_for_a_seed() {
        let mut a = DemoSource::new(7);
        let mut b = DemoSource::new(7);
        b.anchor = a.anchor;

        let first = a.fetch().validate();
        let second = b.fetch().validate();
        for &kind in BoardKind::all() {
            assert_eq!(first.fingerprint(kind), second.fingerprint(kind));
        }
    }

    #[test]
    fn test_demo_records_all_validate() {
        let snapshot = DemoSource::new(42).fetch().validate();

        assert!(snapshot.rejected.is_empty());
        assert_eq!(snapshot.submissions.len(), APPS.len());
        assert_eq!(snapshot.assignments.len(), 20);
        assert_eq!(snapshot.users.len(), NAMES.len());
        assert_eq!(snapshot.notifications.len(), ANNOUNCEMENTS.len());
    }

    #[test]
    fn test_demo_rounds_move_records_along() {
        let mut source = DemoSource::new(42);
        let first = source.fetch().validate();
        for _ in 0..5 {
            source.fetch();
        }
        let later = source.fetch().validate();

        assert_eq!(source.round(), 7);
        assert_ne!(
            first.fingerprint(BoardKind::Submissions),
            later.fingerprint(BoardKind::Submissions)
        );
        // Ids are stable across rounds
        let ids = |s: &crate::source::Snapshot| {
            s.submissions.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&later));
    }

    #[test]
    fn test_package_name() {
        assert_eq!(
            package_name("Kitchen Code", "Pixel Chef"),
            "com.kitchencode.pixelchef"
        );
    }
}
