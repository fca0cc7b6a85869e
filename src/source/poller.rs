// Refetch loop
//
// Fetches once at startup, then again on every interval tick or refresh
// command, until the shutdown signal fires. Each fetch is validated and
// fingerprinted per board; only boards whose fingerprint moved are reported
// as changed, and a fetch that changes nothing is not sent at all.

use super::{Fingerprint, Snapshot, Source};
use crate::board::BoardKind;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Sent from the poller to the UI
#[derive(Debug)]
pub enum SourceEvent {
    /// A fetch changed at least one board
    Delivered {
        snapshot: Snapshot,
        changed: Vec<BoardKind>,
    },
    /// A fetch failed; boards keep their last collection
    Failed { message: String },
}

/// Sent from the UI to the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    Refresh,
}

pub struct Poller {
    source: Source,
    interval: Duration,
    seen: HashMap<BoardKind, Fingerprint>,
}

impl Poller {
    /// A zero interval disables periodic refetching; refresh commands
    /// still work.
    pub fn new(source: Source, interval: Duration) -> Self {
        Self {
            source,
            interval,
            seen: HashMap::new(),
        }
    }

    /// Fetch once. Returns `None` when nothing changed since the last
    /// successful fetch.
    pub async fn poll_once(&mut self) -> Option<SourceEvent> {
        let document = match self.source.fetch().await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(source = %self.source.describe(), "Fetch failed: {}", e);
                return Some(SourceEvent::Failed {
                    message: e.to_string(),
                });
            }
        };

        let snapshot = document.validate();
        let mut changed = Vec::new();
        for &kind in BoardKind::all() {
            let fingerprint = snapshot.fingerprint(kind);
            if self.seen.insert(kind, fingerprint) != Some(fingerprint) {
                changed.push(kind);
            }
        }

        if changed.is_empty() {
            tracing::trace!("Fetch unchanged");
            return None;
        }

        tracing::debug!(
            changed = ?changed.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
            rejected = snapshot.rejected.len(),
            "Snapshot changed"
        );
        Some(SourceEvent::Delivered { snapshot, changed })
    }

    pub async fn run(
        mut self,
        tx: mpsc::Sender<SourceEvent>,
        mut commands: mpsc::Receiver<PollCommand>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        tracing::info!(
            "Polling {} every {}",
            self.source.describe(),
            if self.interval.is_zero() {
                "refresh only".to_string()
            } else {
                format!("{}s", self.interval.as_secs())
            }
        );

        let mut ticker = (!self.interval.is_zero()).then(|| {
            let mut t = tokio::time::interval(self.interval);
            t.set_missed_tick_behavior(MissedTickBehavior::Delay);
            t.reset();
            t
        });

        if !self.forward_until_shutdown(&tx, &mut shutdown_rx).await {
            return;
        }

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    tracing::debug!("Poller shutting down");
                    return;
                }

                _ = async {
                    match ticker.as_mut() {
                        Some(t) => {
                            t.tick().await;
                        }
                        None => std::future::pending::<()>().await,
                    }
                } => {}

                command = commands.recv() => match command {
                    Some(PollCommand::Refresh) => {
                        tracing::debug!("Refresh requested");
                        if let Some(t) = ticker.as_mut() {
                            t.reset();
                        }
                    }
                    // UI is gone
                    None => return,
                },
            }

            if !self.forward_until_shutdown(&tx, &mut shutdown_rx).await {
                return;
            }
        }
    }

    /// Forward one poll, abandoning the fetch if shutdown fires first.
    /// False means the loop should stop.
    async fn forward_until_shutdown(
        &mut self,
        tx: &mpsc::Sender<SourceEvent>,
        shutdown_rx: &mut oneshot::Receiver<()>,
    ) -> bool {
        tokio::select! {
            _ = shutdown_rx => {
                tracing::debug!("Poller shutting down mid-fetch");
                false
            }
            delivered = self.forward(tx) => delivered,
        }
    }

    /// Poll and send; false once the receiver is dropped
    async fn forward(&mut self, tx: &mpsc::Sender<SourceEvent>) -> bool {
        match self.poll_once().await {
            Some(event) => tx.send(event).await.is_ok(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileSource;
    use std::path::Path;

    const ONE: &str = r#"{
        "submissions": [{"id": "s1", "app_name": "A", "status": "pending", "submitted_at": "2026-10-01T10:00:00Z"}],
        "users": [{"id": "u1", "role": "admin", "joined_at": "2026-10-01T10:00:00Z"}]
    }"#;

    const TWO: &str = r#"{
        "submissions": [{"id": "s1", "app_name": "A", "status": "approved", "submitted_at": "2026-10-01T10:00:00Z"}],
        "users": [{"id": "u1", "role": "admin", "joined_at": "2026-10-01T10:00:00Z"}]
    }"#;

    fn file_poller(path: &Path) -> Poller {
        Poller::new(
            Source::File(FileSource::new(path.to_path_buf())),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_first_poll_reports_every_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, ONE).unwrap();

        let mut poller = file_poller(&path);
        match poller.poll_once().await {
            Some(SourceEvent::Delivered { snapshot, changed }) => {
                assert_eq!(changed, BoardKind::all().to_vec());
                assert_eq!(snapshot.submissions.len(), 1);
            }
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unchanged_refetch_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, ONE).unwrap();

        let mut poller = file_poller(&path);
        assert!(poller.poll_once().await.is_some());
        assert!(poller.poll_once().await.is_none());
    }

    #[tokio::test]
    async fn test_only_changed_boards_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, ONE).unwrap();

        let mut poller = file_poller(&path);
        poller.poll_once().await;
        std::fs::write(&path, TWO).unwrap();

        match poller.poll_once().await {
            Some(SourceEvent::Delivered { changed, .. }) => {
                assert_eq!(changed, vec![BoardKind::Submissions]);
            }
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, ONE).unwrap();

        let mut poller = file_poller(&path);
        poller.poll_once().await;

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            poller.poll_once().await,
            Some(SourceEvent::Failed { .. })
        ));

        // Same content as before the failure: nothing to deliver
        std::fs::write(&path, ONE).unwrap();
        assert!(poller.poll_once().await.is_none());
    }

    #[tokio::test]
    async fn test_run_refreshes_on_command_and_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, ONE).unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(file_poller(&path).run(tx, cmd_rx, shutdown_rx));

        assert!(matches!(
            rx.recv().await,
            Some(SourceEvent::Delivered { .. })
        ));

        std::fs::write(&path, TWO).unwrap();
        cmd_tx.send(PollCommand::Refresh).await.unwrap();
        match rx.recv().await {
            Some(SourceEvent::Delivered { changed, .. }) => {
                assert_eq!(changed, vec![BoardKind::Submissions]);
            }
            other => panic!("expected delivery, got {:?}", other),
        }

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_unanswered_fetch() {
        // Accepts connections and never answers them
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/snapshot", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let source = Source::Http(
            crate::source::HttpSource::new(url, None, Duration::from_secs(5)).unwrap(),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let (_cmd_tx, cmd_rx) = mpsc::channel(4);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(Poller::new(source, Duration::ZERO).run(tx, cmd_rx, shutdown_rx));

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller should stop without waiting for the request timeout")
            .unwrap();
        assert!(rx.recv().await.is_none());
    }
}

