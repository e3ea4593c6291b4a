use crate::error::Result;
use crate::events::{ClassId, GameRunStatus, RawGameInfo};
use crate::services::game_tracker::{GameInfoCallback, GameTrackingService};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback invoked with each normalized status of the monitored game.
pub type StatusCallback = Arc<dyn Fn(GameRunStatus) + Send + Sync + 'static>;

/// Translates the tracking service's notifications and queries into a single
/// normalized signal for the monitored game.
///
/// Responsibilities (strict):
/// - Filter out notifications for any game other than the configured target.
/// - Normalize raw payloads into `GameRunStatus`; absent payloads are dropped.
/// - Degrade a failed point-in-time query to "no target game" instead of
///   surfacing the error.
/// - Do NOT decide window visibility; that belongs to WindowCoordinator.
pub struct GameStatusWatcher {
    tracker: Arc<dyn GameTrackingService>,
    target_class_id: ClassId,
}

impl GameStatusWatcher {
    pub fn new(tracker: Arc<dyn GameTrackingService>, target_class_id: ClassId) -> Self {
        Self {
            tracker,
            target_class_id,
        }
    }

    /// Subscribe to game-started and game-ended notifications and forward the
    /// normalized status of every target-game notification to `consumer`.
    ///
    /// The underlying registration is process-wide and not idempotent-safe:
    /// call this exactly once per process.
    pub async fn start(&self, consumer: StatusCallback) -> Result<()> {
        info!(
            "watching game lifecycle notifications for {}",
            self.target_class_id
        );

        let on_game_started = self.notification_handler(consumer.clone());
        let on_game_ended = self.notification_handler(consumer);
        self.tracker.subscribe(on_game_started, on_game_ended).await
    }

    /// One-shot query for the current status of the monitored game.
    ///
    /// Resolves to "no target game" when nothing is running, when a different
    /// game is running, or when the query itself fails.
    pub async fn query_current(&self) -> GameRunStatus {
        match self.tracker.running_game().await {
            Ok(Some(info)) if info.class_id == self.target_class_id && info.is_running => {
                GameRunStatus::target(true)
            }
            Ok(_) => GameRunStatus::no_target(),
            Err(e) => {
                warn!("running-game query failed, assuming no target game: {}", e);
                GameRunStatus::no_target()
            }
        }
    }

    fn notification_handler(&self, consumer: StatusCallback) -> GameInfoCallback {
        let target_class_id = self.target_class_id;
        Arc::new(move |raw| {
            if let Some(status) = Self::normalize(target_class_id, raw) {
                consumer(status);
            }
        })
    }

    fn normalize(target_class_id: ClassId, raw: Option<RawGameInfo>) -> Option<GameRunStatus> {
        match raw {
            None => {
                debug!("ignoring notification without game info");
                None
            }
            Some(info) if info.class_id != target_class_id => {
                debug!("ignoring notification for {}", info);
                None
            }
            Some(info) => Some(GameRunStatus::target(info.is_running)),
        }
    }
}
