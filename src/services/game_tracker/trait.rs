use crate::config::Config;
use crate::error::Result;
use crate::events::{ClassId, RawGameInfo};
use std::sync::Arc;
use tokio::time::Duration;

/// Callback invoked with the payload of a game lifecycle notification.
///
/// An absent payload (`None`) means the platform delivered a notification
/// without usable info; consumers treat it as a no-op signal.
pub type GameInfoCallback = Arc<dyn Fn(Option<RawGameInfo>) + Send + Sync + 'static>;

/// Boundary to the platform's game-tracking service.
#[async_trait::async_trait]
pub trait GameTrackingService: Send + Sync {
    /// Point-in-time query for the currently running game, if any.
    async fn running_game(&self) -> Result<Option<RawGameInfo>>;

    /// Register the two notification callbacks and start delivering
    /// game-started and game-ended notifications to them.
    ///
    /// The registration is process-wide and not idempotent-safe: call this
    /// exactly once per process.
    async fn subscribe(
        &self,
        on_game_started: GameInfoCallback,
        on_game_ended: GameInfoCallback,
    ) -> Result<()>;
}

/// Factory function to create an appropriate game tracker based on the dry_run flag
pub async fn create_game_tracker(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Arc<dyn GameTrackingService>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunGameTracker::new(
            ClassId::new(config.game.target_class_id),
            Duration::from_secs(config.game.dry_run_interval_secs),
        )))
    } else {
        Ok(Arc::new(super::dbus::DbusGameTracker::connect().await?))
    }
}
