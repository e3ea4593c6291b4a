use crate::error::Result;
use crate::events::{ClassId, RawGameInfo};
use tokio::time::{interval, Duration};
use tracing::info;

use super::r#trait::{GameInfoCallback, GameTrackingService};

/// Simulated game tracker for dry-run mode: the query always answers "no
/// game", and the target game is started and stopped on a fixed cadence.
pub struct DryRunGameTracker {
    target_class_id: ClassId,
    cadence: Duration,
}

impl DryRunGameTracker {
    pub fn new(target_class_id: ClassId, cadence: Duration) -> Self {
        Self {
            target_class_id,
            cadence,
        }
    }
}

#[async_trait::async_trait]
impl GameTrackingService for DryRunGameTracker {
    async fn running_game(&self) -> Result<Option<RawGameInfo>> {
        info!("[DRY RUN] running-game query answered with no game");
        Ok(None)
    }

    async fn subscribe(
        &self,
        on_game_started: GameInfoCallback,
        on_game_ended: GameInfoCallback,
    ) -> Result<()> {
        info!(
            "[DRY RUN] simulating lifecycle of {} every {:?}",
            self.target_class_id, self.cadence
        );

        let class_id = self.target_class_id;
        let mut ticker = interval(self.cadence);
        let mut running = false;

        tokio::spawn(async move {
            loop {
                ticker.tick().await;
                running = !running;

                let info = RawGameInfo::new(class_id, running);
                if running {
                    info!("[DRY RUN] simulating game start: {}", info);
                    on_game_started(Some(info));
                } else {
                    info!("[DRY RUN] simulating game end: {}", info);
                    on_game_ended(Some(info));
                }
            }
        });

        Ok(())
    }
}
