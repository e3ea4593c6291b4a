use crate::error::Result;
use crate::events::{ClassId, RawGameInfo};
use futures::StreamExt;
use tracing::{debug, info, warn};
use zbus::{proxy, Connection};

use super::r#trait::{GameInfoCallback, GameTrackingService};

#[proxy(
    interface = "org.overhud.GameTracker1",
    default_service = "org.overhud.Platform",
    default_path = "/org/overhud/GameTracker"
)]
trait GameTracker {
    /// Currently running game as (present, class_id, is_running).
    fn running_game(&self) -> zbus::Result<(bool, u32, bool)>;

    #[zbus(signal)]
    fn game_started(&self, class_id: u32, is_running: bool) -> zbus::Result<()>;

    #[zbus(signal)]
    fn game_ended(&self, class_id: u32, is_running: bool) -> zbus::Result<()>;
}

/// Game tracker backed by the overlay platform's session-bus service.
pub struct DbusGameTracker {
    proxy: GameTrackerProxy<'static>,
}

impl DbusGameTracker {
    pub async fn connect() -> Result<Self> {
        info!("connecting to the platform game tracker on the session bus");

        let connection = Connection::session().await?;
        let proxy = GameTrackerProxy::new(&connection).await?;

        Ok(Self { proxy })
    }
}

#[async_trait::async_trait]
impl GameTrackingService for DbusGameTracker {
    async fn running_game(&self) -> Result<Option<RawGameInfo>> {
        let (present, class_id, is_running) = self.proxy.running_game().await?;

        if !present {
            return Ok(None);
        }

        Ok(Some(RawGameInfo::new(ClassId::new(class_id), is_running)))
    }

    async fn subscribe(
        &self,
        on_game_started: GameInfoCallback,
        on_game_ended: GameInfoCallback,
    ) -> Result<()> {
        let mut started = self.proxy.receive_game_started().await?;
        let mut ended = self.proxy.receive_game_ended().await?;

        info!("subscribed to GameStarted/GameEnded signals");

        // Deliveries are processed one at a time on the single-threaded
        // runtime; a payload that fails to decode is forwarded as absent.
        tokio::spawn(async move {
            while let Some(signal) = started.next().await {
                match signal.args() {
                    Ok(args) => {
                        let info = RawGameInfo::new(
                            ClassId::new(args.class_id().to_owned()),
                            args.is_running().to_owned(),
                        );
                        on_game_started(Some(info));
                    }
                    Err(e) => {
                        warn!("undecodable GameStarted payload: {}", e);
                        on_game_started(None);
                    }
                }
            }
            debug!("GameStarted signal stream closed");
        });

        tokio::spawn(async move {
            while let Some(signal) = ended.next().await {
                match signal.args() {
                    Ok(args) => {
                        let info = RawGameInfo::new(
                            ClassId::new(args.class_id().to_owned()),
                            args.is_running().to_owned(),
                        );
                        on_game_ended(Some(info));
                    }
                    Err(e) => {
                        warn!("undecodable GameEnded payload: {}", e);
                        on_game_ended(None);
                    }
                }
            }
            debug!("GameEnded signal stream closed");
        });

        Ok(())
    }
}
