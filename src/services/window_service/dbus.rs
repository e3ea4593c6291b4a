use crate::error::Result;
use tracing::{info, warn};
use zbus::{proxy, Connection};

use super::r#trait::WindowingService;

#[proxy(
    interface = "org.overhud.WindowManager1",
    default_service = "org.overhud.Platform",
    default_path = "/org/overhud/WindowManager"
)]
trait WindowManager {
    fn restore(&self, window: &str) -> zbus::Result<()>;

    fn close(&self, window: &str) -> zbus::Result<()>;
}

/// Windowing service backed by the overlay platform's session-bus service.
///
/// Each call is dispatched on a detached task; a failed call is logged and
/// dropped, never retried.
pub struct DbusWindowService {
    proxy: WindowManagerProxy<'static>,
}

impl DbusWindowService {
    pub async fn connect() -> Result<Self> {
        info!("connecting to the platform window manager on the session bus");

        let connection = Connection::session().await?;
        let proxy = WindowManagerProxy::new(&connection).await?;

        Ok(Self { proxy })
    }
}

impl WindowingService for DbusWindowService {
    fn restore(&self, window: &str) {
        let proxy = self.proxy.clone();
        let window = window.to_string();
        tokio::spawn(async move {
            if let Err(e) = proxy.restore(&window).await {
                warn!("restore of window '{}' failed: {}", window, e);
            }
        });
    }

    fn close(&self, window: &str) {
        let proxy = self.proxy.clone();
        let window = window.to_string();
        tokio::spawn(async move {
            if let Err(e) = proxy.close(&window).await {
                warn!("close of window '{}' failed: {}", window, e);
            }
        });
    }
}
