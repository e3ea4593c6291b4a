use crate::error::Result;
use std::sync::Arc;

/// Boundary to the platform's windowing service, keyed by stable window-name
/// strings.
///
/// Both operations are fire-and-forget: they return immediately, the
/// underlying platform call runs detached, and its completion is never
/// awaited or inspected. Failures stay with the windowing service (logged by
/// the backend), so callers have nothing to handle.
pub trait WindowingService: Send + Sync {
    /// Show the named window and bring it to front.
    fn restore(&self, window: &str);

    /// Hide the named window.
    fn close(&self, window: &str);
}

/// Factory function to create an appropriate windowing service based on the dry_run flag
pub async fn create_window_service(dry_run: bool) -> Result<Arc<dyn WindowingService>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunWindowService::new()))
    } else {
        Ok(Arc::new(super::dbus::DbusWindowService::connect().await?))
    }
}
