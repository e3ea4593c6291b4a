use tracing::info;

use super::r#trait::WindowingService;

/// Windowing service double for dry-run mode: logs every call instead of
/// touching any window.
pub struct DryRunWindowService;

impl DryRunWindowService {
    pub fn new() -> Self {
        Self
    }
}

impl WindowingService for DryRunWindowService {
    fn restore(&self, window: &str) {
        info!("[DRY RUN] restore window '{}'", window);
    }

    fn close(&self, window: &str) {
        info!("[DRY RUN] close window '{}'", window);
    }
}
