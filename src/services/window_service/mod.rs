//! WindowingService: responsibility and boundaries
//!
//! This module and its submodules only issue show/hide calls for named
//! platform windows. Actual display state is owned by the platform's
//! windowing service; nothing here tracks visibility or decides which window
//! should be visible. That decision is made exclusively by WindowCoordinator.

mod dbus;
mod dry_run;
mod r#trait;

pub use self::r#trait::{create_window_service, WindowingService};
