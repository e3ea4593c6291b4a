//! GameTracker service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for delivering raw game
//! lifecycle data from the platform (point-in-time queries and started/ended
//! notifications) as `Option<RawGameInfo>` values. They MUST NOT filter by the
//! target game or decide window visibility. Filtering belongs to
//! GameStatusWatcher; all visibility decisions are made exclusively by
//! WindowCoordinator.

mod dbus;
mod dry_run;
mod r#trait;

pub use self::r#trait::{create_game_tracker, GameInfoCallback, GameTrackingService};
