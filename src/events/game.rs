use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque game class/category identifier assigned by the platform's
/// game-tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Raw game info as delivered by the tracking service.
///
/// Notifications and the point-in-time query both carry this shape. An absent
/// payload is represented as `Option<RawGameInfo>::None` and is never turned
/// into a status; consumers ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGameInfo {
    pub class_id: ClassId,
    pub is_running: bool,
}

impl RawGameInfo {
    pub fn new(class_id: ClassId, is_running: bool) -> Self {
        Self {
            class_id,
            is_running,
        }
    }
}

impl fmt::Display for RawGameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.class_id,
            if self.is_running { "running" } else { "stopped" }
        )
    }
}

/// Normalized run status of the monitored game.
///
/// Produced by `GameStatusWatcher` for every relevant notification and for
/// the startup query; consumed once by the coordinator and not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRunStatus {
    pub is_target_game: bool,
    pub is_running: bool,
}

impl GameRunStatus {
    /// Status for the monitored game with the given running flag.
    pub fn target(is_running: bool) -> Self {
        Self {
            is_target_game: true,
            is_running,
        }
    }

    /// Status when no monitored game is running (also the fail-safe default).
    pub fn no_target() -> Self {
        Self {
            is_target_game: false,
            is_running: false,
        }
    }
}

impl fmt::Display for GameRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_target_game, self.is_running) {
            (true, true) => write!(f, "target game running"),
            (true, false) => write!(f, "target game stopped"),
            (false, _) => write!(f, "no target game"),
        }
    }
}
