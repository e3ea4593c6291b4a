pub mod game;

pub use game::{ClassId, GameRunStatus, RawGameInfo};
