pub mod coordinator;
pub mod game_tracker;
pub mod game_watcher;
pub mod window_service;

pub use coordinator::WindowCoordinator;
pub use game_tracker::create_game_tracker;
pub use game_watcher::GameStatusWatcher;
pub use window_service::create_window_service;
