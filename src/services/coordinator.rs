use crate::config::WindowsConfig;
use crate::error::Result;
use crate::events::GameRunStatus;
use crate::services::game_watcher::GameStatusWatcher;
use crate::services::window_service::WindowingService;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Identifies one of the two application windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowIdentifier {
    Desktop,
    InGame,
}

impl fmt::Display for WindowIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowIdentifier::Desktop => write!(f, "desktop"),
            WindowIdentifier::InGame => write!(f, "in-game"),
        }
    }
}

/// Handle to one platform window, identified by its stable platform name.
///
/// Visibility is owned by the windowing service; the handle only issues
/// fire-and-forget restore/close calls and tracks nothing locally.
pub struct ManagedWindow {
    id: WindowIdentifier,
    name: String,
    service: Arc<dyn WindowingService>,
}

impl ManagedWindow {
    fn new(id: WindowIdentifier, name: String, service: Arc<dyn WindowingService>) -> Self {
        Self { id, name, service }
    }

    fn restore(&self) {
        debug!("restoring {} window '{}'", self.id, self.name);
        self.service.restore(&self.name);
    }

    fn close(&self) {
        debug!("closing {} window '{}'", self.id, self.name);
        self.service.close(&self.name);
    }
}

/// Decides which of the two windows is visible from the monitored game's run
/// status and drives the windowing service accordingly.
///
/// Construct exactly one coordinator per process and call [`run`] exactly
/// once; the listener registration underneath is process-wide and must not be
/// repeated. Dependencies are injected so tests can build fresh instances.
///
/// [`run`]: WindowCoordinator::run
pub struct WindowCoordinator {
    watcher: GameStatusWatcher,
    desktop: ManagedWindow,
    in_game: ManagedWindow,
}

impl WindowCoordinator {
    pub fn new(
        watcher: GameStatusWatcher,
        service: Arc<dyn WindowingService>,
        windows: &WindowsConfig,
    ) -> Self {
        Self {
            watcher,
            desktop: ManagedWindow::new(
                WindowIdentifier::Desktop,
                windows.desktop.clone(),
                Arc::clone(&service),
            ),
            in_game: ManagedWindow::new(WindowIdentifier::InGame, windows.in_game.clone(), service),
        }
    }

    /// Start listening for game lifecycle notifications, then decide the
    /// initial window from a point-in-time query.
    ///
    /// The listener is started before the query is awaited and the two are
    /// not ordered against each other: a notification arriving while the
    /// query is in flight is applied immediately and then overwritten by the
    /// (by then stale) query result. Transitions are last-write-wins, so the
    /// window state converges on the next notification; the startup gap is
    /// kept rather than papered over with extra ordering.
    ///
    /// A failed query never surfaces here: the watcher degrades it to "no
    /// target game", which lands on the desktop window. The only error this
    /// returns is a failed listener registration, without which the
    /// coordinator would stay deaf for the whole process lifetime.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let coordinator = Arc::clone(&self);
        self.watcher
            .start(Arc::new(move |status| coordinator.handle_status(status)))
            .await?;

        let status = self.watcher.query_current().await;
        info!("initial game status: {}", status);
        self.apply(status.is_target_game && status.is_running);
        Ok(())
    }

    /// Transition on one status signal. Never fails: the windowing calls
    /// underneath are fire-and-forget and their faults stay with the
    /// windowing service.
    pub fn handle_status(&self, status: GameRunStatus) {
        if !status.is_target_game {
            debug!("ignoring run status of a non-target game");
            return;
        }

        info!("target game status changed: {}", status);
        self.apply(status.is_running);
    }

    // Hide before show, so that under a well-behaved windowing service the
    // two windows are never visible at the same time.
    fn apply(&self, show_in_game: bool) {
        if show_in_game {
            self.desktop.close();
            self.in_game.restore();
        } else {
            self.in_game.close();
            self.desktop.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverhudError;
    use crate::events::{ClassId, RawGameInfo};
    use crate::services::game_tracker::{GameInfoCallback, GameTrackingService};
    use parking_lot::Mutex;

    const TARGET: ClassId = ClassId(5426);
    const OTHER: ClassId = ClassId(99);

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum WindowCall {
        Restore(&'static str),
        Close(&'static str),
    }

    use WindowCall::{Close, Restore};

    #[derive(Default)]
    struct RecordingWindowService {
        calls: Mutex<Vec<WindowCall>>,
    }

    impl RecordingWindowService {
        fn calls(&self) -> Vec<WindowCall> {
            self.calls.lock().clone()
        }

        fn intern(window: &str) -> &'static str {
            match window {
                "desktop" => "desktop",
                "in_game" => "in_game",
                other => panic!("unexpected window name '{other}'"),
            }
        }
    }

    impl WindowingService for RecordingWindowService {
        fn restore(&self, window: &str) {
            self.calls.lock().push(Restore(Self::intern(window)));
        }

        fn close(&self, window: &str) {
            self.calls.lock().push(Close(Self::intern(window)));
        }
    }

    enum QueryScript {
        Game(Option<RawGameInfo>),
        Fail,
    }

    struct ScriptedTracker {
        query: QueryScript,
        // Fired through on_game_started while the query is still in flight,
        // to exercise the startup race.
        fire_during_query: Mutex<Option<RawGameInfo>>,
        subscription: Mutex<Option<(GameInfoCallback, GameInfoCallback)>>,
    }

    impl ScriptedTracker {
        fn new(query: QueryScript) -> Self {
            Self {
                query,
                fire_during_query: Mutex::new(None),
                subscription: Mutex::new(None),
            }
        }

        fn fire_started(&self, info: Option<RawGameInfo>) {
            let subscription = self.subscription.lock();
            let (on_started, _) = subscription.as_ref().expect("not subscribed");
            on_started(info);
        }

        fn fire_ended(&self, info: Option<RawGameInfo>) {
            let subscription = self.subscription.lock();
            let (_, on_ended) = subscription.as_ref().expect("not subscribed");
            on_ended(info);
        }
    }

    #[async_trait::async_trait]
    impl GameTrackingService for ScriptedTracker {
        async fn running_game(&self) -> Result<Option<RawGameInfo>> {
            if let Some(info) = self.fire_during_query.lock().take() {
                self.fire_started(Some(info));
            }

            match &self.query {
                QueryScript::Game(info) => Ok(*info),
                QueryScript::Fail => Err(OverhudError::ServiceUnavailable(
                    "tracker offline".to_string(),
                )),
            }
        }

        async fn subscribe(
            &self,
            on_game_started: GameInfoCallback,
            on_game_ended: GameInfoCallback,
        ) -> Result<()> {
            *self.subscription.lock() = Some((on_game_started, on_game_ended));
            Ok(())
        }
    }

    fn build(
        query: QueryScript,
    ) -> (
        Arc<WindowCoordinator>,
        Arc<ScriptedTracker>,
        Arc<RecordingWindowService>,
    ) {
        let tracker = Arc::new(ScriptedTracker::new(query));
        let recorder = Arc::new(RecordingWindowService::default());
        let service: Arc<dyn WindowingService> = recorder.clone();
        let watcher = GameStatusWatcher::new(tracker.clone(), TARGET);
        let windows = WindowsConfig {
            desktop: "desktop".to_string(),
            in_game: "in_game".to_string(),
        };
        let coordinator = Arc::new(WindowCoordinator::new(watcher, service, &windows));
        (coordinator, tracker, recorder)
    }

    /// Replays recorded calls into the final visibility of each window:
    /// `Some(true)` shown, `Some(false)` hidden, `None` untouched since
    /// launch.
    fn final_state(calls: &[WindowCall]) -> (Option<bool>, Option<bool>) {
        let mut desktop = None;
        let mut in_game = None;
        for call in calls {
            match call {
                Restore("desktop") => desktop = Some(true),
                Close("desktop") => desktop = Some(false),
                Restore("in_game") => in_game = Some(true),
                Close("in_game") => in_game = Some(false),
                other => panic!("unexpected call {other:?}"),
            }
        }
        (desktop, in_game)
    }

    fn assert_exactly_one_shown(calls: &[WindowCall]) {
        match final_state(calls) {
            (Some(true), Some(false)) | (Some(false), Some(true)) => {}
            state => panic!("expected exactly one shown window, got {state:?}"),
        }
    }

    #[tokio::test]
    async fn test_desktop_shown_when_nothing_runs_at_startup() {
        let (coordinator, _, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        let calls = recorder.calls();
        assert_eq!(calls, vec![Close("in_game"), Restore("desktop")]);
        assert_exactly_one_shown(&calls);
    }

    #[tokio::test]
    async fn test_in_game_shown_when_target_runs_at_startup() {
        let (coordinator, _, recorder) =
            build(QueryScript::Game(Some(RawGameInfo::new(TARGET, true))));
        coordinator.run().await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![Close("desktop"), Restore("in_game")]
        );
    }

    #[tokio::test]
    async fn test_desktop_shown_when_foreign_game_runs_at_startup() {
        let (coordinator, _, recorder) =
            build(QueryScript::Game(Some(RawGameInfo::new(OTHER, true))));
        coordinator.run().await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![Close("in_game"), Restore("desktop")]
        );
    }

    #[tokio::test]
    async fn test_desktop_shown_when_query_fails() {
        let (coordinator, _, recorder) = build(QueryScript::Fail);
        coordinator.run().await.expect("query failure must not surface");

        let calls = recorder.calls();
        assert_eq!(calls, vec![Close("in_game"), Restore("desktop")]);
        assert_exactly_one_shown(&calls);
    }

    #[tokio::test]
    async fn test_game_start_switches_to_in_game_window() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        tracker.fire_started(Some(RawGameInfo::new(TARGET, true)));

        let calls = recorder.calls();
        assert_eq!(calls[2..], [Close("desktop"), Restore("in_game")]);
        assert_exactly_one_shown(&calls);
    }

    #[tokio::test]
    async fn test_game_end_switches_back_to_desktop_window() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        tracker.fire_started(Some(RawGameInfo::new(TARGET, true)));
        tracker.fire_ended(Some(RawGameInfo::new(TARGET, false)));

        let calls = recorder.calls();
        assert_eq!(calls[4..], [Close("in_game"), Restore("desktop")]);
        assert_exactly_one_shown(&calls);
    }

    #[tokio::test]
    async fn test_foreign_game_end_does_not_touch_windows() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        tracker.fire_started(Some(RawGameInfo::new(TARGET, true)));
        let before = recorder.calls();

        tracker.fire_ended(Some(RawGameInfo::new(OTHER, false)));

        assert_eq!(recorder.calls(), before);
    }

    #[tokio::test]
    async fn test_absent_notification_does_not_touch_windows() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();
        let before = recorder.calls();

        tracker.fire_started(None);
        tracker.fire_ended(None);

        assert_eq!(recorder.calls(), before);
    }

    #[tokio::test]
    async fn test_repeated_start_events_land_in_same_state() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        tracker.fire_started(Some(RawGameInfo::new(TARGET, true)));
        let once = final_state(&recorder.calls());

        tracker.fire_started(Some(RawGameInfo::new(TARGET, true)));
        let twice = final_state(&recorder.calls());

        assert_eq!(once, twice);
        assert_exactly_one_shown(&recorder.calls());
    }

    #[tokio::test]
    async fn test_mutual_exclusion_across_event_sequences() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        coordinator.run().await.unwrap();

        let sequence = [
            (true, Some(RawGameInfo::new(TARGET, true))),
            (false, Some(RawGameInfo::new(TARGET, false))),
            (true, Some(RawGameInfo::new(OTHER, true))),
            (true, None),
            (true, Some(RawGameInfo::new(TARGET, true))),
            (false, Some(RawGameInfo::new(OTHER, false))),
        ];

        for (started, info) in sequence {
            if started {
                tracker.fire_started(info);
            } else {
                tracker.fire_ended(info);
            }
            assert_exactly_one_shown(&recorder.calls());
        }
    }

    // The startup ordering gap, kept on purpose: a notification landing while
    // the point-in-time query is in flight is applied first and then clobbered
    // by the stale query result.
    #[tokio::test]
    async fn test_stale_query_result_overwrites_early_notification() {
        let (coordinator, tracker, recorder) = build(QueryScript::Game(None));
        *tracker.fire_during_query.lock() = Some(RawGameInfo::new(TARGET, true));

        coordinator.run().await.unwrap();

        let calls = recorder.calls();
        assert_eq!(
            calls,
            vec![
                Close("desktop"),
                Restore("in_game"),
                Close("in_game"),
                Restore("desktop"),
            ]
        );
        assert_eq!(final_state(&calls), (Some(true), Some(false)));
    }
}
