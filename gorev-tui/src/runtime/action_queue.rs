use gorev_api::ApiError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A mutation or load decided by key handling, run against the API by
/// the action loop.
#[derive(Debug, Clone)]
pub(super) enum Action {
    CreateTask {
        title: String,
        due_date: Option<String>,
    },
    ToggleTask {
        id: i64,
    },
    SaveEdit {
        id: i64,
        title: String,
        due_date: Option<String>,
    },
    ConfirmDelete {
        id: i64,
    },
    /// Persist the current id order in the background. The local order
    /// was already applied when the drop happened.
    PersistOrder,
    ReloadTasks,
    Logout,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

/// Completion of background work. Carries the session epoch captured
/// when the work was spawned so stale results can be dropped.
#[derive(Debug)]
pub(super) enum BackgroundResult {
    OrderPersisted {
        epoch: u64,
        result: Result<(), ApiError>,
    },
}

pub(super) type ResultTx = UnboundedSender<BackgroundResult>;
pub(super) type ResultRx = UnboundedReceiver<BackgroundResult>;

pub(super) fn result_channel() -> (ResultTx, ResultRx) {
    mpsc::unbounded_channel()
}
