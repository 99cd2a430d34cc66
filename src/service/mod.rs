//! Engine services: alert deduplication, notification, trade recording.

pub mod dedup;
pub mod notifier;
pub mod recorder;

pub use dedup::{AlertDeduplicator, AlertKey};
pub use notifier::{
    Event, ExecutionEvent, LogNotifier, Notifier, NotifierRegistry, NullNotifier,
    OpportunityEvent, WebhookNotifier,
};
pub use recorder::{ExecutionRecorder, PaperExecutor, TradeExecutor};
