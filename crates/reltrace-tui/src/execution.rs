use std::sync::Arc;

use reltrace_core::dump::DumpConfig;
use reltrace_core::engine::{DumpEngine, DumpReport};
use reltrace_core::error::ReltraceResult;

/// Run `engine` on `config` in a background tokio task.
/// Returns a receiver for the single outcome plus a JoinHandle for cancellation.
pub fn spawn_execution(
    engine: Arc<dyn DumpEngine>,
    config: DumpConfig,
) -> (
    tokio::sync::mpsc::UnboundedReceiver<ReltraceResult<DumpReport>>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        tracing::debug!(engine = engine.name(), "Starting dump engine");
        let result = engine.execute(&config).await;
        if let Err(e) = &result {
            tracing::error!("Dump engine failed: {e}");
        }
        // The loop may already be gone if the user quit.
        let _ = tx.send(result);
    });

    (rx, handle)
}
