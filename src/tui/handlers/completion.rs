//! Spawns a simulated completion on a background thread.
//!
//! The TUI thread owns the terminal and must not block on the completion, so
//! the call runs on its own thread against the shared runtime and reports back
//! through channels: cumulative snapshots while streaming, then exactly one
//! final result.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::core::catalog::ModelDescriptor;
use crate::core::llm::{ChatError, CompletionRequest, OnSnapshot, Simulator};
use crate::core::transcript::ChatTurn;

/// Handle to an in-flight completion. Kept until the result arrives even if
/// the transcript is cleared underneath it, so the final send always has a
/// receiver and late patches fall through as no-ops.
pub(crate) struct PendingCompletion {
    pub snapshot_rx: mpsc::Receiver<String>,
    pub result_rx: mpsc::Receiver<Result<String, ChatError>>,
    pub cancel_token: CancellationToken,
    /// Transcript turn the snapshots and result apply to.
    pub turn_id: Uuid,
}

pub(crate) fn spawn_completion(
    rt: &Arc<Runtime>,
    simulator: Arc<Simulator>,
    api_key: String,
    model: ModelDescriptor,
    turns: Vec<ChatTurn>,
    turn_id: Uuid,
) -> PendingCompletion {
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<String>();
    let (result_tx, result_rx) = mpsc::channel::<Result<String, ChatError>>();
    let cancel_token = CancellationToken::new();

    let token = cancel_token.clone();
    let rt = Arc::clone(rt);
    std::thread::spawn(move || {
        let on_snapshot: OnSnapshot = Box::new(move |snapshot| {
            snapshot_tx
                .send(snapshot.to_string())
                .map_err(|e| e.to_string())
        });
        let result = rt.block_on(simulator.complete(
            CompletionRequest {
                api_key: &api_key,
                model: &model,
                turns: &turns,
            },
            Some(on_snapshot),
            Some(token),
        ));
        // Receiver may already be gone if the UI quit; nothing to do then.
        let _ = result_tx.send(result);
    });

    PendingCompletion {
        snapshot_rx,
        result_rx,
        cancel_token,
        turn_id,
    }
}
