//! Simulated model calls: canned streaming responses with cancellation.
//!
//! No real request leaves the process. The response text is synthesized from
//! the selected model descriptor and, when streaming, delivered as cumulative
//! snapshots with a fixed delay before each newline-delimited segment.

mod error;
mod response;

use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::catalog::ModelDescriptor;
use crate::core::transcript::ChatTurn;

pub use error::{ApiError, ChatError, ErrorKind};

/// Delay before each streamed segment.
const SEGMENT_DELAY: Duration = Duration::from_millis(50);

/// Snapshot callback: receives the cumulative text so far, a full replacement
/// for previously displayed content (never an incremental delta). Returning
/// `Err` aborts the completion with that message.
pub type OnSnapshot = Box<dyn Fn(&str) -> Result<(), String> + Send>;

pub struct CompletionRequest<'a> {
    /// Accepted but never transmitted; no real call is made.
    pub api_key: &'a str,
    pub model: &'a ModelDescriptor,
    /// Conversation so far. Accepted but does not alter the canned output.
    pub turns: &'a [ChatTurn],
}

/// Simulated API client. Retains the most recent classified failure until it
/// is cleared or replaced by a newer one.
#[derive(Default)]
pub struct Simulator {
    last_error: Mutex<Option<ApiError>>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent failure, if any.
    pub fn last_error(&self) -> Option<ApiError> {
        self.last_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear_error(&self) {
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Run a simulated completion. With a snapshot callback the text streams
    /// segment by segment; without one it returns immediately. Failures are
    /// classified, recorded as the current error, and returned to the caller;
    /// cancellation is terminal but not recorded as an error.
    pub async fn complete(
        &self,
        request: CompletionRequest<'_>,
        on_snapshot: Option<OnSnapshot>,
        cancel: Option<CancellationToken>,
    ) -> Result<String, ChatError> {
        log::debug!(
            "simulating completion for {} ({} prior turns)",
            request.model.id,
            request.turns.len()
        );
        let result = run(request, on_snapshot, cancel).await;
        if let Err(ChatError::Api(ref e)) = result {
            *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(e.clone());
        }
        result
    }
}

async fn run(
    request: CompletionRequest<'_>,
    on_snapshot: Option<OnSnapshot>,
    cancel: Option<CancellationToken>,
) -> Result<String, ChatError> {
    let text = response::compose(request.model);
    let Some(on_snapshot) = on_snapshot else {
        return Ok(text);
    };
    let cancel = cancel.unwrap_or_default();
    let mut accumulated = String::new();
    for segment in text.split('\n') {
        tokio::select! {
            _ = cancel.cancelled() => return Err(ChatError::Cancelled),
            _ = tokio::time::sleep(SEGMENT_DELAY) => {}
        }
        accumulated.push_str(segment);
        accumulated.push('\n');
        on_snapshot(&accumulated).map_err(|msg| ChatError::Api(ApiError::classify(msg)))?;
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::catalog;

    fn request(model: &'static ModelDescriptor) -> CompletionRequest<'static> {
        CompletionRequest {
            api_key: "sk-test",
            model,
            turns: &[],
        }
    }

    #[tokio::test]
    async fn without_callback_returns_full_text() {
        let sim = Simulator::new();
        let model = catalog::find("qwen/qwen3-32b").unwrap();
        let text = sim.complete(request(model), None, None).await.unwrap();
        assert!(text.contains("Qwen3 32B"));
        assert!(sim.last_error().is_none());
    }

    #[tokio::test]
    async fn snapshots_are_cumulative_full_replacements() {
        let sim = Simulator::new();
        let model = catalog::find("openai/gpt-5-mini").unwrap();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(vec![]));
        let seen_cb = Arc::clone(&seen);
        let on_snapshot: OnSnapshot = Box::new(move |s| {
            seen_cb.lock().unwrap().push(s.to_string());
            Ok(())
        });

        let text = sim
            .complete(request(model), Some(on_snapshot), None)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), text.split('\n').count());
        // Each snapshot extends the previous one; the last covers the whole text.
        for pair in seen.windows(2) {
            assert!(pair[1].starts_with(&pair[0]));
        }
        assert_eq!(seen.last().unwrap().trim_end_matches('\n'), text);
    }

    #[tokio::test]
    async fn key_and_history_do_not_alter_output() {
        let sim = Simulator::new();
        let model = catalog::find("z-ai/glm-4.7").unwrap();
        let a = sim.complete(request(model), None, None).await.unwrap();
        let other = CompletionRequest {
            api_key: "sk-entirely-different",
            model,
            turns: &[],
        };
        let b = sim.complete(other, None, None).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_stream() {
        let sim = Simulator::new();
        let model = catalog::find("qwen/qwen3-32b").unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let on_snapshot: OnSnapshot = Box::new(|_| Ok(()));
        let result = sim
            .complete(request(model), Some(on_snapshot), Some(token))
            .await;
        assert!(matches!(result, Err(ChatError::Cancelled)));
        // Cancellation is not an API failure.
        assert!(sim.last_error().is_none());
    }

    #[tokio::test]
    async fn failing_callback_is_classified_and_recorded() {
        let sim = Simulator::new();
        let model = catalog::find("qwen/qwen3-32b").unwrap();
        let on_snapshot: OnSnapshot = Box::new(|_| Err("upstream said 429".to_string()));
        let result = sim.complete(request(model), Some(on_snapshot), None).await;
        match result {
            Err(ChatError::Api(e)) => assert_eq!(e.kind, ErrorKind::RateLimit),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
        let stored = sim.last_error().expect("error recorded");
        assert_eq!(stored.kind, ErrorKind::RateLimit);

        sim.clear_error();
        assert!(sim.last_error().is_none());
    }
}
