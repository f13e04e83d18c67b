//! In-memory chat transcript: ordered turns plus the streaming pointer.
//!
//! Turns are appended and patched in place, never removed individually; the
//! whole transcript is cleared in bulk. At most one turn streams at a time.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Author of a chat turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One message in the transcript. Content is mutable while `streaming` is set,
/// immutable once finalized.
#[derive(Clone, Debug)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Display name of the model that produced an assistant turn.
    pub model: Option<String>,
    pub streaming: bool,
}

/// Turn data supplied by the caller; id and timestamp are assigned on append.
#[derive(Clone, Debug)]
pub struct NewTurn {
    pub role: Role,
    pub content: String,
    pub model: Option<String>,
    pub streaming: bool,
}

impl NewTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            model: None,
            streaming: false,
        }
    }

    /// Empty assistant placeholder awaiting streamed content.
    pub fn assistant_placeholder(model: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            model: Some(model.into()),
            streaming: true,
        }
    }
}

/// Partial update: only the named fields are replaced.
#[derive(Clone, Debug, Default)]
pub struct TurnPatch {
    pub content: Option<String>,
    pub streaming: Option<bool>,
}

impl TurnPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            streaming: None,
        }
    }

    /// Final content with the streaming flag cleared.
    pub fn finalize(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            streaming: Some(false),
        }
    }

    pub fn stop_streaming() -> Self {
        Self {
            content: None,
            streaming: Some(false),
        }
    }
}

/// Insertion-ordered turns plus the currently-streaming pointer and the
/// global loading flag.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
    streaming_id: Option<Uuid>,
    loading: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn streaming_id(&self) -> Option<Uuid> {
        self.streaming_id
    }

    /// Append a turn with a fresh id and the current timestamp. Returns the id
    /// so the caller can address the turn for later patches.
    pub fn append(&mut self, turn: NewTurn) -> Uuid {
        let id = Uuid::new_v4();
        self.turns.push(ChatTurn {
            id,
            role: turn.role,
            content: turn.content,
            timestamp: Utc::now(),
            model: turn.model,
            streaming: turn.streaming,
        });
        id
    }

    /// Replace only the fields named in `patch` on the matching turn.
    /// Unknown ids are ignored (a completion may outlive a cleared transcript).
    pub fn patch(&mut self, id: Uuid, patch: TurnPatch) {
        let Some(turn) = self.turns.iter_mut().find(|t| t.id == id) else {
            log::debug!("patch for unknown turn {}, ignoring", id);
            return;
        };
        if let Some(content) = patch.content {
            turn.content = content;
        }
        if let Some(streaming) = patch.streaming {
            turn.streaming = streaming;
        }
    }

    /// Point the streaming marker at `id` and raise the loading flag. Any other
    /// turn's streaming flag is cleared so at most one turn streams at a time.
    pub fn mark_streaming(&mut self, id: Uuid) {
        if !self.turns.iter().any(|t| t.id == id) {
            log::debug!("mark_streaming for unknown turn {}, ignoring", id);
            return;
        }
        for turn in &mut self.turns {
            turn.streaming = turn.id == id;
        }
        self.streaming_id = Some(id);
        self.loading = true;
    }

    /// Reset the streaming pointer and loading flag.
    pub fn clear_streaming(&mut self) {
        self.streaming_id = None;
        self.loading = false;
    }

    /// Empty the transcript and clear streaming/loading state.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.streaming_id = None;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_distinct_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.append(NewTurn::user("one"));
        let b = transcript.append(NewTurn::user("two"));
        let c = transcript.append(NewTurn::assistant_placeholder("GPT-5.1"));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(transcript.turns().len(), 3);
    }

    #[test]
    fn patch_replaces_only_named_fields() {
        let mut transcript = Transcript::new();
        let id = transcript.append(NewTurn::assistant_placeholder("GPT-5.1"));

        transcript.patch(id, TurnPatch::content("partial"));
        let turn = &transcript.turns()[0];
        assert_eq!(turn.content, "partial");
        assert!(turn.streaming);
        assert_eq!(turn.model.as_deref(), Some("GPT-5.1"));

        transcript.patch(id, TurnPatch::finalize("done"));
        let turn = &transcript.turns()[0];
        assert_eq!(turn.content, "done");
        assert!(!turn.streaming);
    }

    #[test]
    fn patch_unknown_id_is_noop() {
        let mut transcript = Transcript::new();
        let id = transcript.append(NewTurn::user("hello"));
        transcript.patch(Uuid::new_v4(), TurnPatch::content("overwritten"));
        assert_eq!(transcript.turns().len(), 1);
        assert_eq!(transcript.turns()[0].content, "hello");
        assert_eq!(transcript.turns()[0].id, id);
    }

    #[test]
    fn at_most_one_turn_streams() {
        let mut transcript = Transcript::new();
        let first = transcript.append(NewTurn::assistant_placeholder("A"));
        transcript.mark_streaming(first);
        let second = transcript.append(NewTurn::assistant_placeholder("B"));
        transcript.mark_streaming(second);

        let streaming: Vec<_> = transcript.turns().iter().filter(|t| t.streaming).collect();
        assert_eq!(streaming.len(), 1);
        assert_eq!(streaming[0].id, second);
        assert_eq!(transcript.streaming_id(), Some(second));
        assert!(transcript.is_loading());
    }

    #[test]
    fn mark_streaming_unknown_id_is_noop() {
        let mut transcript = Transcript::new();
        transcript.append(NewTurn::user("hello"));
        transcript.mark_streaming(Uuid::new_v4());
        assert_eq!(transcript.streaming_id(), None);
        assert!(!transcript.is_loading());
    }

    #[test]
    fn clear_streaming_resets_pointer_and_loading() {
        let mut transcript = Transcript::new();
        let id = transcript.append(NewTurn::assistant_placeholder("A"));
        transcript.mark_streaming(id);
        transcript.clear_streaming();
        assert_eq!(transcript.streaming_id(), None);
        assert!(!transcript.is_loading());
    }

    #[test]
    fn reset_empties_everything() {
        let mut transcript = Transcript::new();
        let id = transcript.append(NewTurn::assistant_placeholder("A"));
        transcript.mark_streaming(id);
        transcript.reset();
        assert!(transcript.is_empty());
        assert_eq!(transcript.streaming_id(), None);
        assert!(!transcript.is_loading());
    }
}
