//! TUI application state: transcript, credential, selection, popups, scroll.

use std::sync::Arc;
use std::time::Instant;

use ratatui::widgets::ListState;

use crate::core::api_key::KeyStore;
use crate::core::catalog::ModelDescriptor;
use crate::core::llm::{ApiError, Simulator};
use crate::core::transcript::Transcript;

/// State for the model selector popup.
pub struct ModelSelectorState {
    pub selected_index: usize,
    pub list_state: ListState,
    /// Filter query (case-insensitive search on model id/name).
    pub filter: String,
}

/// State for the API key popup.
pub struct KeyPopupState {
    pub input: String,
    /// Show the typed key as plain text instead of masked dots.
    pub reveal: bool,
}

/// Transient notification shown in the corner until `until`.
pub struct Toast {
    pub title: String,
    pub body: String,
    pub is_error: bool,
    pub until: Instant,
}

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Bottom
    }
}

pub struct App {
    pub transcript: Transcript,
    pub key_store: KeyStore,
    /// The active model; sends are blocked while unset.
    pub selected_model: Option<ModelDescriptor>,
    pub simulator: Arc<Simulator>,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// When set, show model selector popup (Alt+M).
    pub model_selector: Option<ModelSelectorState>,
    /// When set, show API key popup (Alt+K).
    pub key_popup: Option<KeyPopupState>,
    /// Current classified failure, dismissible with Esc. New errors replace it.
    pub error_alert: Option<ApiError>,
    pub(crate) toast: Option<Toast>,
}

impl App {
    pub fn new(key_store: KeyStore, model: Option<ModelDescriptor>) -> Self {
        Self {
            transcript: Transcript::new(),
            key_store,
            selected_model: model,
            simulator: Arc::new(Simulator::new()),
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            model_selector: None,
            key_popup: None,
            error_alert: None,
            toast: None,
        }
    }

    pub(crate) fn set_toast(&mut self, title: &str, body: &str, is_error: bool) {
        self.toast = Some(Toast {
            title: title.to_string(),
            body: body.to_string(),
            is_error,
            until: Instant::now() + super::constants::TOAST_DURATION,
        });
    }

    /// Drop the toast once its display window has passed.
    pub(crate) fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| Instant::now() >= t.until) {
            self.toast = None;
        }
    }

    /// Dismiss the error alert and the simulator's stored error with it.
    pub(crate) fn dismiss_error(&mut self) {
        self.error_alert = None;
        self.simulator.clear_error();
    }

    /// Reset to an empty transcript.
    pub(crate) fn clear_chat(&mut self) {
        self.transcript.reset();
        self.scroll = ScrollPosition::default();
        self.last_max_scroll = 0;
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line((pos + n).min(self.last_max_scroll));
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
