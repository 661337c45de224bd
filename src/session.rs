use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseType {
    #[default]
    Text,
    Image,
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResponseType::Text => write!(f, "text"),
            ResponseType::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// One generation session: the prompt being edited, the selected response
/// type, and the outcome of the most recent submit, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub prompt: String,
    pub response_type: ResponseType,
    pub loading: bool,
    pub result: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    PromptEdited(String),
    ResponseTypeSelected(ResponseType),
    SubmitClicked,
    GenerationResolved(String),
    GenerationRejected(String),
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        if self.loading {
            SessionStatus::Loading
        } else if self.error.is_some() {
            SessionStatus::Failed
        } else if self.result.is_some() {
            SessionStatus::Succeeded
        } else {
            SessionStatus::Idle
        }
    }

    /// Applies one event to the session. Pure state transition, no IO.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PromptEdited(text) => {
                self.prompt = text;
            }
            SessionEvent::ResponseTypeSelected(response_type) => {
                self.response_type = response_type;
            }
            SessionEvent::SubmitClicked => {
                if self.loading {
                    // One request in flight at a time.
                    debug!("submit ignored, generation already in flight");
                    return;
                }
                if self.prompt.trim().is_empty() {
                    self.result = None;
                    self.error = Some(SessionError::Validation.to_string());
                    return;
                }
                // Clear the previous outcome before the call starts.
                self.loading = true;
                self.result = None;
                self.error = None;
            }
            SessionEvent::GenerationResolved(payload) => {
                self.loading = false;
                self.result = Some(payload);
                self.error = None;
            }
            SessionEvent::GenerationRejected(message) => {
                self.loading = false;
                self.result = None;
                self.error = Some(message);
            }
        }
    }
}
