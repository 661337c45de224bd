use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::SessionError;
use crate::service::GenerationService;
use crate::session::{SessionEvent, SessionState, SessionStatus};

/// Drives one generation session: routes UI events through the reducer and
/// runs the submit cycle against the generation service.
pub struct SessionController {
    state: SessionState,
    service: Arc<dyn GenerationService>,
}

impl SessionController {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self {
            state: SessionState::new(),
            service,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn handle(&mut self, event: SessionEvent) {
        debug!("session event: {:?}", event);
        self.state.apply(event);
    }

    pub async fn submit(&mut self) -> SessionStatus {
        self.submit_with_hook(|_| {}).await
    }

    /// Runs one submit-and-display cycle. `on_change` fires after every state
    /// transition so the front end can re-render; it must be fast.
    ///
    /// Exactly one call goes out to the service per validated submit. Every
    /// outcome, including the validation short-circuit, lands back in session
    /// state with `loading` off.
    pub async fn submit_with_hook<F>(&mut self, on_change: F) -> SessionStatus
    where
        F: Fn(&SessionState),
    {
        if self.state.loading {
            warn!("submit refused, a generation request is already in flight");
            return self.state.status();
        }

        self.state.apply(SessionEvent::SubmitClicked);
        on_change(&self.state);

        if !self.state.loading {
            // Validation failed; the service was never involved.
            warn!("submit rejected: empty prompt");
            return self.state.status();
        }

        let prompt = self.state.prompt.clone();
        let response_type = self.state.response_type;
        info!("requesting {} generation", response_type);

        let outcome = self.service.generate(&prompt, response_type).await;
        match outcome {
            Ok(payload) => {
                info!("generation succeeded ({} bytes)", payload.len());
                self.state.apply(SessionEvent::GenerationResolved(payload));
            }
            Err(err) => {
                error!("generation failed: {err:#}");
                let message = SessionError::from_service(&err).to_string();
                self.state.apply(SessionEvent::GenerationRejected(message));
            }
        }
        on_change(&self.state);

        self.state.status()
    }
}
