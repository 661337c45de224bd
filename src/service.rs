use async_trait::async_trait;

use crate::session::ResponseType;

/// The content generation backend. On success the payload is either the
/// generated text itself or a loadable image URL, depending on the requested
/// response type.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, prompt: &str, response_type: ResponseType) -> anyhow::Result<String>;
}
