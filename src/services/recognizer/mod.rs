pub mod luis;

use async_trait::async_trait;

use crate::models::RecognitionResult;

/// An external NLU service that turns an utterance into intents and entities.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> anyhow::Result<RecognitionResult>;
}
