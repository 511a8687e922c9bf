//! Generator combinators.

use async_trait::async_trait;
use tracing::warn;

use warden_contracts::{action::GeneratedContent, error::WardenResult};
use warden_core::traits::ContentGenerator;

/// Try `primary`; on any error log it and answer from `fallback` instead.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> ContentGenerator for WithFallback<P, F>
where
    P: ContentGenerator,
    F: ContentGenerator,
{
    async fn generate(
        &self,
        action_type: &str,
        title: &str,
        content: &str,
    ) -> WardenResult<GeneratedContent> {
        match self.primary.generate(action_type, title, content).await {
            Ok(generated) => Ok(generated),
            Err(e) => {
                warn!(action_type = %action_type, error = %e, "primary generator failed; using fallback");
                self.fallback.generate(action_type, title, content).await
            }
        }
    }
}
