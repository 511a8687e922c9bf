//! Deterministic generator used when no model endpoint is configured or the
//! endpoint is failing.

use async_trait::async_trait;
use tracing::debug;

use warden_contracts::{
    action::{DocumentChanges, GeneratedContent},
    error::WardenResult,
};
use warden_core::traits::ContentGenerator;

use crate::task::{unknown_action_result, GenerationTask};

/// Produces canned text derived from the document title and length.
///
/// Never fails, so it is safe as the last link of a `WithFallback` chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    fn document_type(title: &str) -> &'static str {
        if title.contains("Report") {
            "Report"
        } else if title.contains("Policy") {
            "Policy"
        } else {
            "General Document"
        }
    }

    /// The synchronous core of `generate`.
    pub fn produce(&self, action_type: &str, title: &str, content: &str) -> GeneratedContent {
        let Some(task) = GenerationTask::for_action(action_type) else {
            return GeneratedContent {
                result: unknown_action_result(action_type),
                changes: None,
            };
        };

        debug!(action_type = %action_type, "generating fallback content");
        let chars = content.chars().count();

        match task {
            GenerationTask::Summarize => GeneratedContent {
                result: format!(
                    "Fallback content: Summary of \"{title}\"\n\n\
                     This is a mock summary generated because the AI API is not available.\n\n\
                     The document appears to be about {} and contains approximately {chars} characters.\n\n\
                     For a real summary, please ensure the API key is properly configured.",
                    title.to_lowercase()
                ),
                changes: None,
            },
            GenerationTask::Analyze => GeneratedContent {
                result: format!(
                    "Fallback content: Analysis of \"{title}\"\n\n\
                     Document Type: {}\n\n\
                     Key Topics: {title}\n\n\
                     Structure: The document contains approximately {chars} characters.\n\n\
                     This is a mock analysis generated because the AI API is not available.\n\
                     For a real analysis, please ensure the API key is properly configured.",
                    Self::document_type(title)
                ),
                changes: None,
            },
            GenerationTask::Improve => GeneratedContent {
                result: "Fallback content: Document improvement suggestions generated".to_string(),
                changes: Some(DocumentChanges {
                    title: format!("Improved: {title}"),
                    content: format!(
                        "{content}\n\n[This is mock improved content generated because the AI API \
                         is not available. In a real scenario, this would contain AI-suggested \
                         improvements to your document.]"
                    ),
                }),
            },
        }
    }
}

#[async_trait]
impl ContentGenerator for FallbackGenerator {
    async fn generate(
        &self,
        action_type: &str,
        title: &str,
        content: &str,
    ) -> WardenResult<GeneratedContent> {
        Ok(self.produce(action_type, title, content))
    }
}
