//! # warden-generate
//!
//! Content generators for the warden runtime and the checks applied to what
//! they produce.
//!
//! - [`FallbackGenerator`]: deterministic canned output, never fails
//! - [`ChatCompletionGenerator`]: OpenAI-compatible endpoint (Groq by default)
//! - [`WithFallback`]: use a second generator when the first one errors
//! - [`VerifiedGenerator`]: JSON Schema check on every output
//!
//! ```rust,ignore
//! let generator = warden_generate::default_generator();
//! let lifecycle = ActionLifecycle::new(agents, settings, actions, generator, audit);
//! ```

use std::sync::Arc;

use tracing::info;

use warden_core::traits::ContentGenerator;

pub mod chat;
pub mod combinator;
pub mod fallback;
pub mod task;
pub mod verify;

pub use chat::ChatCompletionGenerator;
pub use combinator::WithFallback;
pub use fallback::FallbackGenerator;
pub use task::GenerationTask;
pub use verify::VerifiedGenerator;

/// The generator stack used by the demo binary.
///
/// With `GROQ_API_KEY` set: verified chat completions that fall back to the
/// canned generator on error. Without it: the verified canned generator.
pub fn default_generator() -> Arc<dyn ContentGenerator> {
    match ChatCompletionGenerator::from_env() {
        Ok(chat) => {
            info!(model = chat.model(), "using chat-completion generator");
            Arc::new(VerifiedGenerator::new(WithFallback::new(
                chat,
                FallbackGenerator::new(),
            )))
        }
        Err(_) => {
            info!("no API key configured; using fallback generator");
            Arc::new(VerifiedGenerator::new(FallbackGenerator::new()))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
