//! Which agent actions produce generated content.

/// The three generation tasks the runtime knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTask {
    Summarize,
    Analyze,
    Improve,
}

impl GenerationTask {
    /// Map an action type onto a task. Every other action type has no
    /// generation step and gets `unknown_action_result` instead.
    pub fn for_action(action_type: &str) -> Option<Self> {
        match action_type {
            "summarize_document" => Some(GenerationTask::Summarize),
            "analyze_document" => Some(GenerationTask::Analyze),
            "improve_document" => Some(GenerationTask::Improve),
            _ => None,
        }
    }
}

/// The result text recorded for action types without a generation step.
pub fn unknown_action_result(action_type: &str) -> String {
    format!("Unknown action type: {action_type}")
}
