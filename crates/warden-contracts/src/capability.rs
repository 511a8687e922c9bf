//! Capability vocabulary and the action → capability table.
//!
//! Both vocabularies are closed. An agent may only take an action if it holds
//! at least one of the capabilities listed for that action below; an action
//! string outside the vocabulary has no table entry and is always denied.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An atomic grant held by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ReadDocuments,
    SuggestEdits,
    CreateDocuments,
    EditDocuments,
    DeleteDocuments,
    AnalyzeContent,
    SummarizeContent,
    TranslateContent,
    GenerateContent,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::ReadDocuments,
        Capability::SuggestEdits,
        Capability::CreateDocuments,
        Capability::EditDocuments,
        Capability::DeleteDocuments,
        Capability::AnalyzeContent,
        Capability::SummarizeContent,
        Capability::TranslateContent,
        Capability::GenerateContent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ReadDocuments => "read_documents",
            Capability::SuggestEdits => "suggest_edits",
            Capability::CreateDocuments => "create_documents",
            Capability::EditDocuments => "edit_documents",
            Capability::DeleteDocuments => "delete_documents",
            Capability::AnalyzeContent => "analyze_content",
            Capability::SummarizeContent => "summarize_content",
            Capability::TranslateContent => "translate_content",
            Capability::GenerateContent => "generate_content",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of capabilities granted to one agent.
///
/// Ordered so that serialized agents and log lines are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    inner: BTreeSet<Capability>,
}

impl CapabilitySet {
    /// Grant a capability to this set.
    pub fn grant(&mut self, capability: Capability) {
        self.inner.insert(capability);
    }

    /// Remove a capability. Returns true if it was held.
    pub fn revoke(&mut self, capability: Capability) -> bool {
        self.inner.remove(&capability)
    }

    /// Return true if the set contains the given capability.
    pub fn has(&self, capability: Capability) -> bool {
        self.inner.contains(&capability)
    }

    /// Return true if the set holds at least one of `alternatives`.
    pub fn has_any(&self, alternatives: &[Capability]) -> bool {
        alternatives.iter().any(|c| self.inner.contains(c))
    }

    pub fn all(&self) -> impl Iterator<Item = Capability> + '_ {
        self.inner.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// The coarse actions an agent can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    Read,
    Create,
    Update,
    Delete,
    AnalyzeDocument,
    SummarizeDocument,
    TranslateDocument,
    ImproveDocument,
}

impl AgentAction {
    pub const ALL: [AgentAction; 8] = [
        AgentAction::Read,
        AgentAction::Create,
        AgentAction::Update,
        AgentAction::Delete,
        AgentAction::AnalyzeDocument,
        AgentAction::SummarizeDocument,
        AgentAction::TranslateDocument,
        AgentAction::ImproveDocument,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgentAction::Read => "read",
            AgentAction::Create => "create",
            AgentAction::Update => "update",
            AgentAction::Delete => "delete",
            AgentAction::AnalyzeDocument => "analyze_document",
            AgentAction::SummarizeDocument => "summarize_document",
            AgentAction::TranslateDocument => "translate_document",
            AgentAction::ImproveDocument => "improve_document",
        }
    }

    /// Look up an action by its wire name. `None` means "no table entry".
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// The capabilities that satisfy this action. Holding any one is enough.
    pub fn required_capabilities(self) -> &'static [Capability] {
        match self {
            AgentAction::Read => &[Capability::ReadDocuments],
            AgentAction::Create => &[Capability::CreateDocuments],
            AgentAction::Update => &[Capability::EditDocuments, Capability::SuggestEdits],
            AgentAction::Delete => &[Capability::DeleteDocuments],
            AgentAction::AnalyzeDocument => &[Capability::AnalyzeContent],
            AgentAction::SummarizeDocument => &[Capability::SummarizeContent],
            AgentAction::TranslateDocument => &[Capability::TranslateContent],
            AgentAction::ImproveDocument => &[
                Capability::EditDocuments,
                Capability::SuggestEdits,
                Capability::GenerateContent,
            ],
        }
    }

    /// Actions a `read_only` setting permits without supervision.
    pub fn is_read_class(self) -> bool {
        matches!(
            self,
            AgentAction::Read | AgentAction::AnalyzeDocument | AgentAction::SummarizeDocument
        )
    }

    /// Actions a `suggest_only` setting always routes through approval.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            AgentAction::Create | AgentAction::Update | AgentAction::Delete | AgentAction::ImproveDocument
        )
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
